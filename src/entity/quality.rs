use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::FactoryId;

/// Quality control outcome for a factory. `total == passed + failed` always holds.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityMetric {
    pub factory_id: FactoryId,
    pub passed:     u32,
    pub failed:     u32,
    pub total:      u32,
}

impl QualityMetric {
    pub(crate) fn new(factory_id: FactoryId, passed: u32, failed: u32) -> Self {
        Self {
            factory_id,
            passed,
            failed,
            total: passed + failed,
        }
    }

    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total as f64
    }
}
