use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::FactoryId;
use crate::types::FactoryStatus;

/// A modeled production site.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Factory {
    pub id:                  FactoryId,
    #[fieldx(get(copy(off)))]
    pub name:                String,
    #[fieldx(get(copy(off)))]
    pub location:            String,
    pub latitude:            f64,
    pub longitude:           f64,
    /// Cars per day the site can produce.
    pub production_capacity: u32,
    /// Cars per day the site currently produces. Sampled as a fraction of the capacity, not clamped to it.
    pub current_production:  u32,
    /// Always within `[0, 1]`.
    pub efficiency:          f64,
    pub status:              FactoryStatus,
}

impl Factory {
    /// Share of the capacity currently in use.
    pub fn utilization(&self) -> f64 {
        if self.production_capacity == 0 {
            return 0.0;
        }
        self.current_production as f64 / self.production_capacity as f64
    }
}
