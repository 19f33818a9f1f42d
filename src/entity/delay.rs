use chrono::NaiveDate;
use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::DelayCategory;
use crate::types::FactoryId;

/// A single simulated delay incident.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DelayRecord {
    pub date:             NaiveDate,
    pub factory_id:       FactoryId,
    #[fieldx(get(copy(off)))]
    pub factory_name:     String,
    pub category:         DelayCategory,
    /// 1 to 24 hours.
    pub duration_hours:   u32,
    /// Duration times the sampled hourly cost.
    pub financial_impact: f64,
}
