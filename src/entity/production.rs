use chrono::NaiveDate;
use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::FactoryId;

/// Cars produced by a factory on a single day.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub factory_id:        FactoryId,
    #[fieldx(get(copy(off)))]
    pub factory_name:      String,
    pub date:              NaiveDate,
    pub cars_produced:     u32,
    /// The factory's production capacity.
    pub target_production: u32,
}
