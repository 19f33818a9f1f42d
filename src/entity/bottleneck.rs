use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::DelayCategory;

/// Number of incidents attributed to a delay cause.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BottleneckEntry {
    pub category:  DelayCategory,
    pub incidents: u32,
}

impl BottleneckEntry {
    pub fn label(&self) -> &'static str {
        self.category.label()
    }
}
