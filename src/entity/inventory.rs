use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

use crate::types::FactoryId;

/// Stock level of one part at one factory.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    #[fieldx(get(copy(off)))]
    pub part_name:     String,
    pub current_stock: u32,
    pub target_stock:  u32,
    /// 30% of the target stock.
    pub reorder_point: u32,
    pub factory_id:    FactoryId,
}

impl InventoryItem {
    pub fn needs_reorder(&self) -> bool {
        self.current_stock <= self.reorder_point
    }
}
