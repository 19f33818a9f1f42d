//! Immutable records produced by [`DataGenerator`](crate::DataGenerator).
//!
//! Records are plain values: public fields plus getters. The generator never mutates a record after handing it out.

pub mod assembly_line;
pub mod bottleneck;
pub mod delay;
pub mod factory;
pub mod financial;
pub mod inventory;
pub mod kpi;
pub mod product_line;
pub mod production;
pub mod quality;

#[doc(inline)]
pub use assembly_line::AssemblyLine;
#[doc(inline)]
pub use bottleneck::BottleneckEntry;
#[doc(inline)]
pub use delay::DelayRecord;
#[doc(inline)]
pub use factory::Factory;
#[doc(inline)]
pub use financial::FinancialRecord;
#[doc(inline)]
pub use inventory::InventoryItem;
#[doc(inline)]
pub use kpi::KpiData;
#[doc(inline)]
pub use product_line::ProductLine;
#[doc(inline)]
pub use production::ProductionRecord;
#[doc(inline)]
pub use quality::QualityMetric;
