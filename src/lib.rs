//! # plant-pulse
//!
//! Synthetic KPI data for a fictional automotive manufacturer with ten factories around the world.
//!
//! The crate produces a consistent, fully random snapshot of the operation: factories and their assembly lines,
//! daily production, parts inventory, quality checks, logistics delays, the financial impact of those delays and a
//! product-line catalog. On top of it, the headline KPIs of a management dashboard are derived.
//!
//! Nothing here is real business data, and nothing is persisted. The values are meant to drive dashboards, demos and
//! tests.
//!
//! # The Basics
//!
//! Everything starts with a [`DataGenerator`]. It fixes the factory roster when constructed; each accessor then draws
//! a fresh sample:
//!
//! ```
//! use plant_pulse::prelude::*;
//!
//! let generator = DataGenerator::seeded(7);
//! let kpi = generator.kpi_data(DelayMultiplier::new(1.5).unwrap());
//!
//! assert_eq!(kpi.total_factories(), 10);
//! assert_eq!(kpi.lost_revenue(), 22_500_000.0);
//!
//! let munich = generator.production_data(Some(2));
//! assert_eq!(munich.len(), 30);
//! ```
//!
//! The `delay_multiplier` parameter is a "what-if" knob: it scales lost revenue and delay costs, and degrades the
//! on-time delivery rate.
//!
//! # Dashboard
//!
//! The [`dashboard`] module keeps the user selections (factory filter, delay multiplier, time range) in an explicit
//! [`DashboardState`](dashboard::DashboardState). Changing any of them renders one
//! [`DashboardSnapshot`](dashboard::DashboardSnapshot) and notifies the subscribers in the order they were added.
//! The aggregations a snapshot is made of are available separately in [`summary`], and [`format`] renders KPI values
//! the way the dashboard cards display them.
//!
//! # Features
//!
//! - `cli`: the `plant-pulse` binary that prints dashboard sections as tables or JSON.

#[cfg(feature = "cli")]
pub mod app;
pub mod dashboard;
pub mod entity;
pub mod format;
pub mod generator;
pub mod summary;
pub mod types;

#[doc(inline)]
pub use generator::DataGenerator;
#[doc(inline)]
pub use types::DelayMultiplier;
#[doc(inline)]
pub use types::KpiError;

pub mod prelude {
    pub use crate::dashboard::Dashboard;
    pub use crate::dashboard::DashboardSnapshot;
    pub use crate::dashboard::DashboardState;
    pub use crate::dashboard::StateChange;
    pub use crate::dashboard::TimeRange;
    pub use crate::entity::*;
    pub use crate::generator::DataGenerator;
    pub use crate::generator::GeneratorOptions;
    pub use crate::types::DelayCategory;
    pub use crate::types::DelayMultiplier;
    pub use crate::types::FactoryId;
    pub use crate::types::FactoryStatus;
    pub use crate::types::KpiError;
}
