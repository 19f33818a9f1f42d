use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

/// Headline metrics derived from the factory roster and the delay multiplier.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KpiData {
    /// Monthly production: sum of the current daily production over all factories, times 30.
    pub total_cars_produced:   u64,
    pub total_factories:       u32,
    /// Within `[0.7, 1.0]`.
    pub on_time_delivery_rate: f64,
    pub lost_revenue:          f64,
    /// Mean factory efficiency.
    pub production_efficiency: f64,
}
