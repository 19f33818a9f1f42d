//! Compact text rendering of KPI values, as shown on the dashboard cards.

use serde::Serialize;

use crate::entity::KpiData;

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// `1_500_000` becomes `1.5M`, `2_345` becomes `2.3K`. Anything below a thousand is truncated to an integer.
pub fn compact_number(value: f64) -> String {
    if value >= MILLION {
        format!("{:.1}M", value / MILLION)
    }
    else if value >= THOUSAND {
        format!("{:.1}K", value / THOUSAND)
    }
    else {
        format!("{}", value.trunc() as i64)
    }
}

/// Same as [`compact_number`] with a dollar sign. Small amounts are rounded to whole dollars.
pub fn compact_currency(value: f64) -> String {
    if value >= MILLION {
        format!("${:.1}M", value / MILLION)
    }
    else if value >= THOUSAND {
        format!("${:.1}K", value / THOUSAND)
    }
    else {
        format!("${value:.0}")
    }
}

/// A ratio as percent with one decimal: `0.953` becomes `95.3%`.
pub fn percentage(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Display strings of the five KPI cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct KpiCards {
    pub total_cars:            String,
    pub total_factories:       String,
    pub on_time_delivery:      String,
    pub lost_revenue:          String,
    pub production_efficiency: String,
}

impl From<&KpiData> for KpiCards {
    fn from(kpi: &KpiData) -> Self {
        Self {
            total_cars:            compact_number(kpi.total_cars_produced as f64),
            total_factories:       kpi.total_factories.to_string(),
            on_time_delivery:      percentage(kpi.on_time_delivery_rate),
            lost_revenue:          compact_currency(kpi.lost_revenue),
            production_efficiency: percentage(kpi.production_efficiency),
        }
    }
}
