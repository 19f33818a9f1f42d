use chrono::NaiveDate;
use fieldx::fxstruct;
use serde::Deserialize;
use serde::Serialize;

/// Share of lost revenue spent on expedited shipping.
pub const EXPEDITED_SHIPPING_SHARE: f64 = 0.3;
/// Share of lost revenue spent on idle labor.
pub const IDLE_LABOR_SHARE: f64 = 0.4;
/// Share of lost revenue paid as penalties.
pub const PENALTIES_SHARE: f64 = 0.3;

/// Daily revenue loss and its cost breakdown.
#[fxstruct(no_new, default(off), get(copy))]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinancialRecord {
    pub date:                    NaiveDate,
    pub revenue_lost:            f64,
    pub cost_expedited_shipping: f64,
    pub cost_idle_labor:         f64,
    pub cost_penalties:          f64,
}

impl FinancialRecord {
    pub(crate) fn split(date: NaiveDate, revenue_lost: f64) -> Self {
        Self {
            date,
            revenue_lost,
            cost_expedited_shipping: revenue_lost * EXPEDITED_SHIPPING_SHARE,
            cost_idle_labor: revenue_lost * IDLE_LABOR_SHARE,
            cost_penalties: revenue_lost * PENALTIES_SHARE,
        }
    }

    pub fn total_costs(&self) -> f64 {
        self.cost_expedited_shipping + self.cost_idle_labor + self.cost_penalties
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn split_is_30_40_30() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let record = FinancialRecord::split(date, 1_000.0);
        assert_eq!(record.cost_expedited_shipping(), 300.0);
        assert_eq!(record.cost_idle_labor(), 400.0);
        assert_eq!(record.cost_penalties(), 300.0);
        assert!((record.total_costs() - record.revenue_lost()).abs() < 1e-9);
    }
}
