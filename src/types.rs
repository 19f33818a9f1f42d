use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;
use strum::Display as StrumDisplay;
use strum::VariantArray;
use thiserror::Error;

/// Factory identity. Factories are numbered from 1 in roster order.
pub type FactoryId = u32;

pub type Result<T, E = KpiError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum KpiError {
    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: &'static str, reason: String },
}

macro_rules! invalid_arg {
    ($name:expr, $($fmt:tt)+) => {
        $crate::types::KpiError::InvalidArgument {
            name:   $name,
            reason: format!($($fmt)+),
        }
    };
}

pub(crate) use invalid_arg;

/// Operating status shared by factories and assembly lines.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    StrumDisplay,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FactoryStatus {
    Running,
    Delayed,
    Maintenance,
}

impl FactoryStatus {
    /// Capitalized form used in tables.
    pub fn title(&self) -> &'static str {
        match self {
            FactoryStatus::Running => "Running",
            FactoryStatus::Delayed => "Delayed",
            FactoryStatus::Maintenance => "Maintenance",
        }
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    StrumDisplay,
    VariantArray,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DelayCategory {
    SupplierIssues,
    TransportBreakdown,
    Customs,
    Weather,
    EquipmentFailure,
}

impl DelayCategory {
    /// Human-readable name, as shown on the bottleneck chart.
    pub fn label(&self) -> &'static str {
        match self {
            DelayCategory::SupplierIssues => "Supplier Issues",
            DelayCategory::TransportBreakdown => "Transport Breakdown",
            DelayCategory::Customs => "Customs Delays",
            DelayCategory::Weather => "Weather",
            DelayCategory::EquipmentFailure => "Equipment Failure",
        }
    }
}

/// Scalar amplifying simulated delay impact. Used for "what-if" scenarios: `1.0` is the baseline, `2.0` doubles the
/// lost revenue.
///
/// The value is always finite and non-negative.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DelayMultiplier(f64);

impl DelayMultiplier {
    pub const BASELINE: DelayMultiplier = DelayMultiplier(1.0);

    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(invalid_arg!("delay_multiplier", "{value} is not a finite number"));
        }
        if value < 0.0 {
            return Err(invalid_arg!("delay_multiplier", "{value} is negative"));
        }
        Ok(Self(value))
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for DelayMultiplier {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl TryFrom<f64> for DelayMultiplier {
    type Error = KpiError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<DelayMultiplier> for f64 {
    fn from(multiplier: DelayMultiplier) -> Self {
        multiplier.0
    }
}

impl Display for DelayMultiplier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}x", self.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn multiplier_rejects_garbage() {
        assert!(DelayMultiplier::new(-0.1).is_err());
        assert!(DelayMultiplier::new(f64::NAN).is_err());
        assert!(DelayMultiplier::new(f64::INFINITY).is_err());
        assert_eq!(DelayMultiplier::new(0.0).unwrap().value(), 0.0);
        assert_eq!(DelayMultiplier::default(), DelayMultiplier::BASELINE);
        assert_eq!(DelayMultiplier::new(1.5).unwrap().to_string(), "1.5x");
    }

    #[test]
    fn multiplier_serde() {
        let m: DelayMultiplier = serde_json::from_str("2.5").unwrap();
        assert_eq!(m.value(), 2.5);
        assert!(serde_json::from_str::<DelayMultiplier>("-1.0").is_err());
    }

    #[test]
    fn enum_names() {
        assert_eq!(FactoryStatus::Maintenance.to_string(), "maintenance");
        assert_eq!(FactoryStatus::Delayed.title(), "Delayed");
        assert_eq!(DelayCategory::SupplierIssues.to_string(), "supplier_issues");
        assert_eq!(DelayCategory::Customs.label(), "Customs Delays");
        assert_eq!(DelayCategory::VARIANTS.len(), 5);
        assert_eq!(
            serde_json::to_string(&DelayCategory::EquipmentFailure).unwrap(),
            "\"equipment_failure\""
        );
    }

    #[test]
    fn invalid_arg_message() {
        let err = invalid_arg!("days", "must be at least 1, got {}", 0);
        assert_eq!(err.to_string(), "invalid argument 'days': must be at least 1, got 0");
    }
}
