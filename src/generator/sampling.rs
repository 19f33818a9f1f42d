use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;
use strum::VariantArray;

use crate::types::FactoryStatus;

/// Relative weights of [`FactoryStatus`] variants, in declaration order.
pub(crate) type StatusWeights = [f64; 3];

pub(crate) const FACTORY_STATUS_WEIGHTS: StatusWeights = [0.80, 0.15, 0.05];
pub(crate) const LINE_STATUS_WEIGHTS: StatusWeights = [0.85, 0.12, 0.03];

/// Draws a status with probability proportional to its weight.
pub(crate) fn weighted_status<R: Rng + ?Sized>(rng: &mut R, weights: &StatusWeights) -> FactoryStatus {
    let index = WeightedIndex::<f64>::new(weights).expect("status weights must be non-negative and not all zero");
    FactoryStatus::VARIANTS[index.sample(rng)]
}

/// `base` shifted by a uniform offset in `[-base * fraction, base * fraction)`.
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, base: f64, fraction: f64) -> f64 {
    let spread = base.abs() * fraction;
    if spread <= 0.0 {
        return base;
    }
    base + rng.random_range(-spread..spread)
}

/// `value` times a factor drawn from `[low, high)`, truncated.
pub(crate) fn scaled<R: Rng + ?Sized>(rng: &mut R, value: u32, low: f64, high: f64) -> u32 {
    (value as f64 * rng.random_range(low..high)) as u32
}
