//! Kinked (two-segment) linear interest-rate curve.
//!
//! Below the optimal utilization the rate climbs gently along `slope1`;
//! above it the excess utilization is priced along the much steeper
//! `slope2`. This is the standard variable-rate model used by Aave-style
//! lending pools.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Parameters of one interest-rate curve.
///
/// The curve is utilization-agnostic: it maps any `u ∈ [0, 1]` to a
/// rate, regardless of where the utilization figure comes from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateCurve {
    pub base_rate: f64,
    /// Kink location. Must be strictly inside (0, 1): both segments
    /// divide by it (or by its complement).
    pub optimal_utilization: f64,
    pub slope1: f64,
    pub slope2: f64,
}

impl RateCurve {
    pub fn new(
        base_rate: f64,
        optimal_utilization: f64,
        slope1: f64,
        slope2: f64,
    ) -> Result<Self, ConfigError> {
        let curve = Self {
            base_rate,
            optimal_utilization,
            slope1,
            slope2,
        };
        curve.validate()?;
        Ok(curve)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.optimal_utilization <= 0.0 || self.optimal_utilization >= 1.0 {
            return Err(ConfigError::InvalidRateCurve(self.optimal_utilization));
        }
        Ok(())
    }

    /// Annualized rate at the given utilization.
    pub fn rate(&self, utilization: f64) -> f64 {
        if utilization <= self.optimal_utilization {
            self.base_rate + (utilization / self.optimal_utilization) * self.slope1
        } else {
            let excess = utilization - self.optimal_utilization;
            self.base_rate + self.slope1 + (excess / (1.0 - self.optimal_utilization)) * self.slope2
        }
    }

    /// ETH curve from the Aave borrow-interest-rate docs.
    pub fn aave_eth() -> Self {
        Self {
            base_rate: 0.0,
            optimal_utilization: 0.45,
            slope1: 0.04,
            slope2: 3.0,
        }
    }

    /// USDC curve from the Aave borrow-interest-rate docs.
    pub fn aave_usdc() -> Self {
        Self {
            base_rate: 0.0,
            optimal_utilization: 0.8,
            slope1: 0.04,
            slope2: 0.75,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_at_zero_utilization_is_base_rate() {
        let curve = RateCurve::new(0.01, 0.8, 0.04, 0.75).unwrap();
        assert_eq!(curve.rate(0.0), 0.01);
    }

    #[test]
    fn below_kink_is_linear_in_utilization() {
        let curve = RateCurve::new(0.0, 0.8, 0.04, 0.75).unwrap();
        // slope below the kink is slope1 / optimal
        let slope = 0.04 / 0.8;
        for u in [0.1, 0.25, 0.4, 0.6] {
            assert!((curve.rate(u) - u * slope).abs() < 1e-12);
        }
    }

    #[test]
    fn continuous_at_the_kink() {
        let curve = RateCurve::new(0.0, 0.45, 0.04, 3.0).unwrap();
        let left = curve.rate(0.45);
        let right = curve.rate(0.45 + 1e-12);
        assert!((left - right).abs() < 1e-9);
    }

    #[test]
    fn above_kink_prices_excess_on_slope2() {
        let curve = RateCurve::new(0.0, 0.45, 0.04, 3.0).unwrap();
        // u = 0.5: 0.04 + (0.05 / 0.55) * 3
        let expected = 0.04 + (0.05 / 0.55) * 3.0;
        assert!((curve.rate(0.5) - expected).abs() < 1e-12);
    }

    #[test]
    fn boundary_kink_is_a_configuration_error() {
        assert!(RateCurve::new(0.0, 0.0, 0.04, 0.75).is_err());
        assert!(RateCurve::new(0.0, 1.0, 0.04, 0.75).is_err());
        assert!(RateCurve::new(0.0, 1.5, 0.04, 0.75).is_err());
    }
}
