//! Pool-utilization sources.
//!
//! The rate curves are utilization-agnostic; where the utilization
//! figure comes from is a provider concern. The current provider is a
//! constant placeholder (0.5), kept behind a trait so tests and future
//! pool models can substitute real figures.

use crate::error::ConfigError;

/// Supplies the lending-pool utilization in `[0, 1]`.
pub trait UtilizationSource: Send + Sync {
    fn utilization(&self) -> f64;
}

/// Fixed utilization placeholder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantUtilization(f64);

impl ConstantUtilization {
    pub fn new(utilization: f64) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&utilization) {
            return Err(ConfigError::InvalidUtilization(utilization));
        }
        Ok(Self(utilization))
    }
}

impl Default for ConstantUtilization {
    fn default() -> Self {
        Self(0.5)
    }
}

impl UtilizationSource for ConstantUtilization {
    fn utilization(&self) -> f64 {
        self.0
    }
}
