//! Per-asset risk parameters.
//!
//! Only the LTV is consumed by the leverage engine; the liquidation
//! threshold and bonus are carried as configuration so a liquidation
//! model can be added without a config format change.

use crate::domain::Asset;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Lending-protocol risk parameters for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParams {
    /// Loan-to-value: max borrowable value as a fraction of collateral value.
    pub ltv: f64,
    pub liquidation_threshold: f64,
    pub liquidation_bonus: f64,
}

impl RiskParams {
    pub fn new(
        ltv: f64,
        liquidation_threshold: f64,
        liquidation_bonus: f64,
    ) -> Result<Self, ConfigError> {
        let params = Self {
            ltv,
            liquidation_threshold,
            liquidation_bonus,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ltv <= 0.0 || self.ltv > 1.0 {
            return Err(ConfigError::InvalidRiskParams(self.ltv));
        }
        Ok(())
    }
}

impl Default for RiskParams {
    /// Aave-style defaults used for both assets.
    fn default() -> Self {
        Self {
            ltv: 0.75,
            liquidation_threshold: 0.80,
            liquidation_bonus: 0.05,
        }
    }
}

/// Risk parameters keyed by asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskTable {
    pub usdc: RiskParams,
    pub eth: RiskParams,
}

impl RiskTable {
    pub fn get(&self, asset: Asset) -> &RiskParams {
        match asset {
            Asset::Usdc => &self.usdc,
            Asset::Eth => &self.eth,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.usdc.validate()?;
        self.eth.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ltv_matches_protocol_docs() {
        let table = RiskTable::default();
        assert_eq!(table.get(Asset::Eth).ltv, 0.75);
        assert_eq!(table.get(Asset::Usdc).liquidation_threshold, 0.80);
    }

    #[test]
    fn ltv_must_be_in_unit_interval() {
        assert!(RiskParams::new(0.0, 0.8, 0.05).is_err());
        assert!(RiskParams::new(1.5, 0.8, 0.05).is_err());
        assert!(RiskParams::new(1.0, 0.8, 0.05).is_ok());
    }
}
