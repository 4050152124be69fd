//! Reserve snapshots — one constant-product pool state per time step.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Immutable pool reserves for one time step of the simulated market.
///
/// Both reserves must be strictly positive; `new` enforces this.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReserveSnapshot {
    pub usdc_reserve: f64,
    pub eth_reserve: f64,
}

impl ReserveSnapshot {
    pub fn new(usdc_reserve: f64, eth_reserve: f64) -> Result<Self, ConfigError> {
        if usdc_reserve <= 0.0 || eth_reserve <= 0.0 {
            return Err(ConfigError::InvalidReserves {
                usdc: usdc_reserve,
                eth: eth_reserve,
            });
        }
        Ok(Self {
            usdc_reserve,
            eth_reserve,
        })
    }

    /// Spot price of ETH in USDC units: `usdc_reserve / eth_reserve`.
    pub fn spot_price(&self) -> f64 {
        self.usdc_reserve / self.eth_reserve
    }

    /// Constant-product invariant `k = usdc_reserve * eth_reserve`.
    pub fn product(&self) -> f64 {
        self.usdc_reserve * self.eth_reserve
    }
}
