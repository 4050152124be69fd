//! Gas-fee models.
//!
//! Every protocol-interaction step charges one gas fee, denominated in
//! ETH. The sampled model draws a gas price in Gwei and a gas-used
//! figure per invocation; `FixedGas` gives tests exact control.

use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

const GWEI: f64 = 1e-9;

/// Per-invocation gas-fee source. Each call consumes one sample.
pub trait GasModel: Send {
    /// Sample the fee (in ETH) for one protocol interaction.
    fn charge(&mut self) -> f64;

    /// Name of this model.
    fn name(&self) -> &str;
}

/// Sampling bounds for [`SampledGas`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasBounds {
    pub min_price_gwei: f64,
    pub max_price_gwei: f64,
    pub min_gas_used: u64,
    pub max_gas_used: u64,
}

impl Default for GasBounds {
    /// 20–100 Gwei, 21k (plain transfer) to 200k (contract call) gas.
    fn default() -> Self {
        Self {
            min_price_gwei: 20.0,
            max_price_gwei: 100.0,
            min_gas_used: 21_000,
            max_gas_used: 200_000,
        }
    }
}

/// Uniformly sampled gas price and usage.
#[derive(Debug)]
pub struct SampledGas {
    bounds: GasBounds,
    rng: StdRng,
}

impl SampledGas {
    pub fn new(rng: StdRng) -> Self {
        Self::with_bounds(GasBounds::default(), rng)
    }

    pub fn with_bounds(bounds: GasBounds, rng: StdRng) -> Self {
        Self { bounds, rng }
    }
}

impl GasModel for SampledGas {
    fn charge(&mut self) -> f64 {
        let price = self
            .rng
            .gen_range(self.bounds.min_price_gwei..=self.bounds.max_price_gwei)
            * GWEI;
        let used = self
            .rng
            .gen_range(self.bounds.min_gas_used..=self.bounds.max_gas_used);
        price * used as f64
    }

    fn name(&self) -> &str {
        "SampledGas"
    }
}

/// Constant gas fee, for deterministic tests and frictionless runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedGas(pub f64);

impl GasModel for FixedGas {
    fn charge(&mut self) -> f64 {
        self.0
    }

    fn name(&self) -> &str {
        "FixedGas"
    }
}
