//! Serializable simulation configuration.
//!
//! A `SimConfig` captures everything needed to reproduce a run: the
//! position, the protocol parameters, the market-generation settings,
//! and the master seed. Its `run_id()` is a content-addressed BLAKE3
//! hash, so identical configs share an identity across runs.

use levsim_core::engine::{PositionParams, ProtocolParams};
use levsim_core::error::ConfigError as CoreConfigError;
use levsim_core::market::{GasBounds, WalkParams};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Unique identifier for a run (content-addressable hash).
pub type RunId = String;

/// Errors from loading or validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Core(#[from] CoreConfigError),

    #[error("market config: {0}")]
    InvalidMarket(String),
}

/// Market-generation settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Reserve-path length. Must cover at least the one swap per trade.
    pub path_steps: usize,
    pub walk: WalkParams,
    /// Symmetric slippage band, e.g. 0.01 for ±1%.
    pub slippage_band: f64,
    pub gas: GasBounds,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            path_steps: 100,
            walk: WalkParams::default(),
            slippage_band: 0.01,
            gas: GasBounds::default(),
        }
    }
}

/// Full configuration for a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub position: PositionParams,
    pub protocol: ProtocolParams,
    pub market: MarketConfig,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            position: PositionParams::new(1000.0, 2.0, 30),
            protocol: ProtocolParams::default(),
            market: MarketConfig::default(),
            seed: 42,
        }
    }
}

impl SimConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    /// Check everything serde cannot: curve kinks, LTV ranges, position
    /// parameters, slippage band, and path length.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.position.validate()?;
        self.protocol.validate()?;
        if !(0.0..1.0).contains(&self.market.slippage_band) {
            return Err(CoreConfigError::InvalidSlippageBand(self.market.slippage_band).into());
        }
        if self.market.path_steps == 0 {
            return Err(ConfigError::InvalidMarket(
                "path_steps must cover at least one swap".into(),
            ));
        }
        Ok(())
    }

    /// Deterministic content hash of this configuration.
    ///
    /// Two runs with identical configs get the same RunId and can be
    /// compared or deduplicated by it.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("SimConfig serialization failed");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
