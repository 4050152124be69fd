//! Single-trial runner — wires config, providers, and the engine.

use levsim_core::engine::{
    EngineError, LeveragePosition, MarketCtx, TradeReport,
};
use levsim_core::market::{ConstantUtilization, ReservePath, SampledGas, UniformSlippage};
use levsim_core::rng::{RngStream, SeedHierarchy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, SimConfig};

/// Errors from running a trial.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Serializable result of one trade lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    /// Trial index within the sweep (0 for single runs).
    pub trial: u64,
    pub report: TradeReport,
    pub message: String,
}

/// Run one full trade lifecycle for the given trial index.
///
/// All randomness derives from `config.seed` and `trial` through the
/// seed hierarchy, so the same (config, trial) pair always reproduces
/// the same record, regardless of scheduling.
pub fn run_trade(config: &SimConfig, trial: u64) -> Result<TradeRecord, RunError> {
    config.validate()?;
    let seeds = SeedHierarchy::new(config.seed);

    let mut reserve_rng = seeds.rng_for(trial, RngStream::Reserves);
    let path = ReservePath::random_walk(
        config.market.path_steps,
        &config.market.walk,
        &mut reserve_rng,
    );

    let mut gas =
        SampledGas::with_bounds(config.market.gas, seeds.rng_for(trial, RngStream::Gas));
    let mut slippage = UniformSlippage::new(
        config.market.slippage_band,
        seeds.rng_for(trial, RngStream::Slippage),
    )
    .map_err(ConfigError::from)?;
    let utilization = ConstantUtilization::default();

    let mut position = LeveragePosition::new(config.position, config.protocol)
        .map_err(ConfigError::from)?;
    let report: TradeReport = position.execute_long(&mut MarketCtx {
        reserves: &path,
        gas: &mut gas,
        slippage: &mut slippage,
        utilization: &utilization,
    })?;

    Ok(TradeRecord {
        trial,
        message: report.message(),
        report,
    })
}
