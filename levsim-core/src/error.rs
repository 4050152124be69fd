//! Construction-time configuration errors.
//!
//! Everything here is fatal and raised before a simulation step runs.
//! A failed flashloan repayment is NOT an error — it is a modeled
//! terminal outcome (`RepaymentOutcome::Shortfall`).

use thiserror::Error;

/// Invalid configuration detected at construction time.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("optimal utilization must be strictly between 0 and 1, got {0}")]
    InvalidRateCurve(f64),

    #[error("invalid position parameters: {0}")]
    InvalidPosition(String),

    #[error("LTV must be in (0, 1], got {0}")]
    InvalidRiskParams(f64),

    #[error("reserve snapshot must have positive reserves, got ({usdc}, {eth})")]
    InvalidReserves { usdc: f64, eth: f64 },

    #[error("slippage band must be in [0, 1), got {0}")]
    InvalidSlippageBand(f64),

    #[error("utilization must be in [0, 1], got {0}")]
    InvalidUtilization(f64),
}
