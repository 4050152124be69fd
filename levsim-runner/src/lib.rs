//! levsim runner — configuration, trial execution, sweeps, reporting.
//!
//! Wires the pure engine in `levsim-core` to the outside world:
//! - `SimConfig`: TOML-loadable, content-addressed run configuration
//! - `run_trade`: one seeded trade lifecycle → serializable record
//! - `run_sweep`: rayon-parallel Monte Carlo over trial indices
//! - artifacts: timestamped JSON exports plus text rendering

pub mod config;
pub mod report;
pub mod runner;
pub mod sweep;

pub use config::{ConfigError, MarketConfig, SimConfig};
pub use report::{save_artifact, ReportError, RunArtifact, SCHEMA_VERSION};
pub use runner::{run_trade, RunError, TradeRecord};
pub use sweep::{run_sweep, SweepResult, SweepSummary};
