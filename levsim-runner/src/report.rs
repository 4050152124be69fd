//! Run artifacts and text rendering.
//!
//! Every run can be exported as a timestamped JSON artifact named by
//! its content-addressed run ID; the text renderers produce the
//! human-readable stdout report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SimConfig;
use crate::runner::TradeRecord;
use crate::sweep::SweepSummary;
use levsim_core::engine::RepaymentOutcome;

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Errors from writing artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("artifact io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("artifact serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Exported result of one run (single trade or sweep).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunArtifact {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: String,
    pub created_at: DateTime<Utc>,
    pub config: SimConfig,
    pub records: Vec<TradeRecord>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl RunArtifact {
    pub fn new(config: &SimConfig, records: Vec<TradeRecord>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            run_id: config.run_id(),
            created_at: Utc::now(),
            config: config.clone(),
            records,
        }
    }
}

/// Write the artifact as pretty JSON under `dir`, named by run ID.
pub fn save_artifact(dir: &Path, artifact: &RunArtifact) -> Result<PathBuf, ReportError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}.json", artifact.run_id));
    std::fs::write(&path, serde_json::to_string_pretty(artifact)?)?;
    Ok(path)
}

/// Multi-line report for a single trade record.
pub fn render_trade(record: &TradeRecord) -> String {
    let outcome = match record.report.outcome {
        RepaymentOutcome::Success => "SUCCESS",
        RepaymentOutcome::Shortfall => "SHORTFALL",
    };
    let report = &record.report;
    let mut out = String::new();
    let _ = writeln!(out, "Trial {}: {}", record.trial, outcome);
    let _ = writeln!(
        out,
        "  total due: {:.6} USDC (fee {:.6}, interest {:.6})",
        report.total_due, report.flashloan_fee, report.flashloan_interest
    );
    let _ = writeln!(
        out,
        "  funds:     {:.6} USDC / {:.6} ETH",
        report.funds.usdc, report.funds.eth
    );
    let _ = writeln!(
        out,
        "  wallet:    {:.6} USDC / {:.6} ETH",
        report.wallet.usdc, report.wallet.eth
    );
    let _ = write!(out, "  {}", record.message);
    out
}

/// One-block summary for a sweep.
pub fn render_summary(summary: &SweepSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Sweep: {} trials, {} repaid / {} shortfalls ({:.1}% success)",
        summary.trials,
        summary.successes,
        summary.shortfalls,
        summary.success_rate * 100.0
    );
    let _ = writeln!(out, "  mean funds:  {:.6} USDC", summary.mean_funds_usdc);
    let _ = write!(out, "  mean wallet: {:.6} USDC", summary.mean_wallet_usdc);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_trade;

    #[test]
    fn artifact_round_trips_through_json() {
        let config = SimConfig::default();
        let record = run_trade(&config, 0).unwrap();
        let artifact = RunArtifact::new(&config, vec![record]);

        let json = serde_json::to_string(&artifact).unwrap();
        let parsed: RunArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(artifact, parsed);
    }

    #[test]
    fn artifact_file_is_named_by_run_id() {
        let dir = tempfile::tempdir().unwrap();
        let config = SimConfig::default();
        let artifact = RunArtifact::new(&config, vec![]);
        let path = save_artifact(dir.path(), &artifact).unwrap();
        assert!(path.ends_with(format!("{}.json", config.run_id())));
        assert!(path.exists());
    }

    #[test]
    fn renderers_name_the_outcome() {
        let config = SimConfig::default();
        let record = run_trade(&config, 0).unwrap();
        assert!(render_trade(&record).contains("SUCCESS"));

        let summary = SweepSummary::from_records(std::slice::from_ref(&record));
        assert!(render_summary(&summary).contains("1 repaid"));
    }
}
