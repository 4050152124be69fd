//! Terminal outcome of one leverage sequence.

use crate::domain::Balances;
use serde::{Deserialize, Serialize};

/// The two terminal repayment outcomes.
///
/// `Shortfall` is a modeled business outcome, not an error: the trader
/// could not cover the flashloan obligation and walks away having paid
/// the flashloan fee and gas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentOutcome {
    Success,
    Shortfall,
}

/// Final report of one trade lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradeReport {
    pub outcome: RepaymentOutcome,
    /// Funds inside the protocol after (or reconstructed around) repayment.
    pub funds: Balances,
    /// Trader's own wallet after fees.
    pub wallet: Balances,
    /// Flashloan principal + fee + interest.
    pub total_due: f64,
    pub flashloan_fee: f64,
    pub flashloan_interest: f64,
}

impl TradeReport {
    /// Human-readable one-line summary.
    pub fn message(&self) -> String {
        match self.outcome {
            RepaymentOutcome::Success => format!(
                "Repayment successful! Available USDC: {:.6}. \
                 Balance: {:.6} USDC and {:.6} ETH.",
                self.funds.usdc, self.wallet.usdc, self.wallet.eth
            ),
            RepaymentOutcome::Shortfall => format!(
                "Flashloan repayment failed; flashloan fee and gas were paid. \
                 Available funds: {:.6} USDC and {:.6} ETH. \
                 Balance: {:.6} USDC and {:.6} ETH.",
                self.funds.usdc, self.funds.eth, self.wallet.usdc, self.wallet.eth
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_outcome() {
        let report = TradeReport {
            outcome: RepaymentOutcome::Success,
            funds: Balances::new(441.0, 2.0),
            wallet: Balances::new(8974.1, 0.005),
            total_due: 1025.9,
            flashloan_fee: 0.9,
            flashloan_interest: 25.0,
        };
        assert!(report.message().contains("successful"));

        let report = TradeReport {
            outcome: RepaymentOutcome::Shortfall,
            ..report
        };
        assert!(report.message().contains("failed"));
    }
}
