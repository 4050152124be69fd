//! Asset identifiers and fixed-key balance maps.
//!
//! The simulated market trades exactly two assets: USDC (the quote leg,
//! flashloan denomination) and ETH (the base/collateral leg, also the
//! gas-fee asset). A closed enum replaces stringly-keyed balance dicts;
//! unknown assets cannot exist by construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two assets in the simulated market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Asset {
    /// Quote asset: flashloan principal and borrow leg.
    Usdc,
    /// Base asset: swap target, lending collateral, and gas-fee asset.
    Eth,
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Asset::Usdc => write!(f, "USDC"),
            Asset::Eth => write!(f, "ETH"),
        }
    }
}

/// Fixed-key balance map over [`Asset`].
///
/// Values may go negative transiently within a step's arithmetic; the
/// simulator never rejects negative balances at runtime. This is a
/// modeling simplification, not a production ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Balances {
    pub usdc: f64,
    pub eth: f64,
}

impl Balances {
    pub fn new(usdc: f64, eth: f64) -> Self {
        Self { usdc, eth }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn get(&self, asset: Asset) -> f64 {
        match asset {
            Asset::Usdc => self.usdc,
            Asset::Eth => self.eth,
        }
    }

    pub fn credit(&mut self, asset: Asset, amount: f64) {
        match asset {
            Asset::Usdc => self.usdc += amount,
            Asset::Eth => self.eth += amount,
        }
    }

    pub fn debit(&mut self, asset: Asset, amount: f64) {
        self.credit(asset, -amount);
    }
}
