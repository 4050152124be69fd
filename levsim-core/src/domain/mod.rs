//! Domain types for the leverage simulator.

pub mod asset;
pub mod params;
pub mod snapshot;

pub use asset::{Asset, Balances};
pub use params::{RiskParams, RiskTable};
pub use snapshot::ReserveSnapshot;
