//! Constant-product swap pricing.
//!
//! Pure given its inputs: the slippage sample is injected by the caller
//! rather than drawn here, so identical inputs always produce identical
//! outputs.

use crate::domain::ReserveSnapshot;

/// Result of pricing one USDC→ETH swap against a reserve snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapOutcome {
    /// ETH delivered after the slippage adjustment.
    pub eth_out: f64,
    /// Invariant-implied ETH output before slippage.
    pub raw_eth_out: f64,
    /// Spot price of ETH in USDC before the swap moved the pool.
    pub spot_price: f64,
}

/// Price a USDC→ETH swap of `usdc_in` against `snapshot`.
///
/// `k = usdc * eth` is held constant; the raw output is
/// `eth - k / (usdc + usdc_in)`, then scaled by `(1 - slippage)`.
/// For positive reserves and `usdc_in > 0` the raw output lies in
/// `(0, eth_reserve)`; the engine does not bound `usdc_in` against the
/// pool size.
pub fn swap(snapshot: &ReserveSnapshot, usdc_in: f64, slippage: f64) -> SwapOutcome {
    let spot_price = snapshot.spot_price();
    let k = snapshot.product();
    let new_usdc_reserve = snapshot.usdc_reserve + usdc_in;
    let new_eth_reserve = k / new_usdc_reserve;
    let raw_eth_out = snapshot.eth_reserve - new_eth_reserve;
    SwapOutcome {
        eth_out: raw_eth_out * (1.0 - slippage),
        raw_eth_out,
        spot_price,
    }
}
