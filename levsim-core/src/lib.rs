//! levsim core — economics of a flashloan-funded leveraged long.
//!
//! This crate models, for a single trader over a single trade
//! lifecycle, the sequence: borrow via flashloan → swap the borrowed
//! USDC into ETH on a constant-product pool → lend the ETH → borrow
//! USDC against it → repay the flashloan with fee and interest. The
//! engine is fully synchronous and deterministic given its inputs:
//! every random draw (reserve walk, gas, slippage) comes from an
//! injected, seeded provider.
//!
//! Layout:
//! - Domain types (assets, balances, reserve snapshots, risk params)
//! - Kinked interest-rate curve and constant-product swap pricing
//! - The five-step leverage-position state machine
//! - Market collaborators (reserve path, gas, slippage, utilization)
//! - BLAKE3-seeded RNG hierarchy for reproducible Monte Carlo trials

pub mod domain;
pub mod engine;
pub mod error;
pub mod market;
pub mod rates;
pub mod rng;
pub mod swap;
