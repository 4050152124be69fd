//! Leverage-execution engine.
//!
//! One [`LeveragePosition`] runs a single five-step leveraged-long
//! sequence: flashloan → swap → lend → borrow → repay. Each step is an
//! atomic transition of a linear state machine; the only branch is the
//! terminal repayment outcome (success vs. shortfall).

pub mod outcome;
pub mod position;

pub use outcome::{RepaymentOutcome, TradeReport};
pub use position::{
    EngineError, ExecutionState, LeveragePosition, MarketCtx, PositionParams, ProtocolParams,
    SwapResult,
};
