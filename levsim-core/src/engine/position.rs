//! The leverage-position state machine.
//!
//! Linear sequence, no retries:
//! `Created → FlashloanDrawn → Swapped → Lent → Borrowed → Repaid`.
//! Out-of-order step calls are programming errors and fail with
//! [`EngineError::InvalidTransition`]; an unpayable flashloan is NOT an
//! error — it terminates the sequence with a shortfall report.
//!
//! Accounting conventions of the model:
//! - every step debits one sampled gas fee from the ETH wallet;
//! - the repayment step additionally folds its gas sample into the
//!   USDC wallet deduction;
//! - the borrow step values collateral at the PRE-lend ETH amount and
//!   PRE-swap spot price;
//! - the shortfall report reconstructs pre-attempt balances by adding
//!   back the full obligation, then deducts only fee + gas, and
//!   captures the ETH wallet before the final gas charge.

use super::outcome::{RepaymentOutcome, TradeReport};
use crate::domain::{Asset, Balances, RiskTable};
use crate::error::ConfigError;
use crate::market::{GasModel, ReservePath, SlippageSource, UtilizationSource};
use crate::rates::RateCurve;
use crate::swap::swap;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const DAYS_PER_YEAR: f64 = 365.0;

/// Errors from driving the step sequence.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid step transition: position is {actual}, step requires {required}")]
    InvalidTransition {
        required: ExecutionState,
        actual: ExecutionState,
    },

    #[error("reserve path exhausted at index {0}")]
    ReservePathExhausted(usize),
}

/// Where a position sits in the five-step sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionState {
    Created,
    FlashloanDrawn,
    Swapped,
    Lent,
    Borrowed,
    Repaid,
}

impl fmt::Display for ExecutionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionState::Created => "Created",
            ExecutionState::FlashloanDrawn => "FlashloanDrawn",
            ExecutionState::Swapped => "Swapped",
            ExecutionState::Lent => "Lent",
            ExecutionState::Borrowed => "Borrowed",
            ExecutionState::Repaid => "Repaid",
        };
        write!(f, "{name}")
    }
}

/// Trade parameters fixed at position creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionParams {
    /// Initial margin deposited, in USDC. Must be > 0.
    pub collateral: f64,
    /// Leverage multiplier; the flashloan draws `collateral * (leverage - 1)`.
    pub leverage: f64,
    /// Term length in days, used to annualize interest.
    pub expiry_days: u32,
    /// Trader's USDC wallet before the margin deposit.
    #[serde(default = "default_wallet_usdc")]
    pub wallet_usdc: f64,
    /// Trader's ETH wallet (pays gas).
    #[serde(default = "default_wallet_eth")]
    pub wallet_eth: f64,
}

fn default_wallet_usdc() -> f64 {
    10_000.0
}

fn default_wallet_eth() -> f64 {
    0.005
}

impl PositionParams {
    pub fn new(collateral: f64, leverage: f64, expiry_days: u32) -> Self {
        Self {
            collateral,
            leverage,
            expiry_days,
            wallet_usdc: default_wallet_usdc(),
            wallet_eth: default_wallet_eth(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collateral <= 0.0 {
            return Err(ConfigError::InvalidPosition(format!(
                "collateral must be positive, got {}",
                self.collateral
            )));
        }
        if self.leverage < 1.0 {
            return Err(ConfigError::InvalidPosition(format!(
                "leverage must be >= 1, got {}",
                self.leverage
            )));
        }
        if self.expiry_days == 0 {
            return Err(ConfigError::InvalidPosition(
                "expiry length must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Protocol-wide read-only configuration, injected per position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProtocolParams {
    pub flashloan_fee_rate: f64,
    pub eth_curve: RateCurve,
    pub usdc_curve: RateCurve,
    pub risk: RiskTable,
}

impl Default for ProtocolParams {
    fn default() -> Self {
        Self {
            flashloan_fee_rate: 0.0009,
            eth_curve: RateCurve::aave_eth(),
            usdc_curve: RateCurve::aave_usdc(),
            risk: RiskTable::default(),
        }
    }
}

impl ProtocolParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.eth_curve.validate()?;
        self.usdc_curve.validate()?;
        self.risk.validate()
    }
}

/// What the swap step hands to the lend and borrow steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapResult {
    /// ETH credited by the swap (post-slippage, pre-lending-interest).
    pub eth_received: f64,
    /// Spot price before the swap moved the pool.
    pub spot_price: f64,
}

/// Market collaborators for one full sequence run.
pub struct MarketCtx<'a> {
    pub reserves: &'a ReservePath,
    pub gas: &'a mut dyn GasModel,
    pub slippage: &'a mut dyn SlippageSource,
    pub utilization: &'a dyn UtilizationSource,
}

/// A single trader's leveraged-long position over one trade lifecycle.
#[derive(Debug, Clone)]
pub struct LeveragePosition {
    params: PositionParams,
    protocol: ProtocolParams,
    /// Trader's own funds outside the protocol; only fees touch it.
    wallet: Balances,
    /// Funds inside the protocol; every step mutates it.
    funds: Balances,
    /// Index into the reserve path; advances once per swap, never rewinds.
    reserve_cursor: usize,
    state: ExecutionState,
}

impl LeveragePosition {
    pub fn new(params: PositionParams, protocol: ProtocolParams) -> Result<Self, ConfigError> {
        params.validate()?;
        protocol.validate()?;
        Ok(Self {
            wallet: Balances::new(params.wallet_usdc - params.collateral, params.wallet_eth),
            funds: Balances::new(params.collateral, 0.0),
            reserve_cursor: 0,
            state: ExecutionState::Created,
            params,
            protocol,
        })
    }

    pub fn state(&self) -> ExecutionState {
        self.state
    }

    pub fn wallet(&self) -> &Balances {
        &self.wallet
    }

    pub fn funds(&self) -> &Balances {
        &self.funds
    }

    pub fn reserve_cursor(&self) -> usize {
        self.reserve_cursor
    }

    /// Flashloan principal: `collateral * (leverage - 1)`.
    pub fn flashloan_principal(&self) -> f64 {
        self.params.collateral * (self.params.leverage - 1.0)
    }

    fn annualize(&self, amount: f64, rate: f64) -> f64 {
        amount * rate * (self.params.expiry_days as f64 / DAYS_PER_YEAR)
    }

    fn require_state(&self, required: ExecutionState) -> Result<(), EngineError> {
        if self.state != required {
            return Err(EngineError::InvalidTransition {
                required,
                actual: self.state,
            });
        }
        Ok(())
    }

    /// Charge one gas sample to the ETH wallet, returning the fee.
    fn charge_gas(&mut self, gas: &mut dyn GasModel) -> f64 {
        let fee = gas.charge();
        self.wallet.debit(Asset::Eth, fee);
        fee
    }

    /// Run the full five-step sequence to its terminal report.
    pub fn execute_long(&mut self, ctx: &mut MarketCtx<'_>) -> Result<TradeReport, EngineError> {
        self.draw_flashloan(ctx.gas)?;
        let swapped = self.swap_into_collateral(ctx.reserves, ctx.slippage, ctx.gas)?;
        self.lend_collateral(ctx.utilization, ctx.gas)?;
        self.borrow_against(&swapped, ctx.utilization, ctx.gas)?;
        self.repay_flashloan(ctx.utilization, ctx.gas)
    }

    /// Step 1: draw the flashloan principal into protocol funds.
    pub fn draw_flashloan(&mut self, gas: &mut dyn GasModel) -> Result<f64, EngineError> {
        self.require_state(ExecutionState::Created)?;
        let principal = self.flashloan_principal();
        self.funds.credit(Asset::Usdc, principal);
        self.charge_gas(gas);
        self.state = ExecutionState::FlashloanDrawn;
        Ok(principal)
    }

    /// Step 2: swap all available USDC into ETH against the current
    /// reserve snapshot, advancing the reserve cursor.
    pub fn swap_into_collateral(
        &mut self,
        reserves: &ReservePath,
        slippage: &mut dyn SlippageSource,
        gas: &mut dyn GasModel,
    ) -> Result<SwapResult, EngineError> {
        self.require_state(ExecutionState::FlashloanDrawn)?;
        let snapshot = reserves
            .get(self.reserve_cursor)
            .ok_or(EngineError::ReservePathExhausted(self.reserve_cursor))?;

        let usdc_in = self.funds.get(Asset::Usdc);
        let outcome = swap(&snapshot, usdc_in, slippage.sample());

        self.funds.debit(Asset::Usdc, usdc_in);
        self.charge_gas(gas);
        self.funds.credit(Asset::Eth, outcome.eth_out);
        self.reserve_cursor += 1;
        self.state = ExecutionState::Swapped;

        Ok(SwapResult {
            eth_received: outcome.eth_out,
            spot_price: outcome.spot_price,
        })
    }

    /// Step 3: lend the ETH, crediting term interest up front.
    pub fn lend_collateral(
        &mut self,
        utilization: &dyn UtilizationSource,
        gas: &mut dyn GasModel,
    ) -> Result<(), EngineError> {
        self.require_state(ExecutionState::Swapped)?;
        let rate = self.protocol.eth_curve.rate(utilization.utilization());
        let interest = self.annualize(self.funds.get(Asset::Eth), rate);
        self.charge_gas(gas);
        self.funds.credit(Asset::Eth, interest);
        self.state = ExecutionState::Lent;
        Ok(())
    }

    /// Step 4: borrow USDC against the lent ETH, up to LTV.
    ///
    /// Collateral is valued at the PRE-lend ETH amount and the PRE-swap
    /// spot price — an intentional snapshot, not the current balance.
    pub fn borrow_against(
        &mut self,
        swapped: &SwapResult,
        utilization: &dyn UtilizationSource,
        gas: &mut dyn GasModel,
    ) -> Result<(), EngineError> {
        self.require_state(ExecutionState::Lent)?;
        let rate = self.protocol.usdc_curve.rate(utilization.utilization());
        let collateral_value = swapped.eth_received * swapped.spot_price;
        let max_borrowable = collateral_value * self.protocol.risk.get(Asset::Eth).ltv;
        let interest = self.annualize(max_borrowable, rate);
        self.funds.credit(Asset::Usdc, max_borrowable - interest);
        self.charge_gas(gas);
        self.state = ExecutionState::Borrowed;
        Ok(())
    }

    /// Step 5: repay principal + fee + interest, or report the shortfall.
    pub fn repay_flashloan(
        &mut self,
        utilization: &dyn UtilizationSource,
        gas: &mut dyn GasModel,
    ) -> Result<TradeReport, EngineError> {
        self.require_state(ExecutionState::Borrowed)?;
        let principal = self.flashloan_principal();
        let fee = principal * self.protocol.flashloan_fee_rate;
        let interest = principal * self.protocol.usdc_curve.rate(utilization.utilization());
        let total_due = principal + fee + interest;

        let report = if self.funds.get(Asset::Usdc) >= total_due {
            self.funds.debit(Asset::Usdc, total_due);
            let gas_fee = self.charge_gas(gas);
            self.wallet.debit(Asset::Usdc, fee + interest + gas_fee);
            TradeReport {
                outcome: RepaymentOutcome::Success,
                funds: self.funds,
                wallet: self.wallet,
                total_due,
                flashloan_fee: fee,
                flashloan_interest: interest,
            }
        } else {
            // Reported balances reconstruct the pre-attempt state: add
            // back the full obligation, then pay only fee + gas. The ETH
            // wallet is captured before the final gas charge; the charge
            // itself still lands on the live wallet.
            let mut funds = self.funds;
            funds.credit(Asset::Usdc, total_due);
            let mut wallet = self.wallet;
            wallet.credit(Asset::Usdc, fee + interest);
            let gas_fee = self.charge_gas(gas);
            wallet.debit(Asset::Usdc, fee + gas_fee);
            TradeReport {
                outcome: RepaymentOutcome::Shortfall,
                funds,
                wallet,
                total_due,
                flashloan_fee: fee,
                flashloan_interest: interest,
            }
        };
        self.state = ExecutionState::Repaid;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ReserveSnapshot;
    use crate::market::{ConstantUtilization, FixedGas, NoSlippage};

    fn single_snapshot_path() -> ReservePath {
        ReservePath::from_snapshots(vec![ReserveSnapshot::new(100_000.0, 100.0).unwrap()])
    }

    fn run(params: PositionParams, gas: f64) -> TradeReport {
        let mut position = LeveragePosition::new(params, ProtocolParams::default()).unwrap();
        let path = single_snapshot_path();
        let mut ctx = MarketCtx {
            reserves: &path,
            gas: &mut FixedGas(gas),
            slippage: &mut NoSlippage,
            utilization: &ConstantUtilization::default(),
        };
        position.execute_long(&mut ctx).unwrap()
    }

    #[test]
    fn construction_rejects_bad_parameters() {
        let protocol = ProtocolParams::default();
        assert!(LeveragePosition::new(PositionParams::new(0.0, 2.0, 30), protocol).is_err());
        assert!(LeveragePosition::new(PositionParams::new(1000.0, 0.5, 30), protocol).is_err());
        assert!(LeveragePosition::new(PositionParams::new(1000.0, 2.0, 0), protocol).is_err());
    }

    #[test]
    fn margin_moves_from_wallet_to_funds_at_creation() {
        let position =
            LeveragePosition::new(PositionParams::new(1000.0, 2.0, 30), ProtocolParams::default())
                .unwrap();
        assert_eq!(position.wallet().usdc, 9_000.0);
        assert_eq!(position.wallet().eth, 0.005);
        assert_eq!(position.funds().usdc, 1_000.0);
        assert_eq!(position.funds().eth, 0.0);
        assert_eq!(position.state(), ExecutionState::Created);
    }

    #[test]
    fn steps_must_run_in_order() {
        let mut position =
            LeveragePosition::new(PositionParams::new(1000.0, 2.0, 30), ProtocolParams::default())
                .unwrap();
        let util = ConstantUtilization::default();
        let mut gas = FixedGas(0.0);

        // Lending before the swap is an invalid transition.
        let err = position.lend_collateral(&util, &mut gas).unwrap_err();
        assert!(matches!(err, EngineError::InvalidTransition { .. }));

        // A second flashloan draw is too.
        position.draw_flashloan(&mut gas).unwrap();
        assert!(position.draw_flashloan(&mut gas).is_err());
    }

    #[test]
    fn empty_reserve_path_is_an_engine_error() {
        let mut position =
            LeveragePosition::new(PositionParams::new(1000.0, 2.0, 30), ProtocolParams::default())
                .unwrap();
        let mut gas = FixedGas(0.0);
        position.draw_flashloan(&mut gas).unwrap();
        let path = ReservePath::from_snapshots(vec![]);
        let err = position
            .swap_into_collateral(&path, &mut NoSlippage, &mut gas)
            .unwrap_err();
        assert!(matches!(err, EngineError::ReservePathExhausted(0)));
    }

    #[test]
    fn swap_advances_the_reserve_cursor() {
        let mut position =
            LeveragePosition::new(PositionParams::new(1000.0, 2.0, 30), ProtocolParams::default())
                .unwrap();
        let mut gas = FixedGas(0.0);
        let path = single_snapshot_path();
        position.draw_flashloan(&mut gas).unwrap();
        position
            .swap_into_collateral(&path, &mut NoSlippage, &mut gas)
            .unwrap();
        assert_eq!(position.reserve_cursor(), 1);
    }

    #[test]
    fn gas_lands_on_the_eth_wallet_each_step() {
        let report = run(PositionParams::new(1000.0, 2.0, 30), 0.0001);
        // Five steps, one gas charge each.
        assert!((report.wallet.eth - (0.005 - 5.0 * 0.0001)).abs() < 1e-12);
    }

    #[test]
    fn unit_leverage_repays_trivially() {
        // leverage = 1 ⇒ principal 0 ⇒ total due 0, even with gas on.
        let report = run(PositionParams::new(1000.0, 1.0, 30), 0.0001);
        assert_eq!(report.outcome, RepaymentOutcome::Success);
        assert_eq!(report.total_due, 0.0);
        assert_eq!(report.flashloan_fee, 0.0);
        assert_eq!(report.flashloan_interest, 0.0);
    }

    #[test]
    fn moderate_leverage_succeeds_high_leverage_shortfalls() {
        let success = run(PositionParams::new(1000.0, 2.0, 30), 0.0);
        assert_eq!(success.outcome, RepaymentOutcome::Success);

        let shortfall = run(PositionParams::new(1000.0, 4.0, 30), 0.0);
        assert_eq!(shortfall.outcome, RepaymentOutcome::Shortfall);
    }

    #[test]
    fn repaid_is_terminal() {
        let mut position =
            LeveragePosition::new(PositionParams::new(1000.0, 2.0, 30), ProtocolParams::default())
                .unwrap();
        let path = single_snapshot_path();
        let mut ctx = MarketCtx {
            reserves: &path,
            gas: &mut FixedGas(0.0),
            slippage: &mut NoSlippage,
            utilization: &ConstantUtilization::default(),
        };
        position.execute_long(&mut ctx).unwrap();
        assert_eq!(position.state(), ExecutionState::Repaid);
        let util = ConstantUtilization::default();
        let mut gas = FixedGas(0.0);
        assert!(position.repay_flashloan(&util, &mut gas).is_err());
    }
}
