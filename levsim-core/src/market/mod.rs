//! Market collaborators — reserve paths, gas fees, slippage, utilization.
//!
//! All randomness lives here, behind small trait seams. The engine
//! consumes sampled values and stays deterministic given its inputs;
//! tests substitute the fixed implementations.

pub mod gas;
pub mod reserve_path;
pub mod slippage;
pub mod utilization;

pub use gas::{FixedGas, GasBounds, GasModel, SampledGas};
pub use reserve_path::{ReservePath, WalkParams};
pub use slippage::{NoSlippage, SlippageSource, UniformSlippage};
pub use utilization::{ConstantUtilization, UtilizationSource};
