//! Reserve path — the pool state sequence one trade consumes.
//!
//! A path is materialized up front and consumed by index, never
//! rewound. The random-walk generator perturbs the USDC reserve by a
//! uniform integer step and the ETH reserve by a uniform real step per
//! time step, clamped at a positive floor so every snapshot satisfies
//! the positivity invariant.

use crate::domain::ReserveSnapshot;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Floors keeping the walk inside valid snapshot territory. Unreachable
/// with the default step sizes over the path lengths used here.
const MIN_USDC_RESERVE: f64 = 1.0;
const MIN_ETH_RESERVE: f64 = 0.001;

/// Random-walk parameters for reserve-path generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WalkParams {
    pub start_usdc: f64,
    pub start_eth: f64,
    /// Max absolute USDC step per time step (integer-valued draw).
    pub usdc_step: i64,
    /// Max absolute ETH step per time step.
    pub eth_step: f64,
}

impl Default for WalkParams {
    fn default() -> Self {
        Self {
            start_usdc: 100_000.0,
            start_eth: 100.0,
            usdc_step: 1_000,
            eth_step: 1.0,
        }
    }
}

/// Ordered sequence of reserve snapshots, accessed by index.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservePath {
    snapshots: Vec<ReserveSnapshot>,
}

impl ReservePath {
    pub fn from_snapshots(snapshots: Vec<ReserveSnapshot>) -> Self {
        Self { snapshots }
    }

    /// Generate a `steps`-long path by random walk from the starting
    /// reserves. The first snapshot is the unperturbed start.
    pub fn random_walk(steps: usize, params: &WalkParams, rng: &mut StdRng) -> Self {
        let mut snapshots = Vec::with_capacity(steps);
        let mut usdc = params.start_usdc;
        let mut eth = params.start_eth;
        for i in 0..steps {
            if i > 0 {
                let usdc_delta = rng.gen_range(-params.usdc_step..=params.usdc_step) as f64;
                let eth_delta = rng.gen_range(-params.eth_step..=params.eth_step);
                usdc = (usdc + usdc_delta).max(MIN_USDC_RESERVE);
                eth = (eth + eth_delta).max(MIN_ETH_RESERVE);
            }
            snapshots.push(ReserveSnapshot {
                usdc_reserve: usdc,
                eth_reserve: eth,
            });
        }
        Self { snapshots }
    }

    pub fn get(&self, index: usize) -> Option<ReserveSnapshot> {
        self.snapshots.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn first_snapshot_is_the_start() {
        let mut rng = StdRng::seed_from_u64(7);
        let path = ReservePath::random_walk(10, &WalkParams::default(), &mut rng);
        assert_eq!(path.len(), 10);
        let first = path.get(0).unwrap();
        assert_eq!(first.usdc_reserve, 100_000.0);
        assert_eq!(first.eth_reserve, 100.0);
    }

    #[test]
    fn steps_stay_within_band() {
        let mut rng = StdRng::seed_from_u64(11);
        let params = WalkParams::default();
        let path = ReservePath::random_walk(100, &params, &mut rng);
        for i in 1..path.len() {
            let prev = path.get(i - 1).unwrap();
            let cur = path.get(i).unwrap();
            assert!((cur.usdc_reserve - prev.usdc_reserve).abs() <= params.usdc_step as f64);
            assert!((cur.eth_reserve - prev.eth_reserve).abs() <= params.eth_step);
        }
    }

    #[test]
    fn all_snapshots_positive_even_from_tiny_start() {
        let mut rng = StdRng::seed_from_u64(3);
        let params = WalkParams {
            start_usdc: 10.0,
            start_eth: 0.5,
            ..WalkParams::default()
        };
        let path = ReservePath::random_walk(500, &params, &mut rng);
        for i in 0..path.len() {
            let snap = path.get(i).unwrap();
            assert!(snap.usdc_reserve > 0.0);
            assert!(snap.eth_reserve > 0.0);
        }
    }

    #[test]
    fn same_seed_same_path() {
        let params = WalkParams::default();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            ReservePath::random_walk(50, &params, &mut a),
            ReservePath::random_walk(50, &params, &mut b)
        );
    }

    #[test]
    fn out_of_range_index_is_none() {
        let path = ReservePath::from_snapshots(vec![]);
        assert!(path.is_empty());
        assert!(path.get(0).is_none());
    }
}
