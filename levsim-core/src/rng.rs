//! Deterministic RNG hierarchy.
//!
//! A master seed generates deterministic sub-seeds for each
//! `(trial, stream)` pair. Sub-seeds are derived via BLAKE3 hashing,
//! independently of evaluation order, so a Monte Carlo sweep produces
//! identical trials regardless of how the work is scheduled.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// The independent random streams one trial consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RngStream {
    /// Reserve-path random walk.
    Reserves,
    /// Gas price and usage sampling.
    Gas,
    /// Swap slippage sampling.
    Slippage,
}

impl RngStream {
    fn label(&self) -> &'static str {
        match self {
            RngStream::Reserves => "reserves",
            RngStream::Gas => "gas",
            RngStream::Slippage => "slippage",
        }
    }
}

/// Deterministic seed hierarchy.
///
/// The master seed is expanded into per-(trial, stream) sub-seeds using
/// BLAKE3. Because derivation is hash-based (not order-dependent), the
/// same master seed produces identical sub-seeds no matter which trial
/// is derived first.
#[derive(Debug, Clone)]
pub struct SeedHierarchy {
    master_seed: u64,
}

impl SeedHierarchy {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive the deterministic sub-seed for a specific (trial, stream).
    pub fn sub_seed(&self, trial: u64, stream: RngStream) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&trial.to_le_bytes());
        hasher.update(stream.label().as_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }

    /// Create a seeded StdRng for a (trial, stream).
    pub fn rng_for(&self, trial: u64, stream: RngStream) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(trial, stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_seeds_are_deterministic() {
        let seeds = SeedHierarchy::new(42);
        assert_eq!(
            seeds.sub_seed(0, RngStream::Gas),
            seeds.sub_seed(0, RngStream::Gas)
        );
    }

    #[test]
    fn streams_are_independent() {
        let seeds = SeedHierarchy::new(42);
        assert_ne!(
            seeds.sub_seed(0, RngStream::Gas),
            seeds.sub_seed(0, RngStream::Slippage)
        );
        assert_ne!(
            seeds.sub_seed(0, RngStream::Reserves),
            seeds.sub_seed(0, RngStream::Gas)
        );
    }

    #[test]
    fn trials_are_independent() {
        let seeds = SeedHierarchy::new(42);
        assert_ne!(
            seeds.sub_seed(0, RngStream::Reserves),
            seeds.sub_seed(1, RngStream::Reserves)
        );
    }

    #[test]
    fn different_master_seeds_different_output() {
        assert_ne!(
            SeedHierarchy::new(42).sub_seed(0, RngStream::Gas),
            SeedHierarchy::new(43).sub_seed(0, RngStream::Gas)
        );
    }
}
