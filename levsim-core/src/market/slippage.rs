//! Slippage sources.
//!
//! The swap engine takes a slippage sample as a parameter; these
//! sources produce the samples. `UniformSlippage` draws from a
//! symmetric band (default ±1%), `NoSlippage` pins the ideal fill.

use crate::error::ConfigError;
use rand::rngs::StdRng;
use rand::Rng;

/// Per-swap slippage sample source. Each call consumes one sample.
pub trait SlippageSource: Send {
    /// Sample a slippage fraction; positive means a worse fill.
    fn sample(&mut self) -> f64;

    /// Name of this source.
    fn name(&self) -> &str;
}

/// Uniform draw from `[-band, band]`.
#[derive(Debug)]
pub struct UniformSlippage {
    band: f64,
    rng: StdRng,
}

impl UniformSlippage {
    pub fn new(band: f64, rng: StdRng) -> Result<Self, ConfigError> {
        if !(0.0..1.0).contains(&band) {
            return Err(ConfigError::InvalidSlippageBand(band));
        }
        Ok(Self { band, rng })
    }

    pub fn band(&self) -> f64 {
        self.band
    }
}

impl SlippageSource for UniformSlippage {
    fn sample(&mut self) -> f64 {
        if self.band == 0.0 {
            return 0.0;
        }
        self.rng.gen_range(-self.band..=self.band)
    }

    fn name(&self) -> &str {
        "UniformSlippage"
    }
}

/// Ideal fills: always zero slippage.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSlippage;

impl SlippageSource for NoSlippage {
    fn sample(&mut self) -> f64 {
        0.0
    }

    fn name(&self) -> &str {
        "NoSlippage"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_in_band() {
        let mut src = UniformSlippage::new(0.01, StdRng::seed_from_u64(1)).unwrap();
        for _ in 0..500 {
            let s = src.sample();
            assert!((-0.01..=0.01).contains(&s));
        }
    }

    #[test]
    fn band_must_be_sub_unit() {
        assert!(UniformSlippage::new(1.0, StdRng::seed_from_u64(1)).is_err());
        assert!(UniformSlippage::new(-0.1, StdRng::seed_from_u64(1)).is_err());
        assert!(UniformSlippage::new(0.0, StdRng::seed_from_u64(1)).is_ok());
    }

    #[test]
    fn no_slippage_is_zero() {
        assert_eq!(NoSlippage.sample(), 0.0);
    }
}
