//! Range reading corruption for the simulated rangers.
//!
//! A simulated reading starts as the exact distance to whatever lies under
//! the sensor. [`RangeNoise`] then drops it (a missed echo) or jitters it,
//! the way a real HC-SR04 misbehaves over a reflective panel.

use crate::config::SimulationConfig;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand_distr::{Bernoulli, Distribution, Normal};

/// Seeded miss and jitter model for one sensor set
pub struct RangeNoise {
    rng: SmallRng,
    /// `None` when readings are exact
    jitter: Option<Normal<f32>>,
    /// `None` when echoes are never missed
    miss: Option<Bernoulli>,
}

impl RangeNoise {
    /// Build from `[simulation]`; `random_seed = 0` draws a fresh seed
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = match config.random_seed {
            0 => SmallRng::from_entropy(),
            seed => SmallRng::seed_from_u64(seed),
        };

        let stddev = config.range_stddev_cm;
        let jitter = if stddev > 0.0 {
            Normal::new(0.0, stddev).ok()
        } else {
            None
        };

        let rate = f64::from(config.miss_rate);
        let miss = if rate > 0.0 {
            Bernoulli::new(rate.min(1.0)).ok()
        } else {
            None
        };

        Self { rng, jitter, miss }
    }

    /// Corrupt one exact reading
    ///
    /// `None` in stays `None`. A reading may be lost, otherwise it gets
    /// Gaussian jitter and is clamped at zero.
    pub fn perturb(&mut self, exact_cm: Option<f32>) -> Option<f32> {
        if let Some(miss) = &self.miss
            && miss.sample(&mut self.rng)
        {
            return None;
        }
        let distance = exact_cm?;
        match &self.jitter {
            Some(jitter) => Some((distance + jitter.sample(&mut self.rng)).max(0.0)),
            None => Some(distance),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(range_stddev_cm: f32, miss_rate: f32, random_seed: u64) -> SimulationConfig {
        SimulationConfig {
            range_stddev_cm,
            miss_rate,
            random_seed,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn test_exact_passes_readings_through() {
        let mut noise = RangeNoise::from_config(&config(0.0, 0.0, 3));
        assert_eq!(noise.perturb(Some(2.5)), Some(2.5));
        assert_eq!(noise.perturb(None), None);
    }

    #[test]
    fn test_same_seed_same_readings() {
        let mut a = RangeNoise::from_config(&config(0.8, 0.1, 7));
        let mut b = RangeNoise::from_config(&config(0.8, 0.1, 7));
        let first: Vec<_> = (0..40).map(|_| a.perturb(Some(2.5))).collect();
        let second: Vec<_> = (0..40).map(|_| b.perturb(Some(2.5))).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_jitter_never_goes_negative() {
        let mut noise = RangeNoise::from_config(&config(2.0, 0.0, 11));
        let readings: Vec<f32> = (0..200).filter_map(|_| noise.perturb(Some(0.5))).collect();
        assert_eq!(readings.len(), 200);
        assert!(readings.iter().all(|&d| d >= 0.0));
        assert!(readings.iter().any(|&d| d != 0.5));
    }

    #[test]
    fn test_full_miss_rate_loses_every_echo() {
        let mut noise = RangeNoise::from_config(&config(0.0, 1.0, 5));
        assert!((0..20).all(|_| noise.perturb(Some(2.5)).is_none()));
    }
}
