use super::{
    builtin::{DEFAULT_SYNC_PROBABILITY, DEFAULT_SYNC_WINDOW},
    signal::{chi_square_cdf, mean, variance, ArgMax},
};
use std::ops::Range;

/// How the noise reference is estimated from the leading window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// Variance of the magnitude.
    #[default]
    MagnitudeVariance,
    /// Half the mean power. Under noise alone the normalized energy is then chi-square
    /// distributed with two degrees of freedom.
    MeanPower,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Leading samples assumed to hold no signal.
    pub window: Range<usize>,
    pub probability: f64,
    pub normalization: Normalization,
    /// Lower bound of the noise reference. Zero disables it.
    pub floor: f64,
}

impl SyncConfig {
    pub fn new(window: Range<usize>, probability: f64, normalization: Normalization) -> Self {
        Self {
            window,
            probability,
            normalization,
            floor: 0.0,
        }
    }

    pub fn with_floor(mut self, floor: f64) -> Self {
        self.floor = floor;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_SYNC_WINDOW,
            DEFAULT_SYNC_PROBABILITY,
            Normalization::default(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Synchronization {
    pub index: usize,
    /// False when no sample crossed the threshold and `index` is only the strongest one.
    pub reliable: bool,
}

#[derive(Debug, Clone, Default)]
pub struct SynchronizationDetector {
    config: SyncConfig,
}

impl SynchronizationDetector {
    pub fn new(config: SyncConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Noise reference estimated on the window, clipped to the signal.
    pub fn reference(&self, magnitude: &[f64]) -> f64 {
        let end = self.config.window.end.min(magnitude.len());
        let start = self.config.window.start.min(end);
        let window = &magnitude[start..end];
        let reference = match self.config.normalization {
            Normalization::MagnitudeVariance => variance(window),
            Normalization::MeanPower => {
                mean(&window.iter().map(|item| item * item).collect::<Vec<_>>()) / 2.0
            }
        };
        if self.config.floor > 0.0 {
            reference.max(self.config.floor)
        } else {
            reference
        }
    }

    /// Normalized energy of every sample.
    pub fn energy(&self, magnitude: &[f64]) -> Vec<f64> {
        let reference = self.reference(magnitude);
        magnitude
            .iter()
            .map(|item| item * item / reference)
            .collect()
    }

    /// Finds the first sample of a frame in the magnitude of the demodulated signal.
    pub fn detect(&self, magnitude: &[f64]) -> Synchronization {
        let detected = self
            .energy(magnitude)
            .into_iter()
            .position(|energy| chi_square_cdf(energy) > self.config.probability);

        match detected {
            Some(index) => Synchronization {
                index,
                reliable: true,
            },
            None => {
                let (index, _) = magnitude.argmax();
                log::debug!("No sample crossed the threshold, falling back to {index}");
                Synchronization {
                    index,
                    reliable: false,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};
    use rand_distr::{Distribution, Normal};

    const SYMBOL_LEN: usize = 320;

    fn noisy_step(onset: usize, len: usize, noise_variance: f64, seed: u64) -> Vec<f64> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let noise = Normal::new(0.0, (noise_variance / 2.0).sqrt()).unwrap();
        (0..len)
            .map(|n| {
                let level = if n < onset { 0.0 } else { 1.0 };
                let re = level + noise.sample(&mut rng);
                let im = noise.sample(&mut rng);
                (re * re + im * im).sqrt()
            })
            .collect()
    }

    #[test]
    fn test_default_config() {
        let config = SyncConfig::default();
        assert_eq!(config.window, 0..100);
        assert_eq!(config.probability, 0.99);
        assert_eq!(config.normalization, Normalization::MagnitudeVariance);
        assert_eq!(config.floor, 0.0);
    }

    #[test]
    fn test_silent_lead_in() {
        let mut magnitude = vec![0.0; 500];
        magnitude.extend(vec![1.0; 1000]);

        let detector = SynchronizationDetector::default();
        assert_eq!(
            detector.detect(&magnitude),
            Synchronization {
                index: 500,
                reliable: true
            }
        );
    }

    #[test]
    fn test_noisy_step() {
        let detector = SynchronizationDetector::new(SyncConfig::new(
            0..300,
            0.999999,
            Normalization::MeanPower,
        ));
        for seed in 0..5 {
            let onset = 700 + 37 * seed as usize;
            let magnitude = noisy_step(onset, 3000, 0.01, seed);
            let sync = detector.detect(&magnitude);
            assert!(sync.reliable);
            assert!(
                (onset..onset + SYMBOL_LEN).contains(&sync.index),
                "onset {onset}, detected {}",
                sync.index
            );
        }
    }

    #[test]
    fn test_mean_power_reference() {
        let detector =
            SynchronizationDetector::new(SyncConfig::new(0..4, 0.99, Normalization::MeanPower));
        assert_eq!(detector.reference(&[1.0, 1.0, 3.0, 1.0, 100.0]), 1.5);
        assert_eq!(detector.energy(&[1.0, 3.0]), vec![0.4, 3.6]);
    }

    #[test]
    fn test_reference_floor() {
        let config = SyncConfig::new(0..500, 0.999999, Normalization::MeanPower);
        let mut magnitude = vec![0.0; 500];
        magnitude.extend((1..=100).map(|n| n as f64 * 0.01));

        let bare = SynchronizationDetector::new(config.clone());
        assert_eq!(bare.detect(&magnitude).index, 500);

        // Detection needs 27.6 times the floor, a magnitude above 0.0525.
        let floored = SynchronizationDetector::new(config.with_floor(1e-4));
        assert_eq!(floored.reference(&magnitude), 1e-4);
        assert_eq!(floored.detect(&magnitude).index, 505);
    }

    #[test]
    fn test_fallback_to_maximum() {
        let detector =
            SynchronizationDetector::new(SyncConfig::new(0..2, 1.0, Normalization::default()));
        assert_eq!(
            detector.detect(&[0.1, 0.2, 0.5, 0.3]),
            Synchronization {
                index: 2,
                reliable: false
            }
        );
    }

    #[test]
    fn test_short_and_empty_signals() {
        let detector = SynchronizationDetector::default();
        assert_eq!(
            detector.detect(&[]),
            Synchronization {
                index: 0,
                reliable: false
            }
        );

        // Window clipped to the signal.
        let sync = detector.detect(&[0.0, 0.0, 2.0]);
        assert_eq!(sync.index, 2);

        let window_past_end =
            SynchronizationDetector::new(SyncConfig::new(10..20, 0.99, Normalization::MeanPower));
        let sync = window_past_end.detect(&[0.1, 0.7, 0.2]);
        assert_eq!(
            sync,
            Synchronization {
                index: 1,
                reliable: false
            }
        );
    }
}
