use super::{
    builtin::{
        ATTENUATION_PER_METER, DEFAULT_MAX_DISTANCE, DEFAULT_NOISE_VARIANCE, SPEED_OF_SOUND,
    },
    ChannelError,
};
use rand::{rngs::SmallRng, Rng};
use rand_distr::{Distribution, Normal};
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interference {
    #[default]
    Silent,
    Tone { frequency: f64, amplitude: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelParams {
    pub noise_variance: f64,
    pub max_distance: f64,
    pub interference: Interference,
}

impl ChannelParams {
    pub fn new(noise_variance: f64, max_distance: f64) -> Self {
        Self {
            noise_variance,
            max_distance,
            interference: Interference::Silent,
        }
    }
}

impl Default for ChannelParams {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_VARIANCE, DEFAULT_MAX_DISTANCE)
    }
}

/// The realisation of the channel for one transmission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelState {
    pub distance: f64,
    pub delay: usize,
    pub attenuation: f64,
    pub noise_variance: f64,
}

impl ChannelState {
    pub fn new(distance: f64, sample_rate: f64, noise_variance: f64) -> Self {
        Self {
            distance,
            delay: (distance / SPEED_OF_SOUND * sample_rate).round() as usize,
            attenuation: (-ATTENUATION_PER_METER * distance).exp(),
            noise_variance,
        }
    }

    /// One tap of gain `attenuation` at `delay`.
    pub fn impulse_response(&self) -> Vec<f64> {
        let mut taps = vec![0f64; self.delay + 1];
        taps[self.delay] = self.attenuation;
        taps
    }
}

pub struct ChannelSimulator<R: Rng = SmallRng> {
    params: ChannelParams,
    sample_rate: f64,
    noise: Normal<f64>,
    rng: R,
}

impl<R: Rng> ChannelSimulator<R> {
    pub fn new(params: ChannelParams, sample_rate: f64, rng: R) -> Result<Self, ChannelError> {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(ChannelError::InvalidSampleRate(sample_rate));
        }
        if !(params.max_distance.is_finite() && params.max_distance >= 0.0) {
            return Err(ChannelError::InvalidDistance(params.max_distance));
        }
        if let Interference::Tone {
            frequency,
            amplitude,
        } = params.interference
        {
            if !(frequency.is_finite() && amplitude.is_finite() && frequency >= 0.0) {
                return Err(ChannelError::InvalidInterference {
                    frequency,
                    amplitude,
                });
            }
        }

        let invalid_noise = ChannelError::InvalidNoiseVariance(params.noise_variance);
        if !(params.noise_variance.is_finite() && params.noise_variance >= 0.0) {
            return Err(invalid_noise);
        }
        let noise = Normal::new(0.0, params.noise_variance.sqrt()).map_err(|_| invalid_noise)?;

        Ok(Self {
            params,
            sample_rate,
            noise,
            rng,
        })
    }

    pub fn params(&self) -> &ChannelParams {
        &self.params
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Draws the distance of the next transmission.
    pub fn draw(&mut self) -> ChannelState {
        let distance = if self.params.max_distance > 0.0 {
            self.rng.gen_range(0.0..self.params.max_distance)
        } else {
            0.0
        };
        ChannelState::new(distance, self.sample_rate, self.params.noise_variance)
    }

    pub fn transmit(&mut self, source: &[f64]) -> (Vec<f64>, ChannelState) {
        let state = self.draw();
        (self.propagate(source, &state), state)
    }

    /// Sends `source` through a given channel realisation. Only the noise is random here.
    pub fn propagate(&mut self, source: &[f64], state: &ChannelState) -> Vec<f64> {
        let mut received = vec![0f64; source.len()];
        if state.delay < source.len() {
            for (item, sample) in received[state.delay..].iter_mut().zip(source) {
                *item = state.attenuation * sample;
            }
        }
        for item in received.iter_mut() {
            *item += self.noise.sample(&mut self.rng);
        }

        if let Interference::Tone {
            frequency,
            amplitude,
        } = self.params.interference
        {
            let omega = 2.0 * PI * frequency / self.sample_rate;
            for (k, item) in received.iter_mut().enumerate() {
                *item += amplitude * (omega * k as f64).sin();
            }
        }

        received
    }
}
