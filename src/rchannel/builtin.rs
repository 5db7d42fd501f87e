//! # Rathernet Channel
//! The simulated channel is a single line of sight path through the air. A transmission is
//! delayed by the propagation time over a uniformly drawn distance, attenuated exponentially
//! with that distance and disturbed by white Gaussian noise.

pub const SPEED_OF_SOUND: f64 = 340.0;
pub const ATTENUATION_PER_METER: f64 = 0.25;

pub const DEFAULT_NOISE_VARIANCE: f64 = 0.01;
pub const DEFAULT_MAX_DISTANCE: f64 = 5.0;
