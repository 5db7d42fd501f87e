mod channel;

pub mod builtin;

pub use channel::{ChannelParams, ChannelSimulator, ChannelState, Interference};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChannelError {
    #[error("Invalid sample rate {0} Hz")]
    InvalidSampleRate(f64),
    #[error("Invalid noise variance {0}")]
    InvalidNoiseVariance(f64),
    #[error("Invalid maximum distance {0} m")]
    InvalidDistance(f64),
    #[error("Invalid interference tone ({frequency} Hz, amplitude {amplitude})")]
    InvalidInterference { frequency: f64, amplitude: f64 },
}
