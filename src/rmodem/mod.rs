mod carrier;
mod modulate;
mod sync;

pub mod builtin;
pub mod signal;

pub use carrier::Carrier;
pub use modulate::{Demodulator, Modulator};
pub use sync::{Normalization, SyncConfig, Synchronization, SynchronizationDetector};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModemError {
    #[error("Invalid sample rate {0} Hz")]
    InvalidSampleRate(f64),
    #[error("Invalid carrier frequency {frequency} Hz (expected below half of {sample_rate} Hz)")]
    InvalidCarrier { frequency: f64, sample_rate: f64 },
}
