mod design;
mod sos;

pub mod builtin;

pub use design::{Band, FilterDesigner, FilterTemplate};
pub use sos::{ApplyFilter, FilterSpec, Response, Section};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid sample rate {0} Hz")]
    InvalidSampleRate(f64),
    #[error("Invalid band edges {0:?} (expected pass band inside stop band, below Nyquist)")]
    InvalidBand(Band),
    #[error("Invalid tolerances (ripple {pass_ripple} dB, attenuation {stop_attenuation} dB)")]
    InvalidTolerance {
        pass_ripple: f64,
        stop_attenuation: f64,
    },
    #[error("Infeasible design (order {0} exceeds the maximum of {})", builtin::MAX_ORDER)]
    Infeasible(usize),
    #[error("Unstable design of order {0}")]
    Unstable(usize),
}
