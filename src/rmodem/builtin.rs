//! # Rathernet Modem
//! The baseband is carried by a sinusoid of amplitude CARRIER_AMPLITUDE, so that a unit power
//! baseband yields a unit power passband. The receiver mixes with the same amplitude to get the
//! baseband back at its original scale.
//!
//! The start of a frame is the first sample whose normalized energy exceeds the
//! DEFAULT_SYNC_PROBABILITY quantile of a chi-square distribution with two degrees of freedom,
//! the reference being estimated on the leading DEFAULT_SYNC_WINDOW samples.

use std::{f64::consts::SQRT_2, ops::Range};

pub const CARRIER_AMPLITUDE: f64 = SQRT_2;

pub const DEFAULT_SYNC_WINDOW: Range<usize> = 0..100;
pub const DEFAULT_SYNC_PROBABILITY: f64 = 0.99;
