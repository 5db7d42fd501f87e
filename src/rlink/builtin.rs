//! # Rathernet Link
//! A transmission is GUARD_LEN silent samples, the baseband frame of SYMBOL_LEN samples per bit
//! and GUARD_LEN silent samples again, carried at CARRIER_FREQUENCY. The leading guard is where
//! the receiver learns the noise level, inside SYNC_WINDOW.

use std::ops::Range;

pub const SYMBOL_LEN: usize = 320;
pub const SAMPLE_RATE: f64 = 16000.0;
pub const CARRIER_FREQUENCY: f64 = 4000.0;
pub const GUARD_LEN: usize = 4 * SYMBOL_LEN;

pub const BAND_PASS_PASS: (f64, f64) = (3900.0, 4100.0);
pub const BAND_PASS_STOP: (f64, f64) = (3850.0, 4150.0);
pub const BAND_PASS_RIPPLE: f64 = 3.0;
pub const BAND_PASS_ATTENUATION: f64 = 20.0;

pub const LOW_PASS_PASS: f64 = 100.0;
pub const LOW_PASS_STOP: f64 = 200.0;
pub const LOW_PASS_RIPPLE: f64 = 3.0;
pub const LOW_PASS_ATTENUATION: f64 = 40.0;

pub const SYNC_WINDOW: Range<usize> = 300..1000;
pub const SYNC_PROBABILITY: f64 = 0.999999;
pub const SYNC_FLOOR: f64 = 1e-4;

pub const DEFAULT_TEXT: &str = "Hello World!";
