//! # Rathernet Baseband
//! A baseband frame is a preamble (PREAMBLE) followed by the payload, one rectangular symbol of
//! `symbol_len` samples per bit. The preamble is used to find the start of the frame and to fix
//! the polarity of the received symbols.

pub const PREAMBLE: [bool; 2] = [true, false];
pub const PREAMBLE_SYMBOL_LEN: usize = PREAMBLE.len();

/// Position inside a symbol where the decoder samples it, as a fraction of the symbol length.
pub const SAMPLE_POSITION: f64 = 0.9;
