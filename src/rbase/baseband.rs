use super::{
    builtin::{PREAMBLE, PREAMBLE_SYMBOL_LEN, SAMPLE_POSITION},
    BasebandError,
};
use bitvec::prelude::*;
use num::complex::Complex64;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolMapping {
    pub zero: f64,
    pub one: f64,
}

impl SymbolMapping {
    pub fn new(zero: f64, one: f64) -> Self {
        Self { zero, one }
    }

    pub fn symbol(&self, bit: bool) -> f64 {
        if bit {
            self.one
        } else {
            self.zero
        }
    }

    pub fn is_antipodal(&self) -> bool {
        self.zero * self.one < 0.0
    }
}

impl Default for SymbolMapping {
    fn default() -> Self {
        Self::new(-1.0, 1.0)
    }
}

/// What the phase of a sampled symbol is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhaseReference {
    /// The sign of the absolute phase.
    #[default]
    Absolute,
    /// The sign of the phase relative to the first preamble symbol.
    Preamble,
}

#[derive(Debug, Clone)]
pub struct BasebandEncoder {
    symbol_len: usize,
    mapping: SymbolMapping,
}

impl BasebandEncoder {
    pub fn new(symbol_len: usize, mapping: SymbolMapping) -> Result<Self, BasebandError> {
        if symbol_len == 0 {
            return Err(BasebandError::InvalidSymbolLength(symbol_len));
        }
        Ok(Self {
            symbol_len,
            mapping,
        })
    }

    pub fn symbol_len(&self) -> usize {
        self.symbol_len
    }

    pub fn mapping(&self) -> SymbolMapping {
        self.mapping
    }

    /// Encodes the preamble and `bits` into `(bits.len() + 2) * symbol_len` samples.
    pub fn encode(&self, bits: &BitSlice) -> Vec<f64> {
        let symbols = PREAMBLE
            .into_iter()
            .chain(bits.iter().by_vals())
            .map(|bit| self.mapping.symbol(bit));

        let mut impulses = vec![0f64; (bits.len() + PREAMBLE_SYMBOL_LEN) * self.symbol_len];
        for (index, symbol) in symbols.enumerate() {
            impulses[index * self.symbol_len] = symbol;
        }
        moving_sum(&impulses, self.symbol_len)
    }
}

// Rectangular pulse shaping.
fn moving_sum(source: &[f64], len: usize) -> Vec<f64> {
    let mut acc = 0f64;
    source
        .iter()
        .enumerate()
        .map(|(i, item)| {
            acc += item;
            if i >= len {
                acc -= source[i - len];
            }
            acc
        })
        .collect()
}

#[derive(Debug, Clone)]
pub struct BasebandDecoder {
    symbol_len: usize,
    reference: PhaseReference,
}

impl BasebandDecoder {
    /// Only antipodal mappings can be told apart by phase. The polarity of the preamble takes
    /// care of which level is positive.
    pub fn new(symbol_len: usize, mapping: SymbolMapping) -> Result<Self, BasebandError> {
        if symbol_len == 0 {
            return Err(BasebandError::InvalidSymbolLength(symbol_len));
        }
        if !mapping.is_antipodal() {
            return Err(BasebandError::UnsupportedMapping(mapping));
        }
        Ok(Self {
            symbol_len,
            reference: PhaseReference::default(),
        })
    }

    pub fn with_reference(mut self, reference: PhaseReference) -> Self {
        self.reference = reference;
        self
    }

    pub fn symbol_len(&self) -> usize {
        self.symbol_len
    }

    pub fn reference(&self) -> PhaseReference {
        self.reference
    }

    /// Never past the last sample of the symbol.
    pub fn sample_offset(&self) -> usize {
        let offset = (SAMPLE_POSITION * self.symbol_len as f64).round() as usize;
        offset.min(self.symbol_len - 1)
    }

    /// Signs of every symbol from `start` on, preamble included, before normalization.
    pub fn polarities(&self, signal: &[Complex64], start: usize) -> Vec<f64> {
        let first = start + self.sample_offset();
        let indices = (first..signal.len()).step_by(self.symbol_len);
        match self.reference {
            PhaseReference::Absolute => indices.map(|i| sign(signal[i].arg())).collect(),
            PhaseReference::Preamble => {
                let Some(reference) = signal.get(first).map(Complex64::conj) else {
                    return vec![];
                };
                indices.map(|i| sign((signal[i] * reference).re)).collect()
            }
        }
    }

    /// Decodes the payload of the frame starting at `start`, at most `len` bits if given.
    pub fn decode(&self, signal: &[Complex64], start: usize, len: Option<usize>) -> BitVec {
        let polarities = self.polarities(signal, start);
        let first = match polarities.first() {
            Some(first) if *first != 0.0 => *first,
            Some(_) => 1.0,
            None => return bitvec![],
        };

        polarities
            .iter()
            .skip(PREAMBLE_SYMBOL_LEN)
            .take(len.unwrap_or(usize::MAX))
            .map(|polarity| polarity / first > 0.0)
            .collect()
    }
}

fn sign(value: f64) -> f64 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn to_complex(signal: &[f64], rotation: f64) -> Vec<Complex64> {
        let rotation = Complex64::from_polar(1.0, rotation);
        signal
            .iter()
            .map(|item| Complex64::new(*item, 0.0) * rotation)
            .collect()
    }

    fn payload() -> BitVec {
        bitvec![0, 1, 0, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 1, 0, 1, 1]
    }

    #[test]
    fn test_encode_golden() {
        let encoder = BasebandEncoder::new(2, SymbolMapping::default()).unwrap();
        let signal = encoder.encode(bits![1, 0, 1]);
        assert_eq!(
            signal,
            vec![1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0]
        );
    }

    #[test]
    fn test_encode_len() {
        for symbol_len in [1, 2, 8, 320] {
            let encoder = BasebandEncoder::new(symbol_len, SymbolMapping::default()).unwrap();
            for len in [0, 1, 7, 96] {
                let bits = (0..len).map(|i| i % 3 == 0).collect::<BitVec>();
                let signal = encoder.encode(&bits);
                assert_eq!(signal.len(), (len + 2) * symbol_len);
            }
        }
    }

    #[test]
    fn test_encode_sync_only() {
        let encoder = BasebandEncoder::new(4, SymbolMapping::default()).unwrap();
        let signal = encoder.encode(bits![]);
        assert_eq!(signal, vec![1.0, 1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]);
    }

    #[test]
    fn test_encode_mapping() {
        let encoder = BasebandEncoder::new(1, SymbolMapping::new(0.0, 2.0)).unwrap();
        assert_eq!(encoder.encode(bits![0, 1]), vec![2.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_invalid_configuration() {
        assert_eq!(
            BasebandEncoder::new(0, SymbolMapping::default()).err(),
            Some(BasebandError::InvalidSymbolLength(0))
        );
        assert_eq!(
            BasebandDecoder::new(0, SymbolMapping::default()).err(),
            Some(BasebandError::InvalidSymbolLength(0))
        );
        let on_off = SymbolMapping::new(0.0, 1.0);
        assert_eq!(
            BasebandDecoder::new(8, on_off).err(),
            Some(BasebandError::UnsupportedMapping(on_off))
        );
    }

    #[test]
    fn test_baseband_loop() {
        for symbol_len in [1, 2, 8, 320] {
            let encoder = BasebandEncoder::new(symbol_len, SymbolMapping::default()).unwrap();
            let decoder = BasebandDecoder::new(symbol_len, SymbolMapping::default())
                .unwrap()
                .with_reference(PhaseReference::Preamble);
            for bits in [payload(), bitvec![], bitvec![1], bitvec![0; 9]] {
                let signal = to_complex(&encoder.encode(&bits), 0.0);
                assert_eq!(decoder.decode(&signal, 0, None), bits);
            }
        }
    }

    #[test]
    fn test_absolute_reference() {
        let encoder = BasebandEncoder::new(8, SymbolMapping::default()).unwrap();
        let decoder = BasebandDecoder::new(8, SymbolMapping::default()).unwrap();
        assert_eq!(decoder.reference(), PhaseReference::Absolute);

        let bits = payload();
        for rotation in [PI / 5.0, PI / 5.0 + PI, -PI / 3.0] {
            let signal = to_complex(&encoder.encode(&bits), rotation);
            assert_eq!(decoder.decode(&signal, 0, None), bits);
        }
    }

    #[test]
    fn test_preamble_reference() {
        let encoder = BasebandEncoder::new(8, SymbolMapping::default()).unwrap();
        let decoder = BasebandDecoder::new(8, SymbolMapping::default())
            .unwrap()
            .with_reference(PhaseReference::Preamble);

        let bits = payload();
        for rotation in [0.0, PI / 2.0, PI, 3.0 * PI / 2.0, 2.0] {
            let signal = to_complex(&encoder.encode(&bits), rotation);
            assert_eq!(decoder.decode(&signal, 0, None), bits);
        }
    }

    #[test]
    fn test_inverted_mapping() {
        let mapping = SymbolMapping::new(1.0, -1.0);
        let encoder = BasebandEncoder::new(4, mapping).unwrap();
        let decoder = BasebandDecoder::new(4, mapping)
            .unwrap()
            .with_reference(PhaseReference::Preamble);

        let bits = payload();
        let signal = to_complex(&encoder.encode(&bits), 0.0);
        assert_eq!(decoder.decode(&signal, 0, None), bits);
    }

    #[test]
    fn test_decode_with_offset_and_len() {
        let encoder = BasebandEncoder::new(10, SymbolMapping::default()).unwrap();
        let decoder = BasebandDecoder::new(10, SymbolMapping::default())
            .unwrap()
            .with_reference(PhaseReference::Preamble);
        assert_eq!(decoder.sample_offset(), 9);
        let short = BasebandDecoder::new(2, SymbolMapping::default()).unwrap();
        assert_eq!(short.sample_offset(), 1);

        let bits = payload();
        let mut signal = vec![0.0; 25];
        signal.extend(encoder.encode(&bits));
        signal.extend(vec![1.0; 40]);
        let signal = to_complex(&signal, 1.0);

        let decoded = decoder.decode(&signal, 25, Some(bits.len()));
        assert_eq!(decoded, bits);
        assert_eq!(decoder.decode(&signal, 25, Some(3)), bits[..3].to_bitvec());
        assert!(decoder.decode(&signal, signal.len(), None).is_empty());
    }
}
