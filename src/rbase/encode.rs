use super::BitLiteralError;
use bitvec::prelude::*;
use num::traits::PrimInt;

pub trait DecodeToInt<T: PrimInt> {
    fn decode(&self) -> T;
}

// Most significant bit first.
fn decode<T: PrimInt>(bits: &BitSlice) -> T {
    let zero = T::zero();
    let one = T::one();
    bits.iter()
        .fold(zero, |acc, bit| (acc << 1) | if *bit { one } else { zero })
}

impl<T: PrimInt> DecodeToInt<T> for BitVec {
    fn decode(&self) -> T {
        decode::<T>(self.as_bitslice())
    }
}

impl<T: PrimInt> DecodeToInt<T> for BitSlice {
    fn decode(&self) -> T {
        decode::<T>(self)
    }
}

pub trait DecodeToBytes {
    fn decode(&self) -> Vec<u8>;
}

impl DecodeToBytes for BitVec {
    fn decode(&self) -> Vec<u8> {
        DecodeToBytes::decode(self.as_bitslice())
    }
}

impl DecodeToBytes for BitSlice {
    /// A trailing partial byte is padded with zeros.
    fn decode(&self) -> Vec<u8> {
        self.chunks(8)
            .map(|chunk| DecodeToInt::<u8>::decode(chunk) << (8 - chunk.len()))
            .collect()
    }
}

pub trait EncodeFromBytes {
    fn encode(&self) -> BitVec;
}

impl EncodeFromBytes for [u8] {
    fn encode(&self) -> BitVec {
        self.iter()
            .flat_map(|byte| byte.view_bits::<Msb0>().iter().by_vals())
            .collect()
    }
}

impl EncodeFromBytes for Vec<u8> {
    fn encode(&self) -> BitVec {
        self.as_slice().encode()
    }
}

pub fn encode_text_to_bits(text: &str) -> BitVec {
    text.as_bytes().encode()
}

/// Every byte becomes the character with the same code point.
pub fn decode_bits_to_text(bits: &BitSlice) -> String {
    DecodeToBytes::decode(bits)
        .into_iter()
        .map(char::from)
        .collect()
}

pub fn parse_bit_literal(source: &str) -> Result<BitVec, BitLiteralError> {
    let mut bits = bitvec![];
    for ch in source.chars() {
        match ch {
            '0' => bits.push(false),
            '1' => bits.push(true),
            _ => return Err(BitLiteralError::InvalidChar(ch)),
        }
    }
    Ok(bits)
}
