//! This module provides base16 (hex) encoding and decoding.
//!
//! Encoding produces lower-case digits. Decoding accepts either case.

use std::io;

use bytes::BufMut;
use thiserror::Error;

/// Encoding alphabet.
pub const ALPHABET: &[u8; 16] = b"0123456789abcdef";

#[derive(Debug, Error, PartialEq)]
pub enum Base16DecodeError {
    #[error("at position {position}: invalid hex character: {character:#04x}")]
    InvalidCharacter {
        /// The offending byte.
        character: u8,

        /// The position of the offending byte in the input.
        position: usize,
    },

    #[error("odd hex input length: {length}")]
    OddLength {
        /// The length of the whole input. Always odd.
        length: usize,
    },
}

impl From<Base16DecodeError> for io::Error {
    fn from(error: Base16DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", error))
    }
}

/// Returns the length of the encoding of `n` bytes.
#[inline]
pub fn encode_len(n: usize) -> usize {
    n * 2
}

/// Returns the length of the decoding of `n` characters.
#[inline]
pub fn decode_len(n: usize) -> usize {
    n / 2
}

/// Encodes `src` and appends the result to `dst`.
pub fn encode_to<B: BufMut>(src: &[u8], dst: &mut B) {
    for &byte in src {
        dst.put_u8(ALPHABET[(byte >> 4) as usize]);
        dst.put_u8(ALPHABET[(byte & 0x0f) as usize]);
    }
}

/// Returns the hex encoding of `src`.
pub fn encode(src: &[u8]) -> String {
    let mut dst = Vec::with_capacity(encode_len(src.len()));
    encode_to(src, &mut dst);
    dst.into_iter().map(char::from).collect()
}

fn from_hex_char(character: u8, position: usize) -> Result<u8, Base16DecodeError> {
    match character {
        b'0'..=b'9' => Ok(character - b'0'),
        b'a'..=b'f' => Ok(character - b'a' + 10),
        b'A'..=b'F' => Ok(character - b'A' + 10),
        _ => Err(Base16DecodeError::InvalidCharacter {
            character,
            position,
        }),
    }
}

/// Decodes the given hex text.
///
/// An invalid character is reported before an odd length, so that the first
/// problem in the input is the one reported.
pub fn decode<T: AsRef<[u8]> + ?Sized>(src: &T) -> Result<Vec<u8>, Base16DecodeError> {
    let src = src.as_ref();

    let mut dst = Vec::with_capacity(decode_len(src.len()));
    for (index, pair) in src.chunks(2).enumerate() {
        let position = 2 * index;
        let high = from_hex_char(pair[0], position)?;
        if pair.len() < 2 {
            return Err(Base16DecodeError::OddLength { length: src.len() });
        }
        let low = from_hex_char(pair[1], position + 1)?;
        dst.push((high << 4) | low);
    }

    Ok(dst)
}
