//! This module provides base32 encoding and decoding with the standard
//! RFC 4648 alphabet and padding.
//!
//! Input bytes are read as a bitstream, most significant bit first, and cut
//! into 5-bit groups. Each group indexes into `ALPHABET`. Every 5 input bytes
//! become 8 output characters; a trailing partial block is zero-filled to the
//! next 5-bit boundary and padded with `PAD_CHAR` to 8 characters.
//!
//! ```
//! use wirecodec::encoding::base32;
//!
//! assert_eq!(base32::encode(b"foo"), "MZXW6===");
//! assert_eq!(base32::decode("MZXW6===").unwrap(), b"foo");
//! ```

use std::io;

use bytes::BufMut;
use thiserror::Error;

/// Standard encoding alphabet from RFC 4648.
pub const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Padding character from RFC 4648.
pub const PAD_CHAR: u8 = b'=';

/// Number of input bytes in a full block.
const BLOCK_LEN: usize = 5;

/// Number of output characters per block.
const ENCODED_BLOCK_LEN: usize = 8;

/// Marks bytes that are not in `ALPHABET` in `DECODE_MAP`.
const INVALID: u8 = 0xff;

/// Maps each byte to its 5-bit value, or `INVALID`.
const DECODE_MAP: [u8; 256] = decode_map(ALPHABET);

const fn decode_map(alphabet: &[u8; 32]) -> [u8; 256] {
    let mut map = [INVALID; 256];
    let mut i = 0;
    while i < alphabet.len() {
        map[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    map
}

#[derive(Debug, Error, PartialEq)]
pub enum Base32DecodeError {
    #[error("invalid base32 length or padding in input of {length} characters")]
    InvalidLength {
        /// The length of the whole input.
        length: usize,
    },

    #[error("at position {position}: invalid base32 character: {character:#04x}")]
    InvalidCharacter {
        /// The offending byte. Never in `ALPHABET`, never `PAD_CHAR`.
        character: u8,

        /// The position of the offending byte in the input.
        position: usize,
    },

    #[error("at position {position}: non-zero trailing bits before padding")]
    InvalidPadding {
        /// The position of the last data character.
        position: usize,
    },
}

impl From<Base32DecodeError> for io::Error {
    fn from(error: Base32DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", error))
    }
}

/// Returns the length of the encoding of `n` bytes.
#[inline]
pub fn encode_len(n: usize) -> usize {
    (n + BLOCK_LEN - 1) / BLOCK_LEN * ENCODED_BLOCK_LEN
}

/// Returns the maximum length of the decoding of `n` characters.
///
/// Exact when the input has no padding.
#[inline]
pub fn decode_len(n: usize) -> usize {
    n / ENCODED_BLOCK_LEN * BLOCK_LEN
}

/// Returns the number of data characters encoding a block of `n` bytes,
/// `1 <= n <= 5`.
fn data_chars(n: usize) -> usize {
    (n * 8 + 4) / 5
}

/// Encodes `src` and appends the result to `dst`.
///
/// The buffer is not pre-cleared.
pub fn encode_to<B: BufMut>(src: &[u8], dst: &mut B) {
    for chunk in src.chunks(BLOCK_LEN) {
        let mut block = [0u8; BLOCK_LEN];
        block[..chunk.len()].copy_from_slice(chunk);

        // 5x8 bits => 8x5 bits, in the low 40 bits of `bits`.
        let bits = block
            .iter()
            .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte));

        let used = data_chars(chunk.len());
        for i in 0..ENCODED_BLOCK_LEN {
            if i < used {
                let index = (bits >> (35 - 5 * i)) & 0x1f;
                dst.put_u8(ALPHABET[index as usize]);
            } else {
                dst.put_u8(PAD_CHAR);
            }
        }
    }
}

/// Returns the base32 encoding of `src`.
pub fn encode(src: &[u8]) -> String {
    let mut dst = Vec::with_capacity(encode_len(src.len()));
    encode_to(src, &mut dst);
    dst.into_iter().map(char::from).collect()
}

/// Decodes the given base32 text.
///
/// Decoding is strict: the input length must be a multiple of 8, padding may
/// only appear as a suffix of a length RFC 4648 can produce, and the bits
/// left over after the last full byte must be zero.
pub fn decode<T: AsRef<[u8]> + ?Sized>(src: &T) -> Result<Vec<u8>, Base32DecodeError> {
    let src = src.as_ref();
    let length = src.len();

    if length % ENCODED_BLOCK_LEN != 0 {
        return Err(Base32DecodeError::InvalidLength { length });
    }

    let data_len = src
        .iter()
        .rposition(|&c| c != PAD_CHAR)
        .map_or(0, |position| position + 1);
    let padding = length - data_len;

    // Padding only ever completes the last block. An all-padding block is
    // never produced, nor is a last block of 1, 3 or 6 data characters.
    if padding > 0 {
        match data_len % ENCODED_BLOCK_LEN {
            2 | 4 | 5 | 7 => (),
            _ => return Err(Base32DecodeError::InvalidLength { length }),
        }
    }

    let mut dst = Vec::with_capacity(decode_len(length));

    // Holds fewer than 8 pending bits between iterations.
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for (position, &c) in src[..data_len].iter().enumerate() {
        let value = DECODE_MAP[c as usize];
        if value == INVALID {
            if c == PAD_CHAR {
                return Err(Base32DecodeError::InvalidLength { length });
            }
            return Err(Base32DecodeError::InvalidCharacter {
                character: c,
                position,
            });
        }

        acc = (acc << 5) | u32::from(value);
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            dst.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }

    if acc != 0 {
        return Err(Base32DecodeError::InvalidPadding {
            position: data_len - 1,
        });
    }

    Ok(dst)
}

/*=======*
 * TESTS *
 *=======*/

#[cfg(test)]
mod tests {
    use std::io;

    use bytes::BytesMut;
    use proptest::prelude::*;

    use super::{decode, decode_len, encode, encode_len, encode_to, Base32DecodeError, PAD_CHAR};
    use crate::encoding::testing::arbitrary_bytes;

    // Test vectors from RFC 4648 section 10.
    const ENCODINGS: [(&str, &str); 7] = [
        ("", ""),
        ("f", "MY======"),
        ("fo", "MZXQ===="),
        ("foo", "MZXW6==="),
        ("foob", "MZXW6YQ="),
        ("fooba", "MZXW6YTB"),
        ("foobar", "MZXW6YTBOI======"),
    ];

    #[test]
    fn encode_rfc_vectors() {
        for &(input, expected) in &ENCODINGS {
            assert_eq!(encode(input.as_bytes()), expected);
        }
    }

    #[test]
    fn decode_rfc_vectors() {
        for &(expected, input) in &ENCODINGS {
            assert_eq!(decode(input).unwrap(), expected.as_bytes());
        }
    }

    #[test]
    fn encode_single_byte_extremes() {
        assert_eq!(encode(&[0]), "AA======");
        assert_eq!(encode(&[0xff]), "74======");
    }

    #[test]
    fn encode_to_appends() {
        let mut buffer = BytesMut::new();
        buffer.extend_from_slice(b"x:");

        encode_to(b"fooba", &mut buffer);

        assert_eq!(&buffer[..], b"x:MZXW6YTB");
    }

    #[test]
    fn encode_len_values() {
        assert_eq!(encode_len(0), 0);
        assert_eq!(encode_len(1), 8);
        assert_eq!(encode_len(5), 8);
        assert_eq!(encode_len(6), 16);
        assert_eq!(decode_len(0), 0);
        assert_eq!(decode_len(8), 5);
        assert_eq!(decode_len(16), 10);
    }

    #[test]
    fn decode_invalid_character() {
        assert_eq!(
            decode("MZX!6==="),
            Err(Base32DecodeError::InvalidCharacter {
                character: b'!',
                position: 3,
            })
        );
    }

    #[test]
    fn decode_lowercase_is_invalid() {
        assert_eq!(
            decode("mzxw6==="),
            Err(Base32DecodeError::InvalidCharacter {
                character: b'm',
                position: 0,
            })
        );
    }

    #[test]
    fn decode_length_not_multiple_of_eight() {
        assert_eq!(
            decode("MZXW6=="),
            Err(Base32DecodeError::InvalidLength { length: 7 })
        );
        assert_eq!(
            decode("MZXW6YTBO"),
            Err(Base32DecodeError::InvalidLength { length: 9 })
        );
    }

    #[test]
    fn decode_padding_in_the_middle() {
        assert_eq!(
            decode("MY=A===="),
            Err(Base32DecodeError::InvalidLength { length: 8 })
        );
        assert_eq!(
            decode("MY======MZXQ===="),
            Err(Base32DecodeError::InvalidLength { length: 16 })
        );
    }

    #[test]
    fn decode_impossible_padding_count() {
        // 1, 3 and 6 data characters never end a block.
        for input in &["M=======", "MZX=====", "MZXW6Y==", "========"] {
            assert_eq!(
                decode(*input),
                Err(Base32DecodeError::InvalidLength { length: 8 })
            );
        }
    }

    #[test]
    fn decode_non_zero_trailing_bits() {
        // 'Z' carries bits below the single encoded byte.
        assert_eq!(
            decode("MZ======"),
            Err(Base32DecodeError::InvalidPadding { position: 1 })
        );
    }

    #[test]
    fn error_converts_to_io_error() {
        let io_error = io::Error::from(Base32DecodeError::InvalidLength { length: 3 });
        assert_eq!(io_error.kind(), io::ErrorKind::InvalidData);
    }

    proptest! {
        #[test]
        fn roundtrip(bytes in arbitrary_bytes()) {
            prop_assert_eq!(decode(&encode(&bytes)), Ok(bytes));
        }

        #[test]
        fn encoded_length(bytes in arbitrary_bytes()) {
            let encoded = encode(&bytes);
            prop_assert_eq!(encoded.len() % 8, 0);
            prop_assert_eq!(encoded.len(), 8 * ((bytes.len() + 4) / 5));
            prop_assert_eq!(encoded.len(), encode_len(bytes.len()));
        }

        #[test]
        fn padding_count(bytes in arbitrary_bytes()) {
            let expected = [0, 6, 4, 3, 1][bytes.len() % 5];
            let encoded = encode(&bytes);
            let padding = encoded
                .bytes()
                .rev()
                .take_while(|&c| c == PAD_CHAR)
                .count();
            prop_assert_eq!(padding, expected);
        }

        #[test]
        fn decode_never_panics(input in prop::collection::vec(any::<u8>(), 0..64)) {
            let _ = decode(&input);
        }
    }
}
