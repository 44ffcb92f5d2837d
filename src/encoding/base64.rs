//! This module provides base64 encoding and decoding with the RFC 4648
//! standard and URL-safe alphabets, both padded.
//!
//! Every 3 input bytes become 4 output characters. Decoding follows the same
//! strict rules as base32: padded length, padding only as a suffix, and zero
//! trailing bits.

use std::io;

use bytes::BufMut;
use thiserror::Error;

/// Standard encoding alphabet from RFC 4648.
pub const STANDARD_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// URL and filename safe encoding alphabet from RFC 4648.
pub const URL_SAFE_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Padding character from RFC 4648.
pub const PAD_CHAR: u8 = b'=';

const BLOCK_LEN: usize = 3;
const ENCODED_BLOCK_LEN: usize = 4;
const INVALID: u8 = 0xff;

const STANDARD_DECODE_MAP: [u8; 256] = decode_map(STANDARD_ALPHABET);
const URL_SAFE_DECODE_MAP: [u8; 256] = decode_map(URL_SAFE_ALPHABET);

const fn decode_map(alphabet: &[u8; 64]) -> [u8; 256] {
    let mut map = [INVALID; 256];
    let mut i = 0;
    while i < alphabet.len() {
        map[alphabet[i] as usize] = i as u8;
        i += 1;
    }
    map
}

/// Selects one of the two base64 alphabets.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Alphabet {
    Standard,
    UrlSafe,
}

impl Alphabet {
    fn encode_map(self) -> &'static [u8; 64] {
        match self {
            Alphabet::Standard => STANDARD_ALPHABET,
            Alphabet::UrlSafe => URL_SAFE_ALPHABET,
        }
    }

    fn decode_map(self) -> &'static [u8; 256] {
        match self {
            Alphabet::Standard => &STANDARD_DECODE_MAP,
            Alphabet::UrlSafe => &URL_SAFE_DECODE_MAP,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum Base64DecodeError {
    #[error("invalid base64 length or padding in input of {length} characters")]
    InvalidLength {
        /// The length of the whole input.
        length: usize,
    },

    #[error("at position {position}: invalid base64 character: {character:#04x}")]
    InvalidCharacter {
        /// The offending byte.
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

impl From<Base64DecodeError> for io::Error {
    fn from(error: Base64DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", error))
    }
}

/// Returns the length of the encoding of `n` bytes.
#[inline]
pub fn encode_len(n: usize) -> usize {
    (n + BLOCK_LEN - 1) / BLOCK_LEN * ENCODED_BLOCK_LEN
}

/// Returns the maximum length of the decoding of `n` characters.
#[inline]
pub fn decode_len(n: usize) -> usize {
    n / ENCODED_BLOCK_LEN * BLOCK_LEN
}

/// Encodes `src` with the given alphabet and appends the result to `dst`.
pub fn encode_to<B: BufMut>(src: &[u8], alphabet: Alphabet, dst: &mut B) {
    let encode_map = alphabet.encode_map();
    for chunk in src.chunks(BLOCK_LEN) {
        let mut block = [0u8; BLOCK_LEN];
        block[..chunk.len()].copy_from_slice(chunk);

        // 3x8 bits => 4x6 bits.
        let bits = block
            .iter()
            .fold(0u32, |acc, &byte| (acc << 8) | u32::from(byte));

        let used = chunk.len() + 1;
        for i in 0..ENCODED_BLOCK_LEN {
            if i < used {
                let index = (bits >> (18 - 6 * i)) & 0x3f;
                dst.put_u8(encode_map[index as usize]);
            } else {
                dst.put_u8(PAD_CHAR);
            }
        }
    }
}

fn encode_with(src: &[u8], alphabet: Alphabet) -> String {
    let mut dst = Vec::with_capacity(encode_len(src.len()));
    encode_to(src, alphabet, &mut dst);
    dst.into_iter().map(char::from).collect()
}

/// Returns the standard base64 encoding of `src`.
pub fn encode(src: &[u8]) -> String {
    encode_with(src, Alphabet::Standard)
}

/// Returns the URL-safe base64 encoding of `src`.
pub fn encode_url(src: &[u8]) -> String {
    encode_with(src, Alphabet::UrlSafe)
}

/// Decodes the given base64 text using the given alphabet.
pub fn decode_with<T: AsRef<[u8]> + ?Sized>(
    src: &T,
    alphabet: Alphabet,
) -> Result<Vec<u8>, Base64DecodeError> {
    let src = src.as_ref();
    let length = src.len();
    let decode_map = alphabet.decode_map();

    if length % ENCODED_BLOCK_LEN != 0 {
        return Err(Base64DecodeError::InvalidLength { length });
    }

    let data_len = src
        .iter()
        .rposition(|&c| c != PAD_CHAR)
        .map_or(0, |position| position + 1);

    if length > data_len {
        match data_len % ENCODED_BLOCK_LEN {
            2 | 3 => (),
            _ => return Err(Base64DecodeError::InvalidLength { length }),
        }
    }

    let mut dst = Vec::with_capacity(decode_len(length));
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;

    for (position, &c) in src[..data_len].iter().enumerate() {
        let value = decode_map[c as usize];
        if value == INVALID {
            if c == PAD_CHAR {
                return Err(Base64DecodeError::InvalidLength { length });
            }
            return Err(Base64DecodeError::InvalidCharacter {
                character: c,
                position,
            });
        }

        acc = (acc << 6) | u32::from(value);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            dst.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }

    if acc != 0 {
        return Err(Base64DecodeError::InvalidPadding {
            position: data_len - 1,
        });
    }

    Ok(dst)
}

/// Decodes the given standard base64 text.
pub fn decode<T: AsRef<[u8]> + ?Sized>(src: &T) -> Result<Vec<u8>, Base64DecodeError> {
    decode_with(src, Alphabet::Standard)
}

/// Decodes the given URL-safe base64 text.
pub fn decode_url<T: AsRef<[u8]> + ?Sized>(src: &T) -> Result<Vec<u8>, Base64DecodeError> {
    decode_with(src, Alphabet::UrlSafe)
}

/*=======*
 * TESTS *
 *=======*/
