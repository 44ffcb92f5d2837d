//! Binary and text encodings.
//!
//!   * `byte_order` converts fixed-width unsigned integers to and from bytes.
//!   * `base16`, `base32` and `base64` convert arbitrary bytes to and from
//!     printable text, per RFC 4648.
//!
//! All functions here are pure: they read their input, allocate their output
//! and touch nothing else.

pub mod base16;
pub mod base32;
pub mod base64;
mod byte_order;

#[cfg(test)]
pub mod testing;

use std::fmt;
use std::io;
use std::str::FromStr;

use thiserror::Error;

pub use self::base16::Base16DecodeError;
pub use self::base32::Base32DecodeError;
pub use self::base64::Base64DecodeError;
pub use self::byte_order::{ByteOrder, ByteOrderError, U16_BYTE_LEN, U32_BYTE_LEN, U64_BYTE_LEN};

/// A failure to decode text with any of the text codecs.
#[derive(Debug, Error, PartialEq)]
pub enum DecodeError {
    #[error("base16: {0}")]
    Base16(#[from] Base16DecodeError),

    #[error("base32: {0}")]
    Base32(#[from] Base32DecodeError),

    #[error("base64: {0}")]
    Base64(#[from] Base64DecodeError),
}

impl From<DecodeError> for io::Error {
    fn from(error: DecodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", error))
    }
}

/// Selects a text codec at runtime, e.g. from a command-line argument.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TextCodec {
    Base16,
    Base32,
    Base64,
    Base64Url,
}

impl TextCodec {
    /// Every supported codec.
    pub const ALL: &'static [TextCodec] = &[
        TextCodec::Base16,
        TextCodec::Base32,
        TextCodec::Base64,
        TextCodec::Base64Url,
    ];

    /// The name by which this codec is parsed and displayed.
    pub fn name(self) -> &'static str {
        match self {
            TextCodec::Base16 => "base16",
            TextCodec::Base32 => "base32",
            TextCodec::Base64 => "base64",
            TextCodec::Base64Url => "base64url",
        }
    }

    /// Returns the encoding of `src`.
    pub fn encode(self, src: &[u8]) -> String {
        trace!("{}: encoding {} bytes", self, src.len());
        match self {
            TextCodec::Base16 => base16::encode(src),
            TextCodec::Base32 => base32::encode(src),
            TextCodec::Base64 => base64::encode(src),
            TextCodec::Base64Url => base64::encode_url(src),
        }
    }

    /// Decodes `src`.
    pub fn decode<T: AsRef<[u8]> + ?Sized>(self, src: &T) -> Result<Vec<u8>, DecodeError> {
        let src = src.as_ref();
        trace!("{}: decoding {} characters", self, src.len());
        let result = match self {
            TextCodec::Base16 => base16::decode(src).map_err(DecodeError::from),
            TextCodec::Base32 => base32::decode(src).map_err(DecodeError::from),
            TextCodec::Base64 => base64::decode(src).map_err(DecodeError::from),
            TextCodec::Base64Url => base64::decode_url(src).map_err(DecodeError::from),
        };
        if let Err(ref error) = result {
            debug!("Rejected {}-character input: {}", src.len(), error);
        }
        result
    }
}

impl fmt::Display for TextCodec {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq)]
#[error("unknown codec {0:?}, expected one of base16, base32, base64, base64url")]
pub struct UnknownCodecError(pub String);

impl FromStr for TextCodec {
    type Err = UnknownCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TextCodec::ALL
            .iter()
            .copied()
            .find(|codec| codec.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCodecError(s.to_string()))
    }
}
