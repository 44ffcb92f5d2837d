//! This module provides encoding and decoding of fixed-width unsigned integers
//! in either byte order.
//!
//! Byte order is a call-site parameter:
//!
//!   * Little-endian places the least significant byte at position 0.
//!   * Big-endian places the most significant byte at position 0.
//!
//! ```
//! use wirecodec::encoding::ByteOrder;
//!
//! assert_eq!(ByteOrder::LittleEndian.encode_u16(0x1234), [0x34, 0x12]);
//! assert_eq!(ByteOrder::BigEndian.encode_u16(0x1234), [0x12, 0x34]);
//! assert_eq!(ByteOrder::LittleEndian.decode_u16(&[0x34, 0x12]), Ok(0x1234));
//! ```

use std::io;

use thiserror::Error;

/// Length of an encoded 16-bit integer in bytes.
pub const U16_BYTE_LEN: usize = 2;

/// Length of an encoded 32-bit integer in bytes.
pub const U32_BYTE_LEN: usize = 4;

/// Length of an encoded 64-bit integer in bytes.
pub const U64_BYTE_LEN: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum ByteOrderError {
    #[error("expected a buffer of {expected} bytes, found {found}")]
    LengthMismatch {
        /// The width of the integer in bytes.
        expected: usize,

        /// The length of the buffer passed in.
        ///
        /// Invariant: `found != expected`.
        found: usize,
    },
}

impl From<ByteOrderError> for io::Error {
    fn from(error: ByteOrderError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", error))
    }
}

/// The order in which the bytes of an integer are laid out.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the host.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;

    /// The byte order of the host.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// Returns the bit offset of the byte at `index` in an integer `len` bytes
    /// wide.
    fn shift(self, index: usize, len: usize) -> usize {
        match self {
            ByteOrder::LittleEndian => 8 * index,
            ByteOrder::BigEndian => 8 * (len - 1 - index),
        }
    }

    /// Writes the low `dst.len()` bytes of `value` into `dst`.
    fn write(self, value: u64, dst: &mut [u8]) {
        let len = dst.len();
        for (index, byte) in dst.iter_mut().enumerate() {
            *byte = (value >> self.shift(index, len)) as u8;
        }
    }

    /// Reads an integer of `expected` bytes from `src`.
    fn read(self, src: &[u8], expected: usize) -> Result<u64, ByteOrderError> {
        check_len(src.len(), expected)?;
        let value = src
            .iter()
            .enumerate()
            .fold(0u64, |acc, (index, &byte)| {
                acc | (u64::from(byte) << self.shift(index, expected))
            });
        Ok(value)
    }

    /// Returns the byte representation of the given 16-bit value.
    pub fn encode_u16(self, value: u16) -> [u8; U16_BYTE_LEN] {
        let mut bytes = [0; U16_BYTE_LEN];
        self.write(u64::from(value), &mut bytes);
        bytes
    }

    /// Returns the byte representation of the given 32-bit value.
    pub fn encode_u32(self, value: u32) -> [u8; U32_BYTE_LEN] {
        let mut bytes = [0; U32_BYTE_LEN];
        self.write(u64::from(value), &mut bytes);
        bytes
    }

    /// Returns the byte representation of the given 64-bit value.
    pub fn encode_u64(self, value: u64) -> [u8; U64_BYTE_LEN] {
        let mut bytes = [0; U64_BYTE_LEN];
        self.write(value, &mut bytes);
        bytes
    }

    /// Writes the byte representation of `value` into `dst`, which must be
    /// exactly `U16_BYTE_LEN` bytes long.
    ///
    /// On error `dst` is left untouched.
    pub fn put_u16(self, value: u16, dst: &mut [u8]) -> Result<(), ByteOrderError> {
        check_len(dst.len(), U16_BYTE_LEN)?;
        self.write(u64::from(value), dst);
        Ok(())
    }

    /// Writes the byte representation of `value` into `dst`, which must be
    /// exactly `U32_BYTE_LEN` bytes long.
    ///
    /// On error `dst` is left untouched.
    pub fn put_u32(self, value: u32, dst: &mut [u8]) -> Result<(), ByteOrderError> {
        check_len(dst.len(), U32_BYTE_LEN)?;
        self.write(u64::from(value), dst);
        Ok(())
    }

    /// Writes the byte representation of `value` into `dst`, which must be
    /// exactly `U64_BYTE_LEN` bytes long.
    ///
    /// On error `dst` is left untouched.
    pub fn put_u64(self, value: u64, dst: &mut [u8]) -> Result<(), ByteOrderError> {
        check_len(dst.len(), U64_BYTE_LEN)?;
        self.write(value, dst);
        Ok(())
    }

    /// Returns the 16-bit value represented by the given bytes.
    pub fn decode_u16(self, bytes: &[u8]) -> Result<u16, ByteOrderError> {
        // Only the low 16 bits can be set after a successful read.
        self.read(bytes, U16_BYTE_LEN).map(|value| value as u16)
    }

    /// Returns the 32-bit value represented by the given bytes.
    pub fn decode_u32(self, bytes: &[u8]) -> Result<u32, ByteOrderError> {
        self.read(bytes, U32_BYTE_LEN).map(|value| value as u32)
    }

    /// Returns the 64-bit value represented by the given bytes.
    pub fn decode_u64(self, bytes: &[u8]) -> Result<u64, ByteOrderError> {
        self.read(bytes, U64_BYTE_LEN)
    }
}

fn check_len(found: usize, expected: usize) -> Result<(), ByteOrderError> {
    if found != expected {
        return Err(ByteOrderError::LengthMismatch { expected, found });
    }
    Ok(())
}

/*=======*
 * TESTS *
 *=======*/
