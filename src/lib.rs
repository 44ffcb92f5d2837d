//! Codec primitives for wire formats: fixed-width integers in either byte
//! order, and RFC 4648 base16, base32 and base64 text encodings.

#[macro_use]
extern crate log;

pub mod encoding;
