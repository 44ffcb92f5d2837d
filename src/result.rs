use std::io;
use std::result;

use thiserror::Error;

use wirecodec::encoding::{DecodeError, UnknownCodecError};

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    IOError(#[from] io::Error),

    #[error("{0}")]
    DecodeError(#[from] DecodeError),

    #[error("{0}")]
    UnknownCodecError(#[from] UnknownCodecError),

    #[error("input is larger than {limit} bytes")]
    InputTooLarge {
        /// The maximum accepted input length.
        limit: usize,
    },

    #[error("usage: {0}")]
    UsageError(String),
}

pub type Result<T> = result::Result<T, Error>;
