//! Error types for the COMP40 image codec.

use std::io;
use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Errors that can occur while compressing or decompressing an image.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Malformed PPM header, malformed COMP40 header, truncated body, or
    /// a PPM subtype other than RGB (P6).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A bit-field write was asked to store a value outside its declared
    /// width. Distinguished from a caller-contract violation (those remain
    /// `assert!`s) because this can arise from legitimate data and must be
    /// testable.
    #[error("field overflow: value {value} does not fit in {width}-bit field")]
    FieldOverflow { width: u32, value: i64 },

    /// I/O failure on the underlying stream.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
