//! Audio Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AudioError {
    #[error("Nothing to merge: no audio containers were supplied")]
    EmptyMerge,

    #[error("Audio container too short: {len} bytes, header needs 44")]
    Truncated { len: usize },

    #[error("Invalid WAV header: {0}")]
    InvalidHeader(String),

    #[error("Audio container {index} format differs from the first container")]
    FormatMismatch { index: usize },

    #[error("Audio data too large for a WAV container: {len} bytes")]
    TooLarge { len: usize },

    #[error("Invalid audio format: {0}")]
    InvalidFormat(String),
}
