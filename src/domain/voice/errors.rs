//! Voice Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Voice not found: {0}")]
    NotFound(String),

    #[error("Unknown base voice: {0}")]
    UnknownBaseVoice(String),

    #[error("Unknown emotion: {0}")]
    UnknownEmotion(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),
}
