//! Segment Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SegmentError {
    #[error("Invalid generation settings: {0}")]
    InvalidSettings(String),
}
