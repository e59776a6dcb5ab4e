//! Error types for chunk-accumulator.

use thiserror::Error;

/// Main error type for all accumulator operations.
#[derive(Debug, Error)]
pub enum AccumulatorError {
    /// Fewer than one frame's worth of bytes is buffered.
    ///
    /// Recoverable: push more chunks and read again.
    #[error("Insufficient data: need {needed} bytes, {buffered} buffered")]
    InsufficientData { needed: usize, buffered: usize },

    /// Frame size must be greater than zero.
    #[error("Invalid frame size: {0}")]
    InvalidFrameSize(usize),

    /// Output buffer passed to `read_frame_into` has the wrong length.
    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// JSON configuration could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl AccumulatorError {
    /// Returns true if the error only means "not enough data yet".
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AccumulatorError::InsufficientData { .. })
    }
}

/// Result type alias using AccumulatorError.
pub type Result<T> = std::result::Result<T, AccumulatorError>;
