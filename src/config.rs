//! Accumulator configuration.
//!
//! An accumulator can be configured in code with [`AccumulatorBuilder`] or
//! loaded from JSON with [`AccumulatorConfig::from_json`]:
//!
//! ```
//! use chunk_accumulator::config::AccumulatorConfig;
//!
//! let config = AccumulatorConfig::from_json(r#"{ "frame_size": 3840 }"#).unwrap();
//! assert_eq!(config.frame_size, 3840);
//! assert_eq!(config.queue_capacity, 16);
//! ```

use serde::{Deserialize, Serialize};

use crate::buffer::ChunkAccumulator;
use crate::error::{AccumulatorError, Result};

/// Default number of chunk slots pre-allocated in the queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

/// Settings for a [`ChunkAccumulator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorConfig {
    /// Exact number of bytes returned by each frame read. Must be > 0.
    pub frame_size: usize,
    /// Chunk slots to pre-allocate. A hint only, pushes are never limited,
    /// and values above `MAX_PREALLOC_CHUNKS` are capped.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl AccumulatorConfig {
    /// Create a config with the given frame size and default capacity.
    pub fn new(frame_size: usize) -> Self {
        Self {
            frame_size,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }

    /// Parse a config from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the JSON is malformed, `InvalidFrameSize` if
    /// `frame_size` is zero.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the config describes a usable accumulator.
    pub fn validate(&self) -> Result<()> {
        if self.frame_size == 0 {
            return Err(AccumulatorError::InvalidFrameSize(self.frame_size));
        }
        Ok(())
    }
}

/// Builder for configuring and creating a [`ChunkAccumulator`].
#[derive(Debug, Clone, Default)]
pub struct AccumulatorBuilder {
    frame_size: Option<usize>,
    queue_capacity: Option<usize>,
}

impl AccumulatorBuilder {
    /// Create a new builder. A frame size must be set before `build()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the frame size in bytes.
    pub fn frame_size(mut self, frame_size: usize) -> Self {
        self.frame_size = Some(frame_size);
        self
    }

    /// Set the number of chunk slots to pre-allocate.
    ///
    /// Default: 16
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity);
        self
    }

    /// Build the accumulator.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrameSize` if the frame size is missing or zero.
    pub fn build(self) -> Result<ChunkAccumulator> {
        let config = AccumulatorConfig {
            frame_size: self.frame_size.unwrap_or(0),
            queue_capacity: self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY),
        };
        ChunkAccumulator::from_config(&config)
    }
}
