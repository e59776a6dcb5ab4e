//! # chunk-accumulator
//!
//! Reassembles a stream of arbitrarily sliced byte chunks into fixed-size
//! frames.
//!
//! A lower layer (socket, pipe, decoder) hands over bytes in whatever sizes
//! it happens to produce. An upper layer needs frames of exactly N bytes.
//! [`ChunkAccumulator`] sits in between: chunks are pushed as they arrive and
//! frames are read out whenever one is complete.
//!
//! ## Contract
//!
//! - Frames come out in arrival order, byte for byte.
//! - A read returns exactly `frame_size` bytes or fails with
//!   [`AccumulatorError::InsufficientData`] and changes nothing.
//! - Unconsumed bytes of a partly read chunk stay buffered for the next read.
//!
//! The accumulator is synchronous and does no I/O. Callers that share it
//! between threads must provide their own locking.
//!
//! ## Example
//!
//! ```
//! use chunk_accumulator::ChunkAccumulator;
//!
//! let mut acc = ChunkAccumulator::builder()
//!     .frame_size(3)
//!     .build()
//!     .unwrap();
//!
//! let frames = acc.feed(b"abcdefgh".to_vec());
//! assert_eq!(frames.len(), 2);
//! assert_eq!(&frames[1][..], b"def");
//!
//! // End of stream: collect the trailing partial frame
//! assert_eq!(&acc.take_remainder().unwrap()[..], b"gh");
//! ```

pub mod buffer;
pub mod config;
pub mod error;

pub use buffer::{ChunkAccumulator, Frames};
pub use config::{AccumulatorBuilder, AccumulatorConfig};
pub use error::{AccumulatorError, Result};
