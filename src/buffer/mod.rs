//! Buffer module - chunk queue and frame reassembly.
//!
//! This module implements the accumulator:
//! - Chunk queue holding pushed bytes in arrival order
//! - Accumulator serving fixed-size frames across chunk boundaries
//! - Draining iterator over complete frames

mod accumulator;
mod chunk_queue;
mod frames;

pub use accumulator::ChunkAccumulator;
pub use chunk_queue::ChunkQueue;
pub use frames::Frames;
