//! Fixed-size frame accumulator.
//!
//! Collects byte chunks of arbitrary size and serves reads of exactly
//! `frame_size` bytes, regardless of how the input was sliced.
//!
//! # Example
//!
//! ```
//! use chunk_accumulator::ChunkAccumulator;
//!
//! let mut acc = ChunkAccumulator::new(4).unwrap();
//!
//! // Data arrives in transport-sized chunks
//! acc.push(vec![1u8, 2]);
//! acc.push(vec![3u8, 4, 5]);
//!
//! assert_eq!(&acc.read_frame().unwrap()[..], &[1, 2, 3, 4]);
//! assert_eq!(acc.buffered_len(), 1);
//!
//! // Only one byte left: not a whole frame yet
//! assert!(acc.read_frame().unwrap_err().is_insufficient_data());
//!
//! acc.push(vec![6u8, 7, 8]);
//! assert_eq!(&acc.read_frame().unwrap()[..], &[5, 6, 7, 8]);
//! ```

use std::fmt;
use std::num::NonZeroUsize;

use bytes::Bytes;

use super::chunk_queue::ChunkQueue;
use super::frames::Frames;
use crate::config::{AccumulatorBuilder, AccumulatorConfig, DEFAULT_QUEUE_CAPACITY};
use crate::error::{AccumulatorError, Result};

/// Buffer that reassembles pushed chunks into fixed-size frames.
///
/// Reads are all-or-nothing: a read either returns exactly `frame_size`
/// bytes or fails with `InsufficientData` without touching the buffer.
pub struct ChunkAccumulator {
    /// Pushed chunks not yet consumed, in arrival order.
    queue: ChunkQueue,
    /// Exact number of bytes per frame.
    frame_size: NonZeroUsize,
}

impl ChunkAccumulator {
    /// Create an accumulator producing frames of `frame_size` bytes.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrameSize` if `frame_size` is zero.
    pub fn new(frame_size: usize) -> Result<Self> {
        NonZeroUsize::new(frame_size)
            .map(Self::with_frame_size)
            .ok_or(AccumulatorError::InvalidFrameSize(frame_size))
    }

    /// Create an accumulator from a frame size that is known to be non-zero.
    pub fn with_frame_size(frame_size: NonZeroUsize) -> Self {
        Self {
            queue: ChunkQueue::with_capacity(DEFAULT_QUEUE_CAPACITY),
            frame_size,
        }
    }

    /// Create an accumulator from a config.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFrameSize` if the configured frame size is zero.
    pub fn from_config(config: &AccumulatorConfig) -> Result<Self> {
        let frame_size = NonZeroUsize::new(config.frame_size)
            .ok_or(AccumulatorError::InvalidFrameSize(config.frame_size))?;

        Ok(Self {
            queue: ChunkQueue::with_capacity(config.queue_capacity),
            frame_size,
        })
    }

    /// Start building an accumulator.
    pub fn builder() -> AccumulatorBuilder {
        AccumulatorBuilder::new()
    }

    /// Append a chunk. Ownership moves into the accumulator.
    ///
    /// Accepts anything convertible to `Bytes` (`Vec<u8>`, `Bytes`,
    /// `&'static [u8]`, ...). Empty chunks are accepted and add nothing.
    pub fn push(&mut self, chunk: impl Into<Bytes>) {
        self.queue.push(chunk.into());
    }

    /// Append a copy of a borrowed slice.
    pub fn push_slice(&mut self, chunk: &[u8]) {
        self.queue.push(Bytes::copy_from_slice(chunk));
    }

    /// Read exactly one frame from the front of the buffer.
    ///
    /// The frame may span several pushed chunks. A chunk that is only
    /// partly used stays at the front with its remaining bytes.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if fewer than `frame_size` bytes are
    /// buffered. The buffer is left unchanged in that case.
    pub fn read_frame(&mut self) -> Result<Bytes> {
        self.ensure_frame()?;

        let frame = self
            .queue
            .split_to(self.frame_size.get())
            .ok_or_else(|| self.insufficient())?;

        tracing::trace!(
            frame_size = frame.len(),
            buffered = self.queue.len(),
            "frame read"
        );
        Ok(frame)
    }

    /// Read exactly one frame into a caller-provided buffer.
    ///
    /// Lets callers reuse one output buffer across reads.
    ///
    /// # Errors
    ///
    /// Returns `BufferSizeMismatch` if `dst.len() != frame_size`, or
    /// `InsufficientData` if a whole frame is not buffered. Nothing is
    /// consumed on error.
    pub fn read_frame_into(&mut self, dst: &mut [u8]) -> Result<()> {
        if dst.len() != self.frame_size.get() {
            return Err(AccumulatorError::BufferSizeMismatch {
                expected: self.frame_size.get(),
                actual: dst.len(),
            });
        }
        self.ensure_frame()?;

        if !self.queue.copy_to_slice(dst) {
            return Err(self.insufficient());
        }

        tracing::trace!(buffered = self.queue.len(), "frame read into buffer");
        Ok(())
    }

    /// Read one frame if a whole frame is buffered.
    pub fn try_read_frame(&mut self) -> Option<Bytes> {
        self.read_frame().ok()
    }

    /// Push a chunk and return every frame that is now complete.
    ///
    /// Bytes left over after the last whole frame stay buffered.
    pub fn feed(&mut self, chunk: impl Into<Bytes>) -> Vec<Bytes> {
        self.push(chunk);
        self.frames().collect()
    }

    /// Iterate over complete frames, consuming them.
    ///
    /// Stops when fewer than `frame_size` bytes remain.
    pub fn frames(&mut self) -> Frames<'_> {
        Frames::new(self)
    }

    /// Number of whole frames currently buffered.
    #[inline]
    pub fn frames_available(&self) -> usize {
        self.queue.len() / self.frame_size.get()
    }

    /// Check if at least one whole frame is buffered.
    #[inline]
    pub fn has_frame(&self) -> bool {
        self.queue.len() >= self.frame_size.get()
    }

    /// Configured frame size in bytes.
    #[inline]
    pub fn frame_size(&self) -> usize {
        self.frame_size.get()
    }

    /// Number of buffered bytes.
    #[inline]
    pub fn buffered_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of chunks currently queued.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.queue.chunk_count()
    }

    /// Check if nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Remove and return everything buffered, even if it is less than a
    /// frame.
    ///
    /// Use at end of stream to recover a trailing partial frame. Returns
    /// `None` if the buffer is empty.
    pub fn take_remainder(&mut self) -> Option<Bytes> {
        if self.queue.is_empty() {
            return None;
        }

        let remainder = self.queue.take_all();
        tracing::debug!(len = remainder.len(), "remainder taken");
        Some(remainder)
    }

    /// Drop everything buffered.
    pub fn clear(&mut self) {
        if !self.queue.is_empty() {
            tracing::debug!(dropped = self.queue.len(), "accumulator cleared");
        }
        self.queue.clear();
    }

    fn ensure_frame(&self) -> Result<()> {
        if self.has_frame() {
            Ok(())
        } else {
            tracing::trace!(
                needed = self.frame_size.get(),
                buffered = self.queue.len(),
                "insufficient data for frame"
            );
            Err(self.insufficient())
        }
    }

    fn insufficient(&self) -> AccumulatorError {
        AccumulatorError::InsufficientData {
            needed: self.frame_size.get(),
            buffered: self.queue.len(),
        }
    }
}

impl fmt::Debug for ChunkAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkAccumulator")
            .field("frame_size", &self.frame_size.get())
            .field("buffered_len", &self.queue.len())
            .field("chunk_count", &self.queue.chunk_count())
            .finish()
    }
}

impl Extend<Bytes> for ChunkAccumulator {
    fn extend<I: IntoIterator<Item = Bytes>>(&mut self, iter: I) {
        for chunk in iter {
            self.push(chunk);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frame_size_rejected() {
        let err = ChunkAccumulator::new(0).unwrap_err();
        assert!(matches!(err, AccumulatorError::InvalidFrameSize(0)));
    }

    #[test]
    fn test_from_config_zero_frame_size() {
        let config = AccumulatorConfig {
            frame_size: 0,
            queue_capacity: 4,
        };
        let err = ChunkAccumulator::from_config(&config).unwrap_err();
        assert!(matches!(err, AccumulatorError::InvalidFrameSize(0)));
    }

    #[test]
    fn test_new_is_empty() {
        let acc = ChunkAccumulator::new(4).unwrap();

        assert_eq!(acc.frame_size(), 4);
        assert_eq!(acc.buffered_len(), 0);
        assert_eq!(acc.chunk_count(), 0);
        assert!(acc.is_empty());
        assert!(!acc.has_frame());
    }

    #[test]
    fn test_push_and_read_example_sequence() {
        let mut acc = ChunkAccumulator::new(4).unwrap();

        acc.push(vec![1u8, 2]);
        acc.push(vec![3u8, 4, 5]);
        assert_eq!(&acc.read_frame().unwrap()[..], &[1, 2, 3, 4]);
        assert_eq!(acc.buffered_len(), 1);

        let err = acc.read_frame().unwrap_err();
        assert!(matches!(
            err,
            AccumulatorError::InsufficientData {
                needed: 4,
                buffered: 1
            }
        ));

        acc.push(vec![6u8, 7, 8]);
        assert_eq!(acc.buffered_len(), 4);
        assert_eq!(&acc.read_frame().unwrap()[..], &[5, 6, 7, 8]);
        assert!(acc.is_empty());
        assert_eq!(acc.chunk_count(), 0);
    }

    #[test]
    fn test_insufficient_data_leaves_state_unchanged() {
        let mut acc = ChunkAccumulator::new(8).unwrap();
        acc.push(Bytes::from_static(b"abc"));
        acc.push(Bytes::from_static(b"de"));

        assert!(acc.read_frame().is_err());
        assert_eq!(acc.buffered_len(), 5);
        assert_eq!(acc.chunk_count(), 2);

        acc.push(Bytes::from_static(b"fgh"));
        assert_eq!(&acc.read_frame().unwrap()[..], b"abcdefgh");
    }

    #[test]
    fn test_large_chunk_remainder_retained() {
        let mut acc = ChunkAccumulator::new(3).unwrap();
        acc.push(Bytes::from_static(b"abcdefgh"));

        assert_eq!(&acc.read_frame().unwrap()[..], b"abc");
        assert_eq!(acc.chunk_count(), 1);
        assert_eq!(&acc.read_frame().unwrap()[..], b"def");
        assert_eq!(acc.buffered_len(), 2);
        assert_eq!(acc.take_remainder().unwrap(), Bytes::from_static(b"gh"));
    }

    #[test]
    fn test_empty_chunk_adds_nothing() {
        let mut acc = ChunkAccumulator::new(2).unwrap();
        acc.push(Vec::<u8>::new());
        acc.push_slice(&[]);

        assert!(acc.is_empty());
        assert_eq!(acc.chunk_count(), 0);
    }

    #[test]
    fn test_push_slice_copies() {
        let mut acc = ChunkAccumulator::new(2).unwrap();
        let mut src = vec![1u8, 2];
        acc.push_slice(&src);
        src[0] = 9;

        assert_eq!(&acc.read_frame().unwrap()[..], &[1, 2]);
    }

    #[test]
    fn test_read_frame_into() {
        let mut acc = ChunkAccumulator::new(4).unwrap();
        acc.push(Bytes::from_static(b"ab"));
        acc.push(Bytes::from_static(b"cdef"));

        let mut dst = [0u8; 4];
        acc.read_frame_into(&mut dst).unwrap();

        assert_eq!(&dst, b"abcd");
        assert_eq!(acc.buffered_len(), 2);
    }

    #[test]
    fn test_read_frame_into_wrong_size() {
        let mut acc = ChunkAccumulator::new(4).unwrap();
        acc.push(Bytes::from_static(b"abcdef"));

        let mut dst = [0u8; 3];
        let err = acc.read_frame_into(&mut dst).unwrap_err();

        assert!(matches!(
            err,
            AccumulatorError::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
        assert_eq!(acc.buffered_len(), 6);
    }

    #[test]
    fn test_read_frame_into_insufficient() {
        let mut acc = ChunkAccumulator::new(4).unwrap();
        acc.push(Bytes::from_static(b"ab"));

        let mut dst = [0u8; 4];
        assert!(acc.read_frame_into(&mut dst).unwrap_err().is_insufficient_data());
        assert_eq!(dst, [0; 4]);
        assert_eq!(acc.buffered_len(), 2);
    }

    #[test]
    fn test_try_read_frame() {
        let mut acc = ChunkAccumulator::new(2).unwrap();
        assert!(acc.try_read_frame().is_none());

        acc.push(Bytes::from_static(b"xy"));
        assert_eq!(acc.try_read_frame().unwrap(), Bytes::from_static(b"xy"));
    }

    #[test]
    fn test_feed_returns_complete_frames() {
        let mut acc = ChunkAccumulator::new(2).unwrap();

        assert!(acc.feed(Bytes::from_static(b"a")).is_empty());

        let frames = acc.feed(Bytes::from_static(b"bcdef"));
        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][..], b"ab");
        assert_eq!(&frames[1][..], b"cd");
        assert_eq!(acc.buffered_len(), 1);
    }

    #[test]
    fn test_frames_available() {
        let mut acc = ChunkAccumulator::new(3).unwrap();
        acc.push(Bytes::from_static(b"abcdefg"));

        assert_eq!(acc.frames_available(), 2);
        assert!(acc.has_frame());
    }

    #[test]
    fn test_take_remainder_empty() {
        let mut acc = ChunkAccumulator::new(3).unwrap();
        assert!(acc.take_remainder().is_none());
    }

    #[test]
    fn test_take_remainder_spanning_chunks() {
        let mut acc = ChunkAccumulator::new(8).unwrap();
        acc.push(Bytes::from_static(b"ab"));
        acc.push(Bytes::from_static(b"cd"));

        assert_eq!(acc.take_remainder().unwrap(), Bytes::from_static(b"abcd"));
        assert!(acc.is_empty());
        assert_eq!(acc.chunk_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut acc = ChunkAccumulator::new(3).unwrap();
        acc.push(Bytes::from_static(b"abcd"));
        acc.clear();

        assert!(acc.is_empty());
        assert!(acc.read_frame().is_err());
    }

    #[test]
    fn test_extend() {
        let mut acc = ChunkAccumulator::new(3).unwrap();
        acc.extend(vec![Bytes::from_static(b"a"), Bytes::from_static(b"bc")]);

        assert_eq!(acc.chunk_count(), 2);
        assert_eq!(&acc.read_frame().unwrap()[..], b"abc");
    }

    #[test]
    fn test_debug_output() {
        let mut acc = ChunkAccumulator::new(4).unwrap();
        acc.push(Bytes::from_static(b"ab"));

        let debug = format!("{:?}", acc);
        assert!(debug.contains("frame_size: 4"));
        assert!(debug.contains("buffered_len: 2"));
    }

    #[test]
    fn test_byte_at_a_time() {
        let mut acc = ChunkAccumulator::new(3).unwrap();
        let mut frames = Vec::new();

        for byte in b"abcdefg" {
            frames.extend(acc.feed(vec![*byte]));
        }

        assert_eq!(frames.len(), 2);
        assert_eq!(&frames[0][..], b"abc");
        assert_eq!(&frames[1][..], b"def");
        assert_eq!(acc.buffered_len(), 1);
    }
}
