//! Draining iterator over complete frames.

use std::iter::FusedIterator;

use bytes::Bytes;

use super::ChunkAccumulator;

/// Iterator returned by [`ChunkAccumulator::frames`].
///
/// Yields whole frames until fewer than `frame_size` bytes remain. The
/// partial remainder stays in the accumulator.
#[derive(Debug)]
pub struct Frames<'a> {
    accumulator: &'a mut ChunkAccumulator,
}

impl<'a> Frames<'a> {
    pub(super) fn new(accumulator: &'a mut ChunkAccumulator) -> Self {
        Self { accumulator }
    }
}

impl Iterator for Frames<'_> {
    type Item = Bytes;

    fn next(&mut self) -> Option<Bytes> {
        self.accumulator.try_read_frame()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.accumulator.frames_available();
        (n, Some(n))
    }
}

// The accumulator is mutably borrowed, so no bytes can arrive mid-iteration.
impl ExactSizeIterator for Frames<'_> {}

impl FusedIterator for Frames<'_> {}
