//! Queue of owned byte chunks with front consumption.
//!
//! Chunks are kept exactly as they arrived, in a `VecDeque<Bytes>`. Nothing
//! is merged on push. Reads consume from the front, and a chunk that is only
//! partly consumed is replaced by its unconsumed suffix (`Bytes::split_to`
//! shares the allocation, no copy).

use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};

/// Upper bound on chunk slots pre-allocated by `with_capacity`.
pub const MAX_PREALLOC_CHUNKS: usize = 1024;

/// Ordered chunks plus the running count of buffered bytes.
///
/// `len` always equals the sum of the chunk lengths. Empty chunks are never
/// stored.
#[derive(Debug, Default)]
pub struct ChunkQueue {
    chunks: VecDeque<Bytes>,
    len: usize,
}

impl ChunkQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty queue with room for `capacity` chunks.
    ///
    /// The hint is capped at [`MAX_PREALLOC_CHUNKS`]; the queue still grows
    /// past it on push.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            chunks: VecDeque::with_capacity(capacity.min(MAX_PREALLOC_CHUNKS)),
            len: 0,
        }
    }

    /// Append a chunk to the back of the queue.
    pub fn push(&mut self, chunk: Bytes) {
        if chunk.is_empty() {
            return;
        }
        self.len += chunk.len();
        self.chunks.push_back(chunk);
    }

    /// Number of buffered bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the queue holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of chunks currently queued.
    #[inline]
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Remove the first `n` bytes and return them as one contiguous `Bytes`.
    ///
    /// Returns `None` (and leaves the queue untouched) if fewer than `n`
    /// bytes are buffered. When the head chunk alone covers `n` bytes the
    /// result is a zero-copy view of it; otherwise the bytes are copied once.
    pub fn split_to(&mut self, n: usize) -> Option<Bytes> {
        if n > self.len {
            return None;
        }

        if self.chunks.front().is_some_and(|head| head.len() >= n) {
            let mut out = Bytes::new();
            self.consume_front(n, |piece| out = piece);
            return Some(out);
        }

        let mut buf = BytesMut::with_capacity(n);
        self.consume_front(n, |piece| buf.extend_from_slice(&piece));
        Some(buf.freeze())
    }

    /// Fill `dst` completely from the front of the queue.
    ///
    /// Returns `false` (and leaves the queue untouched) if fewer than
    /// `dst.len()` bytes are buffered.
    pub fn copy_to_slice(&mut self, dst: &mut [u8]) -> bool {
        if dst.len() > self.len {
            return false;
        }

        let mut pos = 0;
        self.consume_front(dst.len(), |piece| {
            dst[pos..pos + piece.len()].copy_from_slice(&piece);
            pos += piece.len();
        });
        true
    }

    /// Remove and return every buffered byte.
    pub fn take_all(&mut self) -> Bytes {
        self.split_to(self.len).unwrap_or_default()
    }

    /// Drop every chunk.
    pub fn clear(&mut self) {
        self.chunks.clear();
        self.len = 0;
    }

    /// Walk chunks from the front, handing `min(need, chunk.len())` bytes of
    /// each to `sink` until `n` bytes have been consumed.
    ///
    /// Caller guarantees `n <= self.len`.
    fn consume_front<F: FnMut(Bytes)>(&mut self, n: usize, mut sink: F) {
        let mut need = n;

        while need > 0 {
            let chunk = match self.chunks.front_mut() {
                Some(chunk) => chunk,
                None => break,
            };

            let take = need.min(chunk.len());
            let piece = chunk.split_to(take);
            if chunk.is_empty() {
                self.chunks.pop_front();
            } else {
                tracing::trace!(taken = take, left = chunk.len(), "split chunk");
            }

            need -= take;
            sink(piece);
        }

        self.len -= n - need;
    }

    /// Sum of chunk lengths, for checking `len` in tests.
    #[cfg(test)]
    fn chunk_bytes(&self) -> usize {
        self.chunks.iter().map(Bytes::len).sum()
    }
}
