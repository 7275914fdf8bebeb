//! Bounded Frame Buffer
//!
//! A fixed-capacity byte buffer for per-connection I/O staging. The capacity
//! is `HEADER_SIZE + MAX_MSG`, exactly one maximum-size frame, which bounds
//! worst-case memory per connection regardless of pipelining depth: consumed
//! frames are compacted away before more data is read.

use crate::protocol::{HEADER_SIZE, MAX_MSG};

/// A bounded buffer with explicit append / consume / fill bookkeeping.
///
/// Two usage patterns:
/// - read side: `try_read` into [`unfilled_mut`](Self::unfilled_mut), then
///   [`advance`](Self::advance) by the bytes received, and
///   [`consume`](Self::consume) decoded frames off the front
/// - write side: [`append`](Self::append) an encoded response, drain it via
///   [`filled`](Self::filled), then [`clear`](Self::clear)
#[derive(Debug)]
pub struct FrameBuffer {
    buf: Box<[u8]>,
    len: usize,
}

impl FrameBuffer {
    /// Creates a buffer sized for one maximum frame (`HEADER_SIZE + MAX_MSG`).
    pub fn new() -> Self {
        Self::with_capacity(HEADER_SIZE + MAX_MSG)
    }

    /// Creates a buffer with an explicit capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0u8; capacity].into_boxed_slice(),
            len: 0,
        }
    }

    /// The valid bytes currently held.
    #[inline]
    pub fn filled(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Number of valid bytes currently held.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Total capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes that can still be appended or read into.
    #[inline]
    pub fn remaining_capacity(&self) -> usize {
        self.buf.len() - self.len
    }

    /// The writable tail, for direct reads from a socket.
    #[inline]
    pub fn unfilled_mut(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    /// Marks `n` bytes of the tail as filled, after a read into
    /// [`unfilled_mut`](Self::unfilled_mut).
    pub fn advance(&mut self, n: usize) {
        assert!(n <= self.remaining_capacity(), "advance past capacity");
        self.len += n;
    }

    /// Appends `src`, which must fit in the remaining capacity.
    pub fn append(&mut self, src: &[u8]) {
        assert!(src.len() <= self.remaining_capacity(), "append past capacity");
        self.buf[self.len..self.len + src.len()].copy_from_slice(src);
        self.len += src.len();
    }

    /// Discards `n` bytes from the front, shifting the remainder left.
    pub fn consume(&mut self, n: usize) {
        assert!(n <= self.len, "consume past end");
        self.buf.copy_within(n..self.len, 0);
        self.len -= n;
    }

    /// Discards everything.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_consume() {
        let mut buf = FrameBuffer::with_capacity(8);
        buf.append(b"abcdef");
        assert_eq!(buf.filled(), b"abcdef");
        assert_eq!(buf.remaining_capacity(), 2);

        buf.consume(2);
        assert_eq!(buf.filled(), b"cdef");
        assert_eq!(buf.remaining_capacity(), 4);

        buf.append(b"gh");
        assert_eq!(buf.filled(), b"cdefgh");
    }

    #[test]
    fn test_read_into_tail() {
        let mut buf = FrameBuffer::with_capacity(4);
        let n = {
            let tail = buf.unfilled_mut();
            tail[..3].copy_from_slice(b"xyz");
            3
        };
        buf.advance(n);
        assert_eq!(buf.filled(), b"xyz");
        assert_eq!(buf.remaining_capacity(), 1);
    }

    #[test]
    fn test_consume_all_then_reuse() {
        let mut buf = FrameBuffer::with_capacity(4);
        buf.append(b"abcd");
        assert_eq!(buf.remaining_capacity(), 0);
        buf.consume(4);
        assert!(buf.is_empty());
        assert_eq!(buf.remaining_capacity(), 4);
    }

    #[test]
    fn test_default_capacity_fits_one_max_frame() {
        let buf = FrameBuffer::new();
        assert_eq!(buf.capacity(), HEADER_SIZE + MAX_MSG);
    }

    #[test]
    #[should_panic(expected = "append past capacity")]
    fn test_append_overflow_panics() {
        let mut buf = FrameBuffer::with_capacity(2);
        buf.append(b"abc");
    }

    #[test]
    #[should_panic(expected = "consume past end")]
    fn test_consume_overflow_panics() {
        let mut buf = FrameBuffer::with_capacity(2);
        buf.consume(1);
    }
}
