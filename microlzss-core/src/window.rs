//! Sliding window for LZSS compression and decompression.
//!
//! The window holds the most recent `2^window_bits` bytes that went through
//! a session. Both sides of the codec feed it the same bytes in the same
//! order, so a back-reference taken by the compressor resolves to the same
//! bytes in the decompressor.
//!
//! Bytes are addressed by backward offset: offset 1 is the most recently
//! pushed byte, offset `len()` the oldest one still held.
//!
//! # Sizes
//!
//! | window_bits | capacity |
//! |---|---|
//! | 8 | 256 bytes |
//! | 10 | 1 KB |
//! | 12 | 4 KB |
//! | 15 | 32 KB |

use crate::error::{LzssError, Result};

/// Largest supported window, in address bits.
pub const MAX_WINDOW_BITS: u8 = 16;

/// A back-reference into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    /// Backward distance, 1-based.
    pub offset: usize,
    /// Number of bytes covered.
    pub length: usize,
}

/// A ring buffer of recently emitted bytes.
#[derive(Debug, Clone)]
pub struct WindowBuffer {
    /// The underlying storage.
    buffer: Vec<u8>,
    /// Next write position.
    position: usize,
    /// Number of bytes held (up to capacity).
    size: usize,
    /// Mask for wrapping positions (capacity - 1).
    mask: usize,
}

impl WindowBuffer {
    /// Create an empty window holding up to `2^window_bits` bytes.
    ///
    /// # Errors
    ///
    /// [`LzssError::InvalidConfig`] unless `window_bits` is 1-16.
    pub fn new(window_bits: u8) -> Result<Self> {
        if window_bits == 0 || window_bits > MAX_WINDOW_BITS {
            return Err(LzssError::invalid_config(
                "window_bits",
                window_bits,
                1,
                MAX_WINDOW_BITS,
            ));
        }

        let capacity = 1usize << window_bits;
        Ok(Self {
            buffer: vec![0; capacity],
            position: 0,
            size: 0,
            mask: capacity - 1,
        })
    }

    /// Maximum number of bytes the window holds.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Number of bytes currently addressable.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Check if nothing has been pushed yet.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Forget all history.
    pub fn clear(&mut self) {
        self.position = 0;
        self.size = 0;
        self.buffer.fill(0);
    }

    /// Append one byte, evicting the oldest once full.
    #[inline]
    pub fn push(&mut self, byte: u8) {
        self.buffer[self.position] = byte;
        self.position = (self.position + 1) & self.mask;
        if self.size < self.buffer.len() {
            self.size += 1;
        }
    }

    /// Append several bytes in order.
    pub fn extend(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }

    /// Byte at `offset` without range checks. Requires `1 <= offset <= len()`.
    #[inline]
    pub(crate) fn byte_back(&self, offset: usize) -> u8 {
        self.buffer[self.position.wrapping_sub(offset) & self.mask]
    }

    /// Get the byte `offset` positions back (1 = most recent).
    ///
    /// # Errors
    ///
    /// [`LzssError::OffsetOutOfRange`] if `offset` is 0 or reaches past the
    /// bytes held so far.
    pub fn get(&self, offset: usize) -> Result<u8> {
        if offset == 0 || offset > self.size {
            return Err(LzssError::offset_out_of_range(offset, self.size));
        }
        Ok(self.byte_back(offset))
    }

    /// Get the last `count` bytes in stream order.
    pub fn last_bytes(&self, count: usize) -> Vec<u8> {
        let count = count.min(self.size);
        (0..count).map(|i| self.byte_back(count - i)).collect()
    }

    /// Length of the match at `offset` against `lookahead`, up to `limit`.
    ///
    /// Once the match runs past the newest window byte it continues into the
    /// lookahead itself, which is what the window will hold by then.
    #[inline]
    pub(crate) fn match_length(&self, offset: usize, lookahead: &[u8], limit: usize) -> usize {
        let mut length = 0;
        while length < limit {
            let byte = if length < offset {
                self.byte_back(offset - length)
            } else {
                lookahead[length - offset]
            };
            if byte != lookahead[length] {
                break;
            }
            length += 1;
        }
        length
    }

    /// Find the longest match for the start of `lookahead`.
    ///
    /// Every offset is tried; ties go to the smallest offset. The length is
    /// capped at `max_len` and at `lookahead.len()`. Returns `None` when no
    /// offset matches even one byte.
    pub fn find_longest_match(&self, lookahead: &[u8], max_len: usize) -> Option<Match> {
        let limit = lookahead.len().min(max_len);
        if limit == 0 {
            return None;
        }

        let mut best: Option<Match> = None;
        for offset in 1..=self.size {
            let length = self.match_length(offset, lookahead, limit);
            if length > best.map_or(0, |m| m.length) {
                best = Some(Match { offset, length });
                if length == limit {
                    break;
                }
            }
        }
        best
    }

    /// Replay a back-reference: copy `length` bytes starting `offset` back,
    /// pushing each into the window and appending it to `output`.
    ///
    /// Bytes are copied one at a time, so `offset < length` repeats the
    /// most recent `offset` bytes.
    pub fn copy_match(&mut self, offset: usize, length: usize, output: &mut Vec<u8>) -> Result<()> {
        if offset == 0 || offset > self.size {
            return Err(LzssError::offset_out_of_range(offset, self.size));
        }

        output.reserve(length);
        for _ in 0..length {
            let byte = self.byte_back(offset);
            self.push(byte);
            output.push(byte);
        }
        Ok(())
    }
}
