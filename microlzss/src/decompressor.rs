//! LZSS decompressor.
//!
//! Streams carry no end marker. Decoding stops when the source runs out at
//! a token boundary; the only bits allowed after the last token are the
//! zero padding (at most seven bits) added by the compressor's flush. A
//! literal token starts with a 1 bit and a match token is longer than
//! seven bits, so padding can never be mistaken for a token. Anything else
//! left over means the stream was cut inside a token and is reported as
//! [`LzssError::CorruptStream`].

use crate::config::LzssConfig;
use crate::header::StreamHeader;
use crate::stats::TokenStats;
use microlzss_core::bitstream::BitReader;
use microlzss_core::error::{LzssError, Result};
use microlzss_core::window::WindowBuffer;
use std::io::{self, Read};

/// Streaming LZSS decompressor.
#[derive(Debug)]
pub struct Decompressor<R: Read> {
    /// Input bit stream, positioned after the header.
    reader: BitReader<R>,
    /// Parsed header.
    header: StreamHeader,
    /// History mirroring the compressor's window.
    window: WindowBuffer,
    /// Cached `header.min_pattern_len()`.
    min_pattern_len: usize,
    /// Decoded bytes held back by an earlier `max_bytes` limit.
    pending: Vec<u8>,
    /// Set once the source ended cleanly at a token boundary.
    source_done: bool,
    /// Token counters.
    stats: TokenStats,
}

impl<'a> Decompressor<&'a [u8]> {
    /// Create a decompressor over an in-memory stream.
    pub fn from_slice(data: &'a [u8]) -> Result<Self> {
        Self::from_bit_reader(BitReader::from_slice(data))
    }
}

impl<R: Read> Decompressor<R> {
    /// Create a decompressor reading from `source`; reads and validates the
    /// header.
    ///
    /// # Errors
    ///
    /// - [`LzssError::UnsupportedHeader`] if the header asks for a
    ///   continuation byte.
    /// - [`LzssError::CorruptStream`] if the source is empty.
    pub fn new(source: R) -> Result<Self> {
        Self::from_bit_reader(BitReader::new(source))
    }

    fn from_bit_reader(mut reader: BitReader<R>) -> Result<Self> {
        let header = StreamHeader::read_from(&mut reader)?;
        let window = WindowBuffer::new(header.config().window_bits())?;

        Ok(Self {
            reader,
            header,
            window,
            min_pattern_len: header.min_pattern_len(),
            pending: Vec::new(),
            source_done: false,
            stats: TokenStats {
                stream_bits: StreamHeader::BITS as u64,
                ..TokenStats::default()
            },
        })
    }

    /// The stream header.
    pub fn header(&self) -> StreamHeader {
        self.header
    }

    /// Stream parameters from the header.
    pub fn config(&self) -> LzssConfig {
        self.header.config()
    }

    /// Counters for everything decoded so far.
    pub fn stats(&self) -> TokenStats {
        self.stats
    }

    /// Whether the stream has ended and every decoded byte was returned.
    pub fn is_finished(&self) -> bool {
        self.source_done && self.pending.is_empty()
    }

    /// Unread stream bits, when the input length is known.
    pub fn bits_remaining(&self) -> Option<u64> {
        self.reader.bits_remaining()
    }

    /// Consume the decompressor and return the source.
    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }

    /// Decode up to `max_bytes` bytes, or everything when `None`.
    ///
    /// A result shorter than `max_bytes` means the stream has ended;
    /// [`is_finished`](Self::is_finished) reports the same thing directly.
    /// A match that crosses the limit is decoded whole and its tail is
    /// returned first by the next call.
    pub fn decompress(&mut self, max_bytes: Option<usize>) -> Result<Vec<u8>> {
        let limit = max_bytes.unwrap_or(usize::MAX);

        let take = self.pending.len().min(limit);
        let mut out: Vec<u8> = self.pending.drain(..take).collect();

        while out.len() < limit && !self.source_done {
            if !self.decode_token(&mut out)? {
                self.source_done = true;
                tracing::debug!(
                    raw_bytes = self.stats.raw_bytes,
                    literals = self.stats.literals,
                    matches = self.stats.matches,
                    "reached end of LZSS stream"
                );
            }
        }

        if out.len() > limit {
            self.pending = out.split_off(limit);
        }
        Ok(out)
    }

    /// Decode the rest of the stream.
    pub fn decompress_all(&mut self) -> Result<Vec<u8>> {
        self.decompress(None)
    }

    /// Decode one token into `out`. Returns `false` at a clean end.
    fn decode_token(&mut self, out: &mut Vec<u8>) -> Result<bool> {
        if self.reader.fill(1)? == 0 {
            return Ok(false);
        }

        let config = self.header.config();
        let is_literal = self.reader.peek_bits(1)? == 1;
        let needed = if is_literal {
            config.literal_token_bits()
        } else {
            config.match_token_bits()
        } as u8;

        let available = self.reader.fill(needed)?;
        if available < needed as usize {
            if available < 8 && self.reader.peek_bits(available as u8)? == 0 {
                return Ok(false);
            }
            return Err(LzssError::corrupt(
                self.reader.bits_read(),
                format!(
                    "stream ends inside a {} token ({available} of {needed} bits)",
                    if is_literal { "literal" } else { "match" }
                ),
            ));
        }

        self.reader.read_bits(1)?;
        if is_literal {
            let byte = self.reader.read_bits(config.literal_bits())? as u8;
            self.window.push(byte);
            out.push(byte);
            self.stats.record_literal();
            self.stats.raw_bytes += 1;
        } else {
            let offset = self.reader.read_bits(config.window_bits())? as usize + 1;
            let length = self.reader.read_bits(config.size_bits())? as usize + self.min_pattern_len;
            self.window.copy_match(offset, length, out)?;
            self.stats.record_match(length);
            self.stats.raw_bytes += length as u64;
        }
        self.stats.stream_bits += needed as u64;

        Ok(true)
    }
}

impl<R: Read> Read for Decompressor<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        let chunk = self.decompress(Some(buf.len()))?;
        buf[..chunk.len()].copy_from_slice(&chunk);
        Ok(chunk.len())
    }
}
