//! LZSS compressor.

use crate::config::LzssConfig;
use crate::header::StreamHeader;
use crate::stats::TokenStats;
use microlzss_core::bitstream::BitWriter;
use microlzss_core::error::{LzssError, Result};
use microlzss_core::matcher::{FastMatcher, MatchFinder};
use microlzss_core::window::{Match, WindowBuffer};
use std::io::Write;

/// Streaming LZSS compressor.
///
/// The header is written on construction. Data may then be fed through
/// any number of [`compress`](Self::compress) calls; the window and bit
/// position carry over between calls. [`flush`](Self::flush) (or
/// [`finish`](Self::finish)) ends the stream.
///
/// The match search is pluggable through `M`; all finders produce the same
/// stream, [`FastMatcher`] is the default.
#[derive(Debug)]
pub struct Compressor<W: Write, M: MatchFinder = FastMatcher> {
    /// Output bit stream.
    writer: BitWriter<W>,
    /// History shared with the decompressor by construction.
    window: WindowBuffer,
    /// Match search strategy.
    matcher: M,
    /// Stream parameters.
    config: LzssConfig,
    /// Cached `config.min_pattern_len()`.
    min_pattern_len: usize,
    /// Cached `config.max_pattern_len()`.
    max_pattern_len: usize,
    /// Token counters.
    stats: TokenStats,
}

impl<W: Write> Compressor<W> {
    /// Create a compressor writing to `sink` and emit the stream header.
    pub fn new(sink: W, config: LzssConfig) -> Result<Self> {
        Self::with_matcher(sink, config, FastMatcher)
    }
}

impl<W: Write, M: MatchFinder> Compressor<W, M> {
    /// Create a compressor with an explicit match finder.
    pub fn with_matcher(sink: W, config: LzssConfig, matcher: M) -> Result<Self> {
        let window = WindowBuffer::new(config.window_bits())?;
        let mut writer = BitWriter::new(sink);
        StreamHeader::new(config).write_to(&mut writer)?;

        Ok(Self {
            writer,
            window,
            matcher,
            config,
            min_pattern_len: config.min_pattern_len(),
            max_pattern_len: config.max_pattern_len(),
            stats: TokenStats::default(),
        })
    }

    /// Stream parameters.
    pub fn config(&self) -> LzssConfig {
        self.config
    }

    /// Counters for everything compressed so far.
    pub fn stats(&self) -> TokenStats {
        TokenStats {
            stream_bits: self.writer.bits_written(),
            ..self.stats
        }
    }

    /// Get a reference to the sink.
    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Compress one chunk of input.
    ///
    /// At each position the longest match in the window is taken if it is
    /// at least `min_pattern_len` long; otherwise the byte is emitted as a
    /// literal. Matches may run into the bytes they are about to produce.
    ///
    /// # Errors
    ///
    /// - [`LzssError::LiteralOverflow`] if a byte does not fit the literal
    ///   width. The whole chunk is checked first, so nothing is emitted and
    ///   the session can continue with other data.
    /// - [`LzssError::WriterClosed`] after `flush`.
    pub fn compress(&mut self, data: &[u8]) -> Result<()> {
        if self.writer.is_closed() {
            return Err(LzssError::WriterClosed);
        }

        let max_literal = self.config.max_literal();
        if let Some(position) = data.iter().position(|&byte| byte > max_literal) {
            return Err(LzssError::literal_overflow(
                data[position],
                position,
                self.config.literal_bits(),
            ));
        }

        let mut pos = 0;
        while pos < data.len() {
            let lookahead = &data[pos..];
            let found = self.matcher.find_longest_match(
                &self.window,
                lookahead,
                self.min_pattern_len,
                self.max_pattern_len,
            );

            match found {
                Some(m) => {
                    self.emit_match(m)?;
                    self.window.extend(&lookahead[..m.length]);
                    pos += m.length;
                }
                None => {
                    let byte = lookahead[0];
                    self.emit_literal(byte)?;
                    self.window.push(byte);
                    pos += 1;
                }
            }
        }

        self.stats.raw_bytes += data.len() as u64;
        tracing::trace!(
            chunk = data.len(),
            total = self.stats.raw_bytes,
            bits = self.writer.bits_written(),
            "compressed chunk"
        );
        Ok(())
    }

    fn emit_literal(&mut self, byte: u8) -> Result<()> {
        self.writer.write_bit(true)?;
        self.writer
            .write_bits(byte as u32, self.config.literal_bits())?;
        self.stats.record_literal();
        Ok(())
    }

    fn emit_match(&mut self, m: Match) -> Result<()> {
        if m.length < self.min_pattern_len || m.length > self.max_pattern_len {
            return Err(LzssError::corrupt(
                self.writer.bits_written(),
                format!(
                    "match finder returned length {} outside {}..={}",
                    m.length, self.min_pattern_len, self.max_pattern_len
                ),
            ));
        }

        // Offsets are 1-based; the field stores offset - 1 so the full
        // window is addressable. Oversized values fail as InvalidWidth.
        self.writer.write_bit(false)?;
        self.writer
            .write_bits((m.offset - 1) as u32, self.config.window_bits())?;
        self.writer.write_bits(
            (m.length - self.min_pattern_len) as u32,
            self.config.size_bits(),
        )?;
        self.stats.record_match(m.length);
        Ok(())
    }

    /// Pad and emit the final byte. Must be called exactly once.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        let stats = self.stats();
        tracing::debug!(
            raw_bytes = stats.raw_bytes,
            stream_bytes = stats.stream_bytes(),
            literals = stats.literals,
            matches = stats.matches,
            "finished LZSS stream"
        );
        Ok(())
    }

    /// Flush the stream and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer.into_inner())
    }

    /// Return the sink without flushing.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
