//! MSB-first bit-level I/O.
//!
//! This module provides `BitWriter` and `BitReader` for packing fixed-width
//! fields into a byte stream without padding between fields.
//!
//! # Bit Ordering
//!
//! LZSS streams use MSB-first (Most Significant Bit first) ordering: the
//! first bit written lands in bit 7 of byte 0, and each field is written
//! from its most significant bit down. Only the end of the stream is padded,
//! with zero bits, by [`BitWriter::flush`].
//!
//! # Example
//!
//! ```
//! use microlzss_core::bitstream::{BitReader, BitWriter};
//!
//! let mut output = Vec::new();
//! {
//!     let mut writer = BitWriter::new(&mut output);
//!     writer.write_bits(0b101, 3).unwrap();
//!     writer.write_bits(0b1100, 4).unwrap();
//!     writer.flush().unwrap();
//! }
//! assert_eq!(output, vec![0b1011_1000]);
//!
//! let mut reader = BitReader::from_slice(&output);
//! assert_eq!(reader.read_bits(3).unwrap(), 0b101);
//! assert_eq!(reader.read_bits(4).unwrap(), 0b1100);
//! assert_eq!(reader.bits_remaining(), Some(1));
//! ```

use crate::error::{LzssError, Result};
use std::io::{self, Read, Write};

/// Largest field width accepted by `write_bits` / `read_bits`.
pub const MAX_FIELD_BITS: u8 = 32;

/// Size of the read-ahead chunk pulled from the source at once.
const READ_CHUNK: usize = 512;

/// Largest number of bits `fill` can make available at once.
const MAX_FILL_BITS: u8 = 56;

#[inline]
fn low_mask(width: u8) -> u64 {
    (1u64 << width) - 1
}

#[inline]
fn check_width(value: u32, width: u8) -> Result<()> {
    if width == 0 || width > MAX_FIELD_BITS {
        return Err(LzssError::invalid_width(value, width));
    }
    if width < MAX_FIELD_BITS && value >> width != 0 {
        return Err(LzssError::invalid_width(value, width));
    }
    Ok(())
}

/// A bit-level writer that wraps any `Write` implementation.
///
/// Complete bytes are written to the sink as soon as they are formed, so
/// only the current partial byte is held internally. The stream must be
/// finalised with exactly one call to [`flush`](Self::flush).
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    /// Underlying sink.
    writer: W,
    /// Pending bits, right-aligned. Holds fewer than 8 bits between calls.
    buffer: u64,
    /// Number of pending bits.
    bits_in_buffer: u8,
    /// Total bits written, padding excluded.
    total_bits_written: u64,
    /// Set by `flush`.
    closed: bool,
}

impl<W: Write> BitWriter<W> {
    /// Create a new `BitWriter` wrapping the given sink.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
            closed: false,
        }
    }

    /// Get a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consume this `BitWriter` and return the sink.
    ///
    /// Pending bits are discarded; call [`flush`](Self::flush) first.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Get the total number of bits written so far (padding excluded).
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of bits waiting in the partial byte.
    pub fn pending_bits(&self) -> u8 {
        self.bits_in_buffer
    }

    /// Whether `flush` has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Write the low `width` bits of `value`, MSB first.
    ///
    /// # Errors
    ///
    /// - [`LzssError::WriterClosed`] after `flush`.
    /// - [`LzssError::InvalidWidth`] if `width` is 0 or above 32, or if
    ///   `value` does not fit in `width` bits.
    #[inline]
    pub fn write_bits(&mut self, value: u32, width: u8) -> Result<()> {
        if self.closed {
            return Err(LzssError::WriterClosed);
        }
        check_width(value, width)?;

        self.buffer = (self.buffer << width) | value as u64;
        self.bits_in_buffer += width;
        self.total_bits_written += width as u64;

        // At most 7 + 32 bits are pending here, so 4 complete bytes.
        let mut bytes = [0u8; 5];
        let mut count = 0;
        while self.bits_in_buffer >= 8 {
            self.bits_in_buffer -= 8;
            bytes[count] = (self.buffer >> self.bits_in_buffer) as u8;
            count += 1;
        }
        self.buffer &= low_mask(self.bits_in_buffer);

        if count > 0 {
            self.writer.write_all(&bytes[..count])?;
        }
        Ok(())
    }

    /// Write a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.write_bits(bit as u32, 1)
    }

    /// Pad the partial byte with zeros, emit it, and flush the sink.
    ///
    /// After this call the writer is closed.
    pub fn flush(&mut self) -> Result<()> {
        if self.closed {
            return Err(LzssError::WriterClosed);
        }

        if self.bits_in_buffer > 0 {
            let byte = (self.buffer << (8 - self.bits_in_buffer)) as u8;
            self.writer.write_all(&[byte])?;
            self.buffer = 0;
            self.bits_in_buffer = 0;
        }
        self.writer.flush()?;
        self.closed = true;

        Ok(())
    }
}

/// A bit-level reader that wraps any `Read` implementation.
///
/// The source is read in chunks, so bytes past the end of the LZSS stream
/// may be consumed from it.
#[derive(Debug)]
pub struct BitReader<R: Read> {
    /// Underlying source.
    reader: R,
    /// Read-ahead chunk.
    chunk: Vec<u8>,
    /// Next unread byte in `chunk`.
    chunk_pos: usize,
    /// Valid bytes in `chunk`.
    chunk_len: usize,
    /// Bit buffer; the low `bits_in_buffer` bits are valid, oldest bit highest.
    buffer: u64,
    /// Number of valid bits in buffer.
    bits_in_buffer: u8,
    /// Total bits consumed.
    total_bits_read: u64,
    /// Total input length in bits, when known up front.
    known_bits: Option<u64>,
    /// Set once the source has returned EOF.
    exhausted: bool,
}

impl<'a> BitReader<&'a [u8]> {
    /// Create a reader over an in-memory slice. The input length is known,
    /// so [`bits_remaining`](BitReader::bits_remaining) returns `Some`.
    pub fn from_slice(data: &'a [u8]) -> Self {
        BitReader::with_len(data, data.len() as u64)
    }
}

impl<R: Read> BitReader<R> {
    /// Create a new `BitReader` over a source of unknown length.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            chunk: vec![0; READ_CHUNK],
            chunk_pos: 0,
            chunk_len: 0,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
            known_bits: None,
            exhausted: false,
        }
    }

    /// Create a new `BitReader` over a source holding exactly `byte_len` bytes.
    pub fn with_len(reader: R, byte_len: u64) -> Self {
        let mut this = Self::new(reader);
        this.known_bits = Some(byte_len * 8);
        this
    }

    /// Get a reference to the underlying source.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume this `BitReader` and return the underlying source.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Get the total number of bits consumed so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Unread bits left in the input, if its length is known.
    pub fn bits_remaining(&self) -> Option<u64> {
        self.known_bits
            .map(|total| total.saturating_sub(self.total_bits_read))
    }

    /// Whether the source has reported EOF. Buffered bits may remain.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.chunk_pos == self.chunk_len {
            if self.exhausted {
                return Ok(None);
            }
            loop {
                match self.reader.read(&mut self.chunk) {
                    Ok(0) => {
                        self.exhausted = true;
                        return Ok(None);
                    }
                    Ok(n) => {
                        self.chunk_pos = 0;
                        self.chunk_len = n;
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let byte = self.chunk[self.chunk_pos];
        self.chunk_pos += 1;
        Ok(Some(byte))
    }

    /// Buffer at least `count` bits if the source has them.
    ///
    /// Returns the number of buffered bits, which is below `count` only when
    /// the source is exhausted. Nothing is consumed.
    pub fn fill(&mut self, count: u8) -> Result<usize> {
        let count = count.min(MAX_FILL_BITS);
        while self.bits_in_buffer < count {
            match self.next_byte()? {
                Some(byte) => {
                    self.buffer = (self.buffer << 8) | byte as u64;
                    self.bits_in_buffer += 8;
                }
                None => break,
            }
        }
        Ok(self.bits_in_buffer as usize)
    }

    /// Return the next `width` bits without consuming them.
    pub fn peek_bits(&mut self, width: u8) -> Result<u32> {
        check_width(0, width)?;

        let available = self.fill(width)?;
        if available < width as usize {
            return Err(LzssError::end_of_stream(width, available));
        }

        let shift = self.bits_in_buffer - width;
        Ok(((self.buffer >> shift) & low_mask(width)) as u32)
    }

    /// Read `width` bits, MSB first.
    ///
    /// # Errors
    ///
    /// - [`LzssError::InvalidWidth`] if `width` is 0 or above 32.
    /// - [`LzssError::EndOfStream`] if fewer than `width` bits remain; the
    ///   reader position is left unchanged.
    #[inline]
    pub fn read_bits(&mut self, width: u8) -> Result<u32> {
        let value = self.peek_bits(width)?;
        self.bits_in_buffer -= width;
        self.buffer &= low_mask(self.bits_in_buffer);
        self.total_bits_read += width as u64;
        Ok(value)
    }

    /// Read a single bit.
    #[inline]
    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_bits(1)? == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that hands out one byte per `read` call.
    struct Trickle<'a>(&'a [u8]);

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.0.split_first() {
                Some((&byte, rest)) if !buf.is_empty() => {
                    buf[0] = byte;
                    self.0 = rest;
                    Ok(1)
                }
                _ => Ok(0),
            }
        }
    }

    fn fields(seed: u64, count: usize) -> Vec<(u32, u8)> {
        let mut state = seed;
        (0..count)
            .map(|_| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let width = ((state >> 59) as u8 % 32) + 1;
                let value = (state >> 16) as u32;
                let value = if width == 32 {
                    value
                } else {
                    value & ((1u32 << width) - 1)
                };
                (value, width)
            })
            .collect()
    }

    #[test]
    fn test_msb_first_packing() {
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        writer.write_bits(0b010, 3).unwrap();
        writer.write_bits(0b00, 2).unwrap();
        writer.write_bits(0b11, 2).unwrap();
        writer.write_bit(false).unwrap();
        writer.write_bits(0b1, 1).unwrap();
        writer.flush().unwrap();

        assert_eq!(out, vec![0b0100_0110, 0b1000_0000]);
    }

    #[test]
    fn test_random_field_roundtrip() {
        let chunks = fields(0x5EED, 1000);

        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for &(value, width) in &chunks {
            writer.write_bits(value, width).unwrap();
        }
        let total = writer.bits_written();
        writer.flush().unwrap();
        assert_eq!(out.len() as u64, total.div_ceil(8));

        let mut reader = BitReader::from_slice(&out);
        for &(value, width) in &chunks {
            assert_eq!(reader.read_bits(width).unwrap(), value);
        }
        assert!(reader.bits_remaining().unwrap() < 8);
    }

    #[test]
    fn test_trickling_source() {
        let chunks = fields(42, 200);
        let mut out = Vec::new();
        let mut writer = BitWriter::new(&mut out);
        for &(value, width) in &chunks {
            writer.write_bits(value, width).unwrap();
        }
        writer.flush().unwrap();

        let mut reader = BitReader::new(Trickle(&out));
        for &(value, width) in &chunks {
            assert_eq!(reader.read_bits(width).unwrap(), value);
        }
        assert_eq!(reader.bits_remaining(), None);
    }

    #[test]
    fn test_write_rejects_bad_width() {
        let mut writer = BitWriter::new(Vec::new());
        assert!(matches!(
            writer.write_bits(0, 0),
            Err(LzssError::InvalidWidth { width: 0, .. })
        ));
        assert!(matches!(
            writer.write_bits(1, 33),
            Err(LzssError::InvalidWidth { width: 33, .. })
        ));
        assert!(matches!(
            writer.write_bits(0b1000, 3),
            Err(LzssError::InvalidWidth { value: 8, width: 3 })
        ));
        writer.write_bits(u32::MAX, 32).unwrap();
        assert_eq!(writer.bits_written(), 32);
    }

    #[test]
    fn test_writer_closed_after_flush() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0b1, 1).unwrap();
        writer.flush().unwrap();
        assert!(writer.is_closed());
        assert!(matches!(
            writer.write_bits(1, 1),
            Err(LzssError::WriterClosed)
        ));
        assert!(matches!(writer.flush(), Err(LzssError::WriterClosed)));
        assert_eq!(writer.into_inner(), vec![0x80]);
    }

    #[test]
    fn test_flush_without_partial_byte() {
        let mut writer = BitWriter::new(Vec::new());
        writer.write_bits(0xAB, 8).unwrap();
        assert_eq!(writer.pending_bits(), 0);
        writer.flush().unwrap();
        assert_eq!(writer.into_inner(), vec![0xAB]);
    }

    #[test]
    fn test_end_of_stream_consumes_nothing() {
        let data = [0xA5];
        let mut reader = BitReader::from_slice(&data);
        assert_eq!(reader.read_bits(3).unwrap(), 0b101);

        let err = reader.read_bits(6).unwrap_err();
        assert!(matches!(
            err,
            LzssError::EndOfStream {
                requested: 6,
                available: 5
            }
        ));
        assert_eq!(reader.bits_read(), 3);
        assert_eq!(reader.read_bits(5).unwrap(), 0b00101);
        assert_eq!(reader.bits_remaining(), Some(0));
        assert!(reader.is_exhausted() || reader.fill(1).unwrap() == 0);
    }

    #[test]
    fn test_read_rejects_bad_width() {
        let mut reader = BitReader::from_slice(&[0xFF; 8]);
        assert!(matches!(
            reader.read_bits(0),
            Err(LzssError::InvalidWidth { width: 0, .. })
        ));
        assert!(matches!(
            reader.read_bits(40),
            Err(LzssError::InvalidWidth { width: 40, .. })
        ));
        assert_eq!(reader.read_bits(32).unwrap(), u32::MAX);
    }

    #[test]
    fn test_peek_then_read() {
        let mut reader = BitReader::from_slice(&[0b1100_0011, 0b0101_0101]);
        assert_eq!(reader.peek_bits(4).unwrap(), 0b1100);
        assert_eq!(reader.peek_bits(4).unwrap(), 0b1100);
        assert_eq!(reader.read_bits(12).unwrap(), 0b1100_0011_0101);
        assert_eq!(reader.bits_remaining(), Some(4));
    }
}
