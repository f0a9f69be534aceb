//! The one-byte stream header.
//!
//! ```text
//!  bit:  7   6   5   4   3   2   1   0
//!      +-----------+-------+-------+---+
//!      |  window   | size  |literal| C |
//!      +-----------+-------+-------+---+
//! ```
//!
//! - `window`: `window_bits - 8`
//! - `size`: `size_bits - 4`
//! - `literal`: `literal_bits - 5`
//! - `C`: header continuation; another header byte follows when set.
//!   No continuation is defined yet, so decoders reject it.

use crate::config::{LzssConfig, MIN_LITERAL_BITS, MIN_SIZE_BITS, MIN_WINDOW_BITS};
use microlzss_core::bitstream::{BitReader, BitWriter};
use microlzss_core::error::{LzssError, Result};
use std::io::{Read, Write};

/// What follows the first header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderContinuation {
    /// The token stream starts right after this byte.
    #[default]
    None,
    /// Another header byte follows. Not supported by this version.
    Extended,
}

/// Decoded stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamHeader {
    config: LzssConfig,
    continuation: HeaderContinuation,
}

impl StreamHeader {
    /// Size of the header on the wire.
    pub const BITS: u8 = 8;

    /// Header for a stream using `config`.
    pub fn new(config: LzssConfig) -> Self {
        Self {
            config,
            continuation: HeaderContinuation::None,
        }
    }

    /// Stream parameters carried by the header.
    pub fn config(&self) -> LzssConfig {
        self.config
    }

    /// Continuation marker.
    pub fn continuation(&self) -> HeaderContinuation {
        self.continuation
    }

    /// Shortest match in this stream, derived from the header fields.
    pub fn min_pattern_len(&self) -> usize {
        self.config.min_pattern_len()
    }

    /// Encode into the wire byte.
    pub fn to_byte(&self) -> u8 {
        let window = self.config.window_bits() - MIN_WINDOW_BITS;
        let size = self.config.size_bits() - MIN_SIZE_BITS;
        let literal = self.config.literal_bits() - MIN_LITERAL_BITS;
        let more = match self.continuation {
            HeaderContinuation::None => 0,
            HeaderContinuation::Extended => 1,
        };
        (window << 5) | (size << 3) | (literal << 1) | more
    }

    /// Decode the wire byte.
    ///
    /// # Errors
    ///
    /// [`LzssError::UnsupportedHeader`] if the continuation bit is set.
    pub fn from_byte(byte: u8) -> Result<Self> {
        if byte & 1 != 0 {
            return Err(LzssError::UnsupportedHeader { byte });
        }

        let config = LzssConfig::new(
            (byte >> 5) + MIN_WINDOW_BITS,
            ((byte >> 3) & 0b11) + MIN_SIZE_BITS,
            ((byte >> 1) & 0b11) + MIN_LITERAL_BITS,
        )?;
        Ok(Self::new(config))
    }

    /// Write the header through a bit writer.
    pub fn write_to<W: Write>(&self, writer: &mut BitWriter<W>) -> Result<()> {
        writer.write_bits(self.to_byte() as u32, Self::BITS)?;
        tracing::debug!(
            header = %format_args!("{:#04x}", self.to_byte()),
            window_bits = self.config.window_bits(),
            size_bits = self.config.size_bits(),
            literal_bits = self.config.literal_bits(),
            "wrote LZSS header"
        );
        Ok(())
    }

    /// Read and validate the header from a bit reader.
    ///
    /// # Errors
    ///
    /// - [`LzssError::CorruptStream`] if the source holds no header byte.
    /// - [`LzssError::UnsupportedHeader`] if the continuation bit is set.
    pub fn read_from<R: Read>(reader: &mut BitReader<R>) -> Result<Self> {
        let byte = match reader.read_bits(Self::BITS) {
            Ok(value) => value as u8,
            Err(LzssError::EndOfStream { available, .. }) => {
                return Err(LzssError::corrupt(
                    reader.bits_read(),
                    format!("stream header truncated ({available} bits)"),
                ));
            }
            Err(e) => return Err(e),
        };

        let header = Self::from_byte(byte)?;
        tracing::debug!(
            header = %format_args!("{byte:#04x}"),
            window_bits = header.config.window_bits(),
            size_bits = header.config.size_bits(),
            literal_bits = header.config.literal_bits(),
            min_pattern_len = header.min_pattern_len(),
            "read LZSS header"
        );
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_byte() {
        let header = StreamHeader::new(LzssConfig::DEFAULT);
        assert_eq!(header.to_byte(), 0b010_00_11_0);
    }

    #[test]
    fn test_field_layout() {
        let header = StreamHeader::new(LzssConfig::new(15, 5, 5).unwrap());
        assert_eq!(header.to_byte(), 0b111_01_00_0);

        let header = StreamHeader::new(LzssConfig::new(8, 7, 6).unwrap());
        assert_eq!(header.to_byte(), 0b000_11_01_0);
    }

    #[test]
    fn test_header_roundtrip_all_configs() {
        for config in LzssConfig::all() {
            let header = StreamHeader::new(config);

            let mut out = Vec::new();
            let mut writer = BitWriter::new(&mut out);
            header.write_to(&mut writer).unwrap();
            writer.flush().unwrap();
            assert_eq!(out.len(), 1);

            let mut reader = BitReader::from_slice(&out);
            let decoded = StreamHeader::read_from(&mut reader).unwrap();
            assert_eq!(decoded, header);
            assert_eq!(decoded.config(), config);
            assert_eq!(decoded.min_pattern_len(), config.min_pattern_len());
            assert_eq!(decoded.continuation(), HeaderContinuation::None);
        }
    }

    #[test]
    fn test_every_even_byte_decodes() {
        for byte in (0u8..=255).filter(|b| b & 1 == 0) {
            let header = StreamHeader::from_byte(byte).unwrap();
            assert_eq!(header.to_byte(), byte);
        }
    }

    #[test]
    fn test_continuation_rejected() {
        assert!(matches!(
            StreamHeader::from_byte(0x47),
            Err(LzssError::UnsupportedHeader { byte: 0x47 })
        ));
    }

    #[test]
    fn test_missing_header() {
        let mut reader = BitReader::from_slice(&[]);
        assert!(matches!(
            StreamHeader::read_from(&mut reader),
            Err(LzssError::CorruptStream { .. })
        ));
    }
}
