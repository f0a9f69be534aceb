//! Error types for microlzss operations.
//!
//! A single error enum covers the whole codec. Variants fall into four
//! classes:
//!
//! - **Configuration**: [`LzssError::InvalidWidth`], [`LzssError::InvalidConfig`],
//!   [`LzssError::WriterClosed`]. Detected before any state is created or
//!   caused by misuse of a finished session.
//! - **Input**: [`LzssError::LiteralOverflow`]. The failing `compress` call
//!   is rejected; the session itself stays usable.
//! - **Stream**: [`LzssError::UnsupportedHeader`], [`LzssError::CorruptStream`],
//!   [`LzssError::EndOfStream`]. Bit alignment cannot be recovered after
//!   one of these, so the session should be dropped.
//! - **Capacity**: [`LzssError::OffsetOutOfRange`]. A back-reference points
//!   outside the window.

use std::io;
use thiserror::Error;

/// The main error type for microlzss operations.
#[derive(Debug, Error)]
pub enum LzssError {
    /// I/O error from the underlying sink or source.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A bit field width is unusable or the value does not fit in it.
    #[error("Invalid bit width: cannot write {value:#x} in {width} bits")]
    InvalidWidth {
        /// Value that was to be written (0 for reads).
        value: u32,
        /// Requested field width in bits.
        width: u8,
    },

    /// A codec parameter is outside its supported range.
    #[error("Invalid {field}: {value} (must be {min}-{max})")]
    InvalidConfig {
        /// Name of the offending parameter.
        field: &'static str,
        /// Value that was supplied.
        value: u8,
        /// Smallest accepted value.
        min: u8,
        /// Largest accepted value.
        max: u8,
    },

    /// The writer has already been flushed and cannot accept more bits.
    #[error("Bit writer already flushed")]
    WriterClosed,

    /// An input byte needs more bits than the configured literal width.
    #[error("Byte {byte:#04x} at input offset {position} exceeds {literal_bits}-bit literal width")]
    LiteralOverflow {
        /// The offending byte.
        byte: u8,
        /// Offset of the byte within the rejected chunk.
        position: usize,
        /// Configured literal width.
        literal_bits: u8,
    },

    /// The stream header asks for a feature this version cannot decode.
    #[error("Unsupported stream header {byte:#04x}: header continuation is not supported")]
    UnsupportedHeader {
        /// The raw header byte.
        byte: u8,
    },

    /// The token stream cannot be decoded.
    #[error("Corrupt stream at bit position {bit_position}: {message}")]
    CorruptStream {
        /// Bit position where decoding failed.
        bit_position: u64,
        /// Description of the problem.
        message: String,
    },

    /// Fewer bits remain in the source than a read requested.
    #[error("Unexpected end of stream: requested {requested} bits, {available} available")]
    EndOfStream {
        /// Bits requested.
        requested: u8,
        /// Bits that were still available.
        available: usize,
    },

    /// A back-reference offset points outside the window.
    #[error("Offset {offset} out of range: window holds {available} bytes")]
    OffsetOutOfRange {
        /// The offending backward offset.
        offset: usize,
        /// Bytes currently addressable in the window.
        available: usize,
    },
}

/// Result type alias for microlzss operations.
pub type Result<T> = std::result::Result<T, LzssError>;

impl LzssError {
    /// Create an invalid width error.
    pub fn invalid_width(value: u32, width: u8) -> Self {
        Self::InvalidWidth { value, width }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(field: &'static str, value: u8, min: u8, max: u8) -> Self {
        Self::InvalidConfig {
            field,
            value,
            min,
            max,
        }
    }

    /// Create a literal overflow error.
    pub fn literal_overflow(byte: u8, position: usize, literal_bits: u8) -> Self {
        Self::LiteralOverflow {
            byte,
            position,
            literal_bits,
        }
    }

    /// Create a corrupt stream error.
    pub fn corrupt(bit_position: u64, message: impl Into<String>) -> Self {
        Self::CorruptStream {
            bit_position,
            message: message.into(),
        }
    }

    /// Create an end-of-stream error.
    pub fn end_of_stream(requested: u8, available: usize) -> Self {
        Self::EndOfStream {
            requested,
            available,
        }
    }

    /// Create an offset out of range error.
    pub fn offset_out_of_range(offset: usize, available: usize) -> Self {
        Self::OffsetOutOfRange { offset, available }
    }

    /// Whether this error came from malformed compressed input rather than
    /// from the caller or the environment.
    pub fn is_stream_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedHeader { .. }
                | Self::CorruptStream { .. }
                | Self::EndOfStream { .. }
                | Self::OffsetOutOfRange { .. }
        )
    }
}

impl From<LzssError> for io::Error {
    fn from(err: LzssError) -> Self {
        match err {
            LzssError::Io(e) => e,
            other if other.is_stream_error() => io::Error::new(io::ErrorKind::InvalidData, other),
            other => io::Error::new(io::ErrorKind::InvalidInput, other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_io_error() {
        let err: io::Error = LzssError::corrupt(3, "bad token").into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);

        let err: io::Error = LzssError::WriterClosed.into();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err: io::Error = LzssError::Io(io::Error::from(io::ErrorKind::BrokenPipe)).into();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_error_display() {
        let err = LzssError::invalid_config("window_bits", 16, 8, 15);
        assert_eq!(err.to_string(), "Invalid window_bits: 16 (must be 8-15)");

        let err = LzssError::literal_overflow(200, 3, 7);
        assert!(err.to_string().contains("0xc8"));
        assert!(err.to_string().contains("7-bit"));

        let err = LzssError::offset_out_of_range(9, 4);
        assert!(err.to_string().contains("Offset 9"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "sink closed");
        let err: LzssError = io_err.into();
        assert!(matches!(err, LzssError::Io(_)));
        assert!(!err.is_stream_error());
    }

    #[test]
    fn test_stream_error_classification() {
        assert!(LzssError::corrupt(12, "truncated").is_stream_error());
        assert!(LzssError::UnsupportedHeader { byte: 0x47 }.is_stream_error());
        assert!(!LzssError::WriterClosed.is_stream_error());
        assert!(!LzssError::literal_overflow(200, 0, 7).is_stream_error());
    }
}
