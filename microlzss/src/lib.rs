//! # microlzss: Pure Rust LZSS Compression
//!
//! This crate provides LZSS (Lempel-Ziv-Storer-Szymanski) compression and
//! decompression with a bit-packed wire format sized for small devices and
//! short, repetitive payloads such as sensor telemetry.
//!
//! ## Features
//!
//! - **Pure Rust**: No C dependencies, 100% safe Rust
//! - **Tunable**: Window 256 B to 32 KiB, 4-7 bit match lengths, 5-8 bit literals
//! - **Self-describing**: A single header byte carries all parameters
//! - **Streaming**: Feed input in chunks, read output in bounded pieces
//!
//! ## Stream Format
//!
//! - **Header**: One byte: `window_bits - 8` (3 bits), `size_bits - 4`
//!   (2 bits), `literal_bits - 5` (2 bits), continuation flag (1 bit)
//! - **Literal token**: `1` followed by the byte in `literal_bits` bits
//! - **Match token**: `0`, `offset - 1` in `window_bits` bits, then
//!   `length - min_pattern_len` in `size_bits` bits
//! - **MSB-first**: Bits are packed from most significant to least
//! - **No end marker**: The stream ends with at most seven zero bits
//!
//! `min_pattern_len` is the shortest match that is strictly cheaper than
//! the literals it replaces; it is derived from the header on both sides.
//!
//! ## Example
//!
//! ```rust
//! use microlzss::{LzssConfig, compress, decompress};
//!
//! let original = b"t=21.37C h=40.12%\nt=21.38C h=40.11%\n";
//!
//! let compressed = compress(original, LzssConfig::ASCII).unwrap();
//! assert!(compressed.len() < original.len());
//!
//! let decompressed = decompress(&compressed).unwrap();
//! assert_eq!(decompressed, original);
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use microlzss::{Compressor, Decompressor, LzssConfig};
//!
//! let mut compressor = Compressor::new(Vec::new(), LzssConfig::DEFAULT).unwrap();
//! compressor.compress(b"hello ").unwrap();
//! compressor.compress(b"hello hello").unwrap();
//! let stream = compressor.finish().unwrap();
//!
//! let mut decompressor = Decompressor::from_slice(&stream).unwrap();
//! let mut output = Vec::new();
//! while !decompressor.is_finished() {
//!     output.extend(decompressor.decompress(Some(4)).unwrap());
//! }
//! assert_eq!(output, b"hello hello hello");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod compressor;
pub mod config;
pub mod decompressor;
pub mod header;
pub mod stats;

pub use compressor::Compressor;
pub use config::LzssConfig;
pub use decompressor::Decompressor;
pub use header::{HeaderContinuation, StreamHeader};
pub use microlzss_core::{
    BitReader, BitWriter, FastMatcher, LzssError, Match, MatchFinder, ReferenceMatcher, Result,
    WindowBuffer,
};
pub use stats::TokenStats;

/// Compress data into a complete LZSS stream.
///
/// # Parameters
///
/// - `data`: Uncompressed input
/// - `config`: Stream parameters, written into the header
///
/// # Returns
///
/// Header byte followed by the padded token stream.
///
/// # Example
///
/// ```rust
/// use microlzss::{compress, LzssConfig};
///
/// let data = b"0123456789".repeat(100);
/// let compressed = compress(&data, LzssConfig::DEFAULT).unwrap();
/// assert!(compressed.len() < data.len() / 4);
/// ```
pub fn compress(data: &[u8], config: LzssConfig) -> Result<Vec<u8>> {
    let mut compressor = Compressor::new(Vec::new(), config)?;
    compressor.compress(data)?;
    compressor.finish()
}

/// Decompress a complete LZSS stream.
///
/// The parameters are read from the stream header.
///
/// # Example
///
/// ```rust
/// use microlzss::{compress, decompress, LzssConfig};
///
/// let compressed = compress(b"foo foo foo", LzssConfig::DEFAULT).unwrap();
/// assert_eq!(decompress(&compressed).unwrap(), b"foo foo foo");
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    Decompressor::from_slice(data)?.decompress_all()
}

/// Decompress at most `max_bytes` bytes from the start of an LZSS stream.
///
/// Decoding stops as soon as the limit is reached, so corruption past that
/// point is not detected.
///
/// # Example
///
/// ```rust
/// use microlzss::{compress, decompress_with_limit, LzssConfig};
///
/// let compressed = compress(b"abcabcabcabc", LzssConfig::DEFAULT).unwrap();
/// assert_eq!(decompress_with_limit(&compressed, 5).unwrap(), b"abcab");
/// ```
pub fn decompress_with_limit(data: &[u8], max_bytes: usize) -> Result<Vec<u8>> {
    Decompressor::from_slice(data)?.decompress(Some(max_bytes))
}
