//! # microlzss Core
//!
//! Core components for the microlzss codec.
//!
//! This crate provides the building blocks the codec is assembled from:
//!
//! - [`bitstream`]: MSB-first bit-level I/O over `Read`/`Write`
//! - [`window`]: Sliding window addressed by backward offset
//! - [`matcher`]: Longest-match search strategies
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Tools                                               │
//! │     microlzss CLI                                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     Header, Compressor, Decompressor (microlzss)        │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitReader/BitWriter, WindowBuffer, MatchFinder      │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use microlzss_core::bitstream::{BitReader, BitWriter};
//! use microlzss_core::window::WindowBuffer;
//!
//! let mut output = Vec::new();
//! let mut writer = BitWriter::new(&mut output);
//! writer.write_bits(0x2A, 7).unwrap();
//! writer.flush().unwrap();
//!
//! let mut reader = BitReader::from_slice(&output);
//! assert_eq!(reader.read_bits(7).unwrap(), 0x2A);
//!
//! let mut window = WindowBuffer::new(8).unwrap();
//! window.extend(b"abcabc");
//! assert_eq!(window.get(3).unwrap(), b'a');
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod bitstream;
pub mod error;
pub mod matcher;
pub mod window;

// Re-exports for convenience
pub use bitstream::{BitReader, BitWriter};
pub use error::{LzssError, Result};
pub use matcher::{FastMatcher, MatchFinder, ReferenceMatcher};
pub use window::{Match, WindowBuffer};
