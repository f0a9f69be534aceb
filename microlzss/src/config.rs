//! LZSS stream parameters.

use microlzss_core::error::{LzssError, Result};

/// Smallest supported window, in address bits (256 bytes).
pub const MIN_WINDOW_BITS: u8 = 8;
/// Largest supported window, in address bits (32 KB).
pub const MAX_WINDOW_BITS: u8 = 15;
/// Smallest supported match-length field.
pub const MIN_SIZE_BITS: u8 = 4;
/// Largest supported match-length field.
pub const MAX_SIZE_BITS: u8 = 7;
/// Narrowest supported literal.
pub const MIN_LITERAL_BITS: u8 = 5;
/// Widest supported literal.
pub const MAX_LITERAL_BITS: u8 = 8;

/// LZSS configuration parameters.
///
/// The three widths fully determine the token layout; everything else
/// (pattern length bounds, token sizes) is derived from them, identically
/// on the compressing and decompressing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LzssConfig {
    /// Window address width (8-15); the window holds `2^window_bits` bytes.
    window_bits: u8,
    /// Match-length field width (4-7).
    size_bits: u8,
    /// Literal width (5-8).
    literal_bits: u8,
}

impl LzssConfig {
    /// General-purpose configuration.
    ///
    /// - 1 KB window
    /// - 4-bit length field (matches of 2-17 bytes)
    /// - 8-bit literals
    pub const DEFAULT: Self = Self {
        window_bits: 10,
        size_bits: 4,
        literal_bits: 8,
    };

    /// Configuration for 7-bit ASCII text such as telemetry lines.
    ///
    /// - 1 KB window
    /// - 4-bit length field (matches of 2-17 bytes)
    /// - 7-bit literals
    pub const ASCII: Self = Self {
        window_bits: 10,
        size_bits: 4,
        literal_bits: 7,
    };

    /// Create a new configuration, validating every width.
    pub fn new(window_bits: u8, size_bits: u8, literal_bits: u8) -> Result<Self> {
        check_range("window_bits", window_bits, MIN_WINDOW_BITS, MAX_WINDOW_BITS)?;
        check_range("size_bits", size_bits, MIN_SIZE_BITS, MAX_SIZE_BITS)?;
        check_range(
            "literal_bits",
            literal_bits,
            MIN_LITERAL_BITS,
            MAX_LITERAL_BITS,
        )?;

        Ok(Self {
            window_bits,
            size_bits,
            literal_bits,
        })
    }

    /// Window address width in bits.
    pub fn window_bits(&self) -> u8 {
        self.window_bits
    }

    /// Match-length field width in bits.
    pub fn size_bits(&self) -> u8 {
        self.size_bits
    }

    /// Literal width in bits.
    pub fn literal_bits(&self) -> u8 {
        self.literal_bits
    }

    /// Window capacity in bytes.
    pub fn window_size(&self) -> usize {
        1 << self.window_bits
    }

    /// Largest byte value a literal can carry.
    pub fn max_literal(&self) -> u8 {
        ((1u16 << self.literal_bits) - 1) as u8
    }

    /// Bits taken by one literal token, flag included.
    pub fn literal_token_bits(&self) -> u32 {
        1 + self.literal_bits as u32
    }

    /// Bits taken by one match token, flag included.
    pub fn match_token_bits(&self) -> u32 {
        1 + self.window_bits as u32 + self.size_bits as u32
    }

    /// Shortest match worth encoding.
    ///
    /// This is the smallest length `L` for which a match token is strictly
    /// cheaper than `L` literal tokens.
    pub fn min_pattern_len(&self) -> usize {
        (self.match_token_bits() / self.literal_token_bits()) as usize + 1
    }

    /// Longest match a single token can describe.
    pub fn max_pattern_len(&self) -> usize {
        self.min_pattern_len() + (1 << self.size_bits) - 1
    }

    /// Iterate over every valid configuration.
    pub fn all() -> impl Iterator<Item = Self> {
        (MIN_WINDOW_BITS..=MAX_WINDOW_BITS).flat_map(|window_bits| {
            (MIN_SIZE_BITS..=MAX_SIZE_BITS).flat_map(move |size_bits| {
                (MIN_LITERAL_BITS..=MAX_LITERAL_BITS).map(move |literal_bits| Self {
                    window_bits,
                    size_bits,
                    literal_bits,
                })
            })
        })
    }
}

impl Default for LzssConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn check_range(field: &'static str, value: u8, min: u8, max: u8) -> Result<()> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(LzssError::invalid_config(field, value, min, max))
    }
}
