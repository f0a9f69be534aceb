//! Per-session token counters.

/// Counters kept by a compression or decompression session.
///
/// Sessions expose these through `stats()` instead of any global state, so
/// callers decide what to report and where.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenStats {
    /// Literal tokens emitted or decoded.
    pub literals: u64,
    /// Match tokens emitted or decoded.
    pub matches: u64,
    /// Bytes covered by match tokens.
    pub matched_bytes: u64,
    /// Uncompressed bytes consumed (compressor) or produced (decompressor).
    pub raw_bytes: u64,
    /// Compressed stream bits, header included and padding excluded.
    pub stream_bits: u64,
}

impl TokenStats {
    /// Total tokens.
    pub fn tokens(&self) -> u64 {
        self.literals + self.matches
    }

    /// Compressed size in whole bytes, final padding included.
    pub fn stream_bytes(&self) -> u64 {
        self.stream_bits.div_ceil(8)
    }

    /// Compressed size divided by raw size, or `None` for empty input.
    pub fn ratio(&self) -> Option<f64> {
        (self.raw_bytes > 0).then(|| self.stream_bytes() as f64 / self.raw_bytes as f64)
    }

    pub(crate) fn record_literal(&mut self) {
        self.literals += 1;
    }

    pub(crate) fn record_match(&mut self, length: usize) {
        self.matches += 1;
        self.matched_bytes += length as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let mut stats = TokenStats::default();
        stats.record_literal();
        stats.record_match(5);
        stats.record_match(3);
        stats.raw_bytes = 9;
        stats.stream_bits = 41;

        assert_eq!(stats.tokens(), 3);
        assert_eq!(stats.matched_bytes, 8);
        assert_eq!(stats.stream_bytes(), 6);
        assert!((stats.ratio().unwrap() - 6.0 / 9.0).abs() < 1e-9);
        assert_eq!(TokenStats::default().ratio(), None);
    }
}
