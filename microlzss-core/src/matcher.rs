//! Match finding strategies.
//!
//! The compressor asks a [`MatchFinder`] for the longest back-reference at
//! each position. Every implementation must return exactly what the
//! reference search returns, so the choice only affects speed, never the
//! compressed bytes.

use crate::window::{Match, WindowBuffer};

/// Strategy for finding the longest match in a window.
pub trait MatchFinder {
    /// Find the longest match for the start of `lookahead`.
    ///
    /// Only matches of at least `min_len` bytes are reported. The length is
    /// capped at `max_len` and `lookahead.len()`; ties go to the smallest
    /// offset.
    fn find_longest_match(
        &self,
        window: &WindowBuffer,
        lookahead: &[u8],
        min_len: usize,
        max_len: usize,
    ) -> Option<Match>;
}

/// Exhaustive search through [`WindowBuffer::find_longest_match`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceMatcher;

impl MatchFinder for ReferenceMatcher {
    fn find_longest_match(
        &self,
        window: &WindowBuffer,
        lookahead: &[u8],
        min_len: usize,
        max_len: usize,
    ) -> Option<Match> {
        window
            .find_longest_match(lookahead, max_len)
            .filter(|m| m.length >= min_len)
    }
}

/// Exhaustive search that rejects candidates on their first two bytes
/// before measuring them.
///
/// Most offsets fail on the first byte, and a match shorter than two bytes
/// is never usable, so the full comparison runs only for plausible
/// candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastMatcher;

impl MatchFinder for FastMatcher {
    fn find_longest_match(
        &self,
        window: &WindowBuffer,
        lookahead: &[u8],
        min_len: usize,
        max_len: usize,
    ) -> Option<Match> {
        let min_len = min_len.max(1);
        let limit = lookahead.len().min(max_len);
        if limit < min_len || window.is_empty() {
            return None;
        }

        let first = lookahead[0];
        let check_second = min_len >= 2;
        let second = if check_second { lookahead[1] } else { 0 };

        let mut best_offset = 0;
        let mut best_len = min_len - 1;
        for offset in 1..=window.len() {
            if window.byte_back(offset) != first {
                continue;
            }
            if check_second {
                let next = if offset >= 2 {
                    window.byte_back(offset - 1)
                } else {
                    first
                };
                if next != second {
                    continue;
                }
            }

            let length = window.match_length(offset, lookahead, limit);
            if length > best_len {
                best_len = length;
                best_offset = offset;
                if length == limit {
                    break;
                }
            }
        }

        (best_offset > 0).then_some(Match {
            offset: best_offset,
            length: best_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pseudo_random(len: usize, seed: u64, alphabet: u8) -> Vec<u8> {
        let mut state = seed;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                (state % alphabet as u64) as u8
            })
            .collect()
    }

    #[test]
    fn test_reference_filters_short_matches() {
        let mut window = WindowBuffer::new(8).unwrap();
        window.extend(b"xy");
        assert_eq!(ReferenceMatcher.find_longest_match(&window, b"xz", 2, 16), None);
        assert_eq!(
            ReferenceMatcher.find_longest_match(&window, b"xyq", 2, 16),
            Some(Match {
                offset: 2,
                length: 2
            })
        );
    }

    #[test]
    fn test_fast_single_byte_repeat() {
        let mut window = WindowBuffer::new(8).unwrap();
        window.push(b'a');
        assert_eq!(
            FastMatcher.find_longest_match(&window, b"aaaaaaaaa", 2, 17),
            Some(Match {
                offset: 1,
                length: 9
            })
        );
    }

    #[test]
    fn test_fast_agrees_with_reference() {
        for (seed, alphabet) in [(1u64, 2u8), (7, 3), (99, 4), (1234, 16)] {
            let data = pseudo_random(3000, seed, alphabet);
            let mut window = WindowBuffer::new(8).unwrap();

            let mut pos = 0;
            while pos < data.len() {
                let lookahead = &data[pos..];
                let reference = ReferenceMatcher.find_longest_match(&window, lookahead, 3, 18);
                let fast = FastMatcher.find_longest_match(&window, lookahead, 3, 18);
                assert_eq!(reference, fast, "seed {seed} position {pos}");

                let step = reference.map_or(1, |m| m.length);
                window.extend(&data[pos..pos + step]);
                pos += step;
            }
        }
    }

    #[test]
    fn test_fast_respects_limits() {
        let window = WindowBuffer::new(8).unwrap();
        assert_eq!(FastMatcher.find_longest_match(&window, b"abc", 2, 16), None);

        let mut window = WindowBuffer::new(8).unwrap();
        window.extend(b"abcabc");
        assert_eq!(FastMatcher.find_longest_match(&window, b"a", 2, 16), None);
        assert_eq!(
            FastMatcher
                .find_longest_match(&window, b"abcabcabc", 2, 4)
                .map(|m| m.length),
            Some(4)
        );
    }
}
