//! Streaming behavior: bounded reads, slow sources, `io::Read`.

use microlzss::{Compressor, Decompressor, LzssConfig, LzssError, compress};
use std::io::{self, Read};

/// Source that hands out at most `step` bytes per `read` call.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn sample() -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..200u32 {
        data.extend_from_slice(format!("seq={i:04} status=OK load={}\n", i % 7).as_bytes());
    }
    data
}

#[test]
fn test_bounded_reads_reassemble() {
    let original = sample();
    let compressed = compress(&original, LzssConfig::DEFAULT).unwrap();

    for limit in [1, 2, 3, 5, 16, 17, 100] {
        let mut decompressor = Decompressor::from_slice(&compressed).unwrap();
        let mut output = Vec::new();
        loop {
            let piece = decompressor.decompress(Some(limit)).unwrap();
            assert!(piece.len() <= limit);
            output.extend_from_slice(&piece);
            if piece.len() < limit {
                break;
            }
        }
        assert!(decompressor.is_finished());
        assert_eq!(output, original, "limit {limit}");
    }
}

#[test]
fn test_zero_limit_returns_nothing() {
    let compressed = compress(b"abcabcabc", LzssConfig::DEFAULT).unwrap();
    let mut decompressor = Decompressor::from_slice(&compressed).unwrap();
    assert!(decompressor.decompress(Some(0)).unwrap().is_empty());
    assert!(!decompressor.is_finished());
    assert_eq!(decompressor.decompress_all().unwrap(), b"abcabcabc");
}

#[test]
fn test_trickle_source() {
    let original = sample();
    let compressed = compress(&original, LzssConfig::new(13, 6, 7).unwrap()).unwrap();

    for step in [1, 3, 64] {
        let source = Trickle {
            data: &compressed,
            step,
        };
        let mut decompressor = Decompressor::new(source).unwrap();
        assert_eq!(decompressor.decompress_all().unwrap(), original, "step {step}");
        assert!(decompressor.is_finished());
        assert!(decompressor.into_inner().data.is_empty());
    }
}

#[test]
fn test_read_with_io_copy() {
    let original = sample();
    let compressed = compress(&original, LzssConfig::DEFAULT).unwrap();

    let mut decompressor = Decompressor::new(io::Cursor::new(compressed)).unwrap();
    let mut output = Vec::new();
    let copied = io::copy(&mut decompressor, &mut output).unwrap();
    assert_eq!(copied, original.len() as u64);
    assert_eq!(output, original);
}

#[test]
fn test_compress_into_io_writer() {
    let original = sample();
    let mut sink = io::Cursor::new(Vec::new());

    let mut compressor = Compressor::new(&mut sink, LzssConfig::ASCII).unwrap();
    for line in original.split_inclusive(|&b| b == b'\n') {
        compressor.compress(line).unwrap();
    }
    let stats = compressor.stats();
    compressor.finish().unwrap();

    let stream = sink.into_inner();
    assert_eq!(stats.raw_bytes, original.len() as u64);
    assert_eq!(stats.stream_bytes(), stream.len() as u64);

    let mut decompressor = Decompressor::from_slice(&stream).unwrap();
    assert_eq!(decompressor.decompress_all().unwrap(), original);
    assert_eq!(decompressor.stats().literals, stats.literals);
    assert_eq!(decompressor.stats().matches, stats.matches);
}

#[test]
fn test_corrupt_offset_is_rejected() {
    // 'x' as a literal, then a match reaching 3 bytes back.
    let stream = [0x46, 0b1011_1100, 0b0000_0000, 0b0010_0000, 0b0000_0000];
    let mut decompressor = Decompressor::from_slice(&stream).unwrap();
    assert!(matches!(
        decompressor.decompress_all(),
        Err(LzssError::OffsetOutOfRange {
            offset: 3,
            available: 1
        })
    ));
}
