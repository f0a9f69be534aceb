//! Compress command implementation.

use crate::utils::{compressed_path, create_progress_bar, space_savings};
use microlzss::{Compressor, LzssConfig};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Options for compressing a file.
pub struct CompressOptions {
    /// Preset the per-field overrides apply to.
    pub base: LzssConfig,
    /// Window width override.
    pub window_bits: Option<u8>,
    /// Length field width override.
    pub size_bits: Option<u8>,
    /// Literal width override.
    pub literal_bits: Option<u8>,
    /// Show a progress bar while reading the input.
    pub progress: bool,
}

impl CompressOptions {
    fn config(&self) -> microlzss::Result<LzssConfig> {
        LzssConfig::new(
            self.window_bits.unwrap_or(self.base.window_bits()),
            self.size_bits.unwrap_or(self.base.size_bits()),
            self.literal_bits.unwrap_or(self.base.literal_bits()),
        )
    }
}

pub fn cmd_compress(
    input: &Path,
    output: Option<&Path>,
    options: &CompressOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.config()?;
    let output = output.map_or_else(|| compressed_path(input), Path::to_path_buf);

    let mut source = File::open(input)?;
    let total = source.metadata()?.len();

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        ?config,
        "compressing"
    );

    let pb = create_progress_bar(total, options.progress);
    // Compress in memory so rejected input leaves no output file behind.
    let mut compressor = Compressor::new(Vec::new(), config)?;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = source.read(&mut buf)?;
        if n == 0 {
            break;
        }
        compressor.compress(&buf[..n])?;
        pb.inc(n as u64);
    }

    let stats = compressor.stats();
    let stream = compressor.finish()?;
    pb.finish_and_clear();

    let mut sink = BufWriter::new(File::create(&output)?);
    sink.write_all(&stream)?;
    sink.flush()?;

    println!(
        "{} -> {} ({} -> {} bytes, {:.1}% saved)",
        input.display(),
        output.display(),
        stats.raw_bytes,
        stats.stream_bytes(),
        space_savings(stats.raw_bytes, stats.stream_bytes())
    );
    Ok(())
}
