//! Decompress command implementation.

use crate::utils::decompressed_path;
use microlzss::Decompressor;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

pub fn cmd_decompress(
    input: &Path,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let output = output.map_or_else(|| decompressed_path(input), Path::to_path_buf);

    let source = BufReader::new(File::open(input)?);
    let mut decompressor = Decompressor::new(source)?;
    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        config = ?decompressor.config(),
        "decompressing"
    );

    // Decode fully before touching the output so a corrupt stream leaves
    // no partial file behind.
    let mut data = Vec::new();
    io::copy(&mut decompressor, &mut data)?;

    let mut sink = BufWriter::new(File::create(&output)?);
    sink.write_all(&data)?;
    sink.flush()?;

    println!(
        "{} -> {} ({} bytes)",
        input.display(),
        output.display(),
        data.len()
    );
    Ok(())
}
