//! Info command implementation.

use crate::utils::space_savings;
use microlzss::Decompressor;
use serde::Serialize;
use std::path::Path;

/// JSON output for stream information.
#[derive(Debug, Serialize)]
struct StreamInfoJson {
    file: String,
    header: u8,
    window_bits: u8,
    size_bits: u8,
    literal_bits: u8,
    window_size: usize,
    min_pattern_len: usize,
    max_pattern_len: usize,
    compressed_size: u64,
    decompressed_size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    ratio: Option<f64>,
    literals: u64,
    matches: u64,
}

pub fn cmd_info(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let data = std::fs::read(input)?;
    let mut decompressor = Decompressor::from_slice(&data)?;
    let decompressed = decompressor.decompress_all()?;

    let header = decompressor.header();
    let config = header.config();
    let stats = decompressor.stats();

    let info = StreamInfoJson {
        file: input.display().to_string(),
        header: header.to_byte(),
        window_bits: config.window_bits(),
        size_bits: config.size_bits(),
        literal_bits: config.literal_bits(),
        window_size: config.window_size(),
        min_pattern_len: config.min_pattern_len(),
        max_pattern_len: config.max_pattern_len(),
        compressed_size: data.len() as u64,
        decompressed_size: decompressed.len() as u64,
        ratio: (!decompressed.is_empty()).then(|| data.len() as f64 / decompressed.len() as f64),
        literals: stats.literals,
        matches: stats.matches,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Stream Information");
    println!("==================");
    println!("File: {}", info.file);
    println!("Header: {:#04x}", info.header);
    println!();
    println!("Parameters:");
    println!(
        "  Window: {} bits ({} bytes)",
        info.window_bits, info.window_size
    );
    println!("  Length field: {} bits", info.size_bits);
    println!("  Literal: {} bits", info.literal_bits);
    println!(
        "  Match length: {}-{} bytes",
        info.min_pattern_len, info.max_pattern_len
    );
    println!();
    println!("Contents:");
    println!("  Compressed size: {} bytes", info.compressed_size);
    println!("  Decompressed size: {} bytes", info.decompressed_size);
    println!("  Tokens: {} literals, {} matches", info.literals, info.matches);
    if info.decompressed_size > 0 {
        println!(
            "  Space savings: {:.1}%",
            space_savings(info.decompressed_size, info.compressed_size)
        );
    }

    Ok(())
}
