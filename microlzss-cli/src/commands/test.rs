//! Test command implementation.

use microlzss::Decompressor;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn cmd_test(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing {}", input.display());

    let source = BufReader::new(File::open(input)?);
    let result = Decompressor::new(source).and_then(|mut decompressor| {
        let decoded = decompressor.decompress_all()?.len();
        Ok((decoded, decompressor.stats()))
    });

    match result {
        Ok((decoded, stats)) => {
            println!(
                "  OK: {} bytes ({} literals, {} matches)",
                decoded, stats.literals, stats.matches
            );
            Ok(())
        }
        Err(e) => {
            println!("  FAILED: {}", e);
            Err(format!("{} failed integrity test", input.display()).into())
        }
    }
}
