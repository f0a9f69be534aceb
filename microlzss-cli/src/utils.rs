//! Utility functions for the CLI.

use indicatif::{ProgressBar, ProgressStyle};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Extension used for compressed files.
pub const EXTENSION: &str = "lzss";

/// Create a byte progress bar with standard styling.
pub fn create_progress_bar(len: u64, enable: bool) -> ProgressBar {
    if !enable {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(len);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
    {
        pb.set_style(style.progress_chars("█▓▒░ "));
    }
    pb
}

/// `<input>.lzss`
pub fn compressed_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(EXTENSION);
    PathBuf::from(name)
}

/// Input with `.lzss` stripped, or `<input>.out` when there is none.
pub fn decompressed_path(input: &Path) -> PathBuf {
    if input.extension().is_some_and(|ext| ext == EXTENSION) {
        return input.with_extension("");
    }
    let mut name = OsString::from(input.as_os_str());
    name.push(".out");
    PathBuf::from(name)
}

/// Space saved as a percentage of the original size.
pub fn space_savings(original: u64, compressed: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_paths() {
        assert_eq!(
            compressed_path(Path::new("data/log.txt")),
            PathBuf::from("data/log.txt.lzss")
        );
        assert_eq!(
            decompressed_path(Path::new("data/log.txt.lzss")),
            PathBuf::from("data/log.txt")
        );
        assert_eq!(
            decompressed_path(Path::new("data/blob")),
            PathBuf::from("data/blob.out")
        );
    }

    #[test]
    fn test_space_savings() {
        assert_eq!(space_savings(0, 1), 0.0);
        assert!((space_savings(200, 50) - 75.0).abs() < 1e-9);
    }
}
