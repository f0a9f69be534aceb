//! microlzss CLI
//!
//! Compress, decompress, inspect and verify LZSS streams.

mod commands;
mod utils;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use commands::{CompressOptions, cmd_compress, cmd_decompress, cmd_info, cmd_test};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "microlzss")]
#[command(author, version, about = "Pure Rust LZSS compression for small payloads")]
#[command(long_about = "
microlzss compresses data into a bit-packed LZSS stream whose parameters
are stored in a single header byte.

Examples:
  microlzss compress log.txt
  microlzss compress log.txt --preset ascii -o log.lzss
  microlzss compress dump.bin --window-bits 13 --size-bits 5
  microlzss decompress log.txt.lzss
  microlzss info log.txt.lzss --json
  microlzss test log.txt.lzss
")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <input>.lzss)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parameter preset
        #[arg(short, long, value_enum, default_value = "default")]
        preset: Preset,

        /// Window size as a power of two (8-15), overrides the preset
        #[arg(long)]
        window_bits: Option<u8>,

        /// Match length field width (4-7), overrides the preset
        #[arg(long)]
        size_bits: Option<u8>,

        /// Literal width (5-8), overrides the preset
        #[arg(long)]
        literal_bits: Option<u8>,

        /// Show progress bar
        #[arg(short = 'P', long)]
        progress: bool,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (default: input without .lzss, or <input>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show stream parameters and sizes
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Test stream integrity
    #[command(alias = "t")]
    Test {
        /// Compressed file to test
        input: PathBuf,
    },
}

/// Parameter presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
enum Preset {
    /// 1 KiB window, 4-bit lengths, 8-bit literals
    #[default]
    Default,
    /// Like default with 7-bit literals, for ASCII text
    Ascii,
}

impl From<Preset> for microlzss::LzssConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Default => Self::DEFAULT,
            Preset::Ascii => Self::ASCII,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            preset,
            window_bits,
            size_bits,
            literal_bits,
            progress,
        } => cmd_compress(
            &input,
            output.as_deref(),
            &CompressOptions {
                base: preset.into(),
                window_bits,
                size_bits,
                literal_bits,
                progress,
            },
        ),
        Commands::Decompress { input, output } => cmd_decompress(&input, output.as_deref()),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Test { input } => cmd_test(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
