//! CLI argument definitions for the downrate command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types are defined here,
//! keeping `main.rs` focused on dispatch logic.

use clap::{ArgAction, Parser, Subcommand};
use downrate_cli::request::{RatioArg, StrategyArg};

/// Downrate - Sample-rate reduction for WAV audio
#[derive(Parser)]
#[command(name = "downrate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Convert a WAV file to a lower sample rate
    Convert {
        /// Input WAV file
        #[arg(short, long)]
        input: String,

        /// Output WAV file
        #[arg(short, long)]
        output: String,

        /// Target sample rate in Hz
        #[arg(short, long)]
        target_rate: Option<u32>,

        /// Conversion strategy (default: time)
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// FIR filter order for the time strategy (default: 64)
        #[arg(long)]
        filter_order: Option<usize>,

        /// Handling of rates that do not divide the source rate (default: exact)
        #[arg(long, value_enum)]
        ratio: Option<RatioArg>,

        /// JSON request file; flags override its fields
        #[arg(short, long)]
        request: Option<String>,

        /// Average all channels to mono before converting
        #[arg(long)]
        downmix: bool,

        /// Write 32-bit float samples instead of 16-bit PCM
        #[arg(long)]
        float: bool,

        /// Directory to write fft_original.dat and fft_processed.dat into
        #[arg(long)]
        dump_spectra: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the taps of a windowed-sinc low-pass filter
    Design {
        /// FIR filter order
        #[arg(long)]
        filter_order: usize,

        /// Cutoff frequency in Hz
        #[arg(short, long)]
        cutoff: f64,

        /// Sample rate in Hz
        #[arg(short, long)]
        sample_rate: f64,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Write the magnitude spectrum of a WAV file
    Spectrum {
        /// Input WAV file
        #[arg(short, long)]
        input: String,

        /// Output file, one magnitude per line
        #[arg(short, long, default_value = "fft.dat")]
        output: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}
