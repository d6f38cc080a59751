//! Downrate CLI - Command-line interface for sample-rate reduction
//!
//! This binary converts WAV files to lower sample rates and exposes the
//! filter design and spectral analysis steps for inspection.

mod cli_args;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

// Use modules from the library crate
use downrate_cli::audio::OutputEncoding;
use downrate_cli::commands;
use downrate_cli::commands::convert::ConvertOptions;
use downrate_cli::logging;
use downrate_cli::request::RequestOptions;

use cli_args::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            input,
            output,
            target_rate,
            strategy,
            filter_order,
            ratio,
            request,
            downmix,
            float,
            dump_spectra,
            json,
        } => {
            let options = ConvertOptions {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
                request_file: request.map(PathBuf::from),
                request: RequestOptions {
                    file: None,
                    target_rate,
                    strategy,
                    filter_order,
                    ratio,
                },
                downmix,
                encoding: if float {
                    OutputEncoding::Float32
                } else {
                    OutputEncoding::Pcm16
                },
                dump_spectra: dump_spectra.map(PathBuf::from),
            };
            commands::convert::run(&options, json)
        }
        Commands::Design {
            filter_order,
            cutoff,
            sample_rate,
            json,
        } => commands::design::run(filter_order, cutoff, sample_rate, json),
        Commands::Spectrum {
            input,
            output,
            json,
        } => commands::spectrum::run(Path::new(&input), Path::new(&output), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use downrate_cli::request::{RatioArg, StrategyArg};

    #[test]
    fn test_cli_parses_convert() {
        let cli = Cli::try_parse_from([
            "downrate",
            "convert",
            "--input",
            "in.wav",
            "--output",
            "out.wav",
            "--target-rate",
            "16000",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Convert {
                input,
                output,
                target_rate,
                strategy,
                filter_order,
                ratio,
                request,
                downmix,
                float,
                dump_spectra,
                json,
            } => {
                assert_eq!(input, "in.wav");
                assert_eq!(output, "out.wav");
                assert_eq!(target_rate, Some(16000));
                assert!(strategy.is_none());
                assert!(filter_order.is_none());
                assert!(ratio.is_none());
                assert!(request.is_none());
                assert!(!downmix);
                assert!(!float);
                assert!(dump_spectra.is_none());
                assert!(!json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_convert_with_all_flags() {
        let cli = Cli::try_parse_from([
            "downrate",
            "-vv",
            "convert",
            "-i",
            "in.wav",
            "-o",
            "out.wav",
            "-t",
            "3000",
            "--strategy",
            "frequency",
            "--ratio",
            "nearest",
            "--request",
            "req.json",
            "--downmix",
            "--float",
            "--dump-spectra",
            "media",
            "--json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Convert {
                strategy,
                ratio,
                request,
                downmix,
                float,
                dump_spectra,
                json,
                ..
            } => {
                assert_eq!(strategy, Some(StrategyArg::Frequency));
                assert_eq!(ratio, Some(RatioArg::Nearest));
                assert_eq!(request.as_deref(), Some("req.json"));
                assert!(downmix);
                assert!(float);
                assert_eq!(dump_spectra.as_deref(), Some("media"));
                assert!(json);
            }
            _ => panic!("expected convert command"),
        }
    }

    #[test]
    fn test_cli_parses_design() {
        let cli = Cli::try_parse_from([
            "downrate",
            "design",
            "--filter-order",
            "31",
            "--cutoff",
            "500",
            "--sample-rate",
            "8000",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Design {
                filter_order,
                cutoff,
                sample_rate,
                json,
            } => {
                assert_eq!(filter_order, 31);
                assert_eq!(cutoff, 500.0);
                assert_eq!(sample_rate, 8000.0);
                assert!(json);
            }
            _ => panic!("expected design command"),
        }
    }

    #[test]
    fn test_cli_parses_spectrum_default_output() {
        let cli = Cli::try_parse_from(["downrate", "spectrum", "-i", "in.wav", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::Spectrum {
                input,
                output,
                json,
            } => {
                assert_eq!(input, "in.wav");
                assert_eq!(output, "fft.dat");
                assert!(!json);
            }
            _ => panic!("expected spectrum command"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_strategy() {
        let result = Cli::try_parse_from([
            "downrate",
            "convert",
            "-i",
            "in.wav",
            "-o",
            "out.wav",
            "--strategy",
            "polyphase",
        ]);
        assert!(result.is_err());
    }
}
