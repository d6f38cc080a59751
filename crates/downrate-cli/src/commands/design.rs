//! Design command implementation
//!
//! Prints the taps of the low-pass filter a time-domain conversion would use.

use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use downrate_dsp::design_lowpass;

use super::json_output::DesignOutput;

/// Run the design command
///
/// # Arguments
/// * `filter_order` - FIR order; the filter has `filter_order + 1` taps
/// * `cutoff` - Cutoff frequency in Hz
/// * `sample_rate` - Sample rate in Hz
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success
pub fn run(
    filter_order: usize,
    cutoff: f64,
    sample_rate: f64,
    json_output: bool,
) -> Result<ExitCode> {
    let output = execute(filter_order, cutoff, sample_rate)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", "Low-pass filter:".cyan().bold());
        println!(
            "  {} {} ({} taps)",
            "Order:".dimmed(),
            output.filter_order,
            output.taps.len()
        );
        println!("  {} {} Hz", "Cutoff:".dimmed(), output.cutoff);
        println!("  {} {} Hz", "Sample rate:".dimmed(), output.sample_rate);
        println!("  {} {:.6}", "DC gain:".dimmed(), output.dc_gain);
        println!();
        for (i, tap) in output.taps.iter().enumerate() {
            println!("  {:>4}  {:+.12e}", i.to_string().dimmed(), tap);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn execute(filter_order: usize, cutoff: f64, sample_rate: f64) -> Result<DesignOutput> {
    let coeffs =
        design_lowpass(filter_order, cutoff, sample_rate).context("Filter design failed")?;
    Ok(DesignOutput {
        filter_order,
        cutoff,
        sample_rate,
        dc_gain: coeffs.dc_gain(),
        taps: coeffs.taps().to_vec(),
    })
}
