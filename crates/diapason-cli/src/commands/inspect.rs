//! Inspect command implementation
//!
//! Reports format, levels and dominant frequency of a WAV file.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use crate::analysis::{analyze_wav, WavSummary};

use super::json_output::{error_codes, InspectOutput, JsonError};

/// Run the inspect command
///
/// # Arguments
/// * `input` - Path to the WAV file
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(input: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(input)
    } else {
        run_human(input)
    }
}

fn run_human(input: &str) -> Result<ExitCode> {
    let data = fs::read(Path::new(input))
        .with_context(|| format!("Failed to read input file: {}", input))?;
    let summary =
        analyze_wav(&data).with_context(|| format!("Failed to decode WAV file: {}", input))?;

    print_summary(input, &summary);
    Ok(ExitCode::SUCCESS)
}

fn run_json(input: &str) -> Result<ExitCode> {
    let data = match fs::read(Path::new(input)) {
        Ok(data) => data,
        Err(e) => {
            let error = JsonError::new(
                error_codes::FILE_READ,
                format!("Failed to read input file: {}", e),
            )
            .with_file(input);
            InspectOutput::failure(vec![error]).print()?;
            return Ok(ExitCode::from(1));
        }
    };

    match analyze_wav(&data) {
        Ok(summary) => {
            InspectOutput::success(summary).print()?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            let error = JsonError::new(
                error_codes::WAV_DECODE,
                format!("Failed to decode WAV file: {}", e),
            )
            .with_file(input);
            InspectOutput::failure(vec![error]).print()?;
            Ok(ExitCode::from(1))
        }
    }
}

fn print_summary(input: &str, summary: &WavSummary) {
    println!("{} {}", "Inspecting:".cyan().bold(), input);
    println!(
        "  {} {} ch, {} Hz, {}-bit",
        "Format:".dimmed(),
        summary.channels,
        summary.sample_rate,
        summary.bits_per_sample
    );
    println!(
        "  {} {} frames ({:.3} s)",
        "Length:".dimmed(),
        summary.frames,
        summary.duration_seconds
    );
    println!(
        "  {} peak {:.4}, rms {:.4}",
        "Level:".dimmed(),
        summary.peak,
        summary.rms
    );
    match summary.dominant_frequency_hz {
        Some(freq) => println!("  {} {:.3} Hz", "Dominant:".dimmed(), freq),
        None => println!("  {} {}", "Dominant:".dimmed(), "(too short)".yellow()),
    }
    if let Some(ref hash) = summary.pcm_hash {
        println!("  {} {}", "PCM hash:".dimmed(), &hash[..16]);
    }
    println!("  {} {}", "File hash:".dimmed(), &summary.file_hash[..16]);
}
