//! Freq command implementation
//!
//! Prints the frequency of a note.

use anyhow::Result;
use colored::Colorize;
use std::process::ExitCode;

use diapason::{DiapasonResult, NoteName};

use super::json_output::{FreqOutput, FreqResult, JsonError};
use super::PitchArgs;

/// Run the freq command
///
/// # Arguments
/// * `pitch` - Note selection and tuning
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on invalid input
pub fn run(pitch: &PitchArgs, json_output: bool) -> Result<ExitCode> {
    match compute(pitch) {
        Ok(result) => {
            if json_output {
                FreqOutput::success(result).print()?;
            } else {
                println!(
                    "{} {} Hz {}",
                    format!("{}:", result.note).bold(),
                    format!("{:.6}", result.frequency_hz).green(),
                    format!("({} pitch)", result.tuning).dimmed()
                );
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if json_output => {
            FreqOutput::failure(vec![JsonError::from(&e)]).print()?;
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolves the arguments to a frequency.
pub fn compute(pitch: &PitchArgs) -> DiapasonResult<FreqResult> {
    let query = pitch.resolve()?;
    let accidental = query.accidental()?;
    let frequency_hz = query.frequency()?;
    tracing::debug!(?query, frequency_hz, "resolved pitch");

    let name = NoteName {
        note: query.note(),
        accidental,
        octave: query.octave_number(),
    };
    Ok(FreqResult {
        note: name.to_string(),
        sharp: accidental.sharps(),
        flat: accidental.flats(),
        octave: query.octave_number(),
        tuning: query.tuning_convention().to_string(),
        frequency_hz,
    })
}
