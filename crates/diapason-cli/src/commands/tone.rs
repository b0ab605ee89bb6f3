//! Tone command implementation
//!
//! Synthesizes a sine tone and writes it as WAV, or transcodes it to MP3 or
//! Ogg Vorbis first.

use anyhow::{Context, Result};
use colored::Colorize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use diapason::{synthesize_tone, DiapasonError};
use diapason_transcode::{Bitrate, CodingFormat, FfmpegTranscoder, TranscodeError, Transcoder};

use super::json_output::{error_codes, JsonError, ToneOutput, ToneResult};
use super::PitchArgs;

/// Container written by the tone command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToneFormat {
    /// Uncompressed WAV straight from the synthesizer.
    #[default]
    Wav,
    /// Transcoded through the encoder.
    Encoded(CodingFormat),
}

impl FromStr for ToneFormat {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("wav") {
            Ok(ToneFormat::Wav)
        } else {
            s.parse().map(ToneFormat::Encoded)
        }
    }
}

impl fmt::Display for ToneFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToneFormat::Wav => f.write_str("wav"),
            ToneFormat::Encoded(format) => write!(f, "{}", format),
        }
    }
}

/// Where the tone's frequency comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ToneSource {
    /// A note under a tuning convention.
    Pitch(PitchArgs),
    /// An explicit frequency in Hz.
    Frequency(f64),
}

/// Arguments of the tone command.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneArgs {
    pub source: ToneSource,
    /// Duration in seconds
    pub duration: f64,
    /// Sample rate in Hz
    pub rate: u32,
    pub output: PathBuf,
    pub format: ToneFormat,
    pub bitrate: Option<Bitrate>,
}

/// Run the tone command
///
/// # Arguments
/// * `args` - Tone parameters and output location
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on error
pub fn run(args: &ToneArgs, json_output: bool) -> Result<ExitCode> {
    let transcoder = FfmpegTranscoder::new();
    match render(args, &transcoder) {
        Ok(result) => {
            if json_output {
                ToneOutput::success(result).print()?;
            } else {
                print_human(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if json_output => {
            ToneOutput::failure(vec![json_error(&e, &args.output)]).print()?;
            Ok(ExitCode::from(1))
        }
        Err(e) => Err(e),
    }
}

/// Synthesizes, optionally transcodes, and writes the tone.
pub fn render(args: &ToneArgs, transcoder: &dyn Transcoder) -> Result<ToneResult> {
    let frequency = match &args.source {
        ToneSource::Frequency(freq) => *freq,
        ToneSource::Pitch(pitch) => pitch.resolve()?.frequency()?,
    };

    let wav = synthesize_tone(frequency, args.duration, args.rate)?;
    tracing::info!(
        frequency,
        duration = args.duration,
        rate = args.rate,
        samples = wav.num_samples,
        "synthesized tone"
    );

    let bytes = match args.format {
        ToneFormat::Wav => {
            if args.bitrate.is_some() {
                tracing::warn!("--bitrate is ignored for WAV output");
            }
            wav.wav_data.clone()
        }
        ToneFormat::Encoded(format) => {
            tracing::debug!(encoder = transcoder.name(), %format, "transcoding");
            transcoder.transcode(&wav.wav_data, format, args.bitrate)?
        }
    };

    write_output(&args.output, &bytes)?;

    Ok(ToneResult {
        output: args.output.display().to_string(),
        format: args.format.to_string(),
        frequency_hz: frequency,
        duration_seconds: wav.duration_seconds(),
        sample_rate: wav.sample_rate,
        num_samples: wav.num_samples,
        bitrate_kbps: match args.format {
            ToneFormat::Wav => None,
            ToneFormat::Encoded(_) => args.bitrate.map(|b| b.kbps()),
        },
        size_bytes: bytes.len(),
        pcm_hash: wav.pcm_hash,
    })
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))
}

fn json_error(err: &anyhow::Error, output: &Path) -> JsonError {
    if let Some(e) = err.downcast_ref::<DiapasonError>() {
        JsonError::from(e)
    } else if let Some(e) = err.downcast_ref::<TranscodeError>() {
        JsonError::from(e)
    } else {
        JsonError::new(error_codes::FILE_WRITE, format!("{:#}", err))
            .with_file(output.display().to_string())
    }
}

fn print_human(result: &ToneResult) {
    println!(
        "{} {} ({} bytes)",
        "Wrote".green().bold(),
        result.output,
        result.size_bytes
    );
    println!(
        "  {} {:.6} Hz, {:.3} s at {} Hz ({} samples)",
        "->".dimmed(),
        result.frequency_hz,
        result.duration_seconds,
        result.sample_rate,
        result.num_samples
    );
    match result.bitrate_kbps {
        Some(kbps) => println!("  {} {} at {} kbps", "->".dimmed(), result.format, kbps),
        None => println!("  {} {}", "->".dimmed(), result.format),
    }
    println!("  {} {}", "PCM hash:".dimmed(), &result.pcm_hash[..16]);
}
