//! Doctor command implementation
//!
//! Checks the external encoder used for MP3 and Ogg output.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use std::process::{Command, ExitCode, Stdio};

use diapason::{synthesize_tone, DEFAULT_SAMPLE_RATE};
use diapason_transcode::{CodingFormat, FfmpegTranscoder, TranscodeError, FFMPEG_ENV_VAR};

/// Run the doctor command
///
/// Checks:
/// - Version information
/// - ffmpeg installation and its MP3/Vorbis encoders
/// - WAV synthesis
///
/// A missing ffmpeg is reported but is not a failure: WAV output works
/// without it.
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run() -> Result<ExitCode> {
    println!("{}", "Diapason Doctor".cyan().bold());
    println!("{}", "===============".cyan());
    println!();

    let mut all_ok = true;

    println!("{}", "Versions:".bold());
    println!(
        "  {} diapason-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );
    println!();

    println!("{}", "Dependencies:".bold());
    if let Ok(path) = std::env::var(FFMPEG_ENV_VAR) {
        println!("  {} {}={}", "->".dimmed(), FFMPEG_ENV_VAR, path);
    }

    let transcoder = FfmpegTranscoder::new();
    match transcoder.find_ffmpeg() {
        Ok(path) => match transcoder.version() {
            Ok(version_line) => {
                let version =
                    parse_ffmpeg_version(&version_line).unwrap_or_else(|| "unknown".to_string());
                println!(
                    "  {} ffmpeg {} ({})",
                    "ok".green(),
                    version,
                    path.display()
                );
                report_encoders(&path);
            }
            Err(e) => {
                println!("  {} ffmpeg check failed: {}", "!!".red(), e);
                all_ok = false;
            }
        },
        Err(TranscodeError::EncoderNotFound) => {
            println!("  {} ffmpeg not found", "!!".yellow());
            println!(
                "     {}",
                "ffmpeg is required for --format mpeg and --format vorbis.".dimmed()
            );
            println!(
                "     {}",
                format!("Install it or point {} at the executable.", FFMPEG_ENV_VAR).dimmed()
            );
        }
        Err(e) => {
            println!("  {} ffmpeg check failed: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    println!("{}", "Synthesis:".bold());
    match synthesize_tone(440.0, 0.01, DEFAULT_SAMPLE_RATE) {
        Ok(wav) => println!(
            "  {} A4 test tone ({} samples, hash {})",
            "ok".green(),
            wav.num_samples,
            &wav.pcm_hash[..16]
        ),
        Err(e) => {
            println!("  {} test tone failed: {}", "!!".red(), e);
            all_ok = false;
        }
    }
    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

fn report_encoders(ffmpeg: &Path) {
    let listing = Command::new(ffmpeg)
        .args(["-hide_banner", "-encoders"])
        .stdin(Stdio::null())
        .output();

    let stdout = match listing {
        Ok(output) if output.status.success() => {
            String::from_utf8_lossy(&output.stdout).into_owned()
        }
        Ok(output) => {
            println!(
                "  {} could not list encoders (status {})",
                "!!".yellow(),
                output.status
            );
            return;
        }
        Err(e) => {
            println!("  {} could not list encoders: {}", "!!".yellow(), e);
            return;
        }
    };

    for format in CodingFormat::ALL {
        let codec = format.ffmpeg_codec();
        if has_encoder(&stdout, codec) {
            println!("  {} {} encoder for {}", "ok".green(), codec, format);
        } else {
            println!(
                "  {} {} encoder missing, --format {} will fail",
                "!!".yellow(),
                codec,
                format
            );
        }
    }
}

fn parse_ffmpeg_version(line: &str) -> Option<String> {
    // "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 ..."
    line.strip_prefix("ffmpeg version ")
        .and_then(|rest| rest.split_whitespace().next())
        .map(|v| v.to_string())
}

fn has_encoder(listing: &str, name: &str) -> bool {
    // " A....D libmp3lame           libmp3lame MP3 (MPEG audio layer 3) (codec mp3)"
    listing
        .lines()
        .any(|line| line.split_whitespace().nth(1) == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ffmpeg_version() {
        let line = "ffmpeg version 6.1.1-3ubuntu5 Copyright (c) 2000-2023 the FFmpeg developers";
        assert_eq!(parse_ffmpeg_version(line).as_deref(), Some("6.1.1-3ubuntu5"));
        assert_eq!(parse_ffmpeg_version("avconv 12"), None);
    }

    #[test]
    fn test_has_encoder() {
        let listing = "Encoders:\n \
            V..... = Video\n \
            ------\n \
            A....D libmp3lame           libmp3lame MP3 (MPEG audio layer 3) (codec mp3)\n \
            A....D vorbis               Vorbis (codec vorbis)\n";
        assert!(has_encoder(listing, "libmp3lame"));
        assert!(!has_encoder(listing, "libvorbis"));
        assert!(has_encoder(listing, "vorbis"));
    }
}
