//! Diapason CLI - note frequencies and sine test tones
//!
//! This binary computes note frequencies under concert or scientific pitch,
//! renders sine tones to WAV (or MP3/Ogg through ffmpeg), and inspects WAV
//! files.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use diapason::{Tuning, DEFAULT_SAMPLE_RATE};
use diapason_cli::commands::tone::{ToneArgs, ToneFormat, ToneSource};
use diapason_cli::commands::{self, PitchArgs};
use diapason_cli::logging;
use diapason_transcode::Bitrate;

/// Diapason - Musical Note Frequencies and Test Tones
#[derive(Parser)]
#[command(name = "diapason")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Note selection flags shared by `freq` and `tone`.
#[derive(Args, Debug)]
struct NoteFlags {
    /// Number of sharps to apply
    #[arg(long, default_value_t = 0)]
    sharp: u32,

    /// Number of flats to apply
    #[arg(long, default_value_t = 0)]
    flat: u32,

    /// Octave number (default: 4, or the one written in the note name)
    #[arg(short, long, allow_negative_numbers = true)]
    octave: Option<i32>,

    /// Tuning convention: concert (A4 = 440 Hz) or scientific (C4 = 256 Hz)
    #[arg(short, long, default_value = "concert")]
    tuning: Tuning,
}

impl NoteFlags {
    fn into_pitch(self, note: String) -> PitchArgs {
        PitchArgs {
            note,
            sharp: self.sharp,
            flat: self.flat,
            octave: self.octave,
            tuning: self.tuning,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the frequency of a note
    Freq {
        /// Note letter (A-G) or full name such as C#5 or Bb3
        note: String,

        #[command(flatten)]
        flags: NoteFlags,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Synthesize a sine tone and write it to a file
    Tone {
        /// Note letter (A-G) or full name such as C#5 or Bb3
        #[arg(required_unless_present = "frequency")]
        note: Option<String>,

        /// Explicit frequency in Hz instead of a note
        #[arg(
            short,
            long,
            conflicts_with_all = ["note", "sharp", "flat", "octave", "tuning"]
        )]
        frequency: Option<f64>,

        #[command(flatten)]
        flags: NoteFlags,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 1.0)]
        duration: f64,

        /// Sample rate in Hz
        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_RATE)]
        rate: u32,

        /// Output file path
        #[arg(long = "output")]
        output: PathBuf,

        /// Output format: wav, mpeg (mp3) or vorbis (ogg)
        #[arg(long, default_value = "wav")]
        format: ToneFormat,

        /// Bitrate in kbps for compressed formats (e.g. 192 or 192k)
        #[arg(short, long)]
        bitrate: Option<Bitrate>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Report format, levels and dominant frequency of a WAV file
    Inspect {
        /// Path to the WAV file
        input: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Check system dependencies and configuration
    Doctor,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Freq { note, flags, json } => {
            commands::freq::run(&flags.into_pitch(note), json)
        }
        Commands::Tone {
            note,
            frequency,
            flags,
            duration,
            rate,
            output,
            format,
            bitrate,
            json,
        } => {
            // clap guarantees exactly one of the two, and no note flags with a frequency
            let source = match frequency {
                Some(freq) => ToneSource::Frequency(freq),
                None => ToneSource::Pitch(flags.into_pitch(note.unwrap_or_default())),
            };
            let args = ToneArgs {
                source,
                duration,
                rate,
                output,
                format,
                bitrate,
            };
            commands::tone::run(&args, json)
        }
        Commands::Inspect { input, json } => commands::inspect::run(&input, json),
        Commands::Doctor => commands::doctor::run(),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
