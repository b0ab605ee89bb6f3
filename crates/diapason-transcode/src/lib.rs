//! Diapason format transcoder
//!
//! Converts in-memory WAV audio to compressed formats (MP3 or Ogg Vorbis) by
//! driving an external encoder.
//!
//! # Architecture
//!
//! The [`Transcoder`] trait is the capability callers depend on.
//! [`FfmpegTranscoder`] implements it by:
//! 1. Rejecting input that is not RIFF/WAVE
//! 2. Writing the WAV to a temporary directory
//! 3. Spawning `ffmpeg` with the codec and optional bitrate
//! 4. Reading the encoded file back into memory
//!
//! # Requirements
//!
//! ffmpeg built with `libmp3lame` and `libvorbis` must be installed. The
//! executable is found via:
//! 1. [`TranscoderConfig::ffmpeg_path`] (must exist when set)
//! 2. `DIAPASON_FFMPEG` environment variable
//! 3. System PATH
//!
//! # Example
//!
//! ```no_run
//! use diapason::synthesize_tone;
//! use diapason_transcode::{convert_wav, Bitrate};
//!
//! let wav = synthesize_tone(440.0, 1.0, 44_100).unwrap();
//! let mp3 = convert_wav(&wav.wav_data, "mpeg", Bitrate::from_kbps(192)).unwrap();
//! std::fs::write("a440.mp3", mp3).unwrap();
//! ```

pub mod error;
pub mod ffmpeg;
pub mod format;
pub mod transcoder;

pub use error::{TranscodeError, TranscodeResult};
pub use ffmpeg::{FfmpegTranscoder, TranscoderConfig, DEFAULT_TIMEOUT_SECS, FFMPEG_ENV_VAR};
pub use format::{Bitrate, CodingFormat};
pub use transcoder::Transcoder;

/// Converts WAV bytes to the format named by `coding_format` using ffmpeg.
///
/// `coding_format` accepts `mpeg` (also `mpeg-audio`, `mp3`) or `vorbis`
/// (also `ogg`). The identifier is validated before anything else happens.
pub fn convert_wav(
    wav: &[u8],
    coding_format: &str,
    bitrate: Option<Bitrate>,
) -> TranscodeResult<Vec<u8>> {
    let format: CodingFormat = coding_format.parse()?;
    FfmpegTranscoder::new().transcode(wav, format, bitrate)
}
