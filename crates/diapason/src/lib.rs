//! Diapason
//!
//! Musical note frequencies under configurable tuning conventions, and pure
//! sine tones packaged as WAV audio.
//!
//! # Overview
//!
//! The crate has two halves that are usually used in sequence:
//!
//! - **Pitch** - maps a note letter, accidental, octave and tuning convention
//!   (concert pitch A4 = 440 Hz, or scientific pitch C4 = 256 Hz) to a
//!   frequency in hertz.
//! - **Tone** - renders a frequency, duration and sample rate into mono 16-bit
//!   PCM and wraps it in an in-memory RIFF/WAVE container.
//!
//! Both are pure functions: no I/O, no shared state, and byte-identical output
//! for identical input. Writing files and converting to compressed formats is
//! left to callers (see the `diapason-transcode` crate).
//!
//! # Example
//!
//! ```
//! use diapason::{compute_frequency, synthesize_tone, Tuning, DEFAULT_SAMPLE_RATE};
//!
//! let freq = compute_frequency("C", 1, 0, 4, Tuning::ConcertPitch)?;
//! assert!((freq - 277.183).abs() < 1e-3);
//!
//! let wav = synthesize_tone(freq, 0.25, DEFAULT_SAMPLE_RATE)?;
//! assert_eq!(&wav.wav_data[0..4], b"RIFF");
//! # Ok::<(), diapason::DiapasonError>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`pitch`] - Note letters, accidentals, tunings and frequency lookup
//! - [`tone`] - Sine tone synthesis
//! - [`wav`] - Deterministic WAV file writer
//! - [`error`] - Error types

pub mod error;
pub mod pitch;
pub mod tone;
pub mod wav;

// Re-export main types at crate root
pub use error::{DiapasonError, DiapasonResult};
pub use pitch::{compute_frequency, Accidental, Note, NoteName, PitchQuery, Tuning};
pub use tone::{synthesize_samples, synthesize_tone, ToneBuffer, DEFAULT_SAMPLE_RATE};
pub use wav::WavResult;
