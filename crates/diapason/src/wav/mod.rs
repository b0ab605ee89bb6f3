//! Deterministic WAV file writer.
//!
//! This module writes mono 16-bit PCM WAV files with no timestamps or variable
//! metadata, so identical samples always produce identical bytes.

mod format;
mod pcm;
mod result;
mod writer;

#[cfg(test)]
mod tests;

// Re-export public API
pub use format::{WavFormat, HEADER_SIZE};
pub use pcm::{compute_pcm_hash, extract_pcm_data, is_wav};
pub use result::WavResult;
pub use writer::{samples_to_pcm16, write_wav, write_wav_to_vec};
