//! Packaged WAV output.

use std::io;

use super::format::WavFormat;
use super::writer::{samples_to_pcm16, write_wav_to_vec};

/// An in-memory WAV file and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavResult {
    /// The whole file: header followed by PCM.
    pub wav_data: Vec<u8>,
    /// Hex BLAKE3 digest of the PCM payload, independent of the header.
    pub pcm_hash: String,
    pub sample_rate: u32,
    /// Frames in the file (one sample each, since output is mono).
    pub num_samples: usize,
}

impl WavResult {
    /// Packages mono 16-bit samples.
    ///
    /// Fails only when the payload exceeds what a RIFF size field can hold.
    pub fn from_mono(samples: &[i16], sample_rate: u32) -> io::Result<Self> {
        let pcm = samples_to_pcm16(samples);
        let wav_data = write_wav_to_vec(&WavFormat::mono(sample_rate), &pcm)?;

        Ok(Self {
            pcm_hash: blake3::hash(&pcm).to_hex().to_string(),
            wav_data,
            sample_rate,
            num_samples: samples.len(),
        })
    }

    /// Playback length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.num_samples as f64 / f64::from(self.sample_rate)
    }

    /// Hands over the file bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.wav_data
    }
}
