//! Pure sine tone synthesis.
//!
//! A tone of `duration` seconds at `rate` samples per second has
//! `N = round(duration * rate)` samples. Sample times are `N` points spaced
//! evenly over `[0, duration]` with both ends included, so consecutive samples
//! are `duration / (N - 1)` seconds apart. Each sample is
//! `AMPLITUDE * sin(2π * frequency * t)` truncated toward zero to `i16`.

use std::f64::consts::TAU;

use crate::error::{DiapasonError, DiapasonResult};
use crate::wav::{WavFormat, WavResult};

/// Peak amplitude of synthesized tones. Leaves headroom below `i16::MAX`.
pub const AMPLITUDE: f64 = 10_000.0;

/// Sample rate used when none is given.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Mono 16-bit samples at a fixed sample rate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneBuffer {
    samples: Vec<i16>,
    sample_rate: u32,
}

impl ToneBuffer {
    /// Returns the samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Returns the sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Returns true if the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback duration in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Packages the samples as a WAV file.
    pub fn to_wav(&self) -> DiapasonResult<WavResult> {
        Ok(WavResult::from_mono(&self.samples, self.sample_rate)?)
    }

    /// Consumes the buffer and returns the samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }
}

/// Number of samples for a tone of `duration` seconds at `rate`.
///
/// Rounds half away from zero.
pub fn sample_count(duration: f64, rate: u32) -> usize {
    (duration * f64::from(rate)).round() as usize
}

fn validate(frequency: f64, duration: f64, rate: u32) -> DiapasonResult<usize> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return Err(DiapasonError::InvalidFrequency { freq: frequency });
    }
    if !duration.is_finite() || duration <= 0.0 {
        return Err(DiapasonError::InvalidDuration { duration });
    }
    if rate == 0 {
        return Err(DiapasonError::InvalidSampleRate { rate });
    }

    let num_samples = sample_count(duration, rate);
    if num_samples == 0 || num_samples > WavFormat::mono(rate).max_frames() {
        return Err(DiapasonError::InvalidDuration { duration });
    }
    Ok(num_samples)
}

/// Synthesizes the raw samples of a sine tone.
///
/// # Arguments
/// * `frequency` - Tone frequency in Hz, positive and finite
/// * `duration` - Duration in seconds, positive and finite
/// * `rate` - Sample rate in Hz, nonzero
///
/// # Errors
/// Fails on out-of-range inputs, and with
/// [`DiapasonError::InvalidDuration`] when the duration rounds to zero
/// samples or would not fit in a WAV file.
pub fn synthesize_samples(frequency: f64, duration: f64, rate: u32) -> DiapasonResult<ToneBuffer> {
    let num_samples = validate(frequency, duration, rate)?;

    let step = if num_samples > 1 {
        duration / (num_samples - 1) as f64
    } else {
        0.0
    };

    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 * step;
            // `as` truncates toward zero; |value| <= AMPLITUDE so it never saturates
            (AMPLITUDE * (TAU * frequency * t).sin()) as i16
        })
        .collect();

    Ok(ToneBuffer {
        samples,
        sample_rate: rate,
    })
}

/// Synthesizes a sine tone and packages it as an in-memory WAV file.
///
/// # Example
/// ```
/// use diapason::tone::{synthesize_tone, DEFAULT_SAMPLE_RATE};
///
/// let wav = synthesize_tone(440.0, 0.5, DEFAULT_SAMPLE_RATE).unwrap();
/// assert_eq!(wav.num_samples, 22050);
/// assert_eq!(&wav.wav_data[0..4], b"RIFF");
/// ```
pub fn synthesize_tone(frequency: f64, duration: f64, rate: u32) -> DiapasonResult<WavResult> {
    synthesize_samples(frequency, duration, rate)?.to_wav()
}
