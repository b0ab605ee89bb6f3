//! WAV analysis for the `inspect` command.
//!
//! Decodes any PCM WAV that `hound` can read, mixes it down to mono and
//! reports format details, levels and the dominant frequency.

use std::io::Cursor;

use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

/// Largest FFT used for frequency detection.
const MAX_FFT_SIZE: usize = 65_536;

/// Fewer frames than this are too short to estimate a frequency.
const MIN_FFT_FRAMES: usize = 64;

/// Precision for floating point values in output (6 decimal places).
const FLOAT_PRECISION: i32 = 6;

fn round_f64(value: f64, decimals: i32) -> f64 {
    let multiplier = 10_f64.powi(decimals);
    (value * multiplier).round() / multiplier
}

/// Summary of a WAV file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WavSummary {
    pub channels: u16,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    /// Frames per channel.
    pub frames: u32,
    pub duration_seconds: f64,
    /// Peak absolute level, 0.0 to 1.0 of full scale.
    pub peak: f64,
    /// RMS level, 0.0 to 1.0 of full scale.
    pub rms: f64,
    /// Strongest frequency in Hz, if the file is long enough to tell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dominant_frequency_hz: Option<f64>,
    /// BLAKE3 hash of the PCM payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pcm_hash: Option<String>,
    /// BLAKE3 hash of the whole file.
    pub file_hash: String,
}

/// Decodes and analyzes WAV bytes.
pub fn analyze_wav(wav_data: &[u8]) -> Result<WavSummary, hound::Error> {
    let reader = hound::WavReader::new(Cursor::new(wav_data))?;
    let spec = reader.spec();
    let frames = reader.duration();

    let interleaved = read_normalized(reader)?;
    let mono = mix_to_mono(&interleaved, spec.channels);

    let peak = mono.iter().fold(0.0f64, |max, s| max.max(s.abs()));
    let rms = if mono.is_empty() {
        0.0
    } else {
        (mono.iter().map(|s| s * s).sum::<f64>() / mono.len() as f64).sqrt()
    };

    Ok(WavSummary {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: spec.bits_per_sample,
        frames,
        duration_seconds: round_f64(
            f64::from(frames) / f64::from(spec.sample_rate),
            FLOAT_PRECISION,
        ),
        peak: round_f64(peak, FLOAT_PRECISION),
        rms: round_f64(rms, FLOAT_PRECISION),
        dominant_frequency_hz: dominant_frequency(&mono, spec.sample_rate)
            .map(|f| round_f64(f, 3)),
        pcm_hash: diapason::wav::compute_pcm_hash(wav_data),
        file_hash: blake3::hash(wav_data).to_hex().to_string(),
    })
}

fn read_normalized<R: std::io::Read>(reader: hound::WavReader<R>) -> Result<Vec<f64>, hound::Error> {
    let spec = reader.spec();
    match spec.sample_format {
        hound::SampleFormat::Int => {
            let scale = f64::from(1u32 << (spec.bits_per_sample.saturating_sub(1).min(31)));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| f64::from(s) / scale))
                .collect()
        }
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect(),
    }
}

fn mix_to_mono(interleaved: &[f64], channels: u16) -> Vec<f64> {
    let channels = usize::from(channels.max(1));
    if channels == 1 {
        return interleaved.to_vec();
    }
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect()
}

/// Strongest frequency above 20 Hz, refined by parabolic interpolation
/// between neighbouring bins.
pub fn dominant_frequency(samples: &[f64], sample_rate: u32) -> Option<f64> {
    if samples.len() < MIN_FFT_FRAMES || sample_rate == 0 {
        return None;
    }

    let fft_size = samples.len().next_power_of_two().min(MAX_FFT_SIZE);
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(fft_size);

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .take(fft_size)
        .map(|&s| Complex::new(s, 0.0))
        .collect();
    let window_len = buffer.len();
    buffer.resize(fft_size, Complex::new(0.0, 0.0));

    // Hann window over the real samples only, not the zero padding
    for (i, sample) in buffer.iter_mut().take(window_len).enumerate() {
        let window =
            0.5 * (1.0 - (2.0 * std::f64::consts::PI * i as f64 / window_len as f64).cos());
        *sample = Complex::new(sample.re * window, 0.0);
    }

    fft.process(&mut buffer);

    let nyquist = fft_size / 2;
    let freq_resolution = f64::from(sample_rate) / fft_size as f64;
    let magnitudes: Vec<f64> = buffer.iter().take(nyquist).map(|c| c.norm()).collect();

    // Skip DC and very low frequencies
    let min_bin = ((20.0 / freq_resolution).ceil() as usize).max(1);
    let (peak_bin, peak_mag) = magnitudes
        .iter()
        .enumerate()
        .skip(min_bin)
        .fold((0, 0.0), |best, (i, &mag)| if mag > best.1 { (i, mag) } else { best });

    if peak_mag <= 0.0 {
        return None;
    }

    let offset = if peak_bin + 1 < magnitudes.len() {
        let left = magnitudes[peak_bin - 1];
        let right = magnitudes[peak_bin + 1];
        let denom = left - 2.0 * peak_mag + right;
        if denom.abs() > f64::EPSILON {
            (0.5 * (left - right) / denom).clamp(-0.5, 0.5)
        } else {
            0.0
        }
    } else {
        0.0
    };

    Some((peak_bin as f64 + offset) * freq_resolution)
}
