//! Tests for the WAV writer module.

use super::format::{WavFormat, HEADER_SIZE};
use super::pcm::{compute_pcm_hash, extract_pcm_data, is_wav};
use super::result::WavResult;
use super::writer::{samples_to_pcm16, write_wav, write_wav_to_vec};

fn u16_at(wav: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([wav[offset], wav[offset + 1]])
}

fn u32_at(wav: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        wav[offset],
        wav[offset + 1],
        wav[offset + 2],
        wav[offset + 3],
    ])
}

// =========================================================================
// WavFormat tests
// =========================================================================

#[test]
fn test_wav_format_mono() {
    let format = WavFormat::mono(44100);
    assert_eq!(format.channels, 1);
    assert_eq!(format.sample_rate, 44100);
    assert_eq!(format.bits_per_sample, 16);
    assert_eq!(format.block_align(), 2);
    assert_eq!(format.byte_rate(), 88200);
}

#[test]
fn test_wav_format_various_sample_rates() {
    for &rate in &[8000, 11025, 16000, 22050, 44100, 48000, 96000, 192000] {
        let mono = WavFormat::mono(rate);
        assert_eq!(mono.sample_rate, rate);
        assert_eq!(mono.byte_rate(), rate * 2);
    }
}

#[test]
fn test_byte_rate_saturates() {
    let format = WavFormat::mono(u32::MAX);
    assert_eq!(format.byte_rate(), u32::MAX);
}

#[test]
fn test_max_frames_fits_riff_size() {
    let format = WavFormat::mono(44100);
    let max_payload = format.max_frames() as u64 * 2;
    assert!(max_payload + 36 <= u32::MAX as u64);
}

// =========================================================================
// PCM conversion tests
// =========================================================================

#[test]
fn test_samples_to_pcm16_little_endian() {
    let pcm = samples_to_pcm16(&[0, 1, -1, 10000, -10000, i16::MAX, i16::MIN]);
    assert_eq!(pcm.len(), 14);
    assert_eq!(&pcm[0..2], &[0x00, 0x00]);
    assert_eq!(&pcm[2..4], &[0x01, 0x00]);
    assert_eq!(&pcm[4..6], &[0xFF, 0xFF]);
    assert_eq!(&pcm[6..8], &10000i16.to_le_bytes());
    assert_eq!(&pcm[8..10], &(-10000i16).to_le_bytes());
    assert_eq!(&pcm[10..12], &[0xFF, 0x7F]);
    assert_eq!(&pcm[12..14], &[0x00, 0x80]);
}

#[test]
fn test_samples_to_pcm16_empty() {
    assert!(samples_to_pcm16(&[]).is_empty());
}

// =========================================================================
// WAV header correctness tests
// =========================================================================

#[test]
fn test_wav_header_riff_magic() {
    let pcm = samples_to_pcm16(&[0; 10]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();

    assert_eq!(&wav[0..4], b"RIFF", "RIFF magic number");
    assert_eq!(&wav[8..12], b"WAVE", "WAVE format identifier");
}

#[test]
fn test_wav_header_fmt_chunk() {
    let pcm = samples_to_pcm16(&[0; 10]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();

    assert_eq!(&wav[12..16], b"fmt ");
    assert_eq!(u32_at(&wav, 16), 16); // fmt chunk size (16 for PCM)
    assert_eq!(u16_at(&wav, 20), 1); // PCM
    assert_eq!(u16_at(&wav, 22), 1); // channels
    assert_eq!(u32_at(&wav, 24), 44100);
    assert_eq!(u32_at(&wav, 28), 88200);
    assert_eq!(u16_at(&wav, 32), 2);
    assert_eq!(u16_at(&wav, 34), 16);
}

#[test]
fn test_wav_header_data_chunk() {
    let pcm = samples_to_pcm16(&[0; 10]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();

    assert_eq!(&wav[36..40], b"data");
    assert_eq!(u32_at(&wav, 40), 20); // 10 samples * 2 bytes
}

#[test]
fn test_wav_header_file_size() {
    let pcm = samples_to_pcm16(&[0; 100]);
    let wav = write_wav_to_vec(&WavFormat::mono(44100), &pcm).unwrap();

    // File size field (bytes 4-7) = total size - 8
    assert_eq!(u32_at(&wav, 4), wav.len() as u32 - 8);
    assert_eq!(wav.len(), HEADER_SIZE + 200);
}

#[test]
fn test_write_wav_matches_write_wav_to_vec() {
    let format = WavFormat::mono(16000);
    let pcm = samples_to_pcm16(&[1, 2, 3, -4]);

    let mut streamed = Vec::new();
    write_wav(&mut streamed, &format, &pcm).unwrap();

    assert_eq!(streamed, write_wav_to_vec(&format, &pcm).unwrap());
}

#[test]
fn test_empty_payload_is_header_only() {
    let wav = write_wav_to_vec(&WavFormat::mono(8000), &[]).unwrap();
    assert_eq!(wav.len(), HEADER_SIZE);
    assert_eq!(u32_at(&wav, 40), 0);
}

// =========================================================================
// PCM extraction and hashing tests
// =========================================================================

#[test]
fn test_is_wav() {
    let wav = write_wav_to_vec(&WavFormat::mono(8000), &[0, 0]).unwrap();
    assert!(is_wav(&wav));
    assert!(!is_wav(b"RIFF"));
    assert!(!is_wav(b"ID3\x04\x00\x00\x00\x00\x00\x00\x00\x00"));
}

#[test]
fn test_extract_pcm_roundtrip() {
    let pcm = samples_to_pcm16(&[5, -5, 300]);
    let wav = write_wav_to_vec(&WavFormat::mono(22050), &pcm).unwrap();
    assert_eq!(extract_pcm_data(&wav), Some(pcm.as_slice()));
}

#[test]
fn test_extract_pcm_skips_unknown_chunks() {
    let pcm = samples_to_pcm16(&[7, 8]);
    let wav = write_wav_to_vec(&WavFormat::mono(22050), &pcm).unwrap();

    // Splice an odd-sized LIST chunk (with pad byte) between fmt and data
    let mut spliced = wav[..36].to_vec();
    spliced.extend_from_slice(b"LIST");
    spliced.extend_from_slice(&3u32.to_le_bytes());
    spliced.extend_from_slice(&[1, 2, 3, 0]);
    spliced.extend_from_slice(&wav[36..]);

    assert_eq!(extract_pcm_data(&spliced), Some(pcm.as_slice()));
}

#[test]
fn test_extract_pcm_rejects_garbage() {
    assert_eq!(extract_pcm_data(&[0u8; 10]), None);
    assert_eq!(extract_pcm_data(&[0u8; 64]), None);

    // Truncated data chunk
    let pcm = samples_to_pcm16(&[1; 8]);
    let wav = write_wav_to_vec(&WavFormat::mono(8000), &pcm).unwrap();
    assert_eq!(extract_pcm_data(&wav[..wav.len() - 2]), None);
}

#[test]
fn test_pcm_hash_determinism() {
    let result1 = WavResult::from_mono(&[500, -500, 300, -300, 0], 44100).unwrap();
    let result2 = WavResult::from_mono(&[500, -500, 300, -300, 0], 44100).unwrap();

    assert_eq!(result1.pcm_hash, result2.pcm_hash);
    assert_eq!(result1.pcm_hash.len(), 64); // BLAKE3 produces 64 hex chars
    assert_eq!(result1.wav_data, result2.wav_data);
}

#[test]
fn test_pcm_hash_different_for_different_samples() {
    let result1 = WavResult::from_mono(&[500, -500, 300], 44100).unwrap();
    let result2 = WavResult::from_mono(&[500, -500, 301], 44100).unwrap();

    assert_ne!(
        result1.pcm_hash, result2.pcm_hash,
        "Different samples should produce different hashes"
    );
}

#[test]
fn test_compute_pcm_hash_matches_result_hash() {
    let result = WavResult::from_mono(&[1, 2, 3, 4], 44100).unwrap();
    assert_eq!(compute_pcm_hash(&result.wav_data), Some(result.pcm_hash));
}

#[test]
fn test_wav_result_duration() {
    let result = WavResult::from_mono(&[0; 22050], 44100).unwrap();
    assert_eq!(result.num_samples, 22050);
    assert!((result.duration_seconds() - 0.5).abs() < 1e-12);
}
