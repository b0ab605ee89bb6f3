//! PCM data extraction and hashing utilities.

use super::format::HEADER_SIZE;

/// Returns true if the buffer starts with a RIFF/WAVE header.
pub fn is_wav(wav_data: &[u8]) -> bool {
    wav_data.len() >= 12 && &wav_data[0..4] == b"RIFF" && &wav_data[8..12] == b"WAVE"
}

/// Extracts PCM data from a WAV file buffer.
///
/// Walks the chunk list so files with extra chunks before `data` are handled.
///
/// # Arguments
/// * `wav_data` - Complete WAV file bytes
///
/// # Returns
/// PCM data if found, or None if the format is invalid
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.len() < HEADER_SIZE || !is_wav(wav_data) {
        return None;
    }

    let mut pos = 12;
    while pos + 8 <= wav_data.len() {
        let chunk_id = &wav_data[pos..pos + 4];
        let chunk_size = u32::from_le_bytes([
            wav_data[pos + 4],
            wav_data[pos + 5],
            wav_data[pos + 6],
            wav_data[pos + 7],
        ]) as usize;

        if chunk_id == b"data" {
            let data_start = pos + 8;
            let data_end = data_start.checked_add(chunk_size)?;
            if data_end <= wav_data.len() {
                return Some(&wav_data[data_start..data_end]);
            }
            return None;
        }

        pos = pos.checked_add(8 + chunk_size)?;
        // Chunks are word aligned
        if chunk_size % 2 != 0 {
            pos += 1;
        }
    }

    None
}

/// Computes the PCM hash of a WAV file.
///
/// # Arguments
/// * `wav_data` - Complete WAV file bytes
///
/// # Returns
/// BLAKE3 hash of PCM data, or None if format is invalid
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}
