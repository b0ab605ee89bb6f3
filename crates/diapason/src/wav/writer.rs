//! Core WAV writing and PCM conversion functions.

use std::io::{self, Write};

use super::format::{WavFormat, HEADER_SIZE};

/// Builds the 44-byte RIFF/WAVE header for a PCM payload of `data_size` bytes.
fn riff_header(format: &WavFormat, data_size: u32) -> io::Result<[u8; HEADER_SIZE]> {
    // Total file size minus 8 bytes for the RIFF chunk header
    let file_size = data_size
        .checked_add((HEADER_SIZE - 8) as u32)
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "PCM payload too large for a RIFF container",
            )
        })?;

    let mut header = [0u8; HEADER_SIZE];

    // RIFF header
    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&file_size.to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    // fmt chunk
    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes()); // Chunk size (16 for PCM)
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // Audio format (1 = PCM)
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    // data chunk
    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_size.to_le_bytes());

    Ok(header)
}

fn payload_size(pcm_data: &[u8]) -> io::Result<u32> {
    u32::try_from(pcm_data.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "PCM payload too large for a RIFF container",
        )
    })
}

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
///
/// # Returns
/// Result indicating success or I/O error
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, pcm_data: &[u8]) -> io::Result<()> {
    let header = riff_header(format, payload_size(pcm_data)?)?;
    writer.write_all(&header)?;
    writer.write_all(pcm_data)?;
    Ok(())
}

/// Writes a WAV file to a byte vector.
///
/// # Arguments
/// * `format` - WAV format parameters
/// * `pcm_data` - Raw PCM samples as bytes
///
/// # Returns
/// Complete WAV file as bytes, or an error if the payload does not fit the
/// 32-bit RIFF size fields
pub fn write_wav_to_vec(format: &WavFormat, pcm_data: &[u8]) -> io::Result<Vec<u8>> {
    let header = riff_header(format, payload_size(pcm_data)?)?;
    let mut buffer = Vec::with_capacity(HEADER_SIZE + pcm_data.len());
    buffer.extend_from_slice(&header);
    buffer.extend_from_slice(pcm_data);
    Ok(buffer)
}

/// Converts 16-bit samples to little-endian PCM bytes.
pub fn samples_to_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut pcm = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        pcm.extend_from_slice(&sample.to_le_bytes());
    }
    pcm
}
