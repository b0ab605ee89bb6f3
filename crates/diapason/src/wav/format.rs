//! PCM layout of the `fmt ` chunk.

/// Length of a canonical PCM WAV header: the RIFF preamble, a 16-byte `fmt `
/// chunk and the `data` chunk header.
pub const HEADER_SIZE: usize = 44;

/// Channel count, rate and sample width of a PCM stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavFormat {
    /// Interleaved channels per frame.
    pub channels: u16,
    /// Frames per second.
    pub sample_rate: u32,
    /// Width of one sample in bits.
    pub bits_per_sample: u16,
}

impl WavFormat {
    /// Single channel of signed 16-bit samples, the layout tones are written in.
    pub fn mono(sample_rate: u32) -> Self {
        Self {
            channels: 1,
            sample_rate,
            bits_per_sample: 16,
        }
    }

    /// Bytes in one frame across all channels.
    pub(crate) fn block_align(&self) -> u16 {
        self.channels * self.bits_per_sample.div_ceil(8)
    }

    /// Bytes of PCM per second of audio.
    pub(crate) fn byte_rate(&self) -> u32 {
        self.sample_rate.saturating_mul(u32::from(self.block_align()))
    }

    /// Most frames whose payload still fits the 32-bit RIFF size field.
    pub fn max_frames(&self) -> usize {
        let budget = u32::MAX as usize - (HEADER_SIZE - 8);
        budget / usize::from(self.block_align().max(1))
    }
}

