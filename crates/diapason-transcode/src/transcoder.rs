//! The transcoding capability.

use crate::error::TranscodeResult;
use crate::format::{Bitrate, CodingFormat};

/// Converts WAV bytes into a compressed format.
///
/// Implementations must reject input that is not a RIFF/WAVE buffer with
/// [`TranscodeError::NotWav`](crate::TranscodeError::NotWav) without doing
/// any encoding work.
pub trait Transcoder {
    /// Short name for diagnostics.
    fn name(&self) -> &str;

    /// Transcodes `wav` into `format`.
    ///
    /// `bitrate` is a target; `None` leaves the encoder default.
    fn transcode(
        &self,
        wav: &[u8],
        format: CodingFormat,
        bitrate: Option<Bitrate>,
    ) -> TranscodeResult<Vec<u8>>;
}

impl<T: Transcoder + ?Sized> Transcoder for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transcode(
        &self,
        wav: &[u8],
        format: CodingFormat,
        bitrate: Option<Bitrate>,
    ) -> TranscodeResult<Vec<u8>> {
        (**self).transcode(wav, format, bitrate)
    }
}

impl<T: Transcoder + ?Sized> Transcoder for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn transcode(
        &self,
        wav: &[u8],
        format: CodingFormat,
        bitrate: Option<Bitrate>,
    ) -> TranscodeResult<Vec<u8>> {
        (**self).transcode(wav, format, bitrate)
    }
}
