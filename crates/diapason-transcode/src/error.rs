//! Error types for the transcoder.

use thiserror::Error;

/// Result type for transcoder operations.
pub type TranscodeResult<T> = Result<T, TranscodeError>;

/// Errors that can occur while converting WAV audio to a compressed format.
#[derive(Debug, Error)]
pub enum TranscodeError {
    /// Codec identifier outside the supported set.
    #[error("unsupported coding format '{format}'. Expected one of: mpeg, vorbis")]
    UnsupportedFormat { format: String },

    /// Bitrate could not be parsed or is zero.
    #[error("invalid bitrate '{value}': expected kilobits per second such as 128 or 192k")]
    InvalidBitrate { value: String },

    /// Input buffer is not a RIFF/WAVE file.
    #[error("input is not a WAV file")]
    NotWav,

    /// ffmpeg executable not found.
    #[error("ffmpeg executable not found. Ensure ffmpeg is installed and in PATH, or set DIAPASON_FFMPEG environment variable")]
    EncoderNotFound,

    /// Failed to spawn the encoder process.
    #[error("failed to spawn ffmpeg process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Encoder process timed out.
    #[error("ffmpeg process timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Encoder process exited with non-zero status.
    #[error("ffmpeg process exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// Encoder reported success but produced nothing.
    #[error("ffmpeg produced no output")]
    EmptyOutput,

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TranscodeError {
    /// Creates an unsupported format error.
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates a process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            TranscodeError::UnsupportedFormat { .. } => "TRANSCODE_001",
            TranscodeError::InvalidBitrate { .. } => "TRANSCODE_002",
            TranscodeError::NotWav => "TRANSCODE_003",
            TranscodeError::EncoderNotFound => "TRANSCODE_004",
            TranscodeError::SpawnFailed(_) => "TRANSCODE_005",
            TranscodeError::Timeout { .. } => "TRANSCODE_006",
            TranscodeError::ProcessFailed { .. } => "TRANSCODE_007",
            TranscodeError::EmptyOutput => "TRANSCODE_008",
            TranscodeError::Io(_) => "TRANSCODE_009",
        }
    }

    /// Returns the error category.
    pub fn category(&self) -> &'static str {
        "transcode"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TranscodeError::EncoderNotFound;
        assert!(err.to_string().contains("ffmpeg executable not found"));

        let err = TranscodeError::Timeout { timeout_secs: 60 };
        assert!(err.to_string().contains("60 seconds"));

        let err = TranscodeError::process_failed(1, "Unknown encoder 'libmp3lame'");
        assert!(err.to_string().contains("libmp3lame"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = TranscodeError::unsupported_format("flac");
        assert!(err.to_string().contains("'flac'"));
        assert_eq!(err.code(), "TRANSCODE_001");
        assert_eq!(err.category(), "transcode");
    }
}
