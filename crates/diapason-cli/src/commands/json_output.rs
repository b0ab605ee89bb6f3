//! JSON output types for machine-readable CLI output.
//!
//! Every command that takes `--json` prints one object with a `success`
//! flag, a list of `errors` and, on success, a `result`.

use serde::Serialize;

use crate::analysis::WavSummary;

/// Error codes for CLI operations.
///
/// Library errors pass their own codes through (`DIAPASON_xxx`,
/// `TRANSCODE_xxx`); these cover failures that happen in the CLI itself.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// File could not be written
    pub const FILE_WRITE: &str = "CLI_002";
    /// Input is not a decodable WAV file
    pub const WAV_DECODE: &str = "CLI_003";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "DIAPASON_001")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// File path involved (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            file: None,
        }
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl From<&diapason::DiapasonError> for JsonError {
    fn from(err: &diapason::DiapasonError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

impl From<&diapason_transcode::TranscodeError> for JsonError {
    fn from(err: &diapason_transcode::TranscodeError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

/// Envelope shared by all `--json` outputs.
#[derive(Debug, Clone, Serialize)]
pub struct CommandOutput<T> {
    /// Whether the command succeeded
    pub success: bool,
    /// Errors encountered
    pub errors: Vec<JsonError>,
    /// Command result (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
}

impl<T: Serialize> CommandOutput<T> {
    /// Creates a successful output.
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            result: Some(result),
        }
    }

    /// Creates a failed output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            result: None,
        }
    }

    /// Pretty-prints the output to stdout.
    pub fn print(&self) -> serde_json::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

/// Result of the `freq` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FreqResult {
    /// Note in scientific pitch notation (e.g. "C#4")
    pub note: String,
    pub sharp: u32,
    pub flat: u32,
    pub octave: i32,
    /// Tuning convention identifier
    pub tuning: String,
    pub frequency_hz: f64,
}

/// Result of the `tone` command.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToneResult {
    /// Output file path
    pub output: String,
    /// Container written: "wav", "mpeg" or "vorbis"
    pub format: String,
    pub frequency_hz: f64,
    pub duration_seconds: f64,
    pub sample_rate: u32,
    pub num_samples: usize,
    /// Bitrate in kbps (compressed formats only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate_kbps: Option<u32>,
    /// Bytes written
    pub size_bytes: usize,
    /// BLAKE3 hash of the synthesized PCM
    pub pcm_hash: String,
}

/// Output of the `freq` command.
pub type FreqOutput = CommandOutput<FreqResult>;

/// Output of the `tone` command.
pub type ToneOutput = CommandOutput<ToneResult>;

/// Output of the `inspect` command.
pub type InspectOutput = CommandOutput<WavSummary>;
