//! Error types for pitch calculation and tone synthesis.

use thiserror::Error;

/// Result type for diapason operations.
pub type DiapasonResult<T> = Result<T, DiapasonError>;

/// Errors that can occur while computing frequencies or synthesizing tones.
#[derive(Debug, Error)]
pub enum DiapasonError {
    /// Note letter outside A..G.
    #[error("invalid note '{note}': expected one of A, B, C, D, E, F, G")]
    InvalidNote {
        /// The rejected note input.
        note: String,
    },

    /// Sharp and flat were both requested.
    #[error("cannot set both sharp ({sharp}) and flat ({flat})")]
    InvalidAccidental {
        /// Requested sharp count.
        sharp: u32,
        /// Requested flat count.
        flat: u32,
    },

    /// Note name could not be parsed.
    #[error("invalid note name '{name}': {message}")]
    InvalidNoteName {
        /// The rejected note name.
        name: String,
        /// What was wrong with it.
        message: String,
    },

    /// Invalid frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },

    /// Invalid duration.
    #[error("invalid duration: {duration} seconds")]
    InvalidDuration {
        /// The invalid duration.
        duration: f64,
    },

    /// Invalid sample rate.
    #[error("invalid sample rate: {rate}")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: u32,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning convention name not recognized.
    #[error("unknown tuning '{tuning}': expected 'concert' or 'scientific'")]
    InvalidTuning {
        /// The rejected tuning name.
        tuning: String,
    },
}

impl DiapasonError {
    /// Creates an invalid note error.
    pub fn invalid_note(note: impl Into<String>) -> Self {
        Self::InvalidNote { note: note.into() }
    }

    /// Creates an invalid note name error.
    pub fn invalid_note_name(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidNoteName {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Returns a stable error code for reporting.
    pub fn code(&self) -> &'static str {
        match self {
            DiapasonError::InvalidNote { .. } => "DIAPASON_001",
            DiapasonError::InvalidAccidental { .. } => "DIAPASON_002",
            DiapasonError::InvalidNoteName { .. } => "DIAPASON_003",
            DiapasonError::InvalidFrequency { .. } => "DIAPASON_004",
            DiapasonError::InvalidDuration { .. } => "DIAPASON_005",
            DiapasonError::InvalidSampleRate { .. } => "DIAPASON_006",
            DiapasonError::Io(_) => "DIAPASON_007",
            DiapasonError::InvalidTuning { .. } => "DIAPASON_008",
        }
    }

    /// Returns the error category for grouping related errors.
    pub fn category(&self) -> &'static str {
        match self {
            DiapasonError::InvalidNote { .. }
            | DiapasonError::InvalidAccidental { .. }
            | DiapasonError::InvalidNoteName { .. }
            | DiapasonError::InvalidTuning { .. } => "pitch",
            DiapasonError::InvalidFrequency { .. }
            | DiapasonError::InvalidDuration { .. }
            | DiapasonError::InvalidSampleRate { .. } => "tone",
            DiapasonError::Io(_) => "io",
        }
    }
}
