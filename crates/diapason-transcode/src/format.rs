//! Target coding formats and bitrates.

use std::fmt;
use std::str::FromStr;

use crate::error::TranscodeError;

/// Compressed audio format a WAV buffer can be converted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodingFormat {
    /// MPEG-1 Layer III in an MP3 stream.
    Mpeg,
    /// Vorbis in an Ogg container.
    Vorbis,
}

impl CodingFormat {
    /// All supported formats.
    pub const ALL: [CodingFormat; 2] = [CodingFormat::Mpeg, CodingFormat::Vorbis];

    /// Canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            CodingFormat::Mpeg => "mpeg",
            CodingFormat::Vorbis => "vorbis",
        }
    }

    /// File extension of the container, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            CodingFormat::Mpeg => "mp3",
            CodingFormat::Vorbis => "ogg",
        }
    }

    /// MIME type of the container.
    pub fn mime_type(&self) -> &'static str {
        match self {
            CodingFormat::Mpeg => "audio/mpeg",
            CodingFormat::Vorbis => "audio/ogg",
        }
    }

    /// ffmpeg audio encoder name.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            CodingFormat::Mpeg => "libmp3lame",
            CodingFormat::Vorbis => "libvorbis",
        }
    }

    /// ffmpeg muxer name.
    pub fn ffmpeg_muxer(&self) -> &'static str {
        match self {
            CodingFormat::Mpeg => "mp3",
            CodingFormat::Vorbis => "ogg",
        }
    }
}

impl FromStr for CodingFormat {
    type Err = TranscodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mpeg" | "mpeg-audio" | "mp3" => Ok(CodingFormat::Mpeg),
            "vorbis" | "ogg" => Ok(CodingFormat::Vorbis),
            _ => Err(TranscodeError::unsupported_format(s)),
        }
    }
}

impl fmt::Display for CodingFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Target bitrate in kilobits per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Bitrate(u32);

impl Bitrate {
    /// Creates a bitrate, rejecting zero.
    pub fn from_kbps(kbps: u32) -> Option<Self> {
        (kbps > 0).then_some(Self(kbps))
    }

    /// Kilobits per second.
    pub fn kbps(&self) -> u32 {
        self.0
    }

    /// Value for ffmpeg's `-b:a` option.
    pub fn ffmpeg_arg(&self) -> String {
        format!("{}k", self.0)
    }
}

impl FromStr for Bitrate {
    type Err = TranscodeError;

    /// Accepts `192` or `192k`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TranscodeError::InvalidBitrate {
            value: s.to_string(),
        };
        let trimmed = s.trim();
        let digits = trimmed
            .strip_suffix('k')
            .or_else(|| trimmed.strip_suffix('K'))
            .unwrap_or(trimmed);
        let kbps = digits.parse::<u32>().map_err(|_| invalid())?;
        Bitrate::from_kbps(kbps).ok_or_else(invalid)
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}k", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_coding_format_aliases() {
        for id in ["mpeg", "mpeg-audio", "mp3", "MP3", " mpeg "] {
            assert_eq!(id.parse::<CodingFormat>().unwrap(), CodingFormat::Mpeg, "{id}");
        }
        for id in ["vorbis", "ogg", "Vorbis"] {
            assert_eq!(id.parse::<CodingFormat>().unwrap(), CodingFormat::Vorbis, "{id}");
        }
    }

    #[test]
    fn test_coding_format_unsupported() {
        for id in ["flac", "wav", "", "aac"] {
            let err = id.parse::<CodingFormat>().unwrap_err();
            assert!(matches!(err, TranscodeError::UnsupportedFormat { .. }), "{id}");
        }
    }

    #[test]
    fn test_coding_format_properties() {
        assert_eq!(CodingFormat::Mpeg.extension(), "mp3");
        assert_eq!(CodingFormat::Vorbis.extension(), "ogg");
        assert_eq!(CodingFormat::Mpeg.ffmpeg_codec(), "libmp3lame");
        assert_eq!(CodingFormat::Vorbis.ffmpeg_muxer(), "ogg");
        assert_eq!(CodingFormat::Vorbis.mime_type(), "audio/ogg");
        assert_eq!(CodingFormat::Mpeg.to_string(), "mpeg");
    }

    #[test]
    fn test_bitrate_parse() {
        assert_eq!("192".parse::<Bitrate>().unwrap().kbps(), 192);
        assert_eq!("128k".parse::<Bitrate>().unwrap().kbps(), 128);
        assert_eq!("320K".parse::<Bitrate>().unwrap().ffmpeg_arg(), "320k");
        assert_eq!(Bitrate::from_kbps(96).unwrap().to_string(), "96k");
    }

    #[test]
    fn test_bitrate_invalid() {
        for value in ["0", "0k", "fast", "-128", "12.5k", ""] {
            let err = value.parse::<Bitrate>().unwrap_err();
            assert_eq!(err.code(), "TRANSCODE_002", "{value}");
        }
        assert!(Bitrate::from_kbps(0).is_none());
    }
}
