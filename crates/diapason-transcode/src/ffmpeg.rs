//! ffmpeg subprocess transcoder.
//!
//! The WAV input is written to a temporary directory, ffmpeg is spawned to
//! encode it, and the encoded file is read back into memory. The process is
//! bounded by a timeout and its stderr is surfaced on failure.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{TranscodeError, TranscodeResult};
use crate::format::{Bitrate, CodingFormat};
use crate::transcoder::Transcoder;

/// Default timeout for an ffmpeg run (60 seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Environment variable overriding the ffmpeg executable.
pub const FFMPEG_ENV_VAR: &str = "DIAPASON_FFMPEG";

/// Configuration for the ffmpeg transcoder.
#[derive(Debug, Clone)]
pub struct TranscoderConfig {
    /// Path to the ffmpeg executable.
    pub ffmpeg_path: Option<PathBuf>,
    /// Timeout for a single ffmpeg run.
    pub timeout: Duration,
    /// Whether to capture ffmpeg's stderr.
    pub capture_output: bool,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            capture_output: true,
        }
    }
}

impl TranscoderConfig {
    /// Sets the ffmpeg executable path.
    pub fn ffmpeg_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ffmpeg_path = Some(path.into());
        self
    }

    /// Sets the timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Sets whether stderr is captured.
    pub fn capture_output(mut self, capture: bool) -> Self {
        self.capture_output = capture;
        self
    }
}

/// Transcoder backed by an ffmpeg executable.
#[derive(Debug, Clone, Default)]
pub struct FfmpegTranscoder {
    config: TranscoderConfig,
}

impl FfmpegTranscoder {
    /// Creates a transcoder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transcoder with the given configuration.
    pub fn with_config(config: TranscoderConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &TranscoderConfig {
        &self.config
    }

    /// Finds the ffmpeg executable.
    ///
    /// An explicitly configured path is used as is and must exist. Otherwise
    /// looks at `DIAPASON_FFMPEG`, then `PATH`, then a few common install
    /// locations.
    pub fn find_ffmpeg(&self) -> TranscodeResult<PathBuf> {
        if let Some(ref path) = self.config.ffmpeg_path {
            if path.exists() {
                return Ok(path.clone());
            }
            warn!(path = %path.display(), "configured ffmpeg path does not exist");
            return Err(TranscodeError::EncoderNotFound);
        }

        if let Ok(path) = std::env::var(FFMPEG_ENV_VAR) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
            warn!(path = %path.display(), "{} does not exist", FFMPEG_ENV_VAR);
        }

        let names = if cfg!(windows) {
            vec!["ffmpeg.exe", "ffmpeg"]
        } else {
            vec!["ffmpeg"]
        };
        for name in names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        let common_paths = if cfg!(windows) {
            vec!["C:\\ffmpeg\\bin\\ffmpeg.exe"]
        } else if cfg!(target_os = "macos") {
            vec!["/opt/homebrew/bin/ffmpeg", "/usr/local/bin/ffmpeg"]
        } else {
            vec!["/usr/bin/ffmpeg", "/usr/local/bin/ffmpeg", "/snap/bin/ffmpeg"]
        };
        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(TranscodeError::EncoderNotFound)
    }

    /// Returns the first line of `ffmpeg -version`.
    pub fn version(&self) -> TranscodeResult<String> {
        let ffmpeg = self.find_ffmpeg()?;
        let output = Command::new(&ffmpeg)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .map_err(TranscodeError::SpawnFailed)?;

        if !output.status.success() {
            let exit_code = output.status.code().unwrap_or(-1);
            return Err(TranscodeError::process_failed(
                exit_code,
                String::from_utf8_lossy(&output.stderr),
            ));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    /// Transcodes a WAV file on disk into `output`.
    pub fn transcode_file(
        &self,
        input: &Path,
        output: &Path,
        format: CodingFormat,
        bitrate: Option<Bitrate>,
    ) -> TranscodeResult<()> {
        let ffmpeg = self.find_ffmpeg()?;
        debug!(ffmpeg = %ffmpeg.display(), "using ffmpeg");

        // ffmpeg -hide_banner -nostdin -loglevel error -y -i <in> -vn -c:a <codec> [-b:a <N>k] -f <muxer> <out>
        let mut cmd = Command::new(&ffmpeg);
        cmd.arg("-hide_banner")
            .arg("-nostdin")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-vn")
            .arg("-c:a")
            .arg(format.ffmpeg_codec());
        if let Some(bitrate) = bitrate {
            cmd.arg("-b:a").arg(bitrate.ffmpeg_arg());
        }
        cmd.arg("-f").arg(format.ffmpeg_muxer()).arg(output);

        cmd.stdin(Stdio::null()).stdout(Stdio::null());
        if self.config.capture_output {
            cmd.stderr(Stdio::piped());
        }

        let child = cmd.spawn().map_err(TranscodeError::SpawnFailed)?;
        let (status, stderr) =
            wait_with_timeout(child, self.config.timeout, self.config.capture_output)?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(TranscodeError::process_failed(exit_code, stderr.trim()));
        }
        Ok(())
    }
}

impl Transcoder for FfmpegTranscoder {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn transcode(
        &self,
        wav: &[u8],
        format: CodingFormat,
        bitrate: Option<Bitrate>,
    ) -> TranscodeResult<Vec<u8>> {
        if !diapason::wav::is_wav(wav) {
            return Err(TranscodeError::NotWav);
        }

        let temp_dir = tempfile::tempdir()?;
        let input_path = temp_dir.path().join("input.wav");
        let output_path = temp_dir
            .path()
            .join(format!("output.{}", format.extension()));
        std::fs::write(&input_path, wav)?;

        info!(
            format = %format,
            bitrate = ?bitrate.map(|b| b.kbps()),
            input_bytes = wav.len(),
            "transcoding"
        );
        let start = Instant::now();
        self.transcode_file(&input_path, &output_path, format, bitrate)?;

        let encoded = match std::fs::read(&output_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        if encoded.is_empty() {
            return Err(TranscodeError::EmptyOutput);
        }

        debug!(
            output_bytes = encoded.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "transcode finished"
        );
        Ok(encoded)
    }
}

/// Waits for `child`, killing it once `timeout` elapses.
///
/// Stderr is drained on a reader thread while the process runs so a chatty
/// encoder cannot fill the pipe and stall.
fn wait_with_timeout(
    mut child: Child,
    timeout: Duration,
    capture_output: bool,
) -> TranscodeResult<(ExitStatus, String)> {
    let reader = if capture_output {
        child.stderr.take().map(|mut err| {
            thread::spawn(move || {
                let mut buf = Vec::new();
                let _ = err.read_to_end(&mut buf);
                String::from_utf8_lossy(&buf).into_owned()
            })
        })
    } else {
        None
    };
    let collect = |reader: Option<JoinHandle<String>>| {
        reader
            .and_then(|handle| handle.join().ok())
            .unwrap_or_default()
    };

    let start = Instant::now();
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    // A grandchild may still hold the pipe open; never block on it here
                    let stderr = collect(reader.filter(|handle| handle.is_finished()));
                    if !stderr.is_empty() {
                        debug!(stderr = %stderr.trim(), "ffmpeg stderr before timeout");
                    }
                    return Err(TranscodeError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                thread::sleep(Duration::from_millis(50));
            }
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(TranscodeError::SpawnFailed(e));
            }
        }
    };

    Ok((status, collect(reader)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shell(script: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", script]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", script]);
            cmd
        }
    }

    #[test]
    fn test_config_builder() {
        let config = TranscoderConfig::default()
            .ffmpeg_path("/opt/ffmpeg/bin/ffmpeg")
            .timeout_secs(5)
            .capture_output(false);

        assert_eq!(config.ffmpeg_path, Some(PathBuf::from("/opt/ffmpeg/bin/ffmpeg")));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(!config.capture_output);
    }

    #[test]
    fn test_default_config() {
        let transcoder = FfmpegTranscoder::new();
        assert_eq!(transcoder.config().ffmpeg_path, None);
        assert_eq!(
            transcoder.config().timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert!(transcoder.config().capture_output);
        assert_eq!(transcoder.name(), "ffmpeg");
    }

    #[test]
    fn test_wait_with_timeout_captures_stderr() {
        let mut cmd = shell("echo hello 1>&2");
        cmd.stdout(Stdio::piped()).stderr(Stdio::piped());
        let child = cmd.spawn().unwrap();

        let (status, stderr) = wait_with_timeout(child, Duration::from_secs(2), true).unwrap();
        assert!(status.success());
        assert!(stderr.to_lowercase().contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_drains_large_stderr() {
        // Well past the usual 64 KiB pipe buffer
        let mut cmd = shell("head -c 200000 /dev/zero | tr '\\0' e >&2; exit 1");
        cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        let child = cmd.spawn().unwrap();

        let start = Instant::now();
        let (status, stderr) = wait_with_timeout(child, Duration::from_secs(5), true).unwrap();
        assert!(start.elapsed() < Duration::from_secs(4));
        assert_eq!(status.code(), Some(1));
        assert_eq!(stderr.len(), 200_000);
    }

    #[cfg(unix)]
    #[test]
    fn test_wait_with_timeout_kills_slow_process() {
        let mut cmd = shell("sleep 5");
        cmd.stdout(Stdio::null()).stderr(Stdio::null());
        let child = cmd.spawn().unwrap();

        let start = Instant::now();
        let err = wait_with_timeout(child, Duration::from_millis(200), false).unwrap_err();
        assert!(matches!(err, TranscodeError::Timeout { .. }));
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_missing_configured_path_is_not_found() {
        let transcoder = FfmpegTranscoder::with_config(
            TranscoderConfig::default().ffmpeg_path("/nonexistent/ffmpeg"),
        );
        let err = transcoder.find_ffmpeg().unwrap_err();
        assert!(matches!(err, TranscodeError::EncoderNotFound));
        assert!(matches!(
            transcoder.version(),
            Err(TranscodeError::EncoderNotFound)
        ));
    }

    #[test]
    fn test_non_wav_rejected_before_encoder_lookup() {
        let transcoder = FfmpegTranscoder::with_config(
            TranscoderConfig::default().ffmpeg_path("/nonexistent/ffmpeg"),
        );
        let err = transcoder
            .transcode(b"OggS\0\0\0\0", CodingFormat::Vorbis, None)
            .unwrap_err();
        assert!(matches!(err, TranscodeError::NotWav));
    }
}
