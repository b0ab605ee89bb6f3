//! End-to-end conversion with a real ffmpeg.
//!
//! Run with `cargo test -p diapason-transcode -- --ignored`.

use diapason::synthesize_tone;
use diapason_transcode::{convert_wav, Bitrate, FfmpegTranscoder, TranscodeError};

fn ffmpeg_available() -> bool {
    FfmpegTranscoder::new().find_ffmpeg().is_ok()
}

fn tone() -> Vec<u8> {
    synthesize_tone(440.0, 1.0, 44_100).unwrap().wav_data
}

#[test]
#[ignore] // Requires ffmpeg with libmp3lame
fn test_convert_to_mp3() {
    if !ffmpeg_available() {
        println!("ffmpeg not available, skipping");
        return;
    }

    let mp3 = convert_wav(&tone(), "mpeg", Bitrate::from_kbps(128)).unwrap();
    // ID3 tag or an MPEG frame sync
    assert!(mp3.starts_with(b"ID3") || (mp3[0] == 0xFF && mp3[1] & 0xE0 == 0xE0));
}

#[test]
#[ignore] // Requires ffmpeg with libvorbis
fn test_convert_to_ogg() {
    if !ffmpeg_available() {
        println!("ffmpeg not available, skipping");
        return;
    }

    let ogg = convert_wav(&tone(), "vorbis", None).unwrap();
    assert_eq!(&ogg[0..4], b"OggS");
}

#[test]
#[ignore] // Requires ffmpeg
fn test_unsupported_format_with_ffmpeg_present() {
    if !ffmpeg_available() {
        println!("ffmpeg not available, skipping");
        return;
    }

    let err = convert_wav(&tone(), "flac", None).unwrap_err();
    assert!(matches!(err, TranscodeError::UnsupportedFormat { .. }));
}

#[test]
#[ignore] // Requires ffmpeg
fn test_version_reports_ffmpeg() {
    if !ffmpeg_available() {
        println!("ffmpeg not available, skipping");
        return;
    }

    let version = FfmpegTranscoder::new().version().unwrap();
    assert!(version.to_lowercase().contains("ffmpeg"), "{version}");
}
