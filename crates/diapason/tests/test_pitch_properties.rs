//! Pitch calculator properties exercised through the public API.

use diapason::pitch::{frequency_of, Accidental, Note, NoteName, PitchQuery, Tuning};
use diapason::{compute_frequency, DiapasonError};

fn rel_diff(a: f64, b: f64) -> f64 {
    (a - b).abs() / b.abs()
}

#[test]
fn test_monotonic_across_octaves_and_letters() {
    let mut previous = 0.0;
    for octave in 0..9 {
        for note in Note::ALL {
            let freq = frequency_of(note, Accidental::NATURAL, octave, Tuning::ConcertPitch);
            assert!(freq > previous, "{note}{octave} = {freq} not above {previous}");
            previous = freq;
        }
    }
}

#[test]
fn test_tunings_differ_by_constant_ratio() {
    // Scientific C4 (256) sits below concert C4 (~261.626) by the same ratio everywhere
    let ratio = 256.0 / compute_frequency("C", 0, 0, 4, Tuning::ConcertPitch).unwrap();
    for note in Note::ALL {
        for octave in [1, 4, 7] {
            let concert = frequency_of(note, Accidental::NATURAL, octave, Tuning::ConcertPitch);
            let scientific =
                frequency_of(note, Accidental::NATURAL, octave, Tuning::ScientificPitch);
            assert!(rel_diff(scientific / concert, ratio) < 1e-12);
        }
    }
}

#[test]
fn test_enharmonic_equivalents() {
    let pairs = [("C#4", "Db4"), ("E#4", "F4"), ("B#3", "C4"), ("Cb4", "B3"), ("G##2", "A2")];
    for (left, right) in pairs {
        let left: NoteName = left.parse().unwrap();
        let right: NoteName = right.parse().unwrap();
        let a = left.frequency(Tuning::ConcertPitch);
        let b = right.frequency(Tuning::ConcertPitch);
        assert!(rel_diff(a, b) < 1e-12, "{left} = {a}, {right} = {b}");
    }
}

#[test]
fn test_large_accidentals_cross_octaves() {
    let twelve_sharps = PitchQuery::new(Note::A).sharp(12).frequency().unwrap();
    assert!(rel_diff(twelve_sharps, 880.0) < 1e-12);

    let twenty_four_flats = PitchQuery::new(Note::A).flat(24).frequency().unwrap();
    assert!(rel_diff(twenty_four_flats, 110.0) < 1e-12);
}

#[test]
fn test_negative_octaves() {
    let a_minus_one = compute_frequency("A", 0, 0, -1, Tuning::ConcertPitch).unwrap();
    assert!(rel_diff(a_minus_one, 13.75) < 1e-12);
}

#[test]
fn test_validation_errors_are_reported() {
    let err = compute_frequency("H", 0, 0, 4, Tuning::ConcertPitch).unwrap_err();
    assert_eq!(err.code(), "DIAPASON_001");

    let err = compute_frequency("A", 1, 1, 4, Tuning::ConcertPitch).unwrap_err();
    assert!(matches!(err, DiapasonError::InvalidAccidental { .. }));
    assert_eq!(err.code(), "DIAPASON_002");
}

#[test]
fn test_letter_validated_before_accidental() {
    let err = compute_frequency("Z", 1, 1, 4, Tuning::ConcertPitch).unwrap_err();
    assert!(matches!(err, DiapasonError::InvalidNote { .. }));
}
