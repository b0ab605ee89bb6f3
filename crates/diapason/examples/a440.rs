//! Writes a two second A4 tone to `a440.wav`.

use diapason::{synthesize_tone, Note, PitchQuery, DEFAULT_SAMPLE_RATE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let freq = PitchQuery::new(Note::A).frequency()?;
    let result = synthesize_tone(freq, 2.0, DEFAULT_SAMPLE_RATE)?;

    std::fs::write("a440.wav", &result.wav_data)?;
    println!(
        "Wrote a440.wav: {} samples at {} Hz (PCM hash {})",
        result.num_samples, result.sample_rate, result.pcm_hash
    );
    Ok(())
}
