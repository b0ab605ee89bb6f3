//! CLI command implementations

pub mod doctor;
pub mod freq;
pub mod inspect;
pub mod json_output;
pub mod tone;

use diapason::pitch::DEFAULT_OCTAVE;
use diapason::{DiapasonResult, NoteName, PitchQuery, Tuning};

/// Note selection shared by `freq` and `tone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchArgs {
    /// A letter (`C`) or a full name (`C#5`, `Bb3`)
    pub note: String,
    /// Extra sharps on top of any written in the name
    pub sharp: u32,
    /// Extra flats on top of any written in the name
    pub flat: u32,
    /// Octave, overriding any written in the name
    pub octave: Option<i32>,
    pub tuning: Tuning,
}

impl PitchArgs {
    /// Combines the note argument and the flags into one query.
    ///
    /// A single character is taken as a bare letter so that an unknown letter
    /// reports `InvalidNote` rather than a name parse error.
    pub fn resolve(&self) -> DiapasonResult<PitchQuery> {
        let note = self.note.trim();
        let query = if note.chars().count() == 1 {
            PitchQuery::parse(note)?
                .sharp(self.sharp)
                .flat(self.flat)
                .octave(self.octave.unwrap_or(DEFAULT_OCTAVE))
        } else {
            let name: NoteName = note.parse()?;
            PitchQuery::new(name.note)
                .sharp(name.accidental.sharps().saturating_add(self.sharp))
                .flat(name.accidental.flats().saturating_add(self.flat))
                .octave(self.octave.unwrap_or(name.octave))
        };
        Ok(query.tuning(self.tuning))
    }
}
