//! Note to frequency mapping in 12-tone equal temperament.
//!
//! Every letter has a fixed position relative to C within its octave. A tuning
//! convention supplies an anchor (a note, an octave and a frequency), and a
//! pitch is resolved by counting the signed semitone distance to that anchor:
//!
//! ```text
//! distance  = (position[note] - position[anchor]) + (octave - anchor_octave) * 12 + sharp - flat
//! frequency = anchor_frequency * 2^(distance / 12)
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{DiapasonError, DiapasonResult};

/// Number of semitones in one octave.
pub const SEMITONES_PER_OCTAVE: i64 = 12;

/// Octave used when none is given. Holds the anchor of both tunings.
pub const DEFAULT_OCTAVE: i32 = 4;

/// One of the seven natural note letters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Note {
    /// Position 0, the start of each octave.
    C,
    /// Position 2.
    D,
    /// Position 4.
    E,
    /// Position 5.
    F,
    /// Position 7.
    G,
    /// Position 9, the concert pitch anchor.
    A,
    /// Position 11.
    B,
}

impl Note {
    /// All letters in ascending pitch order within an octave.
    pub const ALL: [Note; 7] = [
        Note::C,
        Note::D,
        Note::E,
        Note::F,
        Note::G,
        Note::A,
        Note::B,
    ];

    /// Semitone position of this letter above C in the same octave.
    pub const fn semitone(self) -> i64 {
        match self {
            Note::C => 0,
            Note::D => 2,
            Note::E => 4,
            Note::F => 5,
            Note::G => 7,
            Note::A => 9,
            Note::B => 11,
        }
    }

    /// Returns the upper-case letter for this note.
    pub const fn letter(self) -> char {
        match self {
            Note::C => 'C',
            Note::D => 'D',
            Note::E => 'E',
            Note::F => 'F',
            Note::G => 'G',
            Note::A => 'A',
            Note::B => 'B',
        }
    }
}

impl TryFrom<char> for Note {
    type Error = DiapasonError;

    fn try_from(letter: char) -> DiapasonResult<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Ok(Note::C),
            'D' => Ok(Note::D),
            'E' => Ok(Note::E),
            'F' => Ok(Note::F),
            'G' => Ok(Note::G),
            'A' => Ok(Note::A),
            'B' => Ok(Note::B),
            _ => Err(DiapasonError::invalid_note(letter.to_string())),
        }
    }
}

impl FromStr for Note {
    type Err = DiapasonError;

    fn from_str(s: &str) -> DiapasonResult<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => Note::try_from(letter),
            _ => Err(DiapasonError::invalid_note(s)),
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A semitone shift applied to a natural note.
///
/// Sharp and flat counts are mutually exclusive; use [`Accidental::new`] to
/// validate raw counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Accidental {
    sharp: u32,
    flat: u32,
}

impl Accidental {
    /// No shift.
    pub const NATURAL: Accidental = Accidental { sharp: 0, flat: 0 };

    /// Validates a sharp/flat pair.
    pub fn new(sharp: u32, flat: u32) -> DiapasonResult<Self> {
        if sharp != 0 && flat != 0 {
            return Err(DiapasonError::InvalidAccidental { sharp, flat });
        }
        Ok(Self { sharp, flat })
    }

    /// Raises the pitch by `count` semitones.
    pub const fn sharp(count: u32) -> Self {
        Self {
            sharp: count,
            flat: 0,
        }
    }

    /// Lowers the pitch by `count` semitones.
    pub const fn flat(count: u32) -> Self {
        Self {
            sharp: 0,
            flat: count,
        }
    }

    /// Number of sharps.
    pub const fn sharps(&self) -> u32 {
        self.sharp
    }

    /// Number of flats.
    pub const fn flats(&self) -> u32 {
        self.flat
    }

    /// Net signed semitone offset.
    pub const fn offset(&self) -> i64 {
        self.sharp as i64 - self.flat as i64
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.sharp {
            f.write_str("#")?;
        }
        for _ in 0..self.flat {
            f.write_str("b")?;
        }
        Ok(())
    }
}

/// Reference convention that pins one note to a fixed frequency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tuning {
    /// A4 = 440 Hz.
    #[default]
    ConcertPitch,
    /// C4 = 256 Hz.
    ScientificPitch,
}

impl Tuning {
    /// Note letter of the anchor.
    pub const fn anchor_note(self) -> Note {
        match self {
            Tuning::ConcertPitch => Note::A,
            Tuning::ScientificPitch => Note::C,
        }
    }

    /// Octave of the anchor.
    pub const fn anchor_octave(self) -> i32 {
        DEFAULT_OCTAVE
    }

    /// Frequency of the anchor in Hz.
    pub const fn anchor_frequency(self) -> f64 {
        match self {
            Tuning::ConcertPitch => 440.0,
            Tuning::ScientificPitch => 256.0,
        }
    }

    /// Returns the identifier used on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Tuning::ConcertPitch => "concert",
            Tuning::ScientificPitch => "scientific",
        }
    }
}

impl FromStr for Tuning {
    type Err = DiapasonError;

    fn from_str(s: &str) -> DiapasonResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "concert" | "concert-pitch" | "a440" => Ok(Tuning::ConcertPitch),
            "scientific" | "scientific-pitch" | "c256" => Ok(Tuning::ScientificPitch),
            _ => Err(DiapasonError::InvalidTuning {
                tuning: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Tuning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed semitone distance from the tuning's anchor.
pub fn semitone_distance(note: Note, accidental: Accidental, octave: i32, tuning: Tuning) -> i64 {
    let anchor = tuning.anchor_note();
    (note.semitone() - anchor.semitone())
        + (i64::from(octave) - i64::from(tuning.anchor_octave())) * SEMITONES_PER_OCTAVE
        + accidental.offset()
}

/// Frequency in Hz of an already validated pitch.
pub fn frequency_of(note: Note, accidental: Accidental, octave: i32, tuning: Tuning) -> f64 {
    let distance = semitone_distance(note, accidental, octave, tuning);
    tuning.anchor_frequency() * 2.0_f64.powf(distance as f64 / SEMITONES_PER_OCTAVE as f64)
}

/// Computes the frequency in Hz of a note.
///
/// # Arguments
/// * `note` - Note letter, one of A..G
/// * `sharp` - Semitones to raise the pitch by
/// * `flat` - Semitones to lower the pitch by
/// * `octave` - Octave number; octave 4 holds A440 and middle C
/// * `tuning` - Reference convention
///
/// # Errors
/// [`DiapasonError::InvalidNote`] for a letter outside A..G and
/// [`DiapasonError::InvalidAccidental`] when both `sharp` and `flat` are set.
pub fn compute_frequency(
    note: &str,
    sharp: u32,
    flat: u32,
    octave: i32,
    tuning: Tuning,
) -> DiapasonResult<f64> {
    let note: Note = note.parse()?;
    let accidental = Accidental::new(sharp, flat)?;
    Ok(frequency_of(note, accidental, octave, tuning))
}

/// Builder for a frequency lookup with the usual defaults.
///
/// Starts from no accidentals, octave 4 and concert pitch.
///
/// ```
/// use diapason::pitch::{Note, PitchQuery, Tuning};
///
/// let a4 = PitchQuery::new(Note::A).frequency().unwrap();
/// assert_eq!(a4, 440.0);
///
/// let c4 = PitchQuery::new(Note::C)
///     .tuning(Tuning::ScientificPitch)
///     .frequency()
///     .unwrap();
/// assert_eq!(c4, 256.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PitchQuery {
    note: Note,
    sharp: u32,
    flat: u32,
    octave: i32,
    tuning: Tuning,
}

impl PitchQuery {
    /// Creates a query for a natural note in octave 4, concert pitch.
    pub fn new(note: Note) -> Self {
        Self {
            note,
            sharp: 0,
            flat: 0,
            octave: DEFAULT_OCTAVE,
            tuning: Tuning::default(),
        }
    }

    /// Parses the note letter and creates a query for it.
    pub fn parse(note: &str) -> DiapasonResult<Self> {
        Ok(Self::new(note.parse()?))
    }

    /// Sets the number of sharps.
    pub fn sharp(mut self, sharp: u32) -> Self {
        self.sharp = sharp;
        self
    }

    /// Sets the number of flats.
    pub fn flat(mut self, flat: u32) -> Self {
        self.flat = flat;
        self
    }

    /// Sets the octave.
    pub fn octave(mut self, octave: i32) -> Self {
        self.octave = octave;
        self
    }

    /// Sets the tuning convention.
    pub fn tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Returns the note letter.
    pub fn note(&self) -> Note {
        self.note
    }

    /// Returns the octave.
    pub fn octave_number(&self) -> i32 {
        self.octave
    }

    /// Returns the tuning convention.
    pub fn tuning_convention(&self) -> Tuning {
        self.tuning
    }

    /// Validates the accidentals.
    pub fn accidental(&self) -> DiapasonResult<Accidental> {
        Accidental::new(self.sharp, self.flat)
    }

    /// Resolves the query to a frequency in Hz.
    pub fn frequency(&self) -> DiapasonResult<f64> {
        let accidental = self.accidental()?;
        Ok(frequency_of(self.note, accidental, self.octave, self.tuning))
    }
}

/// A note written in scientific pitch notation, such as `C#4` or `Bb3`.
///
/// Sharps are written `#`, `s` or `♯`, flats `b` or `♭`. Several of the same
/// sign stack (`E##5`). The octave may be negative and defaults to 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteName {
    /// Note letter.
    pub note: Note,
    /// Accidental.
    pub accidental: Accidental,
    /// Octave number.
    pub octave: i32,
}

impl NoteName {
    /// Converts the name into a frequency query under the given tuning.
    pub fn query(&self, tuning: Tuning) -> PitchQuery {
        PitchQuery::new(self.note)
            .sharp(self.accidental.sharps())
            .flat(self.accidental.flats())
            .octave(self.octave)
            .tuning(tuning)
    }

    /// Frequency in Hz under the given tuning.
    pub fn frequency(&self, tuning: Tuning) -> f64 {
        frequency_of(self.note, self.accidental, self.octave, tuning)
    }
}

impl FromStr for NoteName {
    type Err = DiapasonError;

    fn from_str(name: &str) -> DiapasonResult<Self> {
        let trimmed = name.trim();
        let mut chars = trimmed.char_indices().peekable();

        let Some((_, letter)) = chars.next() else {
            return Err(DiapasonError::invalid_note_name(name, "empty note name"));
        };
        let note = Note::try_from(letter)?;

        let mut sharp = 0u32;
        let mut flat = 0u32;
        let mut octave_start = trimmed.len();
        while let Some(&(index, ch)) = chars.peek() {
            match ch {
                '#' | 's' | '♯' => sharp += 1,
                'b' | '♭' => flat += 1,
                _ => {
                    octave_start = index;
                    break;
                }
            }
            chars.next();
        }
        let accidental = Accidental::new(sharp, flat)?;

        let octave_text = &trimmed[octave_start..];
        let octave = if octave_text.is_empty() {
            DEFAULT_OCTAVE
        } else {
            octave_text.parse::<i32>().map_err(|_| {
                DiapasonError::invalid_note_name(
                    name,
                    format!("invalid octave '{}': must be an integer", octave_text),
                )
            })?
        };

        Ok(Self {
            note,
            accidental,
            octave,
        })
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.note, self.accidental, self.octave)
    }
}
