use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Pitch-bend extraction policy. Serialized as `null`, `"single"` or `"multi"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PitchBendMode {
    #[default]
    NoPitchBend,
    SinglePitchBend,
    MultiPitchBend,
}

impl Serialize for PitchBendMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PitchBendMode::NoPitchBend => serializer.serialize_none(),
            PitchBendMode::SinglePitchBend => serializer.serialize_str("single"),
            PitchBendMode::MultiPitchBend => serializer.serialize_str("multi"),
        }
    }
}

impl<'de> Deserialize<'de> for PitchBendMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None => Ok(PitchBendMode::NoPitchBend),
            Some("single") => Ok(PitchBendMode::SinglePitchBend),
            Some("multi") => Ok(PitchBendMode::MultiPitchBend),
            Some(other) => Err(D::Error::invalid_value(
                Unexpected::Str(other),
                &"null, \"single\" or \"multi\"",
            )),
        }
    }
}

/// Configuration for one `convert` call. The decoder never mutates or retains it.
///
/// Field names on the wire match the host's parameter records
/// (`onsetThreshold`, `frameThreshold`, ...); missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConvertParams {
    /// Minimum onset activation for a peak to seed a note, in [0, 1].
    pub onset_threshold: f32,
    /// Minimum frame activation for a note to stay "on", in [0, 1].
    pub frame_threshold: f32,
    /// Minimum note span in frames.
    pub min_note_length: i32,
    /// Synthesize extra onsets from rising edges in the note matrix.
    pub infer_onsets: bool,
    /// Highest audible frequency in Hz, -1 for unbounded.
    pub max_frequency: f32,
    /// Lowest audible frequency in Hz, -1 for unbounded.
    pub min_frequency: f32,
    /// Recover notes from leftover energy after the onset-driven pass.
    pub melodia_trick: bool,
    pub pitch_bend: PitchBendMode,
    /// Aggregate activation floor below which a note is rejected outright.
    pub energy_threshold: i32,
}

impl Default for ConvertParams {
    fn default() -> Self {
        ConvertParams {
            onset_threshold: 0.3,
            frame_threshold: 0.5,
            min_note_length: 11,
            infer_onsets: false,
            max_frequency: -1.0,
            min_frequency: -1.0,
            melodia_trick: false,
            pitch_bend: PitchBendMode::NoPitchBend,
            energy_threshold: 11,
        }
    }
}
