use serde::{Deserialize, Serialize};

/// A decoded note event.
///
/// Value object: two events are equal when every field is equal. `bends` holds
/// sub-semitone offsets from the nominal pitch in contour-bin steps, one per
/// retained frame (or a single representative value), empty when pitch bends are
/// disabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds, always after `start`.
    pub end: f64,
    /// MIDI note number.
    pub pitch: u8,
    /// Mean frame activation over the note's span.
    pub amplitude: f32,
    pub bends: Vec<i32>,
}
