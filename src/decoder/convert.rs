use log::debug;
use ndarray::ArrayView2;

use crate::constants::MIDI_OFFSET;
use crate::error::DecodeError;
use crate::events::Event;
use crate::math::tuning::frame_to_time;
use crate::params::ConvertParams;

use super::{bends, notes, validate};

/// Decodes the three posteriorgrams into an ordered list of note events.
///
/// Pure and deterministic: identical inputs produce an identical event sequence,
/// sorted by start time with ties broken by pitch. Inputs that filter out every
/// candidate yield an empty list; malformed inputs or configuration fail fast
/// with a typed error and no partial output.
///
/// # Arguments
///
/// * `notes_pg` - Note activation matrix (n_frames, 88).
/// * `onsets_pg` - Onset activation matrix (n_frames, 88).
/// * `contours_pg` - Pitch contour activation matrix (n_frames, 264).
/// * `params` - Thresholds and decoding policy for this call.
pub fn convert(
    notes_pg: ArrayView2<f32>,
    onsets_pg: ArrayView2<f32>,
    contours_pg: ArrayView2<f32>,
    params: &ConvertParams,
) -> Result<Vec<Event>, DecodeError> {
    validate::check_params(params)?;
    validate::check_posteriorgrams(notes_pg, onsets_pg, contours_pg)?;

    if notes_pg.nrows() == 0 {
        return Ok(Vec::new());
    }

    let mut frame_notes = notes::extract_notes(notes_pg, onsets_pg, params);
    frame_notes.sort_by(|a, b| a.start_frame.cmp(&b.start_frame).then(a.bin.cmp(&b.bin)));

    let events: Vec<Event> = frame_notes
        .iter()
        .map(|note| Event {
            start: frame_to_time(note.start_frame),
            end: frame_to_time(note.end_frame),
            pitch: (note.bin + MIDI_OFFSET) as u8,
            amplitude: note.amplitude,
            bends: bends::extract_bends(contours_pg, note, params.pitch_bend),
        })
        .collect();

    debug!("decoded {} note events", events.len());
    Ok(events)
}
