use ndarray::ArrayView2;

use crate::constants::{MIDI_OFFSET, NUM_FREQ_CONTOURS};
use crate::math::matrix::{arg_max, gaussian};
use crate::math::tuning::midi_pitch_to_contour_bin;
use crate::params::PitchBendMode;

use super::notes::FrameNote;

/// Contour bins inspected on each side of a note's nominal bin.
const CONTOUR_BIN_TOLERANCE: usize = 25;
const CONTOUR_WINDOW_STD: f32 = 5.0;

/// Sub-semitone offsets for one note, read from the contour posteriorgram.
///
/// Offsets are in contour-bin steps from the note's nominal bin; 0 means exactly
/// on pitch. `MultiPitchBend` emits one offset per retained frame,
/// `SinglePitchBend` collapses the whole span into one representative offset, and
/// `NoPitchBend` never touches the contour matrix.
pub fn extract_bends(
    contours_pg: ArrayView2<f32>,
    note: &FrameNote,
    mode: PitchBendMode,
) -> Vec<i32> {
    if mode == PitchBendMode::NoPitchBend {
        return Vec::new();
    }

    let pitch_midi = (note.bin + MIDI_OFFSET) as f32;
    let center = midi_pitch_to_contour_bin(pitch_midi).round() as usize;
    let window_len = 2 * CONTOUR_BIN_TOLERANCE + 1;
    let weights = gaussian(window_len, CONTOUR_WINDOW_STD);

    // window clipped to the contour matrix, with the weights clipped to match
    let bin_start = center.saturating_sub(CONTOUR_BIN_TOLERANCE);
    let bin_end = (center + CONTOUR_BIN_TOLERANCE + 1).min(NUM_FREQ_CONTOURS);
    let weight_offset = CONTOUR_BIN_TOLERANCE.saturating_sub(center);

    let weighted_row = |frame: usize| -> Vec<f32> {
        (bin_start..bin_end)
            .map(|bin| contours_pg[[frame, bin]] * weights[weight_offset + (bin - bin_start)])
            .collect()
    };

    match mode {
        PitchBendMode::NoPitchBend => Vec::new(),
        PitchBendMode::MultiPitchBend => (note.start_frame..note.end_frame)
            .filter_map(|frame| arg_max(&weighted_row(frame)))
            .map(|idx| (bin_start + idx) as i32 - center as i32)
            .collect(),
        PitchBendMode::SinglePitchBend => {
            let mut profile = vec![0.0f32; bin_end - bin_start];
            for frame in note.start_frame..note.end_frame {
                for (acc, v) in profile.iter_mut().zip(weighted_row(frame)) {
                    *acc += v;
                }
            }
            arg_max(&profile)
                .map(|idx| (bin_start + idx) as i32 - center as i32)
                .into_iter()
                .collect()
        }
    }
}
