use std::ops::Range;

use log::debug;
use ndarray::{Array2, ArrayView2, CowArray, Ix2};

use crate::math::matrix::{global_max, time_axis_peaks};
use crate::math::tuning::{hz_to_note_bin, midi_to_hz};
use crate::constants::MIDI_OFFSET;
use crate::params::ConvertParams;

/// Frames on each side an onset activation must dominate to count as a peak.
const ONSET_PEAK_SPREAD: usize = 2;
/// Backward-difference depths used when inferring onsets from the note matrix.
const INFERRED_ONSET_DIFFS: usize = 2;

/// A note in frame/bin coordinates, before time conversion and pitch bends.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameNote {
    pub start_frame: usize,
    /// Exclusive end frame.
    pub end_frame: usize,
    /// Column index into the note/onset posteriorgrams.
    pub bin: usize,
    /// Mean frame activation over the span.
    pub amplitude: f32,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    frame: usize,
    bin: usize,
    strength: f32,
}

/// Extracts notes from the note/onset posteriorgrams.
///
/// Greedy onset-driven pass first: onset peaks are processed strongest-first and
/// each accepted note claims the cells it consumed, so a weaker candidate can never
/// re-explain the same activation mass. The optional melodia pass then sweeps up
/// leftover unclaimed runs. Inputs are read-only; ownership lives in a claim mask.
pub fn extract_notes(
    notes_pg: ArrayView2<f32>,
    onsets_pg: ArrayView2<f32>,
    params: &ConvertParams,
) -> Vec<FrameNote> {
    let (n_frames, n_bins) = notes_pg.dim();
    let bins = audible_bins(params, n_bins);

    let onset_matrix: CowArray<f32, Ix2> = if params.infer_onsets {
        inferred_onsets(onsets_pg, notes_pg).into()
    } else {
        onsets_pg.into()
    };

    let mut candidates: Vec<Candidate> = time_axis_peaks(onset_matrix.view(), ONSET_PEAK_SPREAD)
        .into_iter()
        .filter(|&(_, bin)| bins.contains(&bin))
        .map(|(frame, bin)| Candidate {
            frame,
            bin,
            strength: onset_matrix[[frame, bin]],
        })
        .filter(|c| c.strength > params.onset_threshold)
        .collect();

    // strongest first; ties go to the earlier frame, then the lower pitch
    candidates.sort_by(|a, b| {
        b.strength
            .total_cmp(&a.strength)
            .then(a.frame.cmp(&b.frame))
            .then(a.bin.cmp(&b.bin))
    });
    debug!("{} onset candidates above threshold", candidates.len());

    let mut claimed = Array2::<bool>::from_elem((n_frames, n_bins), false);
    let mut notes: Vec<FrameNote> = Vec::new();

    for candidate in candidates {
        if claimed[[candidate.frame, candidate.bin]] {
            continue;
        }

        let mut end = candidate.frame;
        while end < n_frames
            && !claimed[[end, candidate.bin]]
            && notes_pg[[end, candidate.bin]] >= params.frame_threshold
        {
            end += 1;
        }

        if let Some(note) = accept(notes_pg, candidate.frame, end, candidate.bin, params) {
            claim_span(&mut claimed, candidate.frame..end, candidate.bin);
            notes.push(note);
        }
    }

    if params.melodia_trick {
        let recovered = melodia_pass(notes_pg, &mut claimed, &bins, params, &mut notes);
        debug!("melodia pass recovered {recovered} notes");
    }

    notes
}

/// Applies the length floor, the aggregate energy floor, and computes the
/// amplitude. Returns `None` when the span is rejected.
fn accept(
    notes_pg: ArrayView2<f32>,
    start: usize,
    end: usize,
    bin: usize,
    params: &ConvertParams,
) -> Option<FrameNote> {
    let len = end - start;
    if len == 0 || (len as i64) < params.min_note_length as i64 {
        return None;
    }

    let energy: f32 = (start..end).map(|frame| notes_pg[[frame, bin]]).sum();
    if energy < params.energy_threshold as f32 {
        return None;
    }

    Some(FrameNote {
        start_frame: start,
        end_frame: end,
        bin,
        amplitude: energy / len as f32,
    })
}

/// Claims a note's span, including the same span in the two adjacent semitone
/// columns: activation leaking into neighbouring bins must not seed its own note.
fn claim_span(claimed: &mut Array2<bool>, frames: Range<usize>, bin: usize) {
    let n_bins = claimed.ncols();
    for frame in frames {
        claimed[[frame, bin]] = true;
        if bin + 1 < n_bins {
            claimed[[frame, bin + 1]] = true;
        }
        if bin > 0 {
            claimed[[frame, bin - 1]] = true;
        }
    }
}

/// Recovery pass for notes whose attack both onset signals missed: every maximal
/// unclaimed run of frames at or above the frame threshold becomes a note if it
/// survives the same filters as the onset-driven pass. Runs once per decode.
fn melodia_pass(
    notes_pg: ArrayView2<f32>,
    claimed: &mut Array2<bool>,
    bins: &Range<usize>,
    params: &ConvertParams,
    notes: &mut Vec<FrameNote>,
) -> usize {
    let n_frames = notes_pg.nrows();
    let mut recovered = 0;

    for bin in bins.clone() {
        let mut frame = 0;
        while frame < n_frames {
            if claimed[[frame, bin]] || notes_pg[[frame, bin]] < params.frame_threshold {
                frame += 1;
                continue;
            }

            let run_start = frame;
            while frame < n_frames
                && !claimed[[frame, bin]]
                && notes_pg[[frame, bin]] >= params.frame_threshold
            {
                frame += 1;
            }

            if let Some(note) = accept(notes_pg, run_start, frame, bin, params) {
                claim_span(claimed, run_start..frame, bin);
                notes.push(note);
                recovered += 1;
            }
        }
    }

    recovered
}

/// Note-bin columns allowed by the audible-frequency bounds; the full range when
/// both bounds are unset.
fn audible_bins(params: &ConvertParams, n_bins: usize) -> Range<usize> {
    let mut lo = 0isize;
    let mut hi = n_bins as isize;

    if params.min_frequency >= 0.0 {
        let mut bin = hz_to_note_bin(params.min_frequency);
        // the rounded bin may still sit below the bound
        if midi_to_hz((bin + MIDI_OFFSET as isize) as f32) < params.min_frequency {
            bin += 1;
        }
        lo = bin.clamp(0, n_bins as isize);
    }
    if params.max_frequency >= 0.0 {
        let mut bin = hz_to_note_bin(params.max_frequency);
        if midi_to_hz((bin + MIDI_OFFSET as isize) as f32) > params.max_frequency {
            bin -= 1;
        }
        hi = (bin + 1).clamp(0, n_bins as isize);
    }

    if lo >= hi {
        return 0..0;
    }
    lo as usize..hi as usize
}

/// Augments the onset matrix with rising-edge energy from the note matrix: the
/// clamped minimum of the 1- and 2-frame backward differences, rescaled to the
/// onset head's range, merged cell-wise with the raw onsets.
fn inferred_onsets(onsets_pg: ArrayView2<f32>, notes_pg: ArrayView2<f32>) -> Array2<f32> {
    let (n_frames, n_bins) = notes_pg.dim();

    let mut diff = Array2::<f32>::from_elem((n_frames, n_bins), f32::INFINITY);
    for n in 1..=INFERRED_ONSET_DIFFS {
        for frame in 0..n_frames {
            for bin in 0..n_bins {
                let prev = if frame >= n {
                    notes_pg[[frame - n, bin]]
                } else {
                    0.0
                };
                let d = notes_pg[[frame, bin]] - prev;
                if d < diff[[frame, bin]] {
                    diff[[frame, bin]] = d;
                }
            }
        }
    }

    diff.mapv_inplace(|v| v.max(0.0));
    for frame in 0..INFERRED_ONSET_DIFFS.min(n_frames) {
        diff.row_mut(frame).fill(0.0);
    }

    let onset_max = global_max(onsets_pg);
    let diff_max = global_max(diff.view());
    let scale = if diff_max > 0.0 { onset_max / diff_max } else { 0.0 };

    let mut augmented = onsets_pg.to_owned();
    for frame in 0..n_frames {
        for bin in 0..n_bins {
            let v = diff[[frame, bin]] * scale;
            if v > augmented[[frame, bin]] {
                augmented[[frame, bin]] = v;
            }
        }
    }
    augmented
}
