use crate::constants::{
    ANNOTATIONS_BASE_FREQUENCY, ANNOT_N_FRAMES, AUDIO_SAMPLE_RATE, CONTOURS_BINS_PER_SEMITONE,
    FFT_HOP, MIDI_OFFSET, WINDOW_OFFSET,
};

/// Converts a frequency in Hz to the corresponding (fractional) MIDI pitch.
pub fn hz_to_midi(hz: f32) -> f32 {
    12.0 * (hz.log2() - 440.0f32.log2()) + 69.0
}

/// Converts a MIDI pitch to the corresponding frequency in Hz.
pub fn midi_to_hz(midi: f32) -> f32 {
    440.0 * 2.0f32.powf((midi - 69.0) / 12.0)
}

/// Note-bin column index whose nominal pitch is closest to the given frequency.
///
/// Only used to turn the audible-range bounds into bin-indexed comparisons; event
/// pitches always come from the column index directly.
pub fn hz_to_note_bin(hz: f32) -> isize {
    hz_to_midi(hz).round() as isize - MIDI_OFFSET as isize
}

/// Converts a frame index of the model's posteriorgrams to a time in seconds,
/// correcting for the inference window offset.
pub fn frame_to_time(frame: usize) -> f64 {
    (frame * FFT_HOP) as f64 / AUDIO_SAMPLE_RATE as f64
        - WINDOW_OFFSET * (frame / ANNOT_N_FRAMES) as f64
}

/// Contour-matrix bin whose center matches the given MIDI pitch.
pub fn midi_pitch_to_contour_bin(pitch_midi: f32) -> f32 {
    12.0 * CONTOURS_BINS_PER_SEMITONE as f32
        * (midi_to_hz(pitch_midi) / ANNOTATIONS_BASE_FREQUENCY).log2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hz_midi_round_trip() {
        assert!((hz_to_midi(440.0) - 69.0).abs() < 1e-5);
        assert!((midi_to_hz(69.0) - 440.0).abs() < 1e-3);
        assert!((midi_to_hz(hz_to_midi(261.63)) - 261.63).abs() < 1e-2);
    }

    #[test]
    fn note_bin_from_hz() {
        // A4 sits 48 semitones above the lowest note bin
        assert_eq!(hz_to_note_bin(440.0), 48);
        assert_eq!(hz_to_note_bin(27.5), 0);
        // below the lowest bin the index goes negative rather than clamping
        assert!(hz_to_note_bin(10.0) < 0);
    }

    #[test]
    fn frame_times_before_first_window_boundary() {
        assert_eq!(frame_to_time(0), 0.0);
        assert!((frame_to_time(10) - 0.116_100).abs() < 1e-4);
        assert!((frame_to_time(25) - 0.290_249).abs() < 1e-4);
    }

    #[test]
    fn frame_time_subtracts_offset_per_window() {
        // frame 172 starts the second analysis window
        assert!((frame_to_time(172) - 1.986_590).abs() < 1e-4);
        let per_frame = FFT_HOP as f64 / AUDIO_SAMPLE_RATE as f64;
        let step = frame_to_time(173) - frame_to_time(172);
        assert!((step - per_frame).abs() < 1e-9);
    }

    #[test]
    fn contour_bin_is_three_per_semitone() {
        assert!((midi_pitch_to_contour_bin(21.0)).abs() < 1e-3);
        assert!((midi_pitch_to_contour_bin(61.0) - 120.0).abs() < 1e-3);
        assert!((midi_pitch_to_contour_bin(22.0) - 3.0).abs() < 1e-3);
    }
}
