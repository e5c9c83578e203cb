use ndarray::ArrayView2;

use crate::constants::{NUM_FREQ_CONTOURS, NUM_FREQ_NOTES};
use crate::error::{ConfigError, InputError};
use crate::params::ConvertParams;

/// Rejects out-of-range configuration before any matrix is touched.
pub fn check_params(params: &ConvertParams) -> Result<(), ConfigError> {
    if !(0.0..=1.0).contains(&params.onset_threshold) {
        return Err(ConfigError::OnsetThreshold(params.onset_threshold));
    }
    if !(0.0..=1.0).contains(&params.frame_threshold) {
        return Err(ConfigError::FrameThreshold(params.frame_threshold));
    }
    if params.min_note_length < 0 {
        return Err(ConfigError::MinNoteLength(params.min_note_length));
    }
    if params.energy_threshold < 0 {
        return Err(ConfigError::EnergyThreshold(params.energy_threshold));
    }
    check_frequency_bound("minimum", params.min_frequency)?;
    check_frequency_bound("maximum", params.max_frequency)?;
    if params.min_frequency >= 0.0
        && params.max_frequency >= 0.0
        && params.min_frequency > params.max_frequency
    {
        return Err(ConfigError::FrequencyOrder {
            min: params.min_frequency,
            max: params.max_frequency,
        });
    }
    Ok(())
}

fn check_frequency_bound(name: &'static str, value: f32) -> Result<(), ConfigError> {
    // -1 is the "unset" sentinel; anything else must be a usable frequency
    if value != -1.0 && !(value >= 0.0) {
        return Err(ConfigError::FrequencyBound { name, value });
    }
    Ok(())
}

/// Validates shape compatibility and activation sanity of the three posteriorgrams.
pub fn check_posteriorgrams(
    notes_pg: ArrayView2<f32>,
    onsets_pg: ArrayView2<f32>,
    contours_pg: ArrayView2<f32>,
) -> Result<(), InputError> {
    if notes_pg.nrows() != onsets_pg.nrows() || notes_pg.nrows() != contours_pg.nrows() {
        return Err(InputError::FrameCountMismatch {
            notes: notes_pg.nrows(),
            onsets: onsets_pg.nrows(),
            contours: contours_pg.nrows(),
        });
    }

    for (matrix, view, expected) in [
        ("notes", notes_pg.view(), NUM_FREQ_NOTES),
        ("onsets", onsets_pg.view(), NUM_FREQ_NOTES),
        ("contours", contours_pg.view(), NUM_FREQ_CONTOURS),
    ] {
        if view.ncols() != expected {
            return Err(InputError::BinCount {
                matrix,
                got: view.ncols(),
                expected,
            });
        }
        for ((frame, bin), &value) in view.indexed_iter() {
            if !value.is_finite() {
                return Err(InputError::NonFiniteActivation { matrix, frame, bin });
            }
            if value < 0.0 {
                return Err(InputError::NegativeActivation { matrix, frame, bin });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn shaped(n_frames: usize) -> (Array2<f32>, Array2<f32>, Array2<f32>) {
        (
            Array2::zeros((n_frames, NUM_FREQ_NOTES)),
            Array2::zeros((n_frames, NUM_FREQ_NOTES)),
            Array2::zeros((n_frames, NUM_FREQ_CONTOURS)),
        )
    }

    #[test]
    fn default_params_are_valid() {
        assert!(check_params(&ConvertParams::default()).is_ok());
    }

    #[test]
    fn thresholds_must_stay_in_unit_interval() {
        let mut params = ConvertParams {
            onset_threshold: 1.5,
            ..ConvertParams::default()
        };
        assert_eq!(
            check_params(&params),
            Err(ConfigError::OnsetThreshold(1.5))
        );

        params.onset_threshold = 0.3;
        params.frame_threshold = -0.1;
        assert_eq!(check_params(&params), Err(ConfigError::FrameThreshold(-0.1)));

        params.frame_threshold = f32::NAN;
        assert!(matches!(
            check_params(&params),
            Err(ConfigError::FrameThreshold(_))
        ));
    }

    #[test]
    fn negative_lengths_are_rejected() {
        let params = ConvertParams {
            min_note_length: -1,
            ..ConvertParams::default()
        };
        assert_eq!(check_params(&params), Err(ConfigError::MinNoteLength(-1)));

        let params = ConvertParams {
            energy_threshold: -3,
            ..ConvertParams::default()
        };
        assert_eq!(check_params(&params), Err(ConfigError::EnergyThreshold(-3)));
    }

    #[test]
    fn frequency_bounds_accept_only_sentinel_or_positive() {
        let params = ConvertParams {
            min_frequency: -2.0,
            ..ConvertParams::default()
        };
        assert!(matches!(
            check_params(&params),
            Err(ConfigError::FrequencyBound { name: "minimum", .. })
        ));

        let params = ConvertParams {
            min_frequency: 800.0,
            max_frequency: 200.0,
            ..ConvertParams::default()
        };
        assert!(matches!(
            check_params(&params),
            Err(ConfigError::FrequencyOrder { .. })
        ));
    }

    #[test]
    fn frame_counts_must_agree() {
        let (notes, onsets, _) = shaped(10);
        let (_, _, contours) = shaped(9);
        assert_eq!(
            check_posteriorgrams(notes.view(), onsets.view(), contours.view()),
            Err(InputError::FrameCountMismatch {
                notes: 10,
                onsets: 10,
                contours: 9,
            })
        );
    }

    #[test]
    fn bin_counts_are_fixed_by_the_model() {
        let (notes, _, contours) = shaped(4);
        let onsets = Array2::<f32>::zeros((4, 80));
        assert_eq!(
            check_posteriorgrams(notes.view(), onsets.view(), contours.view()),
            Err(InputError::BinCount {
                matrix: "onsets",
                got: 80,
                expected: NUM_FREQ_NOTES,
            })
        );
    }

    #[test]
    fn activations_must_be_finite_and_non_negative() {
        let (mut notes, onsets, contours) = shaped(4);
        notes[[2, 5]] = f32::NAN;
        assert_eq!(
            check_posteriorgrams(notes.view(), onsets.view(), contours.view()),
            Err(InputError::NonFiniteActivation {
                matrix: "notes",
                frame: 2,
                bin: 5,
            })
        );

        let (notes, onsets, mut contours) = shaped(4);
        contours[[1, 100]] = -0.25;
        assert_eq!(
            check_posteriorgrams(notes.view(), onsets.view(), contours.view()),
            Err(InputError::NegativeActivation {
                matrix: "contours",
                frame: 1,
                bin: 100,
            })
        );
    }

    #[test]
    fn empty_matrices_are_well_formed() {
        let (notes, onsets, contours) = shaped(0);
        assert!(check_posteriorgrams(notes.view(), onsets.view(), contours.view()).is_ok());
    }
}
