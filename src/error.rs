use thiserror::Error;

/// Out-of-range configuration, reported before any matrix scan begins.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("onset threshold {0} is outside [0, 1]")]
    OnsetThreshold(f32),

    #[error("frame threshold {0} is outside [0, 1]")]
    FrameThreshold(f32),

    #[error("minimum note length {0} is negative")]
    MinNoteLength(i32),

    #[error("energy threshold {0} is negative")]
    EnergyThreshold(i32),

    #[error("{name} frequency {value} Hz is neither -1 (unset) nor non-negative")]
    FrequencyBound { name: &'static str, value: f32 },

    #[error("minimum frequency {min} Hz exceeds maximum frequency {max} Hz")]
    FrequencyOrder { min: f32, max: f32 },
}

/// Malformed posteriorgram input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("posteriorgram frame counts differ: notes={notes}, onsets={onsets}, contours={contours}")]
    FrameCountMismatch {
        notes: usize,
        onsets: usize,
        contours: usize,
    },

    #[error("{matrix} posteriorgram has {got} frequency bins, expected {expected}")]
    BinCount {
        matrix: &'static str,
        got: usize,
        expected: usize,
    },

    #[error("{matrix} posteriorgram has a non-finite activation at frame {frame}, bin {bin}")]
    NonFiniteActivation {
        matrix: &'static str,
        frame: usize,
        bin: usize,
    },

    #[error("{matrix} posteriorgram has a negative activation at frame {frame}, bin {bin}")]
    NegativeActivation {
        matrix: &'static str,
        frame: usize,
        bin: usize,
    },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DecodeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InputError),
}
