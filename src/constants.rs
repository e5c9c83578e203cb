// Upstream model architecture
pub const AUDIO_SAMPLE_RATE: usize = 22050;
pub const FFT_HOP: usize = 256;
pub const ANNOTATIONS_FPS: usize = AUDIO_SAMPLE_RATE / FFT_HOP;
pub const AUDIO_WINDOW_LENGTH: usize = 2;
pub const AUDIO_N_SAMPLES: usize = AUDIO_SAMPLE_RATE * AUDIO_WINDOW_LENGTH - FFT_HOP;
/// Number of frames in the time-frequency representations the model emits per window.
pub const ANNOT_N_FRAMES: usize = ANNOTATIONS_FPS * AUDIO_WINDOW_LENGTH;
/// The model's frame 0 does not sit at wall-clock 0 of its analysis window;
/// frame-to-time conversion subtracts this once per window.
pub const WINDOW_OFFSET: f64 = FFT_HOP as f64 / AUDIO_SAMPLE_RATE as f64
    * (ANNOT_N_FRAMES as f64 - AUDIO_N_SAMPLES as f64 / FFT_HOP as f64)
    + 0.0018;

// Posteriorgram shapes
pub const NUM_FREQ_NOTES: usize = 88;
pub const CONTOURS_BINS_PER_SEMITONE: usize = 3;
pub const NUM_FREQ_CONTOURS: usize = NUM_FREQ_NOTES * CONTOURS_BINS_PER_SEMITONE;

// MIDI conversion
pub const MIDI_OFFSET: usize = 21;
/// Frequency of MIDI note 21, the lowest note bin.
pub const ANNOTATIONS_BASE_FREQUENCY: f32 = 27.5;
