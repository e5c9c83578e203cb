pub mod constants;
pub mod error;
pub mod events;
pub mod params;
pub mod decoder {
    pub mod bends;
    pub mod convert;
    pub mod notes;
    pub mod validate;
}
pub mod math {
    pub mod matrix;
    pub mod tuning;
}

pub use decoder::convert::convert;
pub use error::{ConfigError, DecodeError, InputError};
pub use events::Event;
pub use params::{ConvertParams, PitchBendMode};
