//! Band colors: classification, row profiling and value decoding.

pub mod classify;
pub mod color;
pub mod decode;
pub mod profile;

pub use classify::{
    classify, classify_detailed, ChannelRange, Classification, ColorRule, ColorTable, MatchKind,
};
pub use color::{BandColor, BandSpec, ParseBandColorError};
pub use decode::{decode, DecodeError, ResistorValue, MAX_BANDS, MIN_BANDS};
pub use profile::{extract_bands, vertical_color_distribution, BandProfileConfig, BandRun};
