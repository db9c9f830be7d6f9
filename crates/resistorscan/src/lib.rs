//! resistorscan: pure-Rust reader for color-banded through-hole resistors.
//!
//! Takes a photograph of resistors on a light background and reports the
//! value encoded by each resistor's bands. The pipeline stages are:
//!
//! 1. **Segment** – luma threshold, 8-connected component labeling, bounding
//!    boxes, per-component color crop + mask.
//! 2. **Geometry** – centroid and principal axis from the inertia tensor,
//!    rotation to a vertical body axis, fixed-size crop.
//! 3. **Bands** – per-row mean color of the canonical view, classification
//!    against empirical RGB ranges, collapse into band runs.
//! 4. **Decode** – positional interpretation of 3–6 bands into resistance,
//!    tolerance and temperature coefficient.
//!
//! # Public API
//! - [`ResistorReader`] as the primary entry point
//! - [`ReaderConfig`] and its per-stage sections for tuning
//! - stage modules ([`segment`], [`geometry`], [`bands`]) for callers that
//!   want to run single stages
//!
//! The library never touches the file system except to load a JSON
//! configuration on request; image loading belongs to the caller.

mod api;
pub mod bands;
pub mod geometry;
mod pipeline;
pub mod segment;

#[cfg(test)]
pub(crate) mod test_utils;

pub use api::ResistorReader;
pub use bands::{
    classify, classify_detailed, decode, BandColor, BandProfileConfig, BandRun, Classification,
    ColorTable, DecodeError, MatchKind, ResistorValue,
};
pub use geometry::{
    canonical_view, central_line, centroid, AxisLine, CanonicalConfig, CanonicalView, Centroid,
    GeometryError,
};
pub use pipeline::{ReaderConfig, RejectReason, ResistorReading, ScanResult};
pub use segment::{segment, BoundingBox, LabelImage, Region, SegmentConfig};
