//! Reader pipeline.
//!
//! Glue layer that wires the stages together per image:
//! segment -> canonical view -> band runs -> decode.
//!
//! Algorithmic primitives live in `crate::segment`, `crate::geometry` and
//! `crate::bands`; this layer owns call order, per-region error capture and
//! the serializable result types.

mod config;
mod result;
mod run;

pub use config::ReaderConfig;
pub use result::{RejectReason, ResistorReading, ScanResult};
pub(crate) use run::{read_image, read_region};
