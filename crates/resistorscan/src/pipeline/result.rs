use crate::bands::{BandColor, BandRun, ResistorValue};
use crate::geometry::Centroid;
use crate::segment::BoundingBox;

/// Stable reason code for a region that produced no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    TooFewBands,
    TooManyBands,
    InvalidBand,
    DegenerateRegion,
}

impl RejectReason {
    pub const fn code(self) -> &'static str {
        match self {
            Self::TooFewBands => "too_few_bands",
            Self::TooManyBands => "too_many_bands",
            Self::InvalidBand => "invalid_band",
            Self::DegenerateRegion => "degenerate_region",
        }
    }
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome for one segmented region.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResistorReading {
    /// Component label.
    pub label: u32,
    /// Box in full-image coordinates.
    pub bbox: BoundingBox,
    /// Component pixel count.
    pub pixel_count: usize,
    /// Mask centroid in full-image coordinates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<Centroid>,
    /// Body axis direction in degrees (image frame, y down).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axis_angle_deg: Option<f64>,
    /// Rotation applied to reach the canonical view.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_deg: Option<f64>,
    /// Band runs top to bottom in the canonical view.
    pub bands: Vec<BandRun>,
    /// Decoded value, when decoding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<ResistorValue>,
    /// Why no value was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject: Option<RejectReason>,
    /// Human-readable detail for `reject`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reject_detail: Option<String>,
}

impl ResistorReading {
    /// Band colors in canonical order.
    pub fn band_colors(&self) -> Vec<BandColor> {
        self.bands.iter().map(|b| b.color).collect()
    }

    /// Whether any band came from a fallback rule rather than a range.
    pub fn has_fallback_band(&self) -> bool {
        self.bands.iter().any(|b| b.kind.is_fallback())
    }
}

/// Full scan result for a single image.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ScanResult {
    /// Image dimensions [width, height].
    pub image_size: [u32; 2],
    /// One entry per kept region, in ascending label order.
    pub readings: Vec<ResistorReading>,
}

impl ScanResult {
    /// Construct an empty result for an image with the provided dimensions.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            image_size: [width, height],
            readings: Vec::new(),
        }
    }

    /// Readings that decoded to a value.
    pub fn decoded(&self) -> impl Iterator<Item = (&ResistorReading, &ResistorValue)> {
        self.readings
            .iter()
            .filter_map(|r| r.value.as_ref().map(|v| (r, v)))
    }
}
