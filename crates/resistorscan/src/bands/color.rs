//! Band colors and their coding table.
//!
//! Every color maps to a fixed [`BandSpec`]: its significant-digit value, its
//! multiplier, the tolerance it encodes in the tolerance position and the
//! temperature coefficient it encodes in the sixth position. Colors that have
//! no meaning in a given position carry `None` (digit/multiplier) or the
//! position's default (tolerance 20 %, tempco 0 ppm/K).

use std::str::FromStr;

/// Tolerance (percent) encoded by a color with no tolerance meaning.
pub const DEFAULT_TOLERANCE_PERCENT: f64 = 20.0;

/// Temperature coefficient (ppm/K) encoded by a color with no tempco meaning.
pub const DEFAULT_TEMPCO_PPM_PER_K: f64 = 0.0;

/// One painted band color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandColor {
    Black,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Violet,
    Gray,
    White,
    Gold,
    Silver,
    /// No band / unknown.
    None,
}

/// What a color means in each band position.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandSpec {
    /// Significant-digit value (0–9).
    pub digit: Option<u8>,
    /// Multiplier applied to the significant digits.
    pub multiplier: Option<f64>,
    /// Tolerance in percent when the color sits in the tolerance position.
    pub tolerance_percent: f64,
    /// Temperature coefficient in ppm/K when the color sits in the sixth position.
    pub tempco_ppm_per_k: f64,
}

impl BandSpec {
    const fn new(
        digit: Option<u8>,
        multiplier: Option<f64>,
        tolerance_percent: f64,
        tempco_ppm_per_k: f64,
    ) -> Self {
        Self {
            digit,
            multiplier,
            tolerance_percent,
            tempco_ppm_per_k,
        }
    }
}

impl BandColor {
    /// All colors in digit order, followed by gold, silver and none.
    pub const ALL: [BandColor; 13] = [
        Self::Black,
        Self::Brown,
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Green,
        Self::Blue,
        Self::Violet,
        Self::Gray,
        Self::White,
        Self::Gold,
        Self::Silver,
        Self::None,
    ];

    /// Coding table entry for this color.
    pub const fn spec(self) -> BandSpec {
        const D: f64 = DEFAULT_TOLERANCE_PERCENT;
        const T: f64 = DEFAULT_TEMPCO_PPM_PER_K;
        match self {
            Self::Black => BandSpec::new(Some(0), Some(1.0), D, 250.0),
            Self::Brown => BandSpec::new(Some(1), Some(1e1), 1.0, 100.0),
            Self::Red => BandSpec::new(Some(2), Some(1e2), 2.0, 50.0),
            Self::Orange => BandSpec::new(Some(3), Some(1e3), D, 15.0),
            Self::Yellow => BandSpec::new(Some(4), Some(1e4), D, 25.0),
            Self::Green => BandSpec::new(Some(5), Some(1e5), 0.5, 20.0),
            Self::Blue => BandSpec::new(Some(6), Some(1e6), 0.25, 10.0),
            Self::Violet => BandSpec::new(Some(7), Some(1e7), 0.1, 5.0),
            Self::Gray => BandSpec::new(Some(8), Some(1e8), 0.05, T),
            Self::White => BandSpec::new(Some(9), Some(1e9), D, T),
            Self::Gold => BandSpec::new(None, Some(0.1), 5.0, T),
            Self::Silver => BandSpec::new(None, Some(0.01), 10.0, T),
            Self::None => BandSpec::new(None, None, D, T),
        }
    }

    pub fn digit(self) -> Option<u8> {
        self.spec().digit
    }

    pub fn multiplier(self) -> Option<f64> {
        self.spec().multiplier
    }

    pub fn tolerance_percent(self) -> f64 {
        self.spec().tolerance_percent
    }

    pub fn tempco_ppm_per_k(self) -> f64 {
        self.spec().tempco_ppm_per_k
    }

    /// Stable lowercase name (matches the serde representation).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::Brown => "brown",
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Blue => "blue",
            Self::Violet => "violet",
            Self::Gray => "gray",
            Self::White => "white",
            Self::Gold => "gold",
            Self::Silver => "silver",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for BandColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a known band color name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBandColorError(pub String);

impl std::fmt::Display for ParseBandColorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown band color '{}'", self.0)
    }
}

impl std::error::Error for ParseBandColorError {}

impl FromStr for BandColor {
    type Err = ParseBandColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        if key == "grey" {
            return Ok(Self::Gray);
        }
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == key)
            .ok_or_else(|| ParseBandColorError(s.to_string()))
    }
}
