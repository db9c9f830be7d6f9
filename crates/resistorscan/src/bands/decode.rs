//! Positional decoding of a band sequence into a resistance value.
//!
//! Layout by sequence length:
//!
//! | bands | digits | multiplier | tolerance | tempco |
//! |-------|--------|------------|-----------|--------|
//! | 3     | 0..2   | 2          | (20 %)    | (0)    |
//! | 4     | 0..2   | 2          | 3         | (0)    |
//! | 5     | 0..3   | 3          | 4         | (0)    |
//! | 6     | 0..3   | 3          | 4         | 5      |
//!
//! A gold band can only sit at the tolerance end, so a sequence with gold in
//! one of its first two positions was read back-to-front and is reversed.

use super::color::{BandColor, DEFAULT_TEMPCO_PPM_PER_K, DEFAULT_TOLERANCE_PERCENT};

/// Shortest decodable band sequence.
pub const MIN_BANDS: usize = 3;
/// Longest decodable band sequence.
pub const MAX_BANDS: usize = 6;

/// Decoded resistor value.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ResistorValue {
    /// Resistance in ohms.
    pub ohms: f64,
    /// Tolerance in percent.
    pub tolerance_percent: f64,
    /// Temperature coefficient in ppm/K.
    pub temperature_coefficient_ppm_per_k: f64,
}

/// Band validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Sequence length outside `[MIN_BANDS, MAX_BANDS]`.
    BandCount {
        /// Number of bands supplied.
        got: usize,
    },
    /// A significant-digit position holds a color without a digit value.
    NotADigit {
        /// Zero-based position after orientation.
        position: usize,
        color: BandColor,
    },
    /// The multiplier position holds a color without a multiplier.
    NotAMultiplier { color: BandColor },
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BandCount { got } => write!(
                f,
                "band count must be between {} and {}, got {}",
                MIN_BANDS, MAX_BANDS, got
            ),
            Self::NotADigit { position, color } => {
                write!(f, "band {} ({}) has no digit value", position, color)
            }
            Self::NotAMultiplier { color } => {
                write!(f, "multiplier band ({}) has no multiplier value", color)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Return the bands in reading order (reversed when gold leads).
pub fn oriented(bands: &[BandColor]) -> Vec<BandColor> {
    let gold_leads = bands.iter().take(2).any(|&c| c == BandColor::Gold);
    if gold_leads {
        bands.iter().rev().copied().collect()
    } else {
        bands.to_vec()
    }
}

/// Decode an ordered band sequence.
pub fn decode(bands: &[BandColor]) -> Result<ResistorValue, DecodeError> {
    let n = bands.len();
    if !(MIN_BANDS..=MAX_BANDS).contains(&n) {
        return Err(DecodeError::BandCount { got: n });
    }
    let bands = oriented(bands);

    let n_digits = if n <= 4 { 2 } else { 3 };
    let mut significant: u32 = 0;
    for (position, &color) in bands[..n_digits].iter().enumerate() {
        let digit = color
            .digit()
            .ok_or(DecodeError::NotADigit { position, color })?;
        significant = significant * 10 + u32::from(digit);
    }

    let mult_color = bands[n_digits];
    let multiplier = mult_color
        .multiplier()
        .ok_or(DecodeError::NotAMultiplier { color: mult_color })?;

    let tolerance_percent = bands
        .get(n_digits + 1)
        .map_or(DEFAULT_TOLERANCE_PERCENT, |c| c.tolerance_percent());
    let temperature_coefficient_ppm_per_k = if n == MAX_BANDS {
        bands[MAX_BANDS - 1].tempco_ppm_per_k()
    } else {
        DEFAULT_TEMPCO_PPM_PER_K
    };

    Ok(ResistorValue {
        ohms: f64::from(significant) * multiplier,
        tolerance_percent,
        temperature_coefficient_ppm_per_k,
    })
}
