use std::path::Path;

use crate::bands::classify::CHANNEL_END;
use crate::bands::{BandProfileConfig, ColorTable};
use crate::geometry::CanonicalConfig;
use crate::segment::SegmentConfig;

/// Top-level reader configuration.
///
/// Every section falls back to its defaults when absent from JSON.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Foreground threshold and small-component filter.
    pub segment: SegmentConfig,
    /// Canonical crop window.
    pub canonical: CanonicalConfig,
    /// Row-profile band extraction.
    pub profile: BandProfileConfig,
    /// RGB classification rules.
    pub colors: ColorTable,
}

impl ReaderConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.canonical.crop_width < 2 || self.canonical.crop_height < 2 {
            return Err(format!(
                "canonical crop must be at least 2x2, got {}x{}",
                self.canonical.crop_width, self.canonical.crop_height
            ));
        }
        let f = self.profile.strip_fraction;
        if !(f > 0.0 && f <= 1.0) {
            return Err(format!("profile.strip_fraction must be in (0, 1], got {}", f));
        }
        for rule in &self.colors.rules {
            for (name, range) in [("r", rule.r), ("g", rule.g), ("b", rule.b)] {
                if range.hi > CHANNEL_END {
                    return Err(format!(
                        "color rule '{}' {} range ends at {}, past {}",
                        rule.color, name, range.hi, CHANNEL_END
                    ));
                }
                if range.lo >= range.hi {
                    return Err(format!(
                        "color rule '{}' has an empty {} range [{}, {})",
                        rule.color, name, range.lo, range.hi
                    ));
                }
            }
        }
        Ok(())
    }
}
