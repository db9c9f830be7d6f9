//! RGB → band color classification over empirical channel ranges.
//!
//! Rules are tested in table order and the first rule whose three channel
//! ranges all contain the sample wins. Samples no rule accepts fall back to
//! silver when the three channels are equal and to gold otherwise.

use super::color::BandColor;

/// Exclusive upper bound that admits channel value 255.
pub const CHANNEL_END: u16 = 256;

/// Closed-open channel interval `[lo, hi)`.
///
/// Bounds are `u16` so a rule can reach 255 with `hi = 256`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ChannelRange {
    pub lo: u16,
    pub hi: u16,
}

impl ChannelRange {
    pub const fn new(lo: u16, hi: u16) -> Self {
        Self { lo, hi }
    }

    #[inline]
    pub fn contains(&self, v: u8) -> bool {
        let v = u16::from(v);
        self.lo <= v && v < self.hi
    }
}

/// One color's acceptance box in RGB space.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorRule {
    pub color: BandColor,
    pub r: ChannelRange,
    pub g: ChannelRange,
    pub b: ChannelRange,
}

impl ColorRule {
    const fn new(color: BandColor, r: (u16, u16), g: (u16, u16), b: (u16, u16)) -> Self {
        Self {
            color,
            r: ChannelRange::new(r.0, r.1),
            g: ChannelRange::new(g.0, g.1),
            b: ChannelRange::new(b.0, b.1),
        }
    }

    #[inline]
    pub fn matches(&self, rgb: [u8; 3]) -> bool {
        self.r.contains(rgb[0]) && self.g.contains(rgb[1]) && self.b.contains(rgb[2])
    }
}

/// Empirical ranges in priority order. Blue and gray have no range.
const DEFAULT_RULES: [ColorRule; 8] = [
    ColorRule::new(BandColor::Black, (0, 73), (0, 73), (0, 73)),
    ColorRule::new(BandColor::Brown, (92, 171), (48, 122), (23, 97)),
    ColorRule::new(BandColor::Red, (213, 225), (48, 105), (58, 110)),
    ColorRule::new(BandColor::Orange, (200, 240), (105, 130), (50, 100)),
    ColorRule::new(BandColor::Yellow, (225, 235), (185, 195), (5, 8)),
    ColorRule::new(BandColor::Green, (8, 15), (80, 90), (45, 50)),
    ColorRule::new(BandColor::Violet, (195, 197), (135, 145), (180, 185)),
    ColorRule::new(BandColor::White, (185, 255), (185, 255), (185, 255)),
];

/// How a classification was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// An empirical range accepted the sample.
    Range,
    /// No range matched; equal channels fell back to silver.
    NeutralFallback,
    /// No range matched; the sample fell back to gold.
    Fallback,
}

impl MatchKind {
    pub const fn code(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::NeutralFallback => "neutral_fallback",
            Self::Fallback => "fallback",
        }
    }

    pub fn is_fallback(self) -> bool {
        self != Self::Range
    }
}

impl std::fmt::Display for MatchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Band color together with the rule kind that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Classification {
    pub color: BandColor,
    pub kind: MatchKind,
}

/// Ordered classification rules.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ColorTable {
    pub rules: Vec<ColorRule>,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.to_vec(),
        }
    }
}

impl ColorTable {
    pub fn classify(&self, rgb: [u8; 3]) -> BandColor {
        self.classify_detailed(rgb).color
    }

    pub fn classify_detailed(&self, rgb: [u8; 3]) -> Classification {
        classify_with_rules(&self.rules, rgb)
    }
}

fn classify_with_rules(rules: &[ColorRule], rgb: [u8; 3]) -> Classification {
    if let Some(rule) = rules.iter().find(|r| r.matches(rgb)) {
        return Classification {
            color: rule.color,
            kind: MatchKind::Range,
        };
    }
    if rgb[0] == rgb[1] && rgb[1] == rgb[2] {
        Classification {
            color: BandColor::Silver,
            kind: MatchKind::NeutralFallback,
        }
    } else {
        Classification {
            color: BandColor::Gold,
            kind: MatchKind::Fallback,
        }
    }
}

/// Classify against the built-in table.
pub fn classify(rgb: [u8; 3]) -> BandColor {
    classify_detailed(rgb).color
}

/// Classify against the built-in table, reporting the match kind.
pub fn classify_detailed(rgb: [u8; 3]) -> Classification {
    classify_with_rules(&DEFAULT_RULES, rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dark_sample_is_black() {
        assert_eq!(classify([10, 10, 10]), BandColor::Black);
        assert_eq!(classify([72, 72, 72]), BandColor::Black);
    }

    #[test]
    fn range_upper_bound_is_exclusive() {
        // 73 leaves black; equal channels then fall back to silver.
        let c = classify_detailed([73, 73, 73]);
        assert_eq!(c.color, BandColor::Silver);
        assert_eq!(c.kind, MatchKind::NeutralFallback);
        // 255 is outside white's range.
        assert_eq!(classify([255, 255, 255]), BandColor::Silver);
    }

    #[test]
    fn representative_samples_hit_their_ranges() {
        let cases = [
            ([130, 85, 60], BandColor::Brown),
            ([219, 76, 84], BandColor::Red),
            ([220, 117, 75], BandColor::Orange),
            ([230, 190, 6], BandColor::Yellow),
            ([11, 85, 47], BandColor::Green),
            ([196, 140, 182], BandColor::Violet),
            ([200, 200, 200], BandColor::White),
        ];
        for (rgb, expected) in cases {
            let c = classify_detailed(rgb);
            assert_eq!(c.color, expected, "{:?}", rgb);
            assert_eq!(c.kind, MatchKind::Range);
        }
    }

    #[test]
    fn unmatched_neutral_is_silver_and_colored_is_gold() {
        assert_eq!(classify([128, 128, 128]), BandColor::Silver);
        let c = classify_detailed([180, 150, 60]);
        assert_eq!(c.color, BandColor::Gold);
        assert_eq!(c.kind, MatchKind::Fallback);
    }

    #[test]
    fn earlier_rules_take_priority() {
        // Inside both the red and orange R ranges; G decides red.
        assert_eq!(classify([220, 100, 80]), BandColor::Red);
        // Same R, G in orange's range only.
        assert_eq!(classify([220, 110, 80]), BandColor::Orange);
    }

    #[test]
    fn custom_table_overrides_defaults() {
        let json = r#"{"rules":[{"color":"blue","r":{"lo":0,"hi":50},"g":{"lo":0,"hi":80},"b":{"lo":150,"hi":255}}]}"#;
        let table: ColorTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.classify([20, 40, 200]), BandColor::Blue);
        assert_eq!(table.classify([10, 10, 10]), BandColor::Silver);
    }

    #[test]
    fn configured_range_can_include_full_scale() {
        let json = r#"{"rules":[{"color":"white","r":{"lo":240,"hi":256},"g":{"lo":240,"hi":256},"b":{"lo":240,"hi":256}}]}"#;
        let table: ColorTable = serde_json::from_str(json).unwrap();
        let c = table.classify_detailed([255, 255, 255]);
        assert_eq!(c.color, BandColor::White);
        assert_eq!(c.kind, MatchKind::Range);
        assert!(!ChannelRange::new(240, 255).contains(255));
        assert!(ChannelRange::new(240, CHANNEL_END).contains(255));
    }

    #[test]
    fn default_table_round_trips_through_json() {
        let table = ColorTable::default();
        let json = serde_json::to_string(&table).unwrap();
        let back: ColorTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
        let empty: ColorTable = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, table);
    }
}
