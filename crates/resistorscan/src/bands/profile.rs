//! Band extraction from a canonical (axis-vertical) resistor image.
//!
//! Each row is reduced to a mean color, classified, and consecutive rows with
//! the same color become a [`BandRun`]. The body color is removed by dropping
//! the color that covers the most rows; short runs and ignored colors are then
//! dropped, and equal neighbours separated only by short runs are merged.

use image::{GrayImage, RgbImage};

use super::classify::{Classification, ColorTable, MatchKind};
use super::color::BandColor;

const DEFAULT_STRIP_FRACTION: f32 = 0.5;
const DEFAULT_MIN_RUN_ROWS: u32 = 3;

fn default_strip_fraction() -> f32 {
    DEFAULT_STRIP_FRACTION
}

fn default_min_run_rows() -> u32 {
    DEFAULT_MIN_RUN_ROWS
}

fn default_ignore() -> Vec<BandColor> {
    vec![BandColor::White]
}

fn default_drop_dominant() -> bool {
    true
}

/// Row-profile band extraction parameters.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandProfileConfig {
    /// Width of the centered column strip averaged per row, as a fraction of
    /// the mask's column extent (1.0 = full extent).
    #[serde(default = "default_strip_fraction")]
    pub strip_fraction: f32,
    /// Runs covering fewer rows are discarded as edge artifacts.
    #[serde(default = "default_min_run_rows")]
    pub min_run_rows: u32,
    /// Colors never reported as bands.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<BandColor>,
    /// Drop the color covering the most rows (the resistor body).
    #[serde(default = "default_drop_dominant")]
    pub drop_dominant: bool,
}

impl Default for BandProfileConfig {
    fn default() -> Self {
        Self {
            strip_fraction: DEFAULT_STRIP_FRACTION,
            min_run_rows: DEFAULT_MIN_RUN_ROWS,
            ignore: default_ignore(),
            drop_dominant: true,
        }
    }
}

/// Consecutive rows sharing one band color.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandRun {
    pub color: BandColor,
    pub kind: MatchKind,
    /// First row of the run.
    pub row_start: u32,
    /// One past the last row of the run.
    pub row_end: u32,
    /// Row-weighted mean color of the run.
    pub mean_rgb: [u8; 3],
}

impl BandRun {
    pub fn rows(&self) -> u32 {
        self.row_end - self.row_start
    }
}

/// Per-row mean of each channel over the full row, truncated to integers.
pub fn vertical_color_distribution(image: &RgbImage) -> Vec<[u8; 3]> {
    let (w, h) = image.dimensions();
    if w == 0 {
        return vec![[0; 3]; h as usize];
    }
    (0..h)
        .map(|y| {
            let mut sum = [0u64; 3];
            for x in 0..w {
                let p = image.get_pixel(x, y).0;
                for c in 0..3 {
                    sum[c] += u64::from(p[c]);
                }
            }
            sum.map(|s| (s / u64::from(w)) as u8)
        })
        .collect()
}

fn mask_columns(mask: &GrayImage) -> Option<(u32, u32)> {
    let mut span: Option<(u32, u32)> = None;
    for (x, _, p) in mask.enumerate_pixels() {
        if p[0] == 0 {
            continue;
        }
        span = Some(match span {
            Some((lo, hi)) => (lo.min(x), hi.max(x)),
            None => (x, x),
        });
    }
    span
}

/// Per-row mean over a centered column strip, restricted to mask pixels.
///
/// The strip covers `strip_fraction` of the mask's column extent (of the
/// image width without a mask). Rows without any mask pixel inside the strip
/// yield `None`.
pub fn strip_row_means(
    image: &RgbImage,
    mask: Option<&GrayImage>,
    strip_fraction: f32,
) -> Vec<Option<[u8; 3]>> {
    let (w, h) = image.dimensions();
    let (lo, hi) = match mask {
        Some(m) => match mask_columns(m) {
            Some((lo, hi)) => (lo, hi.min(w.saturating_sub(1)) + 1),
            None => return vec![None; h as usize],
        },
        None => (0, w),
    };
    let extent = hi.saturating_sub(lo);
    let strip_w = (extent as f32 * strip_fraction.clamp(0.0, 1.0)).round() as u32;
    let strip_w = strip_w.clamp(1, extent.max(1));
    let x0 = lo + extent.saturating_sub(strip_w) / 2;
    let x1 = (x0 + strip_w).min(hi);

    (0..h)
        .map(|y| {
            let mut sum = [0u64; 3];
            let mut n = 0u64;
            for x in x0..x1 {
                let inside = match mask {
                    Some(m) => x < m.width() && y < m.height() && m.get_pixel(x, y)[0] > 0,
                    None => true,
                };
                if !inside {
                    continue;
                }
                let p = image.get_pixel(x, y).0;
                for c in 0..3 {
                    sum[c] += u64::from(p[c]);
                }
                n += 1;
            }
            (n > 0).then(|| sum.map(|s| (s / n) as u8))
        })
        .collect()
}

struct RowClass {
    rgb: [u8; 3],
    class: Classification,
}

fn runs_from_rows(rows: &[Option<RowClass>]) -> Vec<BandRun> {
    let mut runs: Vec<BandRun> = Vec::new();
    let mut acc = [0u64; 3];
    let mut open: Option<(usize, Classification)> = None;

    let mut close = |start: usize, end: usize, class: Classification, acc: &mut [u64; 3]| {
        let n = (end - start) as u64;
        runs.push(BandRun {
            color: class.color,
            kind: class.kind,
            row_start: start as u32,
            row_end: end as u32,
            mean_rgb: acc.map(|s| (s / n) as u8),
        });
        *acc = [0; 3];
    };

    for (y, row) in rows.iter().enumerate() {
        match (row, open) {
            (Some(r), Some((_, class))) if r.class.color == class.color => {}
            (row, Some((start, class))) => {
                close(start, y, class, &mut acc);
                open = row.as_ref().map(|r| (y, r.class));
            }
            (Some(r), None) => open = Some((y, r.class)),
            (None, None) => {}
        }
        if let Some(r) = row {
            for c in 0..3 {
                acc[c] += u64::from(r.rgb[c]);
            }
        }
    }
    if let Some((start, class)) = open {
        close(start, rows.len(), class, &mut acc);
    }
    runs
}

fn dominant_color(runs: &[BandRun]) -> Option<BandColor> {
    let mut counts: Vec<(BandColor, u32)> = Vec::new();
    for run in runs {
        match counts.iter_mut().find(|(c, _)| *c == run.color) {
            Some((_, n)) => *n += run.rows(),
            None => counts.push((run.color, run.rows())),
        }
    }
    counts
        .into_iter()
        .rev()
        .max_by_key(|&(_, n)| n)
        .map(|(c, _)| c)
}

fn absorb(prev: &mut BandRun, run: &BandRun) {
    let (a, b) = (u64::from(prev.rows()), u64::from(run.rows()));
    for c in 0..3 {
        let s = u64::from(prev.mean_rgb[c]) * a + u64::from(run.mean_rgb[c]) * b;
        prev.mean_rgb[c] = (s / (a + b)) as u8;
    }
    if run.kind == MatchKind::Range {
        prev.kind = MatchKind::Range;
    }
    prev.row_end = run.row_end;
}

/// Extract the ordered band runs (top to bottom) of a canonical image.
pub fn extract_bands(
    image: &RgbImage,
    mask: Option<&GrayImage>,
    colors: &ColorTable,
    config: &BandProfileConfig,
) -> Vec<BandRun> {
    let rows: Vec<Option<RowClass>> = strip_row_means(image, mask, config.strip_fraction)
        .into_iter()
        .map(|m| {
            m.map(|rgb| RowClass {
                rgb,
                class: colors.classify_detailed(rgb),
            })
        })
        .collect();

    let runs = runs_from_rows(&rows);
    let body = if config.drop_dominant {
        dominant_color(&runs)
    } else {
        None
    };
    tracing::trace!(raw_runs = runs.len(), ?body, "row profile classified");

    // Body and ignored runs separate bands; short runs are skipped without
    // separating, so a band split by an edge artifact is merged back.
    let mut kept: Vec<BandRun> = Vec::new();
    let mut separated = true;
    for run in runs {
        let long = run.rows() >= config.min_run_rows;
        if Some(run.color) == body || config.ignore.contains(&run.color) {
            separated |= long;
            continue;
        }
        if !long {
            continue;
        }
        match kept.last_mut() {
            Some(prev) if !separated && prev.color == run.color => absorb(prev, &run),
            _ => kept.push(run),
        }
        separated = false;
    }
    kept
}
