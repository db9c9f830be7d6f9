use image::{ImageBuffer, Luma};

/// Connected-component label grid: 0 = background, 1..N = components.
pub type LabelImage = ImageBuffer<Luma<u32>, Vec<u32>>;

/// Axis-aligned box with inclusive pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct BoundingBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl BoundingBox {
    fn at(x: u32, y: u32) -> Self {
        Self {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    fn extend(&mut self, x: u32, y: u32) {
        self.left = self.left.min(x);
        self.right = self.right.max(x);
        self.top = self.top.min(y);
        self.bottom = self.bottom.max(y);
    }

    pub fn width(&self) -> u32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top + 1
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.left..=self.right).contains(&x) && (self.top..=self.bottom).contains(&y)
    }
}

/// Tightest box around every pixel carrying `label`, or `None` if absent.
pub fn bounding_box(labels: &LabelImage, label: u32) -> Option<BoundingBox> {
    let mut bbox: Option<BoundingBox> = None;
    for (x, y, p) in labels.enumerate_pixels() {
        if p[0] != label {
            continue;
        }
        match bbox.as_mut() {
            Some(b) => b.extend(x, y),
            None => bbox = Some(BoundingBox::at(x, y)),
        }
    }
    bbox
}

/// Per-label box and pixel count for every non-zero label, in one scan.
///
/// Index `i` holds label `i + 1`; labels absent from the grid are `None`.
pub fn component_stats(labels: &LabelImage) -> Vec<Option<(BoundingBox, usize)>> {
    let max_label = labels.pixels().map(|p| p[0]).max().unwrap_or(0) as usize;
    let mut stats: Vec<Option<(BoundingBox, usize)>> = vec![None; max_label];
    for (x, y, p) in labels.enumerate_pixels() {
        let l = p[0] as usize;
        if l == 0 {
            continue;
        }
        let slot = &mut stats[l - 1];
        if let Some((b, n)) = slot {
            b.extend(x, y);
            *n += 1;
        } else {
            *slot = Some((BoundingBox::at(x, y), 1));
        }
    }
    stats
}
