//! Geometric and intensity descriptors of a labelled region.
//!
//! Intensities use BT.601 luminance. `median` takes the lower middle element
//! for even counts; `entropy` is measured in bits over the histogram of
//! luminance values rounded to the nearest integer.
use super::labeling::Component;
use crate::edges::luma::{luminance, BT601};
use crate::image::{ImageView, PixelBuffer};
use serde::Serialize;
use std::collections::BTreeMap;

/// Inclusive bounding box of a region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
}

impl BoundingBox {
    fn of(pixels: &[(u32, u32)]) -> Option<Self> {
        let (&(x0, y0), rest) = pixels.split_first()?;
        let mut bbox = BoundingBox {
            min_x: x0,
            max_x: x0,
            min_y: y0,
            max_y: y0,
        };
        for &(x, y) in rest {
            bbox.min_x = bbox.min_x.min(x);
            bbox.max_x = bbox.max_x.max(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_y = bbox.max_y.max(y);
        }
        Some(bbox)
    }
}

/// Immutable per-region descriptors.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStats {
    pub bbox: BoundingBox,
    /// Rounded midpoint of the bounding box.
    pub center: (i64, i64),
    pub width: u32,
    pub height: u32,
    /// `round(hypot(max_x - min_x, max_y - min_y))`.
    pub diagonal: i64,
    pub pixel_count: usize,
    pub mean: f64,
    pub median: f64,
    /// Mean of squared luminance.
    pub energy: f64,
    /// Shannon entropy in bits.
    pub entropy: f64,
}

impl RegionStats {
    /// Descriptors of `component` sampled from `buffer`. `None` for an empty
    /// component.
    pub fn compute(component: &Component, buffer: &PixelBuffer) -> Option<Self> {
        let bbox = BoundingBox::of(&component.pixels)?;
        let values: Vec<f64> = component
            .pixels
            .iter()
            .map(|&(x, y)| luminance(buffer.get(x as usize, y as usize), BT601))
            .collect();
        Some(Self::from_parts(bbox, &values))
    }

    pub(crate) fn from_parts(bbox: BoundingBox, values: &[f64]) -> Self {
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let energy = values.iter().map(|v| v * v).sum::<f64>() / n;

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        let median = sorted[(sorted.len() - 1) / 2];

        let dx = (bbox.max_x - bbox.min_x) as f64;
        let dy = (bbox.max_y - bbox.min_y) as f64;
        RegionStats {
            bbox,
            center: (
                ((bbox.min_x + bbox.max_x) as f64 / 2.0).round() as i64,
                ((bbox.min_y + bbox.max_y) as f64 / 2.0).round() as i64,
            ),
            width: bbox.max_x - bbox.min_x + 1,
            height: bbox.max_y - bbox.min_y + 1,
            diagonal: dx.hypot(dy).round() as i64,
            pixel_count: values.len(),
            mean,
            median,
            energy,
            entropy: entropy(values),
        }
    }
}

/// `-Σ p·log2(p)` over the histogram of rounded values.
pub fn entropy(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut histogram: BTreeMap<i64, usize> = BTreeMap::new();
    for v in values {
        *histogram.entry(v.round() as i64).or_insert(0) += 1;
    }
    let total = values.len() as f64;
    let bits: f64 = histogram
        .values()
        .map(|&count| {
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum();
    // A single-bin histogram sums to -0.0.
    if bits > 0.0 {
        bits
    } else {
        0.0
    }
}
