//! Per-pixel foreground classifiers producing binary masks.
use crate::image::{ImageView, Mask, PixelBuffer, Rgba};
use serde::{Deserialize, Serialize};

/// Decides whether a single pixel belongs to the foreground.
pub trait PixelClassifier: Sync {
    fn is_foreground(&self, px: Rgba) -> bool;
}

/// Green-dominant colour rule: `G > k·R`, `G > k·B` and each channel inside
/// its inclusive range.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VegetationClassifier {
    /// Inclusive per-channel lower bounds `[R, G, B]`.
    pub min: [u8; 3],
    /// Inclusive per-channel upper bounds `[R, G, B]`.
    pub max: [u8; 3],
    /// Required green dominance factor over red and blue.
    pub dominance: f64,
}

impl Default for VegetationClassifier {
    fn default() -> Self {
        Self {
            min: [0, 50, 0],
            max: [100, 150, 100],
            dominance: 1.2,
        }
    }
}

impl PixelClassifier for VegetationClassifier {
    #[inline]
    fn is_foreground(&self, px: Rgba) -> bool {
        let [r, g, b, _] = px;
        let gf = g as f64;
        gf > self.dominance * r as f64
            && gf > self.dominance * b as f64
            && (self.min[0]..=self.max[0]).contains(&r)
            && (self.min[1]..=self.max[1]).contains(&g)
            && (self.min[2]..=self.max[2]).contains(&b)
    }
}

/// Apply `classifier` to every pixel.
pub fn classify<C: PixelClassifier + ?Sized>(buffer: &PixelBuffer, classifier: &C) -> Mask {
    let w = buffer.width();
    Mask::from_fn(w, buffer.height(), |x, y| {
        classifier.is_foreground(buffer.pixels()[y * w + x])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vegetation_rule() {
        let c = VegetationClassifier::default();
        assert!(c.is_foreground([30, 120, 40, 255]));
        // Green too bright.
        assert!(!c.is_foreground([30, 160, 40, 255]));
        // Not dominant enough: 1.2 * 90 = 108 > 100.
        assert!(!c.is_foreground([90, 100, 20, 255]));
        // Bounds are inclusive.
        assert!(c.is_foreground([0, 50, 0, 0]));
    }

    #[test]
    fn classify_marks_matching_pixels() {
        let buf = PixelBuffer::from_fn(4, 2, |x, _| {
            if x % 2 == 0 {
                [20, 100, 20, 255]
            } else {
                [200, 200, 200, 255]
            }
        });
        let mask = classify(&buf, &VegetationClassifier::default());
        assert_eq!(mask.count(), 4);
        assert!(mask.is_set(0, 1) && !mask.is_set(1, 1));
    }
}
