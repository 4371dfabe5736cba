//! Edge extraction: luminance, Sobel gradients and thresholding to a binary
//! edge mask, plus the fixed sharpening convolution.
//!
//! - Luminance uses BT.709 weights and is quantized to the byte grid.
//! - Gradients are evaluated on interior pixels only; the 1‑pixel frame of
//!   the mask is always background.
//! - A pixel is an edge when its magnitude is strictly above the threshold.

pub mod grad;
pub mod kernel;
pub mod luma;

pub use grad::{sobel_gradients, Grad};
pub use kernel::{convolve_rgb, sharpen, Kernel, SHARPEN_3X3};
pub use luma::{luminance, luminance_plane, BT601, BT709};

use crate::image::mask::MASK_ON;
use crate::image::{EdgeMask, ImageView, PixelBuffer};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Default Sobel magnitude threshold.
pub const DEFAULT_EDGE_THRESHOLD: f32 = 150.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeParams {
    /// Magnitude a pixel must exceed to be marked as an edge.
    pub threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

/// Sobel edge detector producing a 0/255 mask.
#[derive(Clone, Debug, Default)]
pub struct EdgeDetector {
    params: EdgeParams,
}

impl EdgeDetector {
    pub fn new(params: EdgeParams) -> Self {
        Self { params }
    }

    pub fn with_threshold(threshold: f32) -> Self {
        Self::new(EdgeParams { threshold })
    }

    pub fn params(&self) -> &EdgeParams {
        &self.params
    }

    /// Luminance gradients of `buffer`, useful for visual diagnostics.
    pub fn gradients(&self, buffer: &PixelBuffer) -> Grad {
        sobel_gradients(&luminance_plane(buffer))
    }

    /// Threshold the gradient magnitude into an edge mask.
    pub fn detect(&self, buffer: &PixelBuffer) -> EdgeMask {
        let grad = self.gradients(buffer);
        self.threshold(&grad)
    }

    /// Mask from precomputed gradients.
    pub fn threshold(&self, grad: &Grad) -> EdgeMask {
        let w = grad.mag.width();
        let h = grad.mag.height();
        let mut mask = EdgeMask::new(w, h);
        if w < 3 || h < 3 {
            return mask;
        }
        let threshold = self.params.threshold;
        mask.as_raw_mut()
            .par_chunks_mut(w)
            .zip(grad.mag.data.par_chunks(w))
            .for_each(|(dst, mag)| {
                for (d, &m) in dst.iter_mut().zip(mag) {
                    if m > threshold {
                        *d = MASK_ON;
                    }
                }
            });
        mask
    }
}
