//! Square convolution kernels applied per colour channel.
//!
//! Border samples reuse the nearest valid coordinate (replicate). Alpha is
//! copied from the source pixel unchanged.
use crate::error::{EngineError, Result};
use crate::image::rgba::clamp_round_u8;
use crate::image::{ImageView, PixelBuffer};
use rayon::prelude::*;

/// Fixed sharpening weights (centre 7, edge neighbours -1, corners -0.5).
pub const SHARPEN_3X3: [f32; 9] = [-0.5, -1.0, -0.5, -1.0, 7.0, -1.0, -0.5, -1.0, -0.5];

/// Odd-sized square kernel stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    size: usize,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn new(size: usize, weights: Vec<f32>) -> Result<Self> {
        if size % 2 == 0 {
            return Err(EngineError::invalid_parameter(
                "kernel",
                format!("size must be odd, got {size}"),
            ));
        }
        if weights.len() != size * size {
            return Err(EngineError::invalid_parameter(
                "kernel",
                format!(
                    "{size}x{size} kernel needs {} weights, got {}",
                    size * size,
                    weights.len()
                ),
            ));
        }
        Ok(Self { size, weights })
    }

    pub fn sharpen() -> Self {
        Self {
            size: 3,
            weights: SHARPEN_3X3.to_vec(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    fn radius(&self) -> isize {
        (self.size / 2) as isize
    }
}

/// Convolve R, G and B with `kernel`, clamping samples to the image and the
/// result to [0, 255].
pub fn convolve_rgb(src: &PixelBuffer, kernel: &Kernel) -> PixelBuffer {
    let w = src.width();
    let h = src.height();
    let mut out = PixelBuffer::new(w, h);
    if src.is_empty() {
        return out;
    }
    let r = kernel.radius();

    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            for (x, dst) in dst_row.iter_mut().enumerate() {
                let mut acc = [0.0f64; 3];
                for ky in -r..=r {
                    for kx in -r..=r {
                        let weight =
                            kernel.weights[((ky + r) as usize) * kernel.size + (kx + r) as usize]
                                as f64;
                        let sample = src.get_clamped(x as isize + kx, y as isize + ky);
                        for (c, a) in acc.iter_mut().enumerate() {
                            *a += sample[c] as f64 * weight;
                        }
                    }
                }
                let alpha = src.get(x, y)[3];
                *dst = [
                    clamp_round_u8(acc[0]),
                    clamp_round_u8(acc[1]),
                    clamp_round_u8(acc[2]),
                    alpha,
                ];
            }
        });

    out
}

/// Apply the fixed [`SHARPEN_3X3`] kernel.
pub fn sharpen(src: &PixelBuffer) -> PixelBuffer {
    convolve_rgb(src, &Kernel::sharpen())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_even_kernel() {
        assert!(Kernel::new(2, vec![0.0; 4]).is_err());
        assert!(Kernel::new(3, vec![0.0; 8]).is_err());
        assert!(Kernel::new(3, vec![0.0; 9]).is_ok());
    }

    #[test]
    fn sharpen_weights_sum_to_one() {
        let sum: f32 = SHARPEN_3X3.iter().sum();
        assert_eq!(sum, 1.0);
    }

    #[test]
    fn sharpen_keeps_flat_buffer() {
        let src = PixelBuffer::filled(5, 4, [40, 120, 200, 77]);
        assert_eq!(sharpen(&src), src);
    }

    #[test]
    fn sharpen_boosts_isolated_pixel_and_clamps() {
        let mut src = PixelBuffer::filled(3, 3, [10, 10, 10, 255]);
        src.pixels_mut()[4] = [100, 100, 100, 9];
        let out = sharpen(&src);
        // 7*100 - 6*10 = 640 -> 255; alpha untouched.
        assert_eq!(out.get(1, 1), [255, 255, 255, 9]);
        // Corner neighbour sees -0.5*100 plus replicated border samples.
        let corner = out.get(0, 0)[0];
        assert!(corner < 10, "corner={corner}");
    }
}
