//! Sobel gradients over the interior of a luminance plane.
//!
//! - Convolves the 3×3 `X`/`Y` kernel pair at every pixel with indices
//!   `1..dim-1`; the outermost frame is never evaluated and stays zero.
//! - Outputs per‑pixel `gx`, `gy`, `mag = sqrt(gx^2+gy^2)`.
//!
//! Complexity: O(W·H); rows are processed in parallel.
use crate::image::{ImageF32, ImageView};
use rayon::prelude::*;

type Kernel3 = [[f32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];

/// Per‑pixel gradient buffers.
#[derive(Clone, Debug, Default)]
pub struct Grad {
    /// Horizontal derivative (convolution with kernel X)
    pub gx: ImageF32,
    /// Vertical derivative (convolution with kernel Y)
    pub gy: ImageF32,
    /// Euclidean magnitude per pixel: `sqrt(gx^2 + gy^2)`
    pub mag: ImageF32,
}

/// Compute Sobel gradients on the interior of `l`. Planes smaller than 3×3
/// produce all-zero outputs.
pub fn sobel_gradients(l: &ImageF32) -> Grad {
    let w = l.w;
    let h = l.h;
    let mut gx = ImageF32::new(w, h);
    let mut gy = ImageF32::new(w, h);
    let mut mag = ImageF32::new(w, h);
    if w < 3 || h < 3 {
        return Grad { gx, gy, mag };
    }

    gx.data
        .par_chunks_mut(w)
        .zip(gy.data.par_chunks_mut(w))
        .zip(mag.data.par_chunks_mut(w))
        .enumerate()
        .filter(|(y, _)| *y >= 1 && *y < h - 1)
        .for_each(|(y, ((out_gx, out_gy), out_mag))| {
            let rows = [l.row(y - 1), l.row(y), l.row(y + 1)];
            for x in 1..w - 1 {
                let mut sum_x = 0.0;
                let mut sum_y = 0.0;
                for (ky, row) in rows.iter().enumerate() {
                    let kx_row = &SOBEL_KERNEL_X[ky];
                    let ky_row = &SOBEL_KERNEL_Y[ky];
                    sum_x += row[x - 1] * kx_row[0] + row[x] * kx_row[1] + row[x + 1] * kx_row[2];
                    sum_y += row[x - 1] * ky_row[0] + row[x] * ky_row[1] + row[x + 1] * ky_row[2];
                }
                out_gx[x] = sum_x;
                out_gy[x] = sum_y;
                out_mag[x] = (sum_x * sum_x + sum_y * sum_y).sqrt();
            }
        });

    Grad { gx, gy, mag }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageViewMut;

    fn step_plane(w: usize, h: usize, split_x: usize) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for y in 0..h {
            for x in 0..w {
                img.set(x, y, if x < split_x { 0.0 } else { 100.0 });
            }
        }
        img
    }

    #[test]
    fn vertical_step_has_horizontal_gradient() {
        let grad = sobel_gradients(&step_plane(8, 6, 4));
        // Columns 3 and 4 straddle the step: 1*100 + 2*100 + 1*100.
        assert_eq!(grad.gx.get(3, 2), 400.0);
        assert_eq!(grad.gx.get(4, 2), 400.0);
        assert_eq!(grad.gy.get(3, 2), 0.0);
        assert_eq!(grad.mag.get(1, 2), 0.0);
    }

    #[test]
    fn border_is_never_evaluated() {
        let grad = sobel_gradients(&step_plane(8, 6, 1));
        for y in 0..6 {
            assert_eq!(grad.mag.get(0, y), 0.0);
            assert_eq!(grad.mag.get(7, y), 0.0);
        }
        for x in 0..8 {
            assert_eq!(grad.mag.get(x, 0), 0.0);
            assert_eq!(grad.mag.get(x, 5), 0.0);
        }
    }
}
