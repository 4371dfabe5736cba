//! Luminance conversion.
//!
//! Edge detection uses BT.709 weights; region statistics use BT.601.
use crate::image::{ImageF32, ImageView, ImageViewMut, PixelBuffer, Rgba};
use rayon::prelude::*;

/// BT.709 weights `[R, G, B]`.
pub const BT709: [f64; 3] = [0.2126, 0.7152, 0.0722];
/// BT.601 weights `[R, G, B]`.
pub const BT601: [f64; 3] = [0.299, 0.587, 0.114];

/// Weighted sum of the colour channels; alpha is ignored.
#[inline]
pub fn luminance(px: Rgba, weights: [f64; 3]) -> f64 {
    weights[0] * px[0] as f64 + weights[1] * px[1] as f64 + weights[2] * px[2] as f64
}

/// BT.709 luminance plane quantized to the byte grid (round half to even),
/// the representation the Sobel stage convolves.
pub fn luminance_plane(buffer: &PixelBuffer) -> ImageF32 {
    let mut out = ImageF32::new(buffer.width(), buffer.height());
    if out.w == 0 {
        return out;
    }
    out.data
        .par_chunks_mut(buffer.width())
        .zip(buffer.pixels().par_chunks(buffer.width()))
        .for_each(|(dst, src)| {
            for (d, &px) in dst.iter_mut().zip(src) {
                *d = luminance(px, BT709).clamp(0.0, 255.0).round_ties_even() as f32;
            }
        });
    out
}

/// Copy a scalar plane back into RGB for visualization (alpha opaque).
pub fn plane_to_buffer(plane: &ImageF32) -> PixelBuffer {
    let mut out = PixelBuffer::new(plane.w, plane.h);
    for (y, row) in plane.rows().enumerate() {
        let dst = out.row_mut(y);
        for (d, &v) in dst.iter_mut().zip(row) {
            let b = crate::image::rgba::clamp_round_u8(v as f64);
            *d = [b, b, b, 255];
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        assert!((BT709.iter().sum::<f64>() - 1.0).abs() < 1e-9);
        assert!((BT601.iter().sum::<f64>() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn plane_is_quantized() {
        let buf = PixelBuffer::filled(3, 2, [10, 20, 30, 0]);
        let plane = luminance_plane(&buf);
        // 0.2126*10 + 0.7152*20 + 0.0722*30 = 18.596
        assert!(plane.data.iter().all(|&v| v == 19.0));
    }
}
