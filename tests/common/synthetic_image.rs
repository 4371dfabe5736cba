use raster_analysis::image::rgba::Rgba;
use raster_analysis::{Mask, PixelBuffer};

pub const DARK: Rgba = [20, 20, 20, 255];
pub const BRIGHT: Rgba = [230, 230, 230, 255];

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard_rgba(width: usize, height: usize, cell: usize) -> PixelBuffer {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    PixelBuffer::from_fn(width, height, |x, y| {
        if ((x / cell) + (y / cell)) & 1 == 0 {
            [32, 32, 32, 255]
        } else {
            [220, 220, 220, 255]
        }
    })
}

/// Dark frame with a bright filled disc.
pub fn disc_rgba(width: usize, height: usize, center: (f64, f64), radius: f64) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let dx = x as f64 - center.0;
        let dy = y as f64 - center.1;
        if dx.hypot(dy) <= radius {
            BRIGHT
        } else {
            DARK
        }
    })
}

/// Mask containing exactly the pixels with `x + y == k`.
pub fn anti_diagonal_mask(width: usize, height: usize, k: usize) -> Mask {
    Mask::from_fn(width, height, |x, y| x + y == k)
}

/// Mask with only row `y0` set.
pub fn row_mask(width: usize, height: usize, y0: usize) -> Mask {
    Mask::from_fn(width, height, |_, y| y == y0)
}

/// Opaque pixels inside `rects` (inclusive `(x0, y0, x1, y1)`), transparent
/// elsewhere.
pub fn opaque_rects(
    width: usize,
    height: usize,
    rects: &[(usize, usize, usize, usize)],
) -> PixelBuffer {
    PixelBuffer::from_fn(width, height, |x, y| {
        let inside = rects
            .iter()
            .any(|&(x0, y0, x1, y1)| (x0..=x1).contains(&x) && (y0..=y1).contains(&y));
        if inside {
            [60, 120, 60, 255]
        } else {
            [0, 0, 0, 0]
        }
    })
}
