//! Per-pixel operations on the colour channels plus the box blur and channel
//! histograms.
//!
//! Results are stored the way a clamped byte array stores a float: clamped
//! to [0, 255] and rounded half to even.
use crate::error::{EngineError, Result};
use crate::image::rgba::clamp_round_u8;
use crate::image::{ImageView, PixelBuffer, Rgba};
use rayon::prelude::*;
use serde::Serialize;

pub const DEFAULT_POSTERIZE_LEVELS: u32 = 5;
pub const DEFAULT_THRESHOLD: f64 = 128.0;
pub const DEFAULT_BLUR_RADIUS: usize = 3;

#[inline]
fn rgb_mean(px: &Rgba) -> f64 {
    (px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0
}

fn map_rgb(buffer: &mut PixelBuffer, f: impl Fn(&mut Rgba) + Sync + Send) {
    buffer.pixels_mut().par_iter_mut().for_each(f);
}

/// Replace R, G and B with their mean.
pub fn grayscale(buffer: &mut PixelBuffer) {
    map_rgb(buffer, |px| {
        let v = clamp_round_u8(rgb_mean(px));
        px[..3].fill(v);
    });
}

/// Quantize each colour channel to `levels` evenly spaced values.
pub fn posterize(buffer: &mut PixelBuffer, levels: u32) -> Result<()> {
    if levels < 2 {
        return Err(EngineError::invalid_parameter(
            "levels",
            format!("posterize needs at least 2 levels, got {levels}"),
        ));
    }
    let steps = (levels - 1) as f64;
    let step = 255.0 / steps;
    let mut lut = [0u8; 256];
    for (c, out) in lut.iter_mut().enumerate() {
        *out = clamp_round_u8((c as f64 / 255.0 * steps).floor() * step);
    }
    map_rgb(buffer, |px| {
        for c in &mut px[..3] {
            *c = lut[*c as usize];
        }
    });
    Ok(())
}

/// Binarize on the RGB mean: 255 when strictly above `threshold`, else 0.
pub fn threshold(buffer: &mut PixelBuffer, threshold: f64) {
    map_rgb(buffer, |px| {
        let v = if rgb_mean(px) > threshold { 255 } else { 0 };
        px[..3].fill(v);
    });
}

pub fn invert(buffer: &mut PixelBuffer) {
    map_rgb(buffer, |px| {
        for c in &mut px[..3] {
            *c = 255 - *c;
        }
    });
}

/// Mean of the in-bounds `(2r+1)²` window over all four channels.
pub fn box_blur(src: &PixelBuffer, radius: usize) -> PixelBuffer {
    let (w, h) = (src.width(), src.height());
    let mut out = PixelBuffer::new(w, h);
    if src.is_empty() {
        return out;
    }
    out.pixels_mut()
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(h - 1);
            for (x, dst) in dst_row.iter_mut().enumerate() {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(w - 1);
                let mut sum = [0u32; 4];
                for yy in y0..=y1 {
                    for px in &src.row(yy)[x0..=x1] {
                        for (s, &v) in sum.iter_mut().zip(px) {
                            *s += v as u32;
                        }
                    }
                }
                let count = ((y1 - y0 + 1) * (x1 - x0 + 1)) as f64;
                *dst = sum.map(|s| clamp_round_u8(s as f64 / count));
            }
        });
    out
}

/// Per-channel 256-bin counts of R, G and B.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChannelHistograms {
    pub red: Vec<u32>,
    pub green: Vec<u32>,
    pub blue: Vec<u32>,
}

pub fn channel_histograms(buffer: &PixelBuffer) -> ChannelHistograms {
    let mut hist = ChannelHistograms {
        red: vec![0; 256],
        green: vec![0; 256],
        blue: vec![0; 256],
    };
    for px in buffer.pixels() {
        hist.red[px[0] as usize] += 1;
        hist.green[px[1] as usize] += 1;
        hist.blue[px[2] as usize] += 1;
    }
    hist
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grayscale_keeps_alpha() {
        let mut buf = PixelBuffer::filled(2, 2, [10, 20, 40, 99]);
        grayscale(&mut buf);
        // (10 + 20 + 40) / 3 = 23.33
        assert!(buf.pixels().iter().all(|&p| p == [23, 23, 23, 99]));
    }

    #[test]
    fn posterize_five_levels() {
        let mut buf = PixelBuffer::from_fn(4, 1, |x, _| {
            let v = [0u8, 70, 130, 255][x];
            [v, v, v, 255]
        });
        posterize(&mut buf, DEFAULT_POSTERIZE_LEVELS).unwrap();
        let reds: Vec<u8> = buf.pixels().iter().map(|p| p[0]).collect();
        // Steps of 63.75: 0, 63.75, 127.5, 255.
        assert_eq!(reds, vec![0, 64, 128, 255]);
        assert!(posterize(&mut buf, 1).is_err());
    }

    #[test]
    fn threshold_is_strict() {
        let mut buf = PixelBuffer::from_fn(2, 1, |x, _| if x == 0 { [128; 4] } else { [129; 4] });
        threshold(&mut buf, DEFAULT_THRESHOLD);
        assert_eq!(buf.get(0, 0), [0, 0, 0, 128]);
        assert_eq!(buf.get(1, 0), [255, 255, 255, 129]);
    }

    #[test]
    fn invert_twice_is_identity() {
        let src = PixelBuffer::from_fn(3, 3, |x, y| [x as u8, y as u8, 200, 50]);
        let mut buf = src.clone();
        invert(&mut buf);
        assert_eq!(buf.get(1, 2), [254, 253, 55, 50]);
        invert(&mut buf);
        assert_eq!(buf, src);
    }

    #[test]
    fn blur_uses_in_bounds_window() {
        let src = PixelBuffer::from_fn(3, 1, |x, _| {
            if x == 0 {
                [90, 0, 0, 255]
            } else {
                [0, 0, 0, 255]
            }
        });
        let out = box_blur(&src, 1);
        assert_eq!(out.get(0, 0), [45, 0, 0, 255]);
        assert_eq!(out.get(1, 0), [30, 0, 0, 255]);
        assert_eq!(out.get(2, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn histograms_count_every_pixel() {
        let buf = PixelBuffer::from_fn(4, 2, |x, _| [x as u8, 7, 7, 0]);
        let h = channel_histograms(&buf);
        assert_eq!(h.red[0..4], [2, 2, 2, 2]);
        assert_eq!(h.green[7], 8);
        assert_eq!(h.blue.iter().sum::<u32>(), 8);
    }
}
