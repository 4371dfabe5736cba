//! Overlay draw commands for detected features and a small rasterizer that
//! burns them into a [`PixelBuffer`].
//!
//! Commands carry a stroke width for hosts that render them with a vector
//! backend. [`rasterize`] ignores it and draws 1-pixel strokes.
use crate::hough::{CircleFeature, LineFeature};
use crate::image::rgba::round_half_up;
use crate::image::{ImageView, ImageViewMut, PixelBuffer, Rgba};
use crate::segmentation::RegionRecord;
use serde::{Deserialize, Serialize};

pub const LINE_COLOR: Rgba = [0xFF, 0x00, 0x00, 0xFF];
pub const LINE_WIDTH: f64 = 2.0;
pub const CIRCLE_COLOR: Rgba = [0x2E, 0xCC, 0x71, 0xFF];
pub const CIRCLE_WIDTH: f64 = 2.5;
pub const CENTER_COLOR: Rgba = [0xE7, 0x4C, 0x3C, 0xFF];
pub const CENTER_RADIUS: f64 = 3.5;
pub const REGION_COLOR: Rgba = [0xFF, 0xD7, 0x00, 0xFF];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DrawCommand {
    Segment {
        from: [f64; 2],
        to: [f64; 2],
        color: Rgba,
        width: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        color: Rgba,
        width: f64,
    },
    Disc {
        center: [f64; 2],
        radius: f64,
        color: Rgba,
    },
    /// Outline of the inclusive pixel box `min..=max`.
    Rect {
        min: [f64; 2],
        max: [f64; 2],
        color: Rgba,
    },
}

pub fn line_commands(lines: &[LineFeature]) -> Vec<DrawCommand> {
    lines
        .iter()
        .map(|line| {
            let (from, to) = line.segment();
            DrawCommand::Segment {
                from: from.map(f64::from),
                to: to.map(f64::from),
                color: LINE_COLOR,
                width: LINE_WIDTH,
            }
        })
        .collect()
}

/// Outline plus centre marker per circle.
pub fn circle_commands(circles: &[CircleFeature]) -> Vec<DrawCommand> {
    circles
        .iter()
        .flat_map(|c| {
            let center = [c.x as f64, c.y as f64];
            [
                DrawCommand::Circle {
                    center,
                    radius: c.radius as f64,
                    color: CIRCLE_COLOR,
                    width: CIRCLE_WIDTH,
                },
                DrawCommand::Disc {
                    center,
                    radius: CENTER_RADIUS,
                    color: CENTER_COLOR,
                },
            ]
        })
        .collect()
}

pub fn region_commands(regions: &[RegionRecord]) -> Vec<DrawCommand> {
    regions
        .iter()
        .map(|r| {
            let b = r.stats.bbox;
            DrawCommand::Rect {
                min: [b.min_x as f64, b.min_y as f64],
                max: [b.max_x as f64, b.max_y as f64],
                color: REGION_COLOR,
            }
        })
        .collect()
}

#[inline]
fn plot(buffer: &mut PixelBuffer, x: i64, y: i64, color: Rgba) {
    if buffer.in_bounds(x as isize, y as isize) {
        buffer.set(x as usize, y as usize, color);
    }
}

fn draw_line(buffer: &mut PixelBuffer, from: [f64; 2], to: [f64; 2], color: Rgba) {
    let (mut x0, mut y0) = (round_half_up(from[0]), round_half_up(from[1]));
    let (x1, y1) = (round_half_up(to[0]), round_half_up(to[1]));
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(buffer, x0, y0, color);
        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

fn draw_circle(buffer: &mut PixelBuffer, center: [f64; 2], radius: f64, color: Rgba) {
    let (cx, cy) = (round_half_up(center[0]), round_half_up(center[1]));
    let r = round_half_up(radius);
    if r <= 0 {
        plot(buffer, cx, cy, color);
        return;
    }
    let (mut x, mut y) = (r, 0i64);
    let mut d = 1 - r;
    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            plot(buffer, cx + px, cy + py, color);
        }
        y += 1;
        if d < 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * (y - x) + 1;
        }
    }
}

fn fill_disc(buffer: &mut PixelBuffer, center: [f64; 2], radius: f64, color: Rgba) {
    let r2 = radius * radius;
    let x0 = (center[0] - radius).floor() as i64;
    let x1 = (center[0] + radius).ceil() as i64;
    let y0 = (center[1] - radius).floor() as i64;
    let y1 = (center[1] + radius).ceil() as i64;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 - center[0];
            let dy = y as f64 - center[1];
            if dx * dx + dy * dy <= r2 {
                plot(buffer, x, y, color);
            }
        }
    }
}

fn draw_rect(buffer: &mut PixelBuffer, min: [f64; 2], max: [f64; 2], color: Rgba) {
    let corners = [
        [min[0], min[1]],
        [max[0], min[1]],
        [max[0], max[1]],
        [min[0], max[1]],
    ];
    for i in 0..4 {
        draw_line(buffer, corners[i], corners[(i + 1) % 4], color);
    }
}

/// Draw `commands` in order, clipping everything to the buffer.
pub fn rasterize(buffer: &mut PixelBuffer, commands: &[DrawCommand]) {
    if buffer.is_empty() {
        return;
    }
    for cmd in commands {
        match *cmd {
            DrawCommand::Segment { from, to, color, .. } => draw_line(buffer, from, to, color),
            DrawCommand::Circle {
                center,
                radius,
                color,
                ..
            } => draw_circle(buffer, center, radius, color),
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => fill_disc(buffer, center, radius, color),
            DrawCommand::Rect { min, max, color } => draw_rect(buffer, min, max, color),
        }
    }
}
