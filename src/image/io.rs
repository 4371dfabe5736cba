//! I/O helpers for the demo tools.
//!
//! - `load_rgba_image`: decode a PNG/JPEG into an owned [`PixelBuffer`].
//! - `save_rgba_image`: write a [`PixelBuffer`] to a PNG.
//! - `save_mask`: write a [`Mask`] to a grayscale PNG.
//! - `write_json_file` / `write_text_file`: serialize results to disk.
//!
//! The analysis pipelines never call into this module; decoding is a host concern.
use super::{ImageView, Mask, PixelBuffer};
use crate::error::{EngineError, Result};
use image::{GrayImage, RgbaImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> Result<PixelBuffer> {
    let img = image::open(path)
        .map_err(|e| EngineError::Load {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    PixelBuffer::from_raw(width, height, img.into_raw())
}

/// Save an RGBA buffer as PNG.
pub fn save_rgba_image(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = RgbaImage::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.to_raw(),
    )
    .ok_or_else(|| write_error(path, "buffer does not match its dimensions"))?;
    image.save(path).map_err(|e| write_error(path, e))
}

/// Save a mask as an 8-bit grayscale PNG (foreground white).
pub fn save_mask(mask: &Mask, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let image = GrayImage::from_raw(
        mask.width() as u32,
        mask.height() as u32,
        mask.as_raw().to_vec(),
    )
    .ok_or_else(|| write_error(path, "mask does not match its dimensions"))?;
    image.save(path).map_err(|e| write_error(path, e))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| write_error(path, e))?;
    fs::write(path, json).map_err(|e| write_error(path, e))
}

/// Write delimited text (e.g. the region CSV) to `path`.
pub fn write_text_file(path: &Path, contents: &str) -> Result<()> {
    ensure_parent_dir(path)?;
    fs::write(path, contents).map_err(|e| write_error(path, e))
}

fn write_error(path: &Path, reason: impl ToString) -> EngineError {
    EngineError::Write {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| write_error(parent, e))?;
        }
    }
    Ok(())
}
