#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod engine;
pub mod error;
pub mod image;
pub mod overlay;

// Algorithm modules, usable on their own.
pub mod edges;
pub mod hough;
pub mod resample;
pub mod segmentation;
pub mod tone;

// --- High-level re-exports -------------------------------------------------

pub use crate::cancel::CancelToken;
pub use crate::config::{load_config, EngineConfig};
pub use crate::engine::{
    CircleReport, EdgeReport, FeatureReport, ImageReport, LineReport, RasterEngine, RegionReport,
};
pub use crate::error::{EngineError, Result};
pub use crate::image::{EdgeMask, Mask, PixelBuffer};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use raster_analysis::prelude::*;
///
/// # fn main() -> raster_analysis::Result<()> {
/// let (w, h) = (640usize, 480usize);
/// let bytes = vec![0u8; w * h * 4];
/// let buffer = PixelBuffer::from_raw(w, h, bytes)?;
///
/// let engine = RasterEngine::new(EngineConfig::default())?;
/// if let Some(report) = engine.detect_lines(Some(&buffer))? {
///     println!("lines={} total_ms={:.3}", report.lines.len(), report.timings.total_ms);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::{ImageView, ImageViewMut};
    pub use crate::resample::Interpolation;
    pub use crate::tone::ContrastCurve;
    pub use crate::{EngineConfig, EngineError, PixelBuffer, RasterEngine};
}
