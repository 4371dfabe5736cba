//! Configured facade over the individual pipelines.
//!
//! Every operation takes an optional buffer. `None` means nothing is loaded
//! and yields `Ok(None)`; a present buffer yields a report carrying the
//! results, overlay draw commands where meaningful, and stage timings. The
//! engine keeps no state between calls besides its configuration and an
//! optional cancellation token.
use crate::cancel::CancelToken;
use crate::config::EngineConfig;
use crate::diagnostics::TimingBreakdown;
use crate::edges::{sharpen, EdgeDetector};
use crate::error::Result;
use crate::hough::{CircleFeature, HoughCircleDetector, HoughLineDetector, LineFeature};
use crate::image::{EdgeMask, Mask, PixelBuffer};
use crate::overlay::{circle_commands, line_commands, region_commands, DrawCommand};
use crate::resample::{
    resize, resize_with_cancel, rotate, rotate_with_cancel, zoom, zoom_with_cancel,
};
use crate::segmentation::{self, to_csv, PixelClassifier, RegionRecord, VegetationClassifier};
use crate::tone::ContrastCurveMapper;
use log::debug;
use std::time::Instant;

#[derive(Clone, Debug)]
pub struct EdgeReport {
    pub mask: EdgeMask,
    pub edge_count: usize,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug)]
pub struct LineReport {
    pub edges: EdgeMask,
    pub lines: Vec<LineFeature>,
    pub overlay: Vec<DrawCommand>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug)]
pub struct CircleReport {
    pub edges: EdgeMask,
    pub circles: Vec<CircleFeature>,
    pub overlay: Vec<DrawCommand>,
    pub timings: TimingBreakdown,
}

/// Lines and circles from a single edge pass.
#[derive(Clone, Debug)]
pub struct FeatureReport {
    pub edges: EdgeMask,
    pub lines: Vec<LineFeature>,
    pub circles: Vec<CircleFeature>,
    pub overlay: Vec<DrawCommand>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug)]
pub struct RegionReport {
    pub mask: Mask,
    pub regions: Vec<RegionRecord>,
    pub overlay: Vec<DrawCommand>,
    pub timings: TimingBreakdown,
}

impl RegionReport {
    /// Region table as delimited text.
    pub fn csv(&self) -> String {
        to_csv(&self.regions)
    }
}

/// A newly produced buffer.
#[derive(Clone, Debug)]
pub struct ImageReport {
    pub image: PixelBuffer,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug)]
pub struct RasterEngine {
    config: EngineConfig,
    cancel: Option<CancelToken>,
}

impl RasterEngine {
    /// Validate `config` and build an engine around it.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            cancel: None,
        })
    }

    /// Poll `token` during long scans; a cancelled token aborts the current
    /// operation with [`EngineError::Cancelled`](crate::error::EngineError::Cancelled).
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn checkpoint(&self) -> Result<()> {
        match &self.cancel {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }

    fn edges(&self, buffer: &PixelBuffer, timings: &mut TimingBreakdown) -> Result<EdgeMask> {
        self.checkpoint()?;
        let detector = EdgeDetector::new(self.config.edge_params());
        let mask = timings.time("edges", || detector.detect(buffer));
        self.checkpoint()?;
        Ok(mask)
    }

    fn lines(&self, edges: &EdgeMask, timings: &mut TimingBreakdown) -> Result<Vec<LineFeature>> {
        let detector = HoughLineDetector::new(self.config.line_params());
        timings.time("houghLines", || match &self.cancel {
            Some(token) => detector.detect_with_cancel(edges, token),
            None => Ok(detector.detect(edges)),
        })
    }

    fn circles(
        &self,
        edges: &EdgeMask,
        timings: &mut TimingBreakdown,
    ) -> Result<Vec<CircleFeature>> {
        let detector = HoughCircleDetector::new(self.config.circle_params());
        timings.time("houghCircles", || match &self.cancel {
            Some(token) => detector.detect_with_cancel(edges, token),
            None => Ok(detector.detect(edges)),
        })
    }

    pub fn detect_edges(&self, buffer: Option<&PixelBuffer>) -> Result<Option<EdgeReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        let mask = self.edges(buffer, &mut timings)?;
        timings.finish(started);
        let edge_count = mask.count();
        debug!("RasterEngine::detect_edges edges={edge_count}");
        Ok(Some(EdgeReport {
            mask,
            edge_count,
            timings,
        }))
    }

    pub fn detect_lines(&self, buffer: Option<&PixelBuffer>) -> Result<Option<LineReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        let edges = self.edges(buffer, &mut timings)?;
        let lines = self.lines(&edges, &mut timings)?;
        let overlay = line_commands(&lines);
        timings.finish(started);
        debug!("RasterEngine::detect_lines lines={}", lines.len());
        Ok(Some(LineReport {
            edges,
            lines,
            overlay,
            timings,
        }))
    }

    pub fn detect_circles(&self, buffer: Option<&PixelBuffer>) -> Result<Option<CircleReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        let edges = self.edges(buffer, &mut timings)?;
        let circles = self.circles(&edges, &mut timings)?;
        let overlay = circle_commands(&circles);
        timings.finish(started);
        debug!("RasterEngine::detect_circles circles={}", circles.len());
        Ok(Some(CircleReport {
            edges,
            circles,
            overlay,
            timings,
        }))
    }

    /// Edge pass followed by both Hough detectors. Line segments come first
    /// in the overlay so circle markers are drawn on top.
    pub fn detect_features(&self, buffer: Option<&PixelBuffer>) -> Result<Option<FeatureReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        let edges = self.edges(buffer, &mut timings)?;
        let lines = self.lines(&edges, &mut timings)?;
        let circles = self.circles(&edges, &mut timings)?;
        let mut overlay = line_commands(&lines);
        overlay.extend(circle_commands(&circles));
        timings.finish(started);
        debug!(
            "RasterEngine::detect_features lines={} circles={}",
            lines.len(),
            circles.len()
        );
        Ok(Some(FeatureReport {
            edges,
            lines,
            circles,
            overlay,
            timings,
        }))
    }

    /// Segment with the default vegetation rule.
    pub fn segment_regions(&self, buffer: Option<&PixelBuffer>) -> Result<Option<RegionReport>> {
        self.segment_regions_with(buffer, &VegetationClassifier::default())
    }

    pub fn segment_regions_with<C: PixelClassifier + ?Sized>(
        &self,
        buffer: Option<&PixelBuffer>,
        classifier: &C,
    ) -> Result<Option<RegionReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        self.checkpoint()?;
        let seg = timings.time("segmentation", || {
            segmentation::segment_regions(buffer, classifier)
        });
        self.checkpoint()?;
        let overlay = region_commands(&seg.regions);
        timings.finish(started);
        debug!(
            "RasterEngine::segment_regions foreground={} regions={}",
            seg.mask.count(),
            seg.regions.len()
        );
        Ok(Some(RegionReport {
            mask: seg.mask,
            regions: seg.regions,
            overlay,
            timings,
        }))
    }

    /// Rescale by the configured factor and interpolation method.
    pub fn resize(&self, buffer: Option<&PixelBuffer>) -> Result<Option<ImageReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let (scale, method) = (self.config.scale_factor, self.config.interpolation_method);
        self.image_stage(buffer, "resize", |b| match &self.cancel {
            Some(token) => resize_with_cancel(b, scale, method, token),
            None => resize(b, scale, method),
        })
        .map(Some)
    }

    /// Magnify the centre of the image by `scale` at unchanged size. Zooming
    /// in and out compounds by multiplying or dividing `scale` by the
    /// configured scale factor, always applied to the unzoomed source.
    pub fn zoom(&self, buffer: Option<&PixelBuffer>, scale: f64) -> Result<Option<ImageReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let method = self.config.interpolation_method;
        self.image_stage(buffer, "zoom", |b| match &self.cancel {
            Some(token) => zoom_with_cancel(b, scale, method, token),
            None => zoom(b, scale, method),
        })
        .map(Some)
    }

    /// Rotate by the configured angle about the image centre.
    pub fn rotate(&self, buffer: Option<&PixelBuffer>) -> Result<Option<ImageReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let (angle, method) = (
            self.config.rotation_angle_deg,
            self.config.interpolation_method,
        );
        self.image_stage(buffer, "rotate", |b| match &self.cancel {
            Some(token) => rotate_with_cancel(b, angle, method, token),
            None => rotate(b, angle, method),
        })
        .map(Some)
    }

    /// Remap R, G and B through the configured contrast curve.
    pub fn apply_contrast(&self, buffer: Option<&PixelBuffer>) -> Result<Option<ImageReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        let mapper = ContrastCurveMapper::new(self.config.contrast_variant);
        self.image_stage(buffer, "contrast", |b| Ok(mapper.apply(b))).map(Some)
    }

    pub fn sharpen(&self, buffer: Option<&PixelBuffer>) -> Result<Option<ImageReport>> {
        let Some(buffer) = buffer else {
            return Ok(None);
        };
        self.image_stage(buffer, "sharpen", |b| Ok(sharpen(b))).map(Some)
    }

    fn image_stage(
        &self,
        buffer: &PixelBuffer,
        label: &'static str,
        op: impl FnOnce(&PixelBuffer) -> Result<PixelBuffer>,
    ) -> Result<ImageReport> {
        self.checkpoint()?;
        let started = Instant::now();
        let mut timings = TimingBreakdown::default();
        let image = timings.time(label, || op(buffer))?;
        timings.finish(started);
        Ok(ImageReport { image, timings })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::image::ImageView;

    fn engine() -> RasterEngine {
        RasterEngine::new(EngineConfig::default()).unwrap()
    }

    #[test]
    fn absent_buffer_is_a_no_op() {
        let e = engine();
        assert!(e.detect_edges(None).unwrap().is_none());
        assert!(e.detect_lines(None).unwrap().is_none());
        assert!(e.detect_circles(None).unwrap().is_none());
        assert!(e.detect_features(None).unwrap().is_none());
        assert!(e.segment_regions(None).unwrap().is_none());
        assert!(e.resize(None).unwrap().is_none());
        assert!(e.rotate(None).unwrap().is_none());
        assert!(e.apply_contrast(None).unwrap().is_none());
        assert!(e.sharpen(None).unwrap().is_none());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = EngineConfig {
            line_vote_threshold: 10,
            ..EngineConfig::default()
        };
        assert!(matches!(
            RasterEngine::new(config),
            Err(EngineError::InvalidParameter {
                name: "lineVoteThreshold",
                ..
            })
        ));
    }

    #[test]
    fn resize_uses_configured_factor() {
        let buf = PixelBuffer::filled(10, 6, [1, 2, 3, 255]);
        let report = engine().resize(Some(&buf)).unwrap().unwrap();
        assert_eq!((report.image.width(), report.image.height()), (20, 12));
        assert!(report.timings.stage("resize").is_some());
    }

    #[test]
    fn zoom_keeps_size_and_compounds_with_scale_factor() {
        let buf = PixelBuffer::from_fn(8, 6, |x, y| [(x * 20) as u8, (y * 20) as u8, 0, 255]);
        let e = engine();
        let factor = e.config().scale_factor;
        let report = e.zoom(Some(&buf), factor).unwrap().unwrap();
        assert_eq!((report.image.width(), report.image.height()), (8, 6));
        assert!(report.timings.stage("zoom").is_some());
        let back = e.zoom(Some(&buf), factor / factor).unwrap().unwrap();
        assert_eq!(back.image, buf);
        assert!(e.zoom(None, factor).unwrap().is_none());
        assert!(e.zoom(Some(&buf), 0.0).is_err());
    }

    #[test]
    fn cancelled_engine_aborts() {
        let token = CancelToken::new();
        let e = engine().with_cancel(token.clone());
        token.cancel();
        let buf = PixelBuffer::filled(8, 8, [0, 0, 0, 255]);
        assert_eq!(e.detect_lines(Some(&buf)).unwrap_err(), EngineError::Cancelled);
        assert_eq!(e.rotate(Some(&buf)).unwrap_err(), EngineError::Cancelled);
    }

    #[test]
    fn uniform_buffer_has_no_features() {
        let buf = PixelBuffer::filled(32, 32, [120, 120, 120, 255]);
        let report = engine().detect_features(Some(&buf)).unwrap().unwrap();
        assert_eq!(report.edges.count(), 0);
        assert!(report.lines.is_empty());
        assert!(report.circles.is_empty());
        assert!(report.overlay.is_empty());
    }
}
