//! Tone operations: sigmoid contrast curves and per-pixel point operations.

pub mod contrast;
pub mod point;

pub use contrast::{ContrastCurve, ContrastCurveMapper};
pub use point::{
    box_blur, channel_histograms, grayscale, invert, posterize, threshold, ChannelHistograms,
};
