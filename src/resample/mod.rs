//! Geometric resampling: uniform scaling, centred zoom and rotation about
//! the centre.
//!
//! Each operation allocates a new [`PixelBuffer`](crate::image::PixelBuffer)
//! and samples the source through one of the [`Interpolation`] kernels. Rows
//! are filled in parallel.

pub mod kernels;
pub mod rotate;
pub mod scale;
pub mod zoom;

pub use kernels::{cubic, Interpolation};
pub use rotate::{rotate, rotate_with_cancel, rotated_canvas};
pub use scale::{resize, resize_with_cancel, scaled_dimension};
pub use zoom::{zoom, zoom_window_origin, zoom_with_cancel};
