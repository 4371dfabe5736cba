mod common;

use common::init_logging;
use common::synthetic_image::checkerboard_rgba;
use raster_analysis::edges::{convolve_rgb, sharpen, Kernel};
use raster_analysis::image::ImageView;
use raster_analysis::tone::{box_blur, ContrastCurve, ContrastCurveMapper};
use raster_analysis::{EngineConfig, PixelBuffer, RasterEngine};

fn ramp() -> PixelBuffer {
    PixelBuffer::from_fn(256, 1, |x, _| [x as u8, x as u8, x as u8, 255])
}

#[test]
fn standard_curve_is_monotone_over_all_inputs() {
    init_logging();
    let out = ContrastCurveMapper::new(ContrastCurve::Standard).apply(&ramp());
    let reds: Vec<u8> = out.row(0).iter().map(|p| p[0]).collect();
    assert!(reds.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn standard_curve_is_not_self_inverse() {
    init_logging();
    let mapper = ContrastCurveMapper::new(ContrastCurve::Standard);
    let src = ramp();
    let twice = mapper.apply(&mapper.apply(&src));
    assert_ne!(twice, src);
}

#[test]
fn every_curve_is_monotone() {
    init_logging();
    for curve in ContrastCurve::ALL {
        let m = ContrastCurveMapper::new(curve);
        assert!((1..=255u8).all(|c| m.map_value(c) >= m.map_value(c - 1)), "{curve}");
    }
}

#[test]
fn in_place_matches_copy() {
    init_logging();
    let src = checkerboard_rgba(30, 20, 7);
    let mapper = ContrastCurveMapper::new(ContrastCurve::Custom);
    let copy = mapper.apply(&src);
    let mut in_place = src.clone();
    mapper.apply_in_place(&mut in_place);
    assert_eq!(copy, in_place);
}

#[test]
fn sharpening_flat_buffer_is_identity() {
    init_logging();
    let src = PixelBuffer::filled(12, 9, [80, 160, 240, 128]);
    assert_eq!(sharpen(&src), src);
}

#[test]
fn sharpening_boosts_step_contrast() {
    init_logging();
    let src = PixelBuffer::from_fn(6, 3, |x, _| if x < 3 { [100; 4] } else { [150; 4] });
    let out = sharpen(&src);
    // Darker side of the step darkens, brighter side brightens.
    assert!(out.get(2, 1)[0] < 100);
    assert!(out.get(3, 1)[0] > 150);
    assert_eq!(out.get(2, 1)[3], 100);
}

#[test]
fn identity_kernel_copies_colour() {
    init_logging();
    let src = checkerboard_rgba(9, 9, 2);
    let identity = Kernel::new(3, vec![0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
    assert_eq!(convolve_rgb(&src, &identity), src);
}

#[test]
fn blur_keeps_flat_buffer() {
    init_logging();
    let src = PixelBuffer::filled(10, 10, [5, 6, 7, 8]);
    assert_eq!(box_blur(&src, 3), src);
}

#[test]
fn engine_applies_configured_curve() {
    init_logging();
    let engine = RasterEngine::new(EngineConfig {
        contrast_variant: ContrastCurve::Sloped,
        ..EngineConfig::default()
    })
    .unwrap();
    let report = engine.apply_contrast(Some(&ramp())).unwrap().unwrap();
    let expected = ContrastCurveMapper::new(ContrastCurve::Sloped).apply(&ramp());
    assert_eq!(report.image, expected);
    assert!(report.timings.stage("contrast").is_some());
}
