mod common;

use common::init_logging;
use common::synthetic_image::{checkerboard_rgba, disc_rgba};
use raster_analysis::resample::Interpolation;
use raster_analysis::tone::ContrastCurve;
use raster_analysis::{load_config, CancelToken, EngineConfig, EngineError, RasterEngine};
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("raster-analysis-{}-{name}", std::process::id()))
}

#[test]
fn load_config_reads_camel_case_json() {
    init_logging();
    let path = temp_path("config.json");
    fs::write(
        &path,
        r#"{
            "edgeThreshold": 120,
            "lineVoteThreshold": 150,
            "scaleFactor": 0.5,
            "interpolationMethod": "nearest",
            "contrastVariant": "shifted",
            "rotationAngleDeg": 15
        }"#,
    )
    .unwrap();
    let config = load_config(&path).unwrap();
    fs::remove_file(&path).ok();

    assert_eq!(config.edge_threshold, 120.0);
    assert_eq!(config.line_vote_threshold, 150);
    assert_eq!(config.scale_factor, 0.5);
    assert_eq!(config.interpolation_method, Interpolation::Nearest);
    assert_eq!(config.contrast_variant, ContrastCurve::Shifted);
    assert_eq!(config.rotation_angle_deg, 15.0);
}

#[test]
fn load_config_rejects_out_of_range_threshold() {
    init_logging();
    let path = temp_path("bad.json");
    fs::write(&path, r#"{"edgeThreshold": 20}"#).unwrap();
    let result = load_config(&path);
    fs::remove_file(&path).ok();
    assert!(matches!(
        result,
        Err(EngineError::InvalidParameter {
            name: "edgeThreshold",
            ..
        })
    ));
}

#[test]
fn missing_config_is_a_load_error() {
    init_logging();
    let result = load_config(&temp_path("does-not-exist.json"));
    assert!(matches!(result, Err(EngineError::Load { .. })));
}

#[test]
fn higher_edge_threshold_never_adds_edges() {
    init_logging();
    let buffer = disc_rgba(60, 60, (30.0, 30.0), 12.0);
    let count = |t: f32| {
        RasterEngine::new(EngineConfig {
            edge_threshold: t,
            ..EngineConfig::default()
        })
        .unwrap()
        .detect_edges(Some(&buffer))
        .unwrap()
        .unwrap()
        .edge_count
    };
    assert!(count(50.0) >= count(150.0));
    assert!(count(150.0) >= count(255.0));
}

#[test]
fn cancellation_stops_every_pipeline() {
    init_logging();
    let token = CancelToken::new();
    let engine = RasterEngine::new(EngineConfig::default())
        .unwrap()
        .with_cancel(token.clone());
    let buffer = checkerboard_rgba(32, 32, 8);

    assert!(engine.detect_circles(Some(&buffer)).unwrap().is_some());
    token.cancel();
    assert_eq!(
        engine.detect_circles(Some(&buffer)).unwrap_err(),
        EngineError::Cancelled
    );
    assert_eq!(
        engine.segment_regions(Some(&buffer)).unwrap_err(),
        EngineError::Cancelled
    );
    assert_eq!(engine.resize(Some(&buffer)).unwrap_err(), EngineError::Cancelled);
    // Absent buffers stay no-ops even when cancelled.
    assert!(engine.sharpen(None).unwrap().is_none());
}
