mod common;

use common::init_logging;
use common::synthetic_image::{anti_diagonal_mask, checkerboard_rgba, disc_rgba, row_mask};
use raster_analysis::edges::EdgeDetector;
use raster_analysis::hough::{HoughCircleDetector, HoughLineDetector, LineBin};
use raster_analysis::{EngineConfig, PixelBuffer, RasterEngine};

#[test]
fn uniform_buffer_has_empty_edge_mask() {
    init_logging();
    for color in [[0, 0, 0, 255], [255, 255, 255, 255], [37, 180, 90, 10]] {
        let buffer = PixelBuffer::filled(40, 30, color);
        let mask = EdgeDetector::default().detect(&buffer);
        assert_eq!(mask.count(), 0, "{color:?}");
    }
}

#[test]
fn checkerboard_edges_follow_cell_borders() {
    init_logging();
    let buffer = checkerboard_rgba(64, 48, 16);
    let mask = EdgeDetector::default().detect(&buffer);
    assert!(mask.count() > 0);
    // Cell interiors stay clear.
    assert!(!mask.is_set(8, 8));
    assert!(mask.is_set(15, 8) || mask.is_set(16, 8));
}

#[test]
fn horizontal_row_votes_into_one_bin() {
    init_logging();
    let mask = row_mask(150, 60, 25);
    let detector = HoughLineDetector::default();
    let acc = detector.accumulate(&mask);
    let bin = LineBin {
        angle_deg: 90,
        radius: 25,
    };
    assert_eq!(acc.votes(&bin), 150);

    let lines = detector.detect(&mask);
    let line = lines
        .iter()
        .find(|l| l.angle_deg == 90 && l.radius == 25)
        .expect("horizontal line reported");
    assert_eq!(line.votes, 150);
}

#[test]
fn diagonal_line_is_found_at_known_parameters() {
    init_logging();
    // x + y = 141: θ = 45°, ρ = 141 / √2 ≈ 99.7, 142 pixels.
    let mask = anti_diagonal_mask(200, 200, 141);
    assert_eq!(mask.count(), 142);
    let lines = HoughLineDetector::default().detect(&mask);
    let best = lines
        .iter()
        .filter(|l| l.angle_deg.abs_diff(45) <= 1 && (l.radius - 100).abs() <= 1)
        .map(|l| l.votes)
        .max();
    assert_eq!(best, Some(142));
}

#[test]
fn lines_are_sorted_by_angle_then_radius() {
    init_logging();
    let buffer = checkerboard_rgba(120, 120, 30);
    let edges = EdgeDetector::default().detect(&buffer);
    let lines = HoughLineDetector::default().detect(&edges);
    assert!(!lines.is_empty());
    assert!(lines
        .windows(2)
        .all(|w| (w[0].angle_deg, w[0].radius) < (w[1].angle_deg, w[1].radius)));
}

#[test]
fn bright_disc_is_detected_as_circle() {
    init_logging();
    let buffer = disc_rgba(100, 100, (50.0, 50.0), 20.0);
    let edges = EdgeDetector::default().detect(&buffer);
    let circles = HoughCircleDetector::default().detect(&edges);
    let first = circles.first().expect("at least one circle");
    let offset = ((first.x - 50) as f64).hypot((first.y - 50) as f64);
    assert!(offset <= 3.0, "centre {:?}", (first.x, first.y));
    assert!((17..=23).contains(&first.radius), "radius {}", first.radius);
    assert!(circles.len() <= 2);
}

#[test]
fn engine_feature_report_includes_overlay() {
    init_logging();
    let buffer = disc_rgba(100, 100, (50.0, 50.0), 20.0);
    let engine = RasterEngine::new(EngineConfig::default()).unwrap();
    let report = engine.detect_features(Some(&buffer)).unwrap().unwrap();
    // One outline and one centre marker per circle, one segment per line.
    assert_eq!(
        report.overlay.len(),
        report.lines.len() + 2 * report.circles.len()
    );
    assert!(report.timings.stage("edges").is_some());
    assert!(report.timings.stage("houghCircles").is_some());
}
