use raster_analysis::diagnostics::TimingBreakdown;
use raster_analysis::edges::luma::{luminance_plane, plane_to_buffer};
use raster_analysis::hough::{CircleFeature, LineFeature};
use raster_analysis::image::io::{load_rgba_image, save_mask, save_rgba_image, write_json_file};
use raster_analysis::image::ImageView;
use raster_analysis::overlay::{rasterize, DrawCommand};
use raster_analysis::{EngineConfig, RasterEngine};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct FeatureToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub engine: EngineConfig,
    pub output: FeatureOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct FeatureOutputConfig {
    pub edges_image: PathBuf,
    /// Optional BT.709 luminance plane as seen by the edge detector.
    pub luminance_image: Option<PathBuf>,
    pub overlay_image: PathBuf,
    pub features_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<FeatureToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let buffer = load_rgba_image(&config.input).map_err(|e| e.to_string())?;
    let engine = RasterEngine::new(config.engine.clone()).map_err(|e| e.to_string())?;
    let report = engine
        .detect_features(Some(&buffer))
        .map_err(|e| e.to_string())?
        .ok_or("No buffer to analyse")?;

    let mut overlay = buffer.clone();
    rasterize(&mut overlay, &report.overlay);

    let summary = FeatureSummary {
        width: buffer.width(),
        height: buffer.height(),
        edge_threshold: config.engine.edge_threshold,
        line_vote_threshold: config.engine.line_vote_threshold,
        edge_count: report.edges.count(),
        line_count: report.lines.len(),
        circle_count: report.circles.len(),
        lines: report.lines,
        circles: report.circles,
        overlay: report.overlay,
        timings: report.timings,
    };

    save_mask(&report.edges, &config.output.edges_image).map_err(|e| e.to_string())?;
    save_rgba_image(&overlay, &config.output.overlay_image).map_err(|e| e.to_string())?;
    write_json_file(&config.output.features_json, &summary).map_err(|e| e.to_string())?;

    println!(
        "Saved edge mask ({} edge pixels) to {}",
        summary.edge_count,
        config.output.edges_image.display()
    );
    println!(
        "Detected {} lines and {} circles; overlay saved to {}",
        summary.line_count,
        summary.circle_count,
        config.output.overlay_image.display()
    );
    if let Some(path) = &config.output.luminance_image {
        let luma = plane_to_buffer(&luminance_plane(&buffer));
        save_rgba_image(&luma, path).map_err(|e| e.to_string())?;
        println!("Saved luminance plane to {}", path.display());
    }
    println!("Saved feature summary to {}", config.output.features_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: feature_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureSummary {
    width: usize,
    height: usize,
    edge_threshold: f32,
    line_vote_threshold: u32,
    edge_count: usize,
    line_count: usize,
    circle_count: usize,
    lines: Vec<LineFeature>,
    circles: Vec<CircleFeature>,
    overlay: Vec<DrawCommand>,
    timings: TimingBreakdown,
}
