use raster_analysis::diagnostics::TimingBreakdown;
use raster_analysis::image::io::{
    load_rgba_image, save_mask, save_rgba_image, write_json_file, write_text_file,
};
use raster_analysis::overlay::rasterize;
use raster_analysis::segmentation::{RegionRecord, VegetationClassifier};
use raster_analysis::{EngineConfig, RasterEngine};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct RegionToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub classifier: VegetationClassifier,
    pub output: RegionOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct RegionOutputConfig {
    pub mask_image: PathBuf,
    pub overlay_image: Option<PathBuf>,
    pub regions_csv: PathBuf,
    pub regions_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<RegionToolConfig, String> {
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
    let engine = RasterEngine::new(EngineConfig::default()).map_err(|e| e.to_string())?;
    let report = engine
        .segment_regions_with(Some(&buffer), &config.classifier)
        .map_err(|e| e.to_string())?
        .ok_or("No buffer to segment")?;

    save_mask(&report.mask, &config.output.mask_image).map_err(|e| e.to_string())?;
    write_text_file(&config.output.regions_csv, &report.csv()).map_err(|e| e.to_string())?;

    if let Some(path) = &config.output.overlay_image {
        let mut overlay = buffer.clone();
        rasterize(&mut overlay, &report.overlay);
        save_rgba_image(&overlay, path).map_err(|e| e.to_string())?;
        println!("Saved region overlay to {}", path.display());
    }

    let summary = RegionSummary {
        foreground_pixels: report.mask.count(),
        region_count: report.regions.len(),
        regions: report.regions,
        timings: report.timings,
    };
    write_json_file(&config.output.regions_json, &summary).map_err(|e| e.to_string())?;

    println!(
        "Found {} regions ({} foreground pixels); table saved to {}",
        summary.region_count,
        summary.foreground_pixels,
        config.output.regions_csv.display()
    );
    println!("Saved region summary to {}", config.output.regions_json.display());

    Ok(())
}

fn usage() -> String {
    "Usage: region_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegionSummary {
    foreground_pixels: usize,
    region_count: usize,
    regions: Vec<RegionRecord>,
    timings: TimingBreakdown,
}
