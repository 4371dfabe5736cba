use raster_analysis::image::io::{load_rgba_image, save_rgba_image, write_json_file};
use raster_analysis::tone::point::{
    DEFAULT_BLUR_RADIUS, DEFAULT_POSTERIZE_LEVELS, DEFAULT_THRESHOLD,
};
use raster_analysis::tone::{
    box_blur, channel_histograms, grayscale, invert, posterize, threshold, ContrastCurve,
};
use raster_analysis::{EngineConfig, PixelBuffer, RasterEngine};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ToneToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub point: PointOpsConfig,
    pub output: ToneOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PointOpsConfig {
    pub posterize_levels: u32,
    pub threshold: f64,
    pub blur_radius: usize,
}

impl Default for PointOpsConfig {
    fn default() -> Self {
        Self {
            posterize_levels: DEFAULT_POSTERIZE_LEVELS,
            threshold: DEFAULT_THRESHOLD,
            blur_radius: DEFAULT_BLUR_RADIUS,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ToneOutputConfig {
    /// Every result is written here as `<operation>.png`.
    pub dir: PathBuf,
    pub histograms_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<ToneToolConfig, String> {
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
    let dir = &config.output.dir;

    let buffer = load_rgba_image(&config.input).map_err(|e| e.to_string())?;
    let save = |name: &str, image: &PixelBuffer| -> Result<(), String> {
        let path = dir.join(format!("{name}.png"));
        save_rgba_image(image, &path).map_err(|e| e.to_string())
    };

    for curve in ContrastCurve::ALL {
        let engine = RasterEngine::new(EngineConfig {
            contrast_variant: curve,
            ..EngineConfig::default()
        })
        .map_err(|e| e.to_string())?;
        let report = engine
            .apply_contrast(Some(&buffer))
            .map_err(|e| e.to_string())?
            .ok_or("No buffer to remap")?;
        save(&format!("contrast_{curve}"), &report.image)?;
    }

    let engine = RasterEngine::new(EngineConfig::default()).map_err(|e| e.to_string())?;
    let sharpened = engine
        .sharpen(Some(&buffer))
        .map_err(|e| e.to_string())?
        .ok_or("No buffer to sharpen")?;
    save("sharpen", &sharpened.image)?;

    let mut gray = buffer.clone();
    grayscale(&mut gray);
    save("grayscale", &gray)?;

    let mut poster = buffer.clone();
    posterize(&mut poster, config.point.posterize_levels).map_err(|e| e.to_string())?;
    save("posterize", &poster)?;

    let mut binary = buffer.clone();
    threshold(&mut binary, config.point.threshold);
    save("threshold", &binary)?;

    let mut inverted = buffer.clone();
    invert(&mut inverted);
    save("invert", &inverted)?;

    save("blur", &box_blur(&buffer, config.point.blur_radius))?;

    write_json_file(&config.output.histograms_json, &channel_histograms(&buffer))
        .map_err(|e| e.to_string())?;

    println!("Saved tone operations to {}", dir.display());
    println!(
        "Saved channel histograms to {}",
        config.output.histograms_json.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: tone_demo <config.json>".to_string()
}
