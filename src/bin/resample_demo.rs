use raster_analysis::diagnostics::TimingBreakdown;
use raster_analysis::image::io::{load_rgba_image, save_rgba_image, write_json_file};
use raster_analysis::image::ImageView;
use raster_analysis::resample::Interpolation;
use raster_analysis::{EngineConfig, RasterEngine};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ResampleToolConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub engine: EngineConfig,
    pub output: ResampleOutputConfig,
}

#[derive(Debug, Deserialize)]
pub struct ResampleOutputConfig {
    pub resized_image: PathBuf,
    pub rotated_image: PathBuf,
    /// When set, the resize is repeated with every kernel and written here as
    /// `resized_<method>.png`.
    pub method_dir: Option<PathBuf>,
    pub summary_json: PathBuf,
}

pub fn load_config(path: &Path) -> Result<ResampleToolConfig, String> {
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

    let resized = engine
        .resize(Some(&buffer))
        .map_err(|e| e.to_string())?
        .ok_or("No buffer to resize")?;
    let rotated = engine
        .rotate(Some(&buffer))
        .map_err(|e| e.to_string())?
        .ok_or("No buffer to rotate")?;

    save_rgba_image(&resized.image, &config.output.resized_image).map_err(|e| e.to_string())?;
    save_rgba_image(&rotated.image, &config.output.rotated_image).map_err(|e| e.to_string())?;

    let mut methods = Vec::new();
    if let Some(dir) = &config.output.method_dir {
        for method in Interpolation::ALL {
            let engine = RasterEngine::new(EngineConfig {
                interpolation_method: method,
                ..config.engine.clone()
            })
            .map_err(|e| e.to_string())?;
            let report = engine
                .resize(Some(&buffer))
                .map_err(|e| e.to_string())?
                .ok_or("No buffer to resize")?;
            let path = dir.join(format!("resized_{method}.png"));
            save_rgba_image(&report.image, &path).map_err(|e| e.to_string())?;
            methods.push(MethodTiming {
                method,
                elapsed_ms: report.timings.total_ms,
            });
        }
        println!("Saved per-method resizes to {}", dir.display());
    }

    let summary = ResampleSummary {
        source: [buffer.width(), buffer.height()],
        scale_factor: config.engine.scale_factor,
        interpolation_method: config.engine.interpolation_method,
        resized: [resized.image.width(), resized.image.height()],
        rotation_angle_deg: config.engine.rotation_angle_deg,
        rotated: [rotated.image.width(), rotated.image.height()],
        resize_timings: resized.timings,
        rotate_timings: rotated.timings,
        methods,
    };
    write_json_file(&config.output.summary_json, &summary).map_err(|e| e.to_string())?;

    println!(
        "Resized {}x{} -> {}x{} ({}) to {}",
        summary.source[0],
        summary.source[1],
        summary.resized[0],
        summary.resized[1],
        summary.interpolation_method,
        config.output.resized_image.display()
    );
    println!(
        "Rotated by {:.1}° -> {}x{} to {}",
        summary.rotation_angle_deg,
        summary.rotated[0],
        summary.rotated[1],
        config.output.rotated_image.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: resample_demo <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MethodTiming {
    method: Interpolation,
    elapsed_ms: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResampleSummary {
    source: [usize; 2],
    scale_factor: f64,
    interpolation_method: Interpolation,
    resized: [usize; 2],
    rotation_angle_deg: f64,
    rotated: [usize; 2],
    resize_timings: TimingBreakdown,
    rotate_timings: TimingBreakdown,
    methods: Vec<MethodTiming>,
}
