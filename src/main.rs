use raster_analysis::image::ImageView;
use raster_analysis::{EngineConfig, PixelBuffer, RasterEngine};

fn main() {
    env_logger::init();

    // Demo stub: a dark frame with one bright vertical bar
    let (w, h) = (320usize, 240usize);
    let buffer = PixelBuffer::from_fn(w, h, |x, _| {
        if (150..170).contains(&x) {
            [230, 230, 230, 255]
        } else {
            [20, 20, 20, 255]
        }
    });

    let engine = match RasterEngine::new(EngineConfig::default()) {
        Ok(engine) => engine,
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    };
    match engine.detect_features(Some(&buffer)) {
        Ok(Some(report)) => println!(
            "size={}x{} edges={} lines={} circles={} latency_ms={:.3}",
            buffer.width(),
            buffer.height(),
            report.edges.count(),
            report.lines.len(),
            report.circles.len(),
            report.timings.total_ms
        ),
        Ok(None) => println!("no buffer"),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
