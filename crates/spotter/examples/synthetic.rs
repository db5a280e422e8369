//! Runs the full recognition pipeline on a synthetic video: a bright
//! square drifting over a dim background, and an oracle model that
//! reports the bright region it finds in its staged input. No camera or
//! inference engine required.
//!
//! Usage: `cargo run --example synthetic [detector_config.json]`

use std::{env, fs, path::PathBuf};

use spotter::{
    ArrayImage, DetectReport, DetectorConfig, FrameSource, InferenceModel, InputTensor, Labels,
    ModelError, OutputTensor, Recognizer, Rect, Rgb, CHANNELS,
};

#[cfg(not(feature = "tracing"))]
use log::{info, LevelFilter};

#[cfg(feature = "tracing")]
use tracing::info;

#[cfg(feature = "tracing")]
use spotter::init_tracing;
#[cfg(not(feature = "tracing"))]
use spotter::init_with_level;

/// Reports one box spanning every staged pixel whose red channel exceeds
/// half brightness. Stands in for a real YOLO backend.
struct BrightSpotModel {
    size: usize,
    classes: usize,
}

impl InferenceModel for BrightSpotModel {
    fn input_size(&self) -> usize {
        self.size
    }

    fn infer(&mut self, input: &InputTensor) -> Result<OutputTensor, ModelError> {
        let size = input.size();
        let data = input.as_slice();

        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for y in 0..size {
            for x in 0..size {
                if data[(y * size + x) * CHANNELS] > 127.5 {
                    bounds = Some(match bounds {
                        None => (x, x, y, y),
                        Some((x0, x1, y0, y1)) => (x0.min(x), x1.max(x), y0.min(y), y1.max(y)),
                    });
                }
            }
        }

        let tensor = match bounds {
            Some((x0, x1, y0, y1)) => {
                let mut row = vec![
                    x0 as f32,
                    y0 as f32,
                    (x1 + 1) as f32,
                    (y1 + 1) as f32,
                    0.9375,
                    1.0,
                ];
                row.extend(std::iter::repeat(0.0).take(self.classes - 1));
                OutputTensor::from_rows(&[row])
            }
            None => OutputTensor::from_shape(&[1, 0, 5 + self.classes], Vec::new()),
        };
        tensor.map_err(|e| ModelError::with_source("synthesising oracle output", e))
    }
}

/// Synthetic camera: a bright square drifting right, eight pixels per
/// frame, over a 320x240 canvas.
struct DriftingSquare {
    frame: ArrayImage,
    tick: usize,
    limit: usize,
}

impl DriftingSquare {
    fn new(limit: usize) -> Self {
        let mut source = Self {
            frame: ArrayImage::new(320, 240),
            tick: 0,
            limit,
        };
        source.redraw();
        source
    }

    fn redraw(&mut self) {
        let square = Rect::new(16.0 + 8.0 * self.tick as f64, 96.0, 48.0, 48.0);
        self.frame = ArrayImage::from_fn(320, 240, |x, y| {
            let (fx, fy) = (x as f64, y as f64);
            let inside = fx >= square.left()
                && fx < square.right()
                && fy >= square.top()
                && fy < square.bottom();
            if inside {
                Rgb::new(1.0, 0.25, 0.25)
            } else {
                Rgb::grey(0.1)
            }
        });
    }
}

impl FrameSource for DriftingSquare {
    fn current_frame(&self) -> &ArrayImage {
        &self.frame
    }

    fn has_next(&self) -> bool {
        self.tick + 1 < self.limit
    }

    fn advance(&mut self) {
        self.tick += 1;
        self.redraw();
    }

    fn restart(&mut self) {
        self.tick = 0;
        self.redraw();
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(not(feature = "tracing"))]
    init_with_level(LevelFilter::Info)?;

    #[cfg(feature = "tracing")]
    init_tracing(false);

    run()
}

#[cfg_attr(feature = "tracing", tracing::instrument(level = "info"))]
fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(env::args().nth(1).map(PathBuf::from))?;
    let labels = config
        .load_labels()?
        .map_or_else(|| Labels::from_names(["square"]), Ok)?;
    info!(
        "input {}x{}, {} classes",
        config.input_size,
        config.input_size,
        labels.len()
    );

    let model = BrightSpotModel {
        size: config.input_size,
        classes: labels.len(),
    };
    let mut recognizer = Recognizer::with_params(model, labels, config.decoder);
    let mut source = DriftingSquare::new(24);

    let mut last = Vec::new();
    for frame_index in 0..source.limit {
        let recognitions = recognizer.recognize_next(&mut source)?;
        for recognition in &recognitions {
            info!(
                "frame {:2}: {} {:.2} at ({:.0}, {:.0}) {:.0}x{:.0}",
                frame_index,
                recognizer.label_of(recognition).unwrap_or("?"),
                recognition.confidence,
                recognition.bbox.x,
                recognition.bbox.y,
                recognition.bbox.width,
                recognition.bbox.height,
            );
        }
        last = recognitions;
    }

    let report = DetectReport::new(
        source.current_frame().width(),
        source.current_frame().height(),
        recognizer.input_size(),
        &last,
        recognizer.labels(),
    );
    write_report(report)
}

fn load_config(path: Option<PathBuf>) -> Result<DetectorConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            info!("loading config from {}", path.display());
            Ok(DetectorConfig::load_json(path)?)
        }
        None => Ok(DetectorConfig::default()),
    }
}

fn write_report(report: DetectReport) -> Result<(), Box<dyn std::error::Error>> {
    let out_path = PathBuf::from("tmpdata/synthetic_report.json");
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    report.write_json(&out_path)?;
    println!("wrote report JSON to {}", out_path.display());
    Ok(())
}
