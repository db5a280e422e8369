//! JSON configuration and report helpers for the detection pipeline.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::decoder::{Decoder, DecoderParams};
use crate::labels::{Labels, LabelsError};
use crate::recognition::Recognition;
use crate::tensor::DEFAULT_INPUT_SIZE;

#[derive(thiserror::Error, Debug)]
pub enum DetectorIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Labels(#[from] LabelsError),
}

fn default_input_size() -> usize {
    DEFAULT_INPUT_SIZE
}

/// Configuration loaded next to a model checkpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Square resolution the model input is resampled to.
    #[serde(default = "default_input_size")]
    pub input_size: usize,
    /// Plain text file with one class label per line.
    #[serde(default)]
    pub labels_path: Option<PathBuf>,
    #[serde(default)]
    pub decoder: DecoderParams,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            input_size: DEFAULT_INPUT_SIZE,
            labels_path: None,
            decoder: DecoderParams::default(),
        }
    }
}

impl DetectorConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DetectorIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DetectorIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load the label list the config points at, if any.
    pub fn load_labels(&self) -> Result<Option<Labels>, DetectorIoError> {
        match &self.labels_path {
            Some(path) => Ok(Some(Labels::from_file(path)?)),
            None => Ok(None),
        }
    }

    /// Build a decoder with this config's thresholds.
    pub fn build_decoder(&self, class_count: usize) -> Decoder {
        Decoder::with_params(class_count, self.decoder)
    }
}

/// A recognition paired with its resolved label, for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledRecognition {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(flatten)]
    pub recognition: Recognition,
}

/// Per-frame detection report, written as JSON by examples and tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectReport {
    pub frame_width: usize,
    pub frame_height: usize,
    pub input_size: usize,
    pub recognitions: Vec<LabeledRecognition>,
}

impl DetectReport {
    /// Assemble a report, resolving labels where the class index is known.
    pub fn new(
        frame_width: usize,
        frame_height: usize,
        input_size: usize,
        recognitions: &[Recognition],
        labels: &Labels,
    ) -> Self {
        Self {
            frame_width,
            frame_height,
            input_size,
            recognitions: recognitions
                .iter()
                .map(|&recognition| LabeledRecognition {
                    label: labels.get(recognition.class_id).map(str::to_owned),
                    recognition,
                })
                .collect(),
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, DetectorIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), DetectorIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotter_core::Rect;

    #[test]
    fn config_defaults_fill_missing_fields() {
        let cfg: DetectorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg.input_size, DEFAULT_INPUT_SIZE);
        assert!(cfg.labels_path.is_none());
        assert_eq!(cfg.decoder.objectness_threshold, 0.5);
        assert_eq!(cfg.decoder.iou_threshold, 0.3);

        let cfg: DetectorConfig =
            serde_json::from_str(r#"{"decoder": {"iou_threshold": 0.45}}"#).unwrap();
        assert_eq!(cfg.decoder.iou_threshold, 0.45);
        assert_eq!(cfg.decoder.objectness_threshold, 0.5);
    }

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detector.json");

        let cfg = DetectorConfig {
            input_size: 320,
            decoder: DecoderParams {
                objectness_threshold: 0.6,
                ..DecoderParams::default()
            },
            ..DetectorConfig::default()
        };
        cfg.write_json(&path).unwrap();

        let loaded = DetectorConfig::load_json(&path).unwrap();
        assert_eq!(loaded.input_size, 320);
        assert_eq!(loaded.decoder.objectness_threshold, 0.6);
    }

    #[test]
    fn config_builds_a_decoder_with_its_thresholds() {
        let cfg: DetectorConfig =
            serde_json::from_str(r#"{"decoder": {"objectness_threshold": 0.25}}"#).unwrap();
        let decoder = cfg.build_decoder(80);
        assert_eq!(decoder.class_count(), 80);
        assert_eq!(decoder.params().objectness_threshold, 0.25);
    }

    #[test]
    fn report_resolves_labels_by_class_index() {
        let labels = Labels::from_names(["person", "car"]).unwrap();
        let recognitions = [
            Recognition {
                bbox: Rect::new(0.0, 0.0, 10.0, 10.0),
                confidence: 0.9,
                class_id: 1,
            },
            Recognition {
                bbox: Rect::new(5.0, 5.0, 10.0, 10.0),
                confidence: 0.8,
                class_id: 7,
            },
        ];
        let report = DetectReport::new(640, 480, 416, &recognitions, &labels);
        assert_eq!(report.recognitions[0].label.as_deref(), Some("car"));
        assert_eq!(report.recognitions[1].label, None);
    }
}
