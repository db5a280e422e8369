use serde::{Deserialize, Serialize};

use spotter_core::Rect;

/// A finalized detection: bounding box, confidence, and class index.
///
/// Boxes are in model-input pixels; callers map them back onto their
/// source window for display. Every decode call produces a fresh list, so
/// values can be moved across threads or retained freely.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recognition {
    pub bbox: Rect,
    /// Objectness of the winning row, nominally in `[0, 1]`.
    pub confidence: f64,
    /// Index into the class label list.
    pub class_id: usize,
}
