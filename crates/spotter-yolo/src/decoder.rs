//! Decoding of raw detection tensors into deduplicated recognitions.

use log::debug;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use spotter_core::{intersection_over_union, Rect};

use crate::recognition::Recognition;
use crate::tensor::OutputTensor;

/// Decode-time failure: the tensor disagrees with the decoder's class set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("tensor rows carry {tensor} classes, decoder expects {decoder}")]
    ClassCountMismatch { tensor: usize, decoder: usize },
}

fn default_objectness_threshold() -> f64 {
    0.5
}

fn default_iou_threshold() -> f64 {
    0.3
}

/// Thresholds steering candidate filtering and per-class deduplication.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DecoderParams {
    /// Minimum objectness for a row to become a candidate at all.
    #[serde(default = "default_objectness_threshold")]
    pub objectness_threshold: f64,
    /// Overlap above which a kept recognition of the same class competes
    /// with a new candidate.
    #[serde(default = "default_iou_threshold")]
    pub iou_threshold: f64,
}

impl Default for DecoderParams {
    fn default() -> Self {
        Self {
            objectness_threshold: default_objectness_threshold(),
            iou_threshold: default_iou_threshold(),
        }
    }
}

/// One tensor row above the objectness threshold, before deduplication.
///
/// Borrows the full probability tail of its row; reduced to a
/// [`Recognition`] by [`into_recognition`](Self::into_recognition) and not
/// retained past the decode call.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<'a> {
    pub bbox: Rect,
    pub confidence: f64,
    pub probabilities: &'a [f32],
}

impl<'a> Candidate<'a> {
    /// Split an `[x1, y1, x2, y2, objectness, p_0, ..]` row as produced by
    /// [`OutputTensor::row`]. Corner order does not matter; the box is
    /// normalised while it is built.
    pub fn from_row(row: &'a [f32]) -> Self {
        let bbox = Rect::from_corners(
            Point2::new(row[0] as f64, row[1] as f64),
            Point2::new(row[2] as f64, row[3] as f64),
        );
        Self {
            bbox,
            confidence: row[4] as f64,
            probabilities: &row[5..],
        }
    }

    /// Index of the highest class probability. Ties break to the lowest
    /// index, and an all-equal tail (including all zeros) yields class 0.
    pub fn best_class(&self) -> usize {
        let mut best = 0;
        for (index, &p) in self.probabilities.iter().enumerate().skip(1) {
            if p > self.probabilities[best] {
                best = index;
            }
        }
        best
    }

    /// Collapse the probability tail to its argmax.
    pub fn into_recognition(self) -> Recognition {
        Recognition {
            bbox: self.bbox,
            confidence: self.confidence,
            class_id: self.best_class(),
        }
    }
}

/// Greedy per-class decoder for `[1, N, 5 + C]` detection tensors.
///
/// This is not textbook non-maximum suppression, on purpose: a candidate
/// competes only against the single highest-overlap recognition already
/// kept for its class, winners replace losers instead of suppressing the
/// rest, and the scan runs in tensor order. Two kept recognitions of one
/// class may therefore still overlap above the threshold, and reordering
/// rows can change the result. Keep it this way; downstream consumers are
/// tuned to this exact behaviour.
#[derive(Clone, Debug)]
pub struct Decoder {
    class_count: usize,
    params: DecoderParams,
}

impl Decoder {
    /// Decoder for `class_count` classes with default thresholds.
    pub fn new(class_count: usize) -> Self {
        Self::with_params(class_count, DecoderParams::default())
    }

    pub fn with_params(class_count: usize, params: DecoderParams) -> Self {
        Self {
            class_count,
            params,
        }
    }

    #[inline]
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    #[inline]
    pub fn params(&self) -> &DecoderParams {
        &self.params
    }

    /// Decode one output tensor into deduplicated recognitions.
    ///
    /// The result groups recognitions by class index and keeps insertion
    /// order within a class. That order is deterministic for a given
    /// tensor, but it is an implementation detail; treat the result as a
    /// set.
    pub fn decode(&self, output: &OutputTensor) -> Result<Vec<Recognition>, DecodeError> {
        if output.class_count() != self.class_count {
            return Err(DecodeError::ClassCountMismatch {
                tensor: output.class_count(),
                decoder: self.class_count,
            });
        }

        // Working sets live only for this call, keeping decode reentrant.
        let mut kept: Vec<Vec<Recognition>> = vec![Vec::new(); self.class_count];

        for row in output.rows() {
            if (row[4] as f64) < self.params.objectness_threshold {
                continue;
            }

            let candidate = Candidate::from_row(row).into_recognition();
            let survivors = &mut kept[candidate.class_id];

            match self.incumbent(survivors, candidate.bbox) {
                None => survivors.push(candidate),
                Some(index) if candidate.confidence > survivors[index].confidence => {
                    // Order-preserving removal, so earlier recognitions
                    // keep winning exact-overlap ties later in the scan.
                    survivors.remove(index);
                    survivors.push(candidate);
                }
                Some(_) => {}
            }
        }

        let recognitions: Vec<Recognition> = kept.into_iter().flatten().collect();
        debug!(
            "decoded {} recognitions from {} rows",
            recognitions.len(),
            output.boxes()
        );
        Ok(recognitions)
    }

    /// Among kept recognitions overlapping `bbox` strictly above the IOU
    /// threshold, the index of the one with the highest overlap. The first
    /// such recognition wins exact ties. NaN overlaps compare false and
    /// never select an incumbent.
    fn incumbent(&self, survivors: &[Recognition], bbox: Rect) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (index, survivor) in survivors.iter().enumerate() {
            let overlap = intersection_over_union(bbox, survivor.bbox);
            if overlap > self.params.iou_threshold
                && best.map_or(true, |(_, top)| overlap > top)
            {
                best = Some((index, overlap));
            }
        }
        best.map(|(index, _)| index)
    }
}
