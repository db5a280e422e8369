//! YOLO-style detection output decoding.
//!
//! A detection network hands back a `[1, N, 5 + C]` tensor: `N` box rows,
//! each holding two corners, an objectness score, and `C` class
//! probabilities. This crate wraps that tensor, filters rows by
//! objectness, and deduplicates overlapping boxes per class with the
//! greedy replace-the-incumbent scheme described on [`Decoder`]. It knows
//! nothing about how the tensor was produced; the inference engine lives
//! behind a seam in the `spotter` crate.

mod decoder;
mod io;
mod labels;
mod recognition;
mod tensor;

pub use decoder::{Candidate, DecodeError, Decoder, DecoderParams};
pub use io::{DetectReport, DetectorConfig, DetectorIoError, LabeledRecognition};
pub use labels::{Labels, LabelsError};
pub use recognition::Recognition;
pub use tensor::{InputTensor, OutputTensor, TensorError, DEFAULT_INPUT_SIZE, ROW_PREFIX};
