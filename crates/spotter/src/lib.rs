//! High-level facade crate for the `spotter-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the image model and decoder crates
//! - the [`Recognizer`] pipeline that resamples a frame into a model
//!   input, runs an [`InferenceModel`], and decodes the result
//! - (feature-gated) conversions from and to `image` crate buffers.
//!
//! ## Quickstart
//!
//! ```no_run
//! use spotter::{
//!     ArrayImage, InferenceModel, InputTensor, Labels, ModelError, OutputTensor, Recognizer,
//! };
//!
//! # struct NullModel;
//! # impl InferenceModel for NullModel {
//! #     fn input_size(&self) -> usize { 416 }
//! #     fn infer(&mut self, _input: &InputTensor) -> Result<OutputTensor, ModelError> {
//! #         OutputTensor::from_shape(&[1, 0, 85], Vec::new())
//! #             .map_err(|e| ModelError::with_source("bad shape", e))
//! #     }
//! # }
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let model = NullModel; // your inference backend here
//! let labels = Labels::from_file("coco.names")?;
//! let mut recognizer = Recognizer::new(model, labels);
//!
//! let frame = ArrayImage::new(640, 480);
//! for recognition in recognizer.recognize(&frame)? {
//!     println!(
//!         "{:?} at {:?}",
//!         recognizer.label_of(&recognition),
//!         recognition.bbox
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `spotter::core`: image model, rectangles, sampling strategies.
//! - `spotter::yolo`: tensors, labels, the per-class greedy decoder.
//! - `spotter::convert` (feature `image`): `image` crate buffer
//!   conversions.
//!
//! Inference engines and capture devices stay out of this workspace;
//! implement [`InferenceModel`] and [`FrameSource`] to plug yours in.

pub use spotter_core as core;
pub use spotter_yolo as yolo;

pub use spotter_core::{
    intersection_over_union, union_area, ArrayImage, Bilinear, Channel, ChannelPlane,
    ChannelPlaneMut, ImageError, Interpolator, Nearest, Rect, Rgb, CHANNELS,
};
pub use spotter_yolo::{
    Candidate, DecodeError, Decoder, DecoderParams, DetectReport, DetectorConfig, DetectorIoError,
    InputTensor, LabeledRecognition, Labels, LabelsError, OutputTensor, Recognition, TensorError,
    DEFAULT_INPUT_SIZE,
};

pub use spotter_core::{init, init_with_level};

#[cfg(feature = "tracing")]
pub use spotter_core::init_tracing;

mod model;
mod recognizer;

pub use model::{InferenceModel, ModelError};
pub use recognizer::{FrameSource, RecognizeError, Recognizer};

#[cfg(feature = "image")]
pub mod convert;
