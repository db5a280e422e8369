//! The frame-to-recognitions pipeline.

use log::debug;
use thiserror::Error;

use spotter_core::{ArrayImage, Interpolator, Rect};
use spotter_yolo::{
    DecodeError, Decoder, DecoderParams, InputTensor, Labels, Recognition, TensorError,
};

use crate::model::{InferenceModel, ModelError};

/// Pipeline failures, in stage order.
#[derive(Error, Debug)]
pub enum RecognizeError {
    #[error(transparent)]
    Stage(#[from] TensorError),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// A source of consecutive video frames: camera, file decoder, or a
/// synthetic generator.
///
/// Capture backends live outside this crate; the pipeline only advances a
/// source and reads its current frame.
pub trait FrameSource {
    /// The most recently produced frame.
    fn current_frame(&self) -> &ArrayImage;

    /// Whether another frame can be produced right now.
    fn has_next(&self) -> bool;

    /// Produce the next frame, replacing the current one.
    fn advance(&mut self);

    /// Rewind to the beginning, where the backend supports it.
    fn restart(&mut self) {}

    /// Extent of the current frame.
    fn bounds(&self) -> Rect {
        self.current_frame().bounds()
    }
}

/// Owns the model, labels, decoder, and the fixed-size staging buffers.
///
/// One instance drives recognition frame after frame; the input image and
/// tensor are allocated once at construction and refilled per frame.
pub struct Recognizer<M> {
    model: M,
    labels: Labels,
    decoder: Decoder,
    input_image: ArrayImage,
    input_tensor: InputTensor,
}

impl<M: InferenceModel> Recognizer<M> {
    /// Pipeline with default decoder thresholds.
    pub fn new(model: M, labels: Labels) -> Self {
        Self::with_params(model, labels, DecoderParams::default())
    }

    pub fn with_params(model: M, labels: Labels, params: DecoderParams) -> Self {
        let size = model.input_size();
        Self {
            decoder: Decoder::with_params(labels.len(), params),
            input_image: ArrayImage::new(size, size),
            input_tensor: InputTensor::new(size),
            model,
            labels,
        }
    }

    #[inline]
    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    #[inline]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Square resolution frames are resampled to before inference.
    #[inline]
    pub fn input_size(&self) -> usize {
        self.input_tensor.size()
    }

    /// Class name for a recognition, when the model emitted a known class.
    pub fn label_of(&self, recognition: &Recognition) -> Option<&str> {
        self.labels.get(recognition.class_id)
    }

    /// Recognize a frame, viewing it through the smallest window of the
    /// model's aspect ratio that contains the whole frame. The border
    /// introduced by the aspect fit reads the frame's padding colour.
    ///
    /// Returned boxes are in model-input pixels.
    pub fn recognize<J: Interpolator>(
        &mut self,
        frame: &ArrayImage<J>,
    ) -> Result<Vec<Recognition>, RecognizeError> {
        let aspect = self.input_image.bounds().aspect_ratio();
        let window = frame.bounds().smallest_containing_box(aspect);
        self.recognize_window(frame, window)
    }

    /// Recognize a frame through an explicit source window.
    pub fn recognize_window<J: Interpolator>(
        &mut self,
        frame: &ArrayImage<J>,
        window: Rect,
    ) -> Result<Vec<Recognition>, RecognizeError> {
        self.input_image.write_from_window(frame, window);
        self.input_tensor.stage(&self.input_image)?;
        let output = self.model.infer(&self.input_tensor)?;
        let recognitions = self.decoder.decode(&output)?;
        debug!(
            "{}x{} frame -> {} recognitions",
            frame.width(),
            frame.height(),
            recognitions.len()
        );
        Ok(recognitions)
    }

    /// Advance `source` if it has a frame ready, then recognize its
    /// current frame. An exhausted source keeps serving its last frame.
    pub fn recognize_next<S: FrameSource>(
        &mut self,
        source: &mut S,
    ) -> Result<Vec<Recognition>, RecognizeError> {
        if source.has_next() {
            source.advance();
        }
        self.recognize(source.current_frame())
    }
}
