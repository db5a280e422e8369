//! Seam to the external inference engine.

use std::error::Error;

use spotter_yolo::{InputTensor, OutputTensor};

/// Failure reported by an inference backend.
///
/// Backends wrap whatever their engine throws; the pipeline only needs a
/// message and, where available, the underlying cause.
#[derive(thiserror::Error, Debug)]
#[error("inference backend: {message}")]
pub struct ModelError {
    message: String,
    #[source]
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl ModelError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// A pretrained detection network.
///
/// Everything about loading and running the network stays behind this
/// trait: the pipeline stages an input tensor, calls [`infer`](Self::infer)
/// and decodes whatever comes back. Implementations may keep internal
/// buffers, hence `&mut self`.
pub trait InferenceModel {
    /// Square input resolution the network was trained for.
    fn input_size(&self) -> usize;

    /// Run the network on a staged input buffer.
    fn infer(&mut self, input: &InputTensor) -> Result<OutputTensor, ModelError>;
}
