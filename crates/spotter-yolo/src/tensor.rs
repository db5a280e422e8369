//! Raw tensors crossing the inference boundary.
//!
//! Inference engines exchange flat `f32` buffers plus a shape; these types
//! pin down the two layouts this crate understands. [`InputTensor`] is the
//! NHWC staging buffer fed to the network, [`OutputTensor`] the row-per-box
//! detection output read back from it. Both validate shape once at the
//! boundary so the decoder can index rows without further checks.

use thiserror::Error;

use spotter_core::{ArrayImage, CHANNELS};

/// Square input resolution of the stock YOLOv3 checkpoints.
pub const DEFAULT_INPUT_SIZE: usize = 416;

/// Values preceding the class probabilities in an output row: four corner
/// coordinates and the objectness score.
pub const ROW_PREFIX: usize = 5;

/// Shape and length errors raised when wrapping raw tensor data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TensorError {
    #[error("expected a rank 3 or 4 tensor, got shape {shape:?}")]
    Rank { shape: Vec<usize> },
    #[error("leading dimensions must all be 1, got shape {shape:?}")]
    LeadingDims { shape: Vec<usize> },
    #[error("rows hold {row_len} values, need at least {} (corners, objectness, one class)", ROW_PREFIX + 1)]
    RowTooShort { row_len: usize },
    #[error("data holds {got} values but the shape implies {expected}")]
    DataLength { expected: usize, got: usize },
    #[error("image is {got_width}x{got_height}, staging expects {expected}x{expected}")]
    InputSize {
        expected: usize,
        got_width: usize,
        got_height: usize,
    },
}

/// Owned raw output of a detection network, shape `[1, N, 5 + C]`.
///
/// Each of the `N` rows is laid out
/// `[x1, y1, x2, y2, objectness, p_0, .., p_{C-1}]` with coordinates in
/// model-input pixels. Rows are stored contiguously in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct OutputTensor {
    boxes: usize,
    row_len: usize,
    data: Vec<f32>,
}

impl OutputTensor {
    /// Wrap flat row-major data under the given shape.
    ///
    /// The shape must be rank 3 or 4 with every dimension before the last
    /// two equal to 1; the trailing two dimensions are `[N, 5 + C]` with
    /// `C >= 1`. `N` may be zero.
    pub fn from_shape(shape: &[usize], data: Vec<f32>) -> Result<Self, TensorError> {
        if shape.len() < 3 || shape.len() > 4 {
            return Err(TensorError::Rank {
                shape: shape.to_vec(),
            });
        }
        let (leading, tail) = shape.split_at(shape.len() - 2);
        if leading.iter().any(|&dim| dim != 1) {
            return Err(TensorError::LeadingDims {
                shape: shape.to_vec(),
            });
        }

        let boxes = tail[0];
        let row_len = tail[1];
        if row_len <= ROW_PREFIX {
            return Err(TensorError::RowTooShort { row_len });
        }

        let expected = boxes * row_len;
        if data.len() != expected {
            return Err(TensorError::DataLength {
                expected,
                got: data.len(),
            });
        }

        Ok(Self {
            boxes,
            row_len,
            data,
        })
    }

    /// Build a tensor from one slice per box row. Rows must share a common
    /// length of at least 6.
    pub fn from_rows(rows: &[Vec<f32>]) -> Result<Self, TensorError> {
        let row_len = rows.first().map_or(0, Vec::len);
        let data = rows.iter().flatten().copied().collect();
        Self::from_shape(&[1, rows.len(), row_len], data)
    }

    /// Number of box rows, `N`.
    #[inline]
    pub fn boxes(&self) -> usize {
        self.boxes
    }

    /// Values per row, `5 + C`.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.row_len
    }

    /// Number of classes, `C`.
    #[inline]
    pub fn class_count(&self) -> usize {
        self.row_len - ROW_PREFIX
    }

    /// One box row, `[x1, y1, x2, y2, objectness, p_0, ..]`.
    #[inline]
    pub fn row(&self, index: usize) -> &[f32] {
        let start = index * self.row_len;
        &self.data[start..start + self.row_len]
    }

    /// All box rows in tensor order.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.row_len)
    }

    /// The flat row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

/// Reusable NHWC staging buffer for a square model input, shape
/// `[1, size, size, 3]`.
///
/// Allocated once and refilled per frame; [`stage`](Self::stage) rescales
/// the image's `[0, 1]` samples to the `[0, 255]` range the pretrained
/// network expects. That rescale belongs to this boundary, not to the
/// image model.
#[derive(Clone, Debug)]
pub struct InputTensor {
    size: usize,
    data: Vec<f32>,
}

impl InputTensor {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size * CHANNELS],
        }
    }

    /// Edge length of the square input.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Tensor shape, `[1, height, width, channels]`.
    pub fn shape(&self) -> [usize; 4] {
        [1, self.size, self.size, CHANNELS]
    }

    /// The flat NHWC buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Refill the buffer from `image`, multiplying every sample by 255.
    ///
    /// The image's row-major interleaved layout coincides with NHWC, so
    /// staging is a single pass. The image must match the staged
    /// resolution exactly; resampling happens earlier in the pipeline.
    pub fn stage<I>(&mut self, image: &ArrayImage<I>) -> Result<(), TensorError> {
        if image.width() != self.size || image.height() != self.size {
            return Err(TensorError::InputSize {
                expected: self.size,
                got_width: image.width(),
                got_height: image.height(),
            });
        }
        for (dst, src) in self.data.iter_mut().zip(image.as_slice()) {
            *dst = (255.0 * src) as f32;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spotter_core::Rgb;

    #[test]
    fn from_shape_accepts_rank_three_and_four() {
        let data = vec![0.0; 2 * 7];
        assert!(OutputTensor::from_shape(&[1, 2, 7], data.clone()).is_ok());
        let t = OutputTensor::from_shape(&[1, 1, 2, 7], data).unwrap();
        assert_eq!(t.boxes(), 2);
        assert_eq!(t.row_len(), 7);
        assert_eq!(t.class_count(), 2);
    }

    #[test]
    fn from_shape_rejects_bad_shapes() {
        assert_eq!(
            OutputTensor::from_shape(&[2, 7], vec![0.0; 14]).unwrap_err(),
            TensorError::Rank {
                shape: vec![2, 7]
            }
        );
        assert_eq!(
            OutputTensor::from_shape(&[2, 3, 7], vec![0.0; 42]).unwrap_err(),
            TensorError::LeadingDims {
                shape: vec![2, 3, 7]
            }
        );
        assert_eq!(
            OutputTensor::from_shape(&[1, 3, 5], vec![0.0; 15]).unwrap_err(),
            TensorError::RowTooShort { row_len: 5 }
        );
        assert_eq!(
            OutputTensor::from_shape(&[1, 3, 7], vec![0.0; 20]).unwrap_err(),
            TensorError::DataLength {
                expected: 21,
                got: 20
            }
        );
    }

    #[test]
    fn empty_tensor_is_valid() {
        let t = OutputTensor::from_shape(&[1, 0, 85], Vec::new()).unwrap();
        assert_eq!(t.boxes(), 0);
        assert_eq!(t.class_count(), 80);
        assert_eq!(t.rows().count(), 0);
    }

    #[test]
    fn rows_slice_the_flat_buffer_in_order() {
        let t = OutputTensor::from_rows(&[
            vec![0.0, 0.0, 1.0, 1.0, 0.9, 1.0],
            vec![2.0, 2.0, 3.0, 3.0, 0.8, 0.0],
        ])
        .unwrap();
        assert_eq!(t.boxes(), 2);
        assert_eq!(t.row(1)[0], 2.0);
        let collected: Vec<_> = t.rows().collect();
        assert_eq!(collected.len(), 2);
        assert_eq!(collected[0][4], 0.9);
        assert_eq!(collected[1][4], 0.8);
    }

    #[test]
    fn staging_rescales_to_byte_range_in_storage_order() {
        let image = spotter_core::ArrayImage::from_fn(2, 2, |x, y| {
            Rgb::new((x + 2 * y) as f64 / 10.0, 0.5, 1.0)
        });
        let mut input = InputTensor::new(2);
        input.stage(&image).unwrap();

        assert_eq!(input.shape(), [1, 2, 2, 3]);
        let staged = input.as_slice();
        // Pixel (x=1, y=1) is the last pixel; its red sample is 0.3 * 255.
        assert_eq!(staged.len(), 12);
        assert!((staged[9] - 76.5).abs() < 1e-4);
        assert!((staged[10] - 127.5).abs() < 1e-4);
        assert_eq!(staged[11], 255.0);
        // First pixel red is 0.0.
        assert_eq!(staged[0], 0.0);
    }

    #[test]
    fn staging_rejects_mismatched_resolution() {
        let image = spotter_core::ArrayImage::new(3, 2);
        let mut input = InputTensor::new(2);
        assert_eq!(
            input.stage(&image).unwrap_err(),
            TensorError::InputSize {
                expected: 2,
                got_width: 3,
                got_height: 2
            }
        );
    }
}
