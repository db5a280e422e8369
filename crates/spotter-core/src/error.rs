use thiserror::Error;

/// Errors from buffer-backed constructors and bulk pixel writes.
///
/// Per-pixel reads and writes never fail; see the crate docs for the
/// padding and drop semantics that make that possible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("buffer holds {got} values but {width}x{height} RGB needs {expected}")]
    BufferSize {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },
}
