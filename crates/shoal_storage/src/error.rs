use shoal_core::Point2i;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("bincode error: {0}")]
    Bincode(#[from] bincode::Error),

    #[error("expected {expected} values for shape {shape:?}, got {actual}")]
    ShapeMismatch {
        shape: Point2i,
        expected: usize,
        actual: usize,
    },

    #[error("layer shape {actual:?} does not match the array's layer shape {expected:?}")]
    LayerShapeMismatch { expected: Point2i, actual: Point2i },

    #[error("failed to allocate {bytes} bytes")]
    AllocationFailed { bytes: usize },
}

pub type Result<T> = std::result::Result<T, StorageError>;
