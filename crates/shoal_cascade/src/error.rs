use crate::ContributorSlot;

use shoal_core::Point2i;
use shoal_storage::StorageError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CascadeError {
    #[error("no descriptor for cascade {index} (the combiner has {cascade_count} cascades)")]
    MissingDescriptor { index: usize, cascade_count: usize },

    #[error("cascade set must contain at least one cascade")]
    NoCascades,

    #[error("texture resolution must be positive")]
    NonPositiveResolution,

    #[error("cascade {index} has resolution {actual}, but cascade 0 has resolution {expected}")]
    NonUniformResolution {
        index: usize,
        expected: u32,
        actual: u32,
    },

    #[error("cascade {index} must have a larger texel width than the cascade before it")]
    NonIncreasingTexelWidth { index: usize },

    #[error("descriptor at position {position} claims to be cascade {index}")]
    MisplacedDescriptor { position: usize, index: usize },

    #[error("expected {expected} layers, got {actual}")]
    LayerCountMismatch { expected: usize, actual: usize },

    #[error("layer shape {actual:?} does not match the cascade layer shape {expected:?}")]
    LayerShapeMismatch { expected: Point2i, actual: Point2i },

    #[error("flow period must be positive, got {0}")]
    NonPositiveFlowPeriod(f32),

    #[error("a contributor is already registered for the {0:?} slot")]
    SlotOccupied(ContributorSlot),

    #[error("registry has been torn down")]
    TornDown,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, CascadeError>;
