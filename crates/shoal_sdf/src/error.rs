use shoal_storage::StorageError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdfError {
    #[error("none of the layer selectors {selectors:?} resolve to any registered geometry")]
    NoGeometrySelected { selectors: Vec<String> },

    #[error("distance field resolution must be positive")]
    NonPositiveResolution,

    #[error("resolution {resolution} exceeds the supported maximum of {max}")]
    ResolutionUnsupported { resolution: u32, max: u32 },

    #[error("failed to allocate {bytes} bytes for the distance field")]
    AllocationFailed { bytes: usize },

    #[error("capture region of size {size} covers no area")]
    DegenerateRegion { size: f32 },

    #[error("baked field has {actual} texels per side, but the cache expects {expected}")]
    BakedResolutionMismatch { expected: u32, actual: i32 },

    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for SdfError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::AllocationFailed { bytes } => SdfError::AllocationFailed { bytes },
            other => SdfError::Storage(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, SdfError>;
