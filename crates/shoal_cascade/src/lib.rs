//! Combination of cascaded level-of-detail wave buffers.
//!
//! Wave inputs are rasterized into one raw layer per cascade by a `WaveBufferStore`, each input landing in the single cascade
//! whose wavelength band accepts it. A `CascadeCombiner` then walks the cascades from coarsest to finest, adding each
//! cascade's raw layer to a bilinear sample of the already-combined parent, so that every cascade ends up holding all of the
//! waves at or above its own scale.
//!
//! ```
//! use shoal_cascade::prelude::*;
//! use shoal_core::prelude::*;
//!
//! let config = CascadeConfig { cascade_count: 3, resolution: 16, ..Default::default() };
//! let descriptors = config.compute(8.0, Point2f::ZERO).unwrap();
//!
//! let mut store = WaveBufferStore::<f32>::new(3, 16);
//! store.register_input(FnWaveInput::new(0.0, |_world: Point2f| 1.0f32)).unwrap();
//!
//! let mut combiner = CascadeCombiner::<f32>::new(3, 16).unwrap();
//! combiner.run_frame(&mut store, &descriptors, &CombineConfig::default()).unwrap();
//!
//! assert_eq!(combiner.sample(&descriptors, Point2f::ZERO, 0.0), Some(1.0));
//! ```

pub mod combine;
pub mod contributor;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod query;
pub mod registry;
pub mod store;
pub mod wave_sample;

pub use combine::*;
pub use contributor::*;
pub use descriptor::*;
pub use error::*;
pub use filter::*;
pub use query::*;
pub use registry::*;
pub use store::*;
pub use wave_sample::*;

pub mod prelude {
    pub use super::{
        sample_combined, suggest_cascade, AuxiliaryContributor, Cascade, CascadeCombiner,
        CascadeConfig, CascadeDescriptorSet, CascadeError, CombineConfig, ContributorSlot,
        DrawFilter, DynamicWaveContributor, FlowContributor, FnWaveInput, ViewerScale,
        WaveBufferStore, WaveInput, WaveSample,
    };
}
