//! Cascaded level-of-detail compositing for ocean simulation data, and shoreline distance fields.
//!
//! This library is organized into several crates. The most fundamental are:
//! - **core**: 2D lattice points, extents, and integer math
//! - **storage**: dense 2D arrays, layered buffer arrays, bilinear sampling, and compression
//!
//! Then you get extra bits of functionality from the others:
//! - **cascade**: coarse-to-fine combination of per-cascade wave buffers
//! - **sdf**: capture of geometry into depth buffers and jump-flooded shoreline distance fields
//!
//! To learn the basics, start with these doc pages:
//!
//! - [points](crate::core::PointN)
//! - [extents](crate::core::ExtentN)
//! - [arrays](crate::storage::array)
//! - [sampling](crate::storage::sampling)

pub use shoal_core as core;
pub use shoal_storage as storage;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::storage::prelude::*;

    #[cfg(feature = "cascade")]
    pub use super::cascade::prelude::*;

    #[cfg(feature = "sdf")]
    pub use super::sdf::prelude::*;
}

#[cfg(feature = "cascade")]
pub use shoal_cascade as cascade;

#[cfg(feature = "sdf")]
pub use shoal_sdf as sdf;
