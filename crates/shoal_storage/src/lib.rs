#![allow(clippy::type_complexity)]

//! Dense storage for per-texel simulation data on a 2D integer lattice.
//!
//! The core storage types are:
//!   - `Array2`: a dense, row-major 2D array
//!   - `LayeredArray2`: a stack of same-shaped `Array2` layers, one per level of detail
//!
//! Values can be sampled between texel centers with `sample_bilinear`, as long as they implement `SampleValue`. Distance
//! fields are stored as `DepthDistance` texels, which implement the `SignedDistance` trait.
//!
//! Arrays are serializable, and any serializable value can be compressed with `BincodeCompression` over a `BytesCompression`
//! backend (`Lz4` or `Snappy`, depending on features).

#[macro_use]
pub mod access_traits;
pub mod array;
pub mod compression;
pub mod error;
pub mod layered;
pub mod raw_bytes;
pub mod sampling;
pub mod signed_distance;

pub use access_traits::*;
pub use array::*;
pub use compression::*;
pub use error::*;
pub use layered::*;
pub use raw_bytes::*;
pub use sampling::*;
pub use signed_distance::*;

pub mod prelude {
    pub use super::{
        sample_bilinear, sample_uv, Array2, BincodeCompression, BytesCompression, Compressed,
        Compression, DepthDistance, ForEach, ForEachMut, Get, GetMut, GetRef, IntoRawBytes,
        LayeredArray2, Local, Local2i, SampleValue, SignedDistance, StorageError, Stride,
    };

    #[cfg(feature = "lz4")]
    pub use super::Lz4;
    #[cfg(feature = "snap")]
    pub use super::Snappy;
}
