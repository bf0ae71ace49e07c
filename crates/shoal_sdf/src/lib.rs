//! Shoreline signed distance fields.
//!
//! Geometry registered in a `GeometryRegistry` is captured from above into a depth buffer, where each texel holds the
//! water depth below a reference level. Texels at or above the reference level seed a [jump
//! flood](https://en.wikipedia.org/wiki/Jump_flooding_algorithm), which estimates the distance from every texel to the
//! nearest shore. A `CacheInstance` owns the buffers for one capture region and either recomputes its field on demand or
//! serves a `BakedDistanceField`.
//!
//! ```
//! use shoal_core::prelude::*;
//! use shoal_sdf::prelude::*;
//!
//! let mut registry = GeometryRegistry::new();
//! let island = Extent2f::from_center_and_size(Point2f::ZERO, 2.0);
//! registry.add("terrain", FnGeometry::new(island, |_: Point2f| 1.0f32));
//!
//! let config = DistanceFieldConfig {
//!     resolution: 16,
//!     region: CaptureRegion::square(Point2f::ZERO, 16.0),
//!     ..Default::default()
//! };
//! let mut instance = CacheInstance::realtime(config).unwrap();
//! instance.populate(&registry).unwrap();
//!
//! assert!(instance.sample_signed_distance(Point2f::ZERO).unwrap() <= 0.0);
//! assert!(instance.sample_signed_distance(PointN([6.5, 0.5])).unwrap() > 4.0);
//! ```

pub mod cache;
pub mod capture;
pub mod error;
pub mod instance;
pub mod jump_flood;
pub mod persist;

pub use cache::*;
pub use capture::*;
pub use error::*;
pub use instance::*;
pub use jump_flood::FloodTexel;
pub use persist::*;

pub mod prelude {
    pub use super::{
        BakedDistanceField, CacheInstance, CacheState, CaptureRegion, CaptureSource,
        DistanceFieldCache, DistanceFieldConfig, FnGeometry, Geometry, GeometryRegistry,
        HeightfieldGeometry, SdfError,
    };
}
