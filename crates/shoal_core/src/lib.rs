//! The core data types for defining 2D lattices and world-space regions:
//! - `PointN`: an N-dimensional point, most importantly `Point2i` (texel coordinates) and `Point2f` (world positions)
//! - `ExtentN`: an N-dimensional extent, most importantly `Extent2i` (texel bounds) and `Extent2f` (world regions)

pub mod extent;
pub mod int_math;
pub mod point;
pub mod point2;

pub use extent::{Extent2, Extent2PointIter, Extent2f, Extent2i, ExtentN};
pub use point::{
    Bounded, Distance, DotProduct, IntegerPoint, Norm, NormSquared, Ones, Point, PointN, SmallOne,
    SmallZero,
};
pub use point2::{Point2, Point2f, Point2i};

pub use num;

pub mod prelude {
    pub use super::{
        Bounded, Distance, DotProduct, Extent2, Extent2f, Extent2i, ExtentN, IntegerPoint, Norm,
        NormSquared, Ones, Point, Point2, Point2f, Point2i, PointN, SmallOne, SmallZero,
    };
}
