use shoal_core::{Point2i, PointN};

use core::ops::{Add, Deref, Sub};

/// Array-local coordinates.
///
/// Most commonly, you will index an array with a `Point2i`, which is assumed to be in global coordinates. `Local2i` coordinates
/// are relative to the array's minimum, so `Local(PointN([0, 0]))` is always the first texel.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Local<N>(pub PointN<N>);

/// Array-local coordinates, wrapping a `Point2i`.
pub type Local2i = Local<[i32; 2]>;

impl Local2i {
    /// Wraps all of the `points` using the `Local` constructor.
    #[inline]
    pub fn localize_points_slice(points: &[Point2i]) -> Vec<Local2i> {
        points.iter().cloned().map(Local).collect()
    }
}

impl<N> Deref for Local<N> {
    type Target = PointN<N>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// The most efficient coordinates for slice-backed arrays. A single number that translates directly to a slice offset.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Stride(pub usize);

impl Add for Stride {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        // Wraps for negative point offsets.
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl Sub for Stride {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        // Wraps for negative point offsets.
        Self(self.0.wrapping_sub(rhs.0))
    }
}
