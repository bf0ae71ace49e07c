//! Dense 2D arrays.
//!
//! The domain of an array is located within an ambient space, a signed integer lattice where the elements are `Point2i`. This
//! means an array contains data at exactly the set of points in an `Extent2i`, and no more. Every buffer in this workspace
//! (wave layers, combine results, distance field ping-pong buffers) is an `Array2` whose extent starts at the origin and has
//! one point per texel.
//!
//! # Indexing
//!
//! You can index an array with 3 kinds of coordinates, with [`Get`](crate::access_traits) traits:
//!   - `Get*<Stride>`: flat array offset
//!   - `Get*<Local2i>`: 2-dimensional point in extent-local coordinates (i.e. min = `[0, 0]`)
//!   - `Get*<Point2i>`: 2-dimensional point in global (ambient) coordinates
//!
//! Indexing assumes that the coordinates are in-bounds of the array, panicking otherwise.
//!
//! ```
//! use shoal_core::prelude::*;
//! use shoal_storage::prelude::*;
//!
//! let array_extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(64));
//! let mut array = Array2::fill(array_extent, 0);
//!
//! // Write all points in the extent to the same value.
//! let write_extent = Extent2i::from_min_and_lub(Point2i::fill(10), Point2i::fill(20));
//! array.for_each_mut(&write_extent, |_: Point2i, value| *value = 1);
//!
//! // Only the points in the extent should have been written.
//! array.for_each(array.extent(), |p: Point2i, value|
//!     if write_extent.contains(p) {
//!         assert_eq!(value, 1);
//!     } else {
//!         assert_eq!(value, 0);
//!     }
//! );
//! ```
//!
//! # Rows
//!
//! Passes that write every texel independently should use `par_for_each_row_mut`, which hands out disjoint rows to a `rayon`
//! thread pool.

mod coords;

pub use coords::*;

use crate::{
    ForEach, ForEachMut, Get, GetMut, GetRef, IntoRawBytes, Result, StorageError,
};

use shoal_core::prelude::*;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// A map from lattice location `Point2i` to data `T`, stored as a flat, row-major array on the heap.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Array2<T> {
    values: Vec<T>,
    extent: Extent2i,
}

impl<T> Array2<T> {
    /// Create a new `Array2` directly from the extent and values. This asserts that the number of points in the extent matches
    /// the length of the values `Vec`.
    pub fn new(extent: Extent2i, values: Vec<T>) -> Self {
        assert_eq!(extent.num_points(), values.len());

        Self { values, extent }
    }

    /// Like `new`, but returns an error instead of panicking when the number of values doesn't match the extent.
    pub fn try_new(extent: Extent2i, values: Vec<T>) -> Result<Self> {
        if extent.num_points() != values.len() {
            return Err(StorageError::ShapeMismatch {
                shape: extent.shape,
                expected: extent.num_points(),
                actual: values.len(),
            });
        }

        Ok(Self { values, extent })
    }

    /// Moves the raw extent and values storage out of `self`.
    #[inline]
    pub fn into_parts(self) -> (Extent2i, Vec<T>) {
        (self.extent, self.values)
    }

    #[inline]
    pub fn extent(&self) -> &Extent2i {
        &self.extent
    }

    #[inline]
    pub fn shape(&self) -> Point2i {
        self.extent.shape
    }

    /// Returns the entire slice of values.
    #[inline]
    pub fn values_slice(&self) -> &[T] {
        &self.values
    }

    /// Returns the entire slice of values.
    #[inline]
    pub fn values_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Set all points to the same value.
    #[inline]
    pub fn reset_values(&mut self, value: T)
    where
        T: Clone,
    {
        self.values.fill(value);
    }

    /// Returns `true` iff this map contains point `p`.
    #[inline]
    pub fn contains(&self, p: Point2i) -> bool {
        self.extent.contains(p)
    }

    #[inline]
    pub fn stride_from_local_point(&self, p: Local2i) -> Stride {
        debug_assert!(
            p.x() >= 0 && p.x() < self.extent.shape.x(),
            "local point {:?} is outside of shape {:?}",
            p.0,
            self.extent.shape
        );

        Stride((p.y() * self.extent.shape.x() + p.x()) as usize)
    }

    /// Visit every row of the array in parallel. `f` receives the global Y coordinate of the row and its values, where
    /// `row[i]` has global X coordinate `extent.minimum.x() + i`.
    pub fn par_for_each_row_mut(&mut self, f: impl Fn(i32, &mut [T]) + Send + Sync)
    where
        T: Send,
    {
        let width = self.extent.shape.x() as usize;
        if width == 0 {
            return;
        }
        let min_y = self.extent.minimum.y();
        self.values
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(row, values)| f(min_y + row as i32, values));
    }
}

impl<T> Array2<T>
where
    T: Clone,
{
    /// Creates a map that fills the entire `extent` with the same `value`.
    pub fn fill(extent: Extent2i, value: T) -> Self {
        Self::new(extent, vec![value; extent.num_points()])
    }

    /// Like `fill`, but reports allocation failure instead of aborting the process.
    pub fn try_fill(extent: Extent2i, value: T) -> Result<Self> {
        let num_points = extent.num_points();
        let mut values = Vec::new();
        values
            .try_reserve_exact(num_points)
            .map_err(|_| StorageError::AllocationFailed {
                bytes: num_points.saturating_mul(std::mem::size_of::<T>()),
            })?;
        values.resize(num_points, value);

        Ok(Self { values, extent })
    }
}

impl<T> Array2<T> {
    /// Create a new array for `extent` where each point's value is determined by the `filler` function.
    pub fn fill_with(extent: Extent2i, filler: impl FnMut(Point2i) -> T) -> Self {
        Self::new(extent, extent.iter_points().map(filler).collect())
    }
}

impl<'a, T> IntoRawBytes<'a> for Array2<T>
where
    T: bytemuck::Pod,
{
    type Output = &'a [u8];

    fn into_raw_bytes(&'a self) -> Self::Output {
        self.values.as_slice().into_raw_bytes()
    }
}

//  ██████╗ ███████╗████████╗████████╗███████╗██████╗ ███████╗
// ██╔════╝ ██╔════╝╚══██╔══╝╚══██╔══╝██╔════╝██╔══██╗██╔════╝
// ██║  ███╗█████╗     ██║      ██║   █████╗  ██████╔╝███████╗
// ██║   ██║██╔══╝     ██║      ██║   ██╔══╝  ██╔══██╗╚════██║
// ╚██████╔╝███████╗   ██║      ██║   ███████╗██║  ██║███████║
//  ╚═════╝ ╚══════╝   ╚═╝      ╚═╝   ╚══════╝╚═╝  ╚═╝╚══════╝

impl<T> GetRef<Stride> for Array2<T> {
    type Data = T;

    #[inline]
    fn get_ref(&self, stride: Stride) -> &Self::Data {
        &self.values[stride.0]
    }
}

impl<T> GetMut<Stride> for Array2<T> {
    type Data = T;

    #[inline]
    fn get_mut(&mut self, stride: Stride) -> &mut Self::Data {
        &mut self.values[stride.0]
    }
}

impl<T> GetRef<Local2i> for Array2<T> {
    type Data = T;

    #[inline]
    fn get_ref(&self, p: Local2i) -> &Self::Data {
        self.get_ref(self.stride_from_local_point(p))
    }
}

impl<T> GetMut<Local2i> for Array2<T> {
    type Data = T;

    #[inline]
    fn get_mut(&mut self, p: Local2i) -> &mut Self::Data {
        let stride = self.stride_from_local_point(p);

        self.get_mut(stride)
    }
}

impl<T> GetRef<Point2i> for Array2<T> {
    type Data = T;

    #[inline]
    fn get_ref(&self, p: Point2i) -> &Self::Data {
        let local_p = p - self.extent.minimum;

        self.get_ref(Local(local_p))
    }
}

impl<T> GetMut<Point2i> for Array2<T> {
    type Data = T;

    #[inline]
    fn get_mut(&mut self, p: Point2i) -> &mut Self::Data {
        let local_p = p - self.extent.minimum;

        GetMut::<Local2i>::get_mut(self, Local(local_p))
    }
}

impl_get_via_get_ref_and_clone!(Array2<T>, T);

// ███████╗ ██████╗ ██████╗     ███████╗ █████╗  ██████╗██╗  ██╗
// ██╔════╝██╔═══██╗██╔══██╗    ██╔════╝██╔══██╗██╔════╝██║  ██║
// █████╗  ██║   ██║██████╔╝    █████╗  ███████║██║     ███████║
// ██╔══╝  ██║   ██║██╔══██╗    ██╔══╝  ██╔══██║██║     ██╔══██║
// ██║     ╚██████╔╝██║  ██║    ███████╗██║  ██║╚██████╗██║  ██║
// ╚═╝      ╚═════╝ ╚═╝  ╚═╝    ╚══════╝╚═╝  ╚═╝ ╚═════╝╚═╝  ╚═╝

impl<T> ForEach<[i32; 2], Point2i> for Array2<T>
where
    T: Clone,
{
    type Item = T;

    #[inline]
    fn for_each(&self, iter_extent: &Extent2i, mut f: impl FnMut(Point2i, T)) {
        // Make sure we don't index out of array bounds.
        let iter_extent = iter_extent.intersection(&self.extent);
        for p in iter_extent.iter_points() {
            f(p, self.get(p));
        }
    }
}

impl<T> ForEach<[i32; 2], Stride> for Array2<T>
where
    T: Clone,
{
    type Item = T;

    #[inline]
    fn for_each(&self, iter_extent: &Extent2i, mut f: impl FnMut(Stride, T)) {
        let iter_extent = iter_extent.intersection(&self.extent);
        for p in iter_extent.iter_points() {
            let stride = self.stride_from_local_point(Local(p - self.extent.minimum));
            f(stride, self.get(stride));
        }
    }
}

impl<T> ForEachMut<[i32; 2], Point2i> for Array2<T> {
    type Item = T;

    #[inline]
    fn for_each_mut(&mut self, iter_extent: &Extent2i, mut f: impl FnMut(Point2i, &mut T)) {
        let iter_extent = iter_extent.intersection(&self.extent);
        for p in iter_extent.iter_points() {
            f(p, self.get_mut(p));
        }
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
