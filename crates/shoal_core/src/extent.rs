use crate::{IntegerPoint, Ones, Point, Point2, Point2f, PointN, SmallZero};

use core::ops::{Add, AddAssign, Mul, Range, Sub, SubAssign};
use itertools::{iproduct, Product};
use serde::{Deserialize, Serialize};

/// A 2-dimensional extent with scalar type `T`.
pub type Extent2<T> = ExtentN<[T; 2]>;
/// A 2-dimensional extent with scalar type `i32`.
pub type Extent2i = ExtentN<[i32; 2]>;
/// A 2-dimensional extent with scalar type `f32`.
pub type Extent2f = ExtentN<[f32; 2]>;

/// An N-dimensional extent. This is mathematically the Cartesian product of a half-closed interval `[a, b)` in each dimension.
/// You can also just think of it as an axis-aligned box with some shape and a minimum point. Integer extents bound the texels
/// of a buffer, while float extents bound regions of world space.
#[derive(Debug, Deserialize, Eq, Serialize)]
pub struct ExtentN<N> {
    /// The least point contained in the extent.
    pub minimum: PointN<N>,
    /// The length of each dimension.
    pub shape: PointN<N>,
}

// A few of these traits could be derived. But it seems that derive will not help the compiler infer trait bounds as well.

impl<N> Clone for ExtentN<N>
where
    PointN<N>: Clone,
{
    #[inline]
    fn clone(&self) -> Self {
        Self {
            minimum: self.minimum.clone(),
            shape: self.shape.clone(),
        }
    }
}
impl<N> Copy for ExtentN<N> where PointN<N>: Copy {}

impl<N> PartialEq for ExtentN<N>
where
    PointN<N>: PartialEq,
{
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.minimum.eq(&other.minimum) && self.shape.eq(&other.shape)
    }
}

impl<N> ExtentN<N> {
    /// The default representation of an extent as the minimum point and shape.
    #[inline]
    pub fn from_min_and_shape(minimum: PointN<N>, shape: PointN<N>) -> Self {
        Self { minimum, shape }
    }
}

impl<N> ExtentN<N>
where
    PointN<N>: Point,
{
    /// Translate the extent such that it has `new_min` as it's new minimum.
    #[inline]
    pub fn with_minimum(&self, new_min: PointN<N>) -> Self {
        Self::from_min_and_shape(new_min, self.shape)
    }

    /// The least point `p` for which all points `q` in the extent satisfy `q < p`.
    #[inline]
    pub fn least_upper_bound(&self) -> PointN<N> {
        self.minimum + self.shape
    }

    /// Returns `true` iff the point `p` is contained in this extent.
    #[inline]
    pub fn contains(&self, p: PointN<N>) -> bool {
        let lub = self.least_upper_bound();

        self.minimum <= p && p < lub
    }

    /// Returns `true` iff every point of `other` is inside the closure of `self`. Boundaries may touch.
    #[inline]
    pub fn contains_extent(&self, other: &Self) -> bool {
        self.minimum <= other.minimum && other.least_upper_bound() <= self.least_upper_bound()
    }

    /// Returns a new extent that's been padded on all borders by `pad_amount`.
    #[inline]
    pub fn padded(&self, pad_amount: <PointN<N> as Point>::Scalar) -> Self
    where
        <PointN<N> as Point>::Scalar: Add<Output = <PointN<N> as Point>::Scalar>,
    {
        Self::from_min_and_shape(
            self.minimum - (PointN::ONES * pad_amount),
            self.shape + (PointN::ONES * (pad_amount + pad_amount)),
        )
    }

    /// Returns a new extent that's been shrunk on all borders by `amount`. The shape may become non-positive, in which case the
    /// extent contains nothing.
    #[inline]
    pub fn shrunk(&self, amount: <PointN<N> as Point>::Scalar) -> Self
    where
        <PointN<N> as Point>::Scalar: Add<Output = <PointN<N> as Point>::Scalar>,
    {
        Self::from_min_and_shape(
            self.minimum + (PointN::ONES * amount),
            self.shape - (PointN::ONES * (amount + amount)),
        )
    }
}

impl<T> Extent2<T>
where
    T: Copy + Mul<Output = T>,
{
    #[inline]
    pub fn volume(&self) -> T {
        self.shape.x() * self.shape.y()
    }
}

impl Extent2i {
    /// The number of points contained in the extent.
    #[inline]
    pub fn num_points(&self) -> usize {
        self.volume().max(0) as usize
    }

    /// Returns `true` iff the number of points in the extent is 0.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// An alternative representation of an extent as the minimum point and least upper bound.
    #[inline]
    pub fn from_min_and_lub(minimum: Point2<i32>, least_upper_bound: Point2<i32>) -> Self {
        // We want to avoid negative shape components.
        let shape = (least_upper_bound - minimum).join(&PointN::ZERO);

        Self { minimum, shape }
    }

    /// An alternative representation of an integer extent as the minimum point and maximum point. This only works for integer
    /// extents, where there is a unique maximum point.
    #[inline]
    pub fn from_min_and_max(minimum: Point2<i32>, max: Point2<i32>) -> Self {
        Self::from_min_and_lub(minimum, max + PointN::ONES)
    }

    /// The unique greatest point in the extent.
    #[inline]
    pub fn max(&self) -> Point2<i32> {
        self.least_upper_bound() - PointN::ONES
    }

    /// Returns the extent containing only the points in both `self` and `other`.
    #[inline]
    pub fn intersection(&self, other: &Self) -> Self {
        let minimum = self.minimum.join(&other.minimum);
        let lub = self.least_upper_bound().meet(&other.least_upper_bound());

        Self::from_min_and_lub(minimum, lub)
    }

    /// Returns `true` iff the intersection of `self` and `other` is equal to `self`.
    #[inline]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        self.intersection(other).eq(self)
    }

    /// Iterate over all points in the extent, in row-major order.
    /// ```
    /// # use shoal_core::prelude::*;
    /// #
    /// let extent = Extent2i::from_min_and_shape(PointN([0, 0]), PointN([2, 2]));
    /// let points = extent.iter_points().collect::<Vec<_>>();
    /// assert_eq!(points, vec![PointN([0, 0]), PointN([1, 0]), PointN([0, 1]), PointN([1, 1])]);
    /// ```
    #[inline]
    pub fn iter_points(&self) -> Extent2PointIter<i32> {
        let lub = self.least_upper_bound();

        Extent2PointIter {
            // iproduct is opposite of row-major order.
            product_iter: iproduct!(self.minimum.y()..lub.y(), self.minimum.x()..lub.x()),
        }
    }
}

impl Extent2f {
    /// A square extent of side length `size` centered on `center`.
    #[inline]
    pub fn from_center_and_size(center: Point2f, size: f32) -> Self {
        Self::from_min_and_shape(center - Point2f::fill(size / 2.0), Point2f::fill(size))
    }

    #[inline]
    pub fn center(&self) -> Point2f {
        self.minimum + self.shape / 2.0
    }

    /// Returns `true` iff the extent has a positive, finite area.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.shape.x() > 0.0 && self.shape.y() > 0.0 && self.shape.is_finite())
    }
}

/// An iterator over all points in an `Extent2<T>`.
pub struct Extent2PointIter<T>
where
    Range<T>: Iterator<Item = T>,
{
    product_iter: Product<Range<T>, Range<T>>,
}

impl<T> Iterator for Extent2PointIter<T>
where
    T: Clone,
    Range<T>: Iterator<Item = T>,
{
    type Item = Point2<T>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.product_iter.next().map(|(y, x)| PointN([x, y]))
    }
}

impl<T> Add<PointN<T>> for ExtentN<T>
where
    PointN<T>: Add<Output = PointN<T>>,
{
    type Output = Self;

    #[inline]
    fn add(self, rhs: PointN<T>) -> Self::Output {
        ExtentN {
            minimum: self.minimum + rhs,
            shape: self.shape,
        }
    }
}

impl<T> Sub<PointN<T>> for ExtentN<T>
where
    PointN<T>: Sub<Output = PointN<T>>,
{
    type Output = Self;

    #[inline]
    fn sub(self, rhs: PointN<T>) -> Self::Output {
        ExtentN {
            minimum: self.minimum - rhs,
            shape: self.shape,
        }
    }
}

impl<T> AddAssign<PointN<T>> for ExtentN<T>
where
    Self: Copy + Add<PointN<T>, Output = ExtentN<T>>,
{
    #[inline]
    fn add_assign(&mut self, rhs: PointN<T>) {
        *self = *self + rhs;
    }
}

impl<T> SubAssign<PointN<T>> for ExtentN<T>
where
    Self: Copy + Sub<PointN<T>, Output = ExtentN<T>>,
{
    #[inline]
    fn sub_assign(&mut self, rhs: PointN<T>) {
        *self = *self - rhs;
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
