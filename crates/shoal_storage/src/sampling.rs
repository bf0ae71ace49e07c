//! Bilinear sampling of 2D arrays with clamp-to-edge addressing.
//!
//! Texel `p` of an array has its center at continuous texel coordinates `p + 0.5`, so sampling exactly at a texel center
//! returns that texel's value.

use crate::{Array2, Get};

use shoal_core::prelude::*;

use core::ops::{Add, Mul, Sub};

/// A value that can be linearly blended. This is what lets the same sampling and combine code run on scalar heights, flow
/// vectors and full wave samples.
pub trait SampleValue:
    Copy + Send + Sync + Add<Output = Self> + Sub<Output = Self> + Mul<f32, Output = Self>
{
    /// The additive identity. Null bindings read as this.
    const IDENTITY: Self;
}

impl SampleValue for f32 {
    const IDENTITY: Self = 0.0;
}

impl SampleValue for Point2f {
    const IDENTITY: Self = PointN([0.0; 2]);
}

/// Linear interpolation. Exact at `t == 0`, and exact for any `t` when `a == b`.
#[inline]
pub fn lerp<T: SampleValue>(a: T, b: T, t: f32) -> T {
    a + (b - a) * t
}

/// Reads the texel at `p`, clamping `p` into the array's extent. Panics if the array is empty.
#[inline]
pub fn get_clamped<T: Copy>(array: &Array2<T>, p: Point2i) -> T {
    let extent = array.extent();
    assert!(!extent.is_empty(), "cannot sample an empty array");

    let clamped = p.join(&extent.minimum).meet(&extent.max());

    array.get(clamped)
}

/// Bilinearly sample `array` at continuous texel coordinates, relative to the array's minimum.
pub fn sample_bilinear<T: SampleValue>(array: &Array2<T>, texel_coords: Point2f) -> T {
    // Past one texel outside the array every tap reads the edge, so clamping here only keeps the integer math in range.
    let shape = Point2f::from(array.shape());
    let shifted = texel_coords - Point2f::fill(0.5);
    let shifted = PointN([
        shifted.x().clamp(-1.0, shape.x()),
        shifted.y().clamp(-1.0, shape.y()),
    ]);
    let base = shifted.floor();
    let t = shifted - base;
    let p00 = base.as_2i() + array.extent().minimum;

    let v00 = get_clamped(array, p00);
    let v10 = get_clamped(array, p00 + PointN([1, 0]));
    let v01 = get_clamped(array, p00 + PointN([0, 1]));
    let v11 = get_clamped(array, p00 + PointN([1, 1]));

    lerp(lerp(v00, v10, t.x()), lerp(v01, v11, t.x()), t.y())
}

/// Bilinearly sample `array` at normalized coordinates, where `[0, 0]` is the array's minimum corner and `[1, 1]` its
/// maximum corner.
#[inline]
pub fn sample_uv<T: SampleValue>(array: &Array2<T>, uv: Point2f) -> T {
    sample_bilinear(array, uv * Point2f::from(array.shape()))
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
