use crate::SampleValue;

use bytemuck::{Pod, Zeroable};
use core::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

pub trait SignedDistance: Copy + Into<f32> {
    const ZERO: Self;
    fn is_negative(self) -> bool;
}

impl SignedDistance for f32 {
    const ZERO: Self = 0.0;

    fn is_negative(self) -> bool {
        self < 0.0
    }
}

/// The distance estimate used for texels that have not yet been reached by any boundary.
pub const FAR_DISTANCE: f32 = 1.0e9;

/// The depth of texels not covered by any captured geometry. Large enough to be "deep water" for any realistic scene, but
/// finite so it survives arithmetic and compression.
pub const BACKGROUND_DEPTH: f32 = 1.0e4;

/// One texel of a shoreline distance field.
///
/// `depth` is the water depth below the reference level (negative above it) and `distance` is the estimated world-space
/// distance to the nearest texel with `depth <= 0`.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Pod, Serialize, Zeroable)]
#[repr(C)]
pub struct DepthDistance {
    pub depth: f32,
    pub distance: f32,
}

impl DepthDistance {
    /// A texel far from any shore, in deep water.
    pub const BACKGROUND: Self = Self {
        depth: BACKGROUND_DEPTH,
        distance: FAR_DISTANCE,
    };

    #[inline]
    pub fn new(depth: f32, distance: f32) -> Self {
        Self { depth, distance }
    }

    /// Positive in water, non-positive on land.
    #[inline]
    pub fn signed_distance(&self) -> f32 {
        if self.depth > 0.0 {
            self.distance
        } else {
            -self.distance
        }
    }
}

impl Default for DepthDistance {
    fn default() -> Self {
        Self::BACKGROUND
    }
}

impl From<DepthDistance> for f32 {
    fn from(s: DepthDistance) -> f32 {
        s.signed_distance()
    }
}

impl SignedDistance for DepthDistance {
    const ZERO: Self = Self {
        depth: 0.0,
        distance: 0.0,
    };

    fn is_negative(self) -> bool {
        self.depth <= 0.0
    }
}

// Both channels blend linearly, like a filtered texture fetch of a two-channel float texture.

impl Add for DepthDistance {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.depth + rhs.depth, self.distance + rhs.distance)
    }
}

impl Sub for DepthDistance {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.depth - rhs.depth, self.distance - rhs.distance)
    }
}

impl Mul<f32> for DepthDistance {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.depth * rhs, self.distance * rhs)
    }
}

impl SampleValue for DepthDistance {
    const IDENTITY: Self = <Self as SignedDistance>::ZERO;
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝
