use shoal_storage::SampleValue;

use bytemuck::{Pod, Zeroable};
use core::ops::{Add, Mul, Sub};
use serde::{Deserialize, Serialize};

/// The per-texel output of the wave simulation: a 3D displacement of the water surface and a subsurface scattering factor.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Pod, Serialize, Zeroable)]
#[repr(C)]
pub struct WaveSample {
    pub displacement: [f32; 3],
    pub sss: f32,
}

impl WaveSample {
    #[inline]
    pub const fn new(displacement: [f32; 3], sss: f32) -> Self {
        Self { displacement, sss }
    }

    /// A purely vertical displacement.
    #[inline]
    pub const fn height(height: f32) -> Self {
        Self::new([0.0, height, 0.0], 0.0)
    }

    #[inline]
    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        let [ax, ay, az] = self.displacement;
        let [bx, by, bz] = rhs.displacement;

        Self::new([f(ax, bx), f(ay, by), f(az, bz)], f(self.sss, rhs.sss))
    }
}

impl Add for WaveSample {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a + b)
    }
}

impl Sub for WaveSample {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.zip(rhs, |a, b| a - b)
    }
}

impl Mul<f32> for WaveSample {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        let [x, y, z] = self.displacement;

        Self::new([x * rhs, y * rhs, z * rhs], self.sss * rhs)
    }
}

impl SampleValue for WaveSample {
    const IDENTITY: Self = Self::new([0.0; 3], 0.0);
}
