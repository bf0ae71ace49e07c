use crate::{CascadeError, Result};

use shoal_core::prelude::*;

use serde::{Deserialize, Serialize};

/// Geometric metadata for one level of detail. Cascade 0 is the finest.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Cascade {
    pub index: usize,
    /// Texels per side. Every cascade layer is square.
    pub resolution: u32,
    /// World units per texel.
    pub texel_width: f32,
    /// World-space center, snapped to a multiple of `texel_width`.
    pub center: Point2f,
    /// Wavelengths at or above this are too long to be represented by this cascade.
    pub max_wavelength: f32,
}

impl Cascade {
    /// Wavelengths below this belong to a finer cascade.
    #[inline]
    pub fn min_wavelength(&self) -> f32 {
        self.max_wavelength / 2.0
    }

    /// The side length of the cascade in world units.
    #[inline]
    pub fn world_size(&self) -> f32 {
        self.resolution as f32 * self.texel_width
    }

    #[inline]
    pub fn world_extent(&self) -> Extent2f {
        Extent2f::from_center_and_size(self.center, self.world_size())
    }

    #[inline]
    pub fn layer_shape(&self) -> Point2i {
        Point2i::fill(self.resolution as i32)
    }

    /// The world position of the center of texel `p`.
    #[inline]
    pub fn texel_center_world(&self, p: Point2i) -> Point2f {
        self.world_extent().minimum + (Point2f::from(p) + Point2f::fill(0.5)) * self.texel_width
    }

    /// Continuous texel coordinates of `world`, where texel `p` spans `[p, p + 1)`.
    #[inline]
    pub fn world_to_texel_coords(&self, world: Point2f) -> Point2f {
        (world - self.world_extent().minimum) / self.texel_width
    }
}

/// The result of choosing a cascade scale from the viewer's altitude.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct ViewerScale {
    /// The world-space scale of cascade 0. Always a power of 2.
    pub scale: f32,
    /// How much of the finest cascade should be visible, in `[0, 1]`. This fades to 0 as the viewer approaches the next scale
    /// up, at which point the finest cascade is dropped.
    pub finest_weight: f32,
    /// `false` iff the scale is already at its maximum, so the finest cascade can never be dropped.
    pub scale_could_increase: bool,
}

/// Parameters for deriving a `CascadeDescriptorSet` from a viewer position.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CascadeConfig {
    /// The number of levels of detail.
    pub cascade_count: usize,
    /// Texels per side of every cascade.
    pub resolution: u32,
    /// The shortest wave a cascade may hold, measured in texels. Shorter waves alias.
    pub min_texels_per_wave: f32,
    /// The smallest scale of cascade 0.
    pub min_scale: f32,
    /// The largest scale of cascade 0, if any.
    pub max_scale: Option<f32>,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            cascade_count: 7,
            resolution: 256,
            min_texels_per_wave: 3.0,
            min_scale: 8.0,
            max_scale: Some(256.0),
        }
    }
}

impl CascadeConfig {
    /// Chooses the cascade scale for a viewer at `altitude` above the water.
    pub fn viewer_scale(&self, altitude: f32) -> ViewerScale {
        let mut level = altitude.abs().max(self.min_scale);
        if let Some(max_scale) = self.max_scale {
            level = level.min(max_scale);
        }
        let l2 = level.log2();
        let l2_floor = l2.floor();
        let scale = l2_floor.exp2();

        ViewerScale {
            scale,
            finest_weight: 1.0 - (l2 - l2_floor),
            scale_could_increase: self
                .max_scale
                .map_or(true, |max_scale| scale < 0.99 * max_scale),
        }
    }

    /// Lays out `cascade_count` cascades around `viewer`, each twice the size of the last.
    pub fn compute(&self, scale: f32, viewer: Point2f) -> Result<CascadeDescriptorSet> {
        if self.resolution == 0 {
            return Err(CascadeError::NonPositiveResolution);
        }

        let cascades = (0..self.cascade_count)
            .map(|index| {
                let lod_scale = scale * (1 << index) as f32;
                let texel_width = 4.0 * lod_scale / self.resolution as f32;
                let center = (viewer / texel_width).floor() * texel_width;

                Cascade {
                    index,
                    resolution: self.resolution,
                    texel_width,
                    center,
                    max_wavelength: 2.0 * texel_width * self.min_texels_per_wave,
                }
            })
            .collect();

        CascadeDescriptorSet::from_cascades(cascades)
    }
}

/// Every cascade's metadata, ordered fine to coarse. Never mutated while a combine pass is running.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct CascadeDescriptorSet {
    cascades: Vec<Cascade>,
}

impl CascadeDescriptorSet {
    /// Checks that cascade `i` is at position `i`, all cascades share a resolution, and texel width strictly increases.
    pub fn from_cascades(cascades: Vec<Cascade>) -> Result<Self> {
        let first = cascades.first().ok_or(CascadeError::NoCascades)?;
        if first.resolution == 0 {
            return Err(CascadeError::NonPositiveResolution);
        }
        let resolution = first.resolution;

        for (position, cascade) in cascades.iter().enumerate() {
            if cascade.index != position {
                return Err(CascadeError::MisplacedDescriptor {
                    position,
                    index: cascade.index,
                });
            }
            if cascade.resolution != resolution {
                return Err(CascadeError::NonUniformResolution {
                    index: position,
                    expected: resolution,
                    actual: cascade.resolution,
                });
            }
        }
        for (finer, coarser) in cascades.iter().zip(cascades.iter().skip(1)) {
            if coarser.texel_width <= finer.texel_width {
                return Err(CascadeError::NonIncreasingTexelWidth {
                    index: coarser.index,
                });
            }
        }

        Ok(Self { cascades })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cascades.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cascades.is_empty()
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.cascades[0].resolution
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Cascade> {
        self.cascades.get(index)
    }

    /// Panics if `index` is not in the set.
    #[inline]
    pub fn cascade(&self, index: usize) -> &Cascade {
        self.cascades.get(index).unwrap_or_else(|| {
            panic!(
                "cascade {} is not in a descriptor set of {} cascades",
                index,
                self.cascades.len()
            )
        })
    }

    #[inline]
    pub fn coarsest_index(&self) -> usize {
        self.cascades.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cascade> {
        self.cascades.iter()
    }
}

// ████████╗███████╗███████╗████████╗███████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝
//    ██║   █████╗  ███████╗   ██║   ███████╗
//    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║
//    ██║   ███████╗███████║   ██║   ███████║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn small_config() -> CascadeConfig {
        CascadeConfig {
            cascade_count: 3,
            resolution: 8,
            min_texels_per_wave: 3.0,
            min_scale: 1.0,
            max_scale: None,
        }
    }

    #[test]
    fn cascades_double_in_size() {
        let set = small_config().compute(1.0, Point2f::ZERO).unwrap();

        let widths: Vec<f32> = set.iter().map(|c| c.texel_width).collect();
        let max_wavelengths: Vec<f32> = set.iter().map(|c| c.max_wavelength).collect();
        assert_eq!(widths, vec![0.5, 1.0, 2.0]);
        assert_eq!(max_wavelengths, vec![3.0, 6.0, 12.0]);
        assert_eq!(set.cascade(1).min_wavelength(), 3.0);
        assert_eq!(
            set.cascade(0).world_extent(),
            Extent2f::from_center_and_size(Point2f::ZERO, 4.0)
        );
    }

    #[test]
    fn centers_snap_to_texel_grid() {
        let set = small_config().compute(1.0, PointN([1.3, -0.2])).unwrap();

        assert_eq!(set.cascade(0).center, PointN([1.0, -0.5]));
        assert_eq!(set.cascade(1).center, PointN([1.0, -1.0]));
        assert_eq!(set.cascade(2).center, PointN([0.0, -2.0]));
    }

    #[test]
    fn texel_centers_round_trip() {
        let set = small_config().compute(1.0, Point2f::ZERO).unwrap();
        let cascade = set.cascade(1);

        assert_eq!(cascade.texel_center_world(Point2i::ZERO), PointN([-3.5, -3.5]));
        assert_eq!(
            cascade.world_to_texel_coords(PointN([-3.5, -3.5])),
            PointN([0.5, 0.5])
        );
    }

    #[test]
    fn viewer_scale_fades_finest_cascade() {
        let config = CascadeConfig {
            min_scale: 8.0,
            max_scale: Some(256.0),
            ..small_config()
        };

        let low = config.viewer_scale(4.0);
        assert_eq!(low.scale, 8.0);
        assert_eq!(low.finest_weight, 1.0);
        assert!(low.scale_could_increase);

        let mid = config.viewer_scale(12.0);
        assert_eq!(mid.scale, 8.0);
        assert!((mid.finest_weight - (1.0 - (12.0f32.log2() - 3.0))).abs() < 1e-6);
        assert!(mid.scale_could_increase);

        let high = config.viewer_scale(1000.0);
        assert_eq!(high.scale, 256.0);
        assert_eq!(high.finest_weight, 1.0);
        assert!(!high.scale_could_increase);
    }

    #[test]
    fn texel_width_must_increase() {
        let mut cascades: Vec<Cascade> = small_config()
            .compute(1.0, Point2f::ZERO)
            .unwrap()
            .iter()
            .cloned()
            .collect();
        cascades[2].texel_width = cascades[1].texel_width;

        assert!(matches!(
            CascadeDescriptorSet::from_cascades(cascades),
            Err(CascadeError::NonIncreasingTexelWidth { index: 2 })
        ));
    }

    #[test]
    fn zero_resolution_is_rejected() {
        let config = CascadeConfig {
            resolution: 0,
            ..small_config()
        };

        assert!(matches!(
            config.compute(1.0, Point2f::ZERO),
            Err(CascadeError::NonPositiveResolution)
        ));
    }

    #[test]
    #[should_panic(expected = "cascade 3 is not in a descriptor set of 3 cascades")]
    fn unknown_cascade_panics() {
        small_config().compute(1.0, Point2f::ZERO).unwrap().cascade(3);
    }
}
