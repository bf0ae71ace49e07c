//! Top-down orthographic capture of registered geometry into a depth buffer.
//!
//! Every texel of the capture stores `reference_level - altitude`, the water depth over the highest captured surface at
//! the texel center. Where geometry overlaps, the smaller depth wins. Texels that no geometry covers keep whatever the
//! buffer held before the capture, which is `BACKGROUND_DEPTH` for a freshly reset buffer.

use crate::{Result, SdfError};

use shoal_core::prelude::*;
use shoal_storage::{sample_uv, Array2};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The world-space square captured into a distance field.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct CaptureRegion {
    pub center: Point2f,
    /// Only square regions are captured. A non-square size captures the square of its longest side.
    pub size: Point2f,
}

impl Default for CaptureRegion {
    fn default() -> Self {
        Self::square(Point2f::ZERO, 256.0)
    }
}

impl CaptureRegion {
    pub fn square(center: Point2f, side: f32) -> Self {
        Self {
            center,
            size: Point2f::fill(side),
        }
    }

    #[inline]
    pub fn side(&self) -> f32 {
        self.size.max_component()
    }

    pub fn validate(&self) -> Result<()> {
        let side = self.side();
        if !(side > 0.0 && side.is_finite() && self.center.is_finite()) {
            return Err(SdfError::DegenerateRegion { size: side });
        }
        if self.size.x() != self.size.y() {
            warn!(
                "Capture region size {:?} is not square; capturing a square of side {}",
                self.size, side
            );
        }

        Ok(())
    }

    #[inline]
    pub fn extent(&self) -> Extent2f {
        Extent2f::from_center_and_size(self.center, self.side())
    }

    #[inline]
    pub fn texel_width(&self, resolution: u32) -> f32 {
        self.side() / resolution as f32
    }

    #[inline]
    pub fn texel_center_world(&self, resolution: u32, p: Point2i) -> Point2f {
        self.extent().minimum + (Point2f::from(p) + Point2f::fill(0.5)) * self.texel_width(resolution)
    }

    #[inline]
    pub fn world_to_texel_coords(&self, resolution: u32, world: Point2f) -> Point2f {
        (world - self.extent().minimum) / self.texel_width(resolution)
    }
}

/// Something with a top surface that can be seen from above.
pub trait Geometry: Send + Sync {
    /// The world-space area this geometry covers. Nothing is captured outside of it.
    fn footprint(&self) -> Extent2f;

    /// The altitude of the top surface at `world`, which is inside the footprint.
    fn altitude(&self, world: Point2f) -> f32;
}

/// Terrain given as a grid of altitudes stretched over a world-space footprint.
pub struct HeightfieldGeometry {
    pub altitudes: Array2<f32>,
    pub footprint: Extent2f,
}

impl HeightfieldGeometry {
    pub fn new(altitudes: Array2<f32>, footprint: Extent2f) -> Self {
        Self {
            altitudes,
            footprint,
        }
    }
}

impl Geometry for HeightfieldGeometry {
    fn footprint(&self) -> Extent2f {
        self.footprint
    }

    fn altitude(&self, world: Point2f) -> f32 {
        let uv = (world - self.footprint.minimum) / self.footprint.shape;

        sample_uv(&self.altitudes, uv)
    }
}

/// Adapts a function of world position into `Geometry`.
pub struct FnGeometry<F> {
    pub footprint: Extent2f,
    pub f: F,
}

impl<F> FnGeometry<F> {
    pub fn new(footprint: Extent2f, f: F) -> Self {
        Self { footprint, f }
    }
}

impl<F> Geometry for FnGeometry<F>
where
    F: Fn(Point2f) -> f32 + Send + Sync,
{
    fn footprint(&self) -> Extent2f {
        self.footprint
    }

    fn altitude(&self, world: Point2f) -> f32 {
        (self.f)(world)
    }
}

/// Provides depth samples for a distance field cache.
pub trait CaptureSource {
    /// Fails with `SdfError::NoGeometrySelected` unless at least one selector resolves to some geometry.
    fn validate_selectors(&self, selectors: &[String]) -> Result<()>;

    /// Min-blends `reference_level - altitude` of every selected geometry into `depths`, which covers `region`.
    fn capture_depths(
        &self,
        region: &CaptureRegion,
        selectors: &[String],
        reference_level: f32,
        depths: &mut Array2<f32>,
    ) -> Result<()>;
}

struct GeometryLayer {
    name: String,
    geometry: Vec<Box<dyn Geometry>>,
}

/// Geometry grouped into named layers. A distance field selects which layers it captures.
#[derive(Default)]
pub struct GeometryRegistry {
    layers: Vec<GeometryLayer>,
}

impl GeometryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, layer: &str, geometry: impl Geometry + 'static) {
        let geometry = Box::new(geometry);
        match self.layers.iter_mut().find(|l| l.name == layer) {
            Some(existing) => existing.geometry.push(geometry),
            None => self.layers.push(GeometryLayer {
                name: layer.to_owned(),
                geometry: vec![geometry],
            }),
        }
    }

    /// Removes all geometry from `layer`, returning how many were removed.
    pub fn clear_layer(&mut self, layer: &str) -> usize {
        match self.layers.iter().position(|l| l.name == layer) {
            Some(i) => self.layers.remove(i).geometry.len(),
            None => 0,
        }
    }

    pub fn layer_len(&self, layer: &str) -> usize {
        self.layers
            .iter()
            .find(|l| l.name == layer)
            .map_or(0, |l| l.geometry.len())
    }

    /// All geometry in the layers named by `selectors`. Each layer is visited at most once.
    pub fn select(&self, selectors: &[String]) -> Result<Vec<&dyn Geometry>> {
        let mut selected = Vec::new();
        for layer in self.layers.iter() {
            if selectors.iter().any(|s| *s == layer.name) {
                selected.extend(layer.geometry.iter().map(|g| g.as_ref()));
            }
        }
        for selector in selectors.iter() {
            if selector.is_empty() {
                warn!("Empty geometry layer name in selectors {:?}", selectors);
            }
        }

        if selected.is_empty() {
            return Err(SdfError::NoGeometrySelected {
                selectors: selectors.to_vec(),
            });
        }

        Ok(selected)
    }
}

impl CaptureSource for GeometryRegistry {
    fn validate_selectors(&self, selectors: &[String]) -> Result<()> {
        self.select(selectors).map(|_| ())
    }

    fn capture_depths(
        &self,
        region: &CaptureRegion,
        selectors: &[String],
        reference_level: f32,
        depths: &mut Array2<f32>,
    ) -> Result<()> {
        let selected = self.select(selectors)?;
        let resolution = depths.shape().x() as u32;
        let min_x = depths.extent().minimum.x();

        debug!(
            "Capturing {} geometries at resolution {}",
            selected.len(),
            resolution
        );

        for geometry in selected.into_iter() {
            let footprint = geometry.footprint();
            depths.par_for_each_row_mut(|y, row| {
                for (i, depth) in row.iter_mut().enumerate() {
                    let world = region.texel_center_world(resolution, PointN([min_x + i as i32, y]));
                    if !footprint.contains(world) {
                        continue;
                    }
                    let d = reference_level - geometry.altitude(world);
                    if d < *depth {
                        *depth = d;
                    }
                }
            });
        }

        Ok(())
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

    use shoal_storage::{Get, BACKGROUND_DEPTH};

    fn flat(footprint: Extent2f, altitude: f32) -> FnGeometry<impl Fn(Point2f) -> f32> {
        FnGeometry::new(footprint, move |_| altitude)
    }

    fn background(resolution: i32) -> Array2<f32> {
        Array2::fill(
            Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(resolution)),
            BACKGROUND_DEPTH,
        )
    }

    #[test]
    fn overlapping_geometry_keeps_smaller_depth() {
        // 4x4 texels, 1 unit each, over [0, 4)^2.
        let region = CaptureRegion::square(Point2f::fill(2.0), 4.0);
        let left = Extent2f::from_min_and_shape(Point2f::ZERO, PointN([3.0, 4.0]));
        let right = Extent2f::from_min_and_shape(PointN([1.0, 0.0]), PointN([3.0, 4.0]));

        let mut registry = GeometryRegistry::new();
        registry.add("terrain", flat(left, -5.0));
        registry.add("terrain", flat(right, 2.0));

        let mut depths = background(4);
        registry
            .capture_depths(&region, &["terrain".to_owned()], 0.0, &mut depths)
            .unwrap();

        assert_eq!(depths.get(PointN([0, 0])), 5.0);
        // Both overlap here, and the higher surface wins.
        assert_eq!(depths.get(PointN([1, 0])), -2.0);
        assert_eq!(depths.get(PointN([2, 3])), -2.0);
        assert_eq!(depths.get(PointN([3, 3])), -2.0);
    }

    #[test]
    fn uncovered_texels_stay_background() {
        let region = CaptureRegion::square(Point2f::fill(2.0), 4.0);
        let corner = Extent2f::from_min_and_shape(Point2f::ZERO, Point2f::fill(1.0));

        let mut registry = GeometryRegistry::new();
        registry.add("terrain", flat(corner, 1.0));

        let mut depths = background(4);
        registry
            .capture_depths(&region, &["terrain".to_owned()], 3.0, &mut depths)
            .unwrap();

        assert_eq!(depths.get(PointN([0, 0])), 2.0);
        assert_eq!(depths.get(PointN([1, 0])), BACKGROUND_DEPTH);
        assert_eq!(depths.get(PointN([3, 3])), BACKGROUND_DEPTH);
    }

    #[test]
    fn selectors_must_resolve_to_geometry() {
        let mut registry = GeometryRegistry::new();
        registry.add("terrain", flat(Extent2f::from_center_and_size(Point2f::ZERO, 1.0), 0.0));

        assert!(registry.validate_selectors(&["terrain".to_owned()]).is_ok());
        assert!(registry
            .validate_selectors(&["rocks".to_owned(), "terrain".to_owned()])
            .is_ok());
        assert!(matches!(
            registry.validate_selectors(&["rocks".to_owned()]),
            Err(SdfError::NoGeometrySelected { .. })
        ));
        assert!(matches!(
            registry.validate_selectors(&[String::new()]),
            Err(SdfError::NoGeometrySelected { .. })
        ));
        assert!(matches!(
            registry.validate_selectors(&[]),
            Err(SdfError::NoGeometrySelected { .. })
        ));

        assert_eq!(registry.clear_layer("terrain"), 1);
        assert!(registry.validate_selectors(&["terrain".to_owned()]).is_err());
    }

    #[test]
    fn heightfield_is_stretched_over_its_footprint() {
        let altitudes = Array2::fill_with(
            Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(2)),
            |p| p.x() as f32,
        );
        let footprint = Extent2f::from_min_and_shape(Point2f::ZERO, Point2f::fill(10.0));
        let terrain = HeightfieldGeometry::new(altitudes, footprint);

        // Texel centers of the heightfield land at 2.5 and 7.5.
        assert_eq!(terrain.altitude(PointN([2.5, 2.5])), 0.0);
        assert_eq!(terrain.altitude(PointN([7.5, 2.5])), 1.0);
        assert_eq!(terrain.altitude(PointN([5.0, 2.5])), 0.5);
    }

    #[test]
    fn degenerate_region_is_rejected() {
        assert!(CaptureRegion::square(Point2f::ZERO, 0.0).validate().is_err());
        assert!(CaptureRegion::square(Point2f::ZERO, f32::NAN).validate().is_err());
        assert!(CaptureRegion::square(Point2f::ZERO, 1.0).validate().is_ok());
    }
}
