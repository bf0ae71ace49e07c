use shoal_core::prelude::*;
use shoal_sdf::{prelude::*, MAX_RESOLUTION};
use shoal_storage::{prelude::*, FAR_DISTANCE};

use pretty_assertions::assert_eq;
use std::cell::Cell;
use utilities::data_sets::{island_altitudes, single_seed_altitudes};

/// Counts captures so tests can tell whether a source was used.
struct CountingSource {
    registry: GeometryRegistry,
    captures: Cell<usize>,
}

impl CountingSource {
    fn new(registry: GeometryRegistry) -> Self {
        Self {
            registry,
            captures: Cell::new(0),
        }
    }
}

impl CaptureSource for CountingSource {
    fn validate_selectors(&self, selectors: &[String]) -> Result<(), SdfError> {
        self.registry.validate_selectors(selectors)
    }

    fn capture_depths(
        &self,
        region: &CaptureRegion,
        selectors: &[String],
        reference_level: f32,
        depths: &mut Array2<f32>,
    ) -> Result<(), SdfError> {
        self.captures.set(self.captures.get() + 1);
        self.registry
            .capture_depths(region, selectors, reference_level, depths)
    }
}

/// A heightfield that exactly covers the capture region, one altitude per texel.
fn terrain_registry(altitudes: Array2<f32>, region: &CaptureRegion) -> GeometryRegistry {
    let mut registry = GeometryRegistry::new();
    registry.add("terrain", HeightfieldGeometry::new(altitudes, region.extent()));

    registry
}

fn config(resolution: u32, region: CaptureRegion) -> DistanceFieldConfig {
    DistanceFieldConfig {
        resolution,
        region,
        ..Default::default()
    }
}

#[test]
fn populated_single_seed_field_is_within_one_texel() {
    let resolution = 32;
    let region = CaptureRegion::square(Point2f::fill(16.0), 64.0);
    let seed = PointN([5, 20]);
    let registry = terrain_registry(single_seed_altitudes(resolution, seed), &region);

    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();
    instance.populate(&registry).unwrap();

    let texel_width = region.texel_width(resolution as u32);
    let field = instance.result().unwrap();
    for p in field.extent().iter_points() {
        let exact = texel_width * Point2f::from(p - seed).norm();
        let texel = field.get(p);
        assert!((texel.distance - exact).abs() <= texel_width);
        assert_eq!(texel.depth <= 0.0, p == seed);
    }
}

#[test]
fn populate_is_idempotent() {
    let resolution = 64;
    let region = CaptureRegion::square(Point2f::ZERO, 128.0);
    let registry = terrain_registry(island_altitudes(resolution, 12.0, 5.0), &region);

    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();
    instance.populate(&registry).unwrap();
    let first = instance.result().unwrap().clone();
    instance.populate(&registry).unwrap();

    assert_eq!(instance.result().unwrap(), &first);
}

#[test]
fn baked_instance_never_captures() {
    let resolution = 8;
    let region = CaptureRegion::square(Point2f::ZERO, 8.0);
    let texels = Array2::fill_with(
        Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(resolution)),
        |p| DepthDistance::new(p.x() as f32, p.y() as f32),
    );
    let baked = BakedDistanceField::new(region, texels.clone());
    let source = CountingSource::new(terrain_registry(
        single_seed_altitudes(resolution, Point2i::ZERO),
        &region,
    ));

    let mut instance = CacheInstance::baked(config(resolution as u32, region), baked).unwrap();
    assert!(instance.is_baked());

    instance.populate(&source).unwrap();
    instance.request_refresh();
    assert_eq!(instance.refresh_if_requested(&source).unwrap(), false);

    assert_eq!(source.captures.get(), 0);
    assert_eq!(instance.result(), Some(&texels));
}

#[test]
fn baked_resolution_must_match() {
    let region = CaptureRegion::square(Point2f::ZERO, 8.0);
    let texels = Array2::fill(
        Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(4)),
        DepthDistance::BACKGROUND,
    );

    let result = CacheInstance::baked(config(8, region), BakedDistanceField::new(region, texels));

    assert!(matches!(
        result,
        Err(SdfError::BakedResolutionMismatch {
            expected: 8,
            actual: 4
        })
    ));
}

#[test]
fn refresh_only_populates_when_requested() {
    let resolution = 8;
    let region = CaptureRegion::square(Point2f::ZERO, 8.0);
    let source = CountingSource::new(terrain_registry(
        single_seed_altitudes(resolution, PointN([3, 3])),
        &region,
    ));
    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();

    assert_eq!(instance.refresh_if_requested(&source).unwrap(), false);
    assert!(instance.result().is_none());

    instance.request_refresh();
    assert_eq!(instance.refresh_if_requested(&source).unwrap(), true);
    assert_eq!(instance.refresh_if_requested(&source).unwrap(), false);
    assert_eq!(source.captures.get(), 1);
}

#[test]
fn unresolved_selectors_keep_previous_result() {
    let resolution = 8;
    let region = CaptureRegion::square(Point2f::ZERO, 8.0);
    let mut registry = terrain_registry(single_seed_altitudes(resolution, PointN([3, 3])), &region);

    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();
    instance.populate(&registry).unwrap();
    let previous = instance.result().unwrap().clone();

    registry.clear_layer("terrain");
    let result = instance.populate(&registry);

    assert!(matches!(result, Err(SdfError::NoGeometrySelected { .. })));
    assert_eq!(instance.result(), Some(&previous));
}

#[test]
fn depth_only_field_keeps_seed_distances() {
    let resolution = 8;
    let region = CaptureRegion::square(Point2f::ZERO, 8.0);
    let seed = PointN([3, 3]);
    let registry = terrain_registry(single_seed_altitudes(resolution, seed), &region);

    let mut instance = CacheInstance::realtime(DistanceFieldConfig {
        generate_distance_field: false,
        ..config(resolution as u32, region)
    })
    .unwrap();
    instance.populate(&registry).unwrap();

    let field = instance.result().unwrap();
    assert_eq!(field.get(seed), DepthDistance::new(-1.0, 0.0));
    assert_eq!(field.get(PointN([0, 0])).distance, FAR_DISTANCE);
    assert_eq!(instance.depths().unwrap().get(PointN([0, 0])), 1.0);
}

#[test]
fn invalid_configurations_are_rejected() {
    let region = CaptureRegion::square(Point2f::ZERO, 8.0);

    assert!(matches!(
        CacheInstance::realtime(config(0, region)),
        Err(SdfError::NonPositiveResolution)
    ));
    assert!(matches!(
        CacheInstance::realtime(config(MAX_RESOLUTION + 1, region)),
        Err(SdfError::ResolutionUnsupported { .. })
    ));
    assert!(matches!(
        CacheInstance::realtime(config(8, CaptureRegion::square(Point2f::ZERO, -1.0))),
        Err(SdfError::DegenerateRegion { .. })
    ));
}

#[test]
fn sampling_distinguishes_land_and_water() {
    let resolution = 64;
    let region = CaptureRegion::square(Point2f::ZERO, 64.0);
    let registry = terrain_registry(island_altitudes(resolution, 10.0, 5.0), &region);

    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();
    assert!(instance.sample(Point2f::ZERO).is_none());
    instance.populate(&registry).unwrap();

    assert!(instance.sample_signed_distance(Point2f::ZERO).unwrap() <= 0.0);

    // The shore is about 10 units from the center.
    let offshore = instance.sample_signed_distance(PointN([25.0, 0.0])).unwrap();
    assert!(offshore > 12.0 && offshore < 18.0, "offshore distance {}", offshore);
}

#[test]
fn far_positions_read_the_nearest_edge() {
    let resolution = 16;
    let region = CaptureRegion::square(Point2f::ZERO, 16.0);
    let registry = terrain_registry(island_altitudes(resolution, 4.0, 2.0), &region);

    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();
    instance.populate(&registry).unwrap();

    assert_eq!(
        instance.sample(PointN([1.0e10, 0.0])),
        instance.sample(PointN([100.0, 0.0]))
    );
    let corner = instance.result().unwrap().get(PointN([0, 0]));
    assert_eq!(instance.sample(PointN([-1.0e10, -1.0e10])), Some(corner));
}

#[cfg(feature = "lz4")]
#[test]
fn baked_round_trip_through_lz4() {
    let resolution = 32;
    let region = CaptureRegion::square(Point2f::ZERO, 32.0);
    let registry = terrain_registry(island_altitudes(resolution, 6.0, 2.0), &region);

    let mut instance = CacheInstance::realtime(config(resolution as u32, region)).unwrap();
    instance.populate(&registry).unwrap();
    let baked = instance.bake().unwrap();

    let mut blob = Vec::new();
    baked.write_compressed(Lz4 { level: 10 }, &mut blob).unwrap();
    let loaded = BakedDistanceField::read_compressed::<Lz4>(blob.as_slice()).unwrap();

    let served = CacheInstance::baked(config(resolution as u32, region), loaded).unwrap();
    assert_eq!(served.result(), instance.result());
    assert_eq!(
        served.sample(PointN([3.0, -2.0])),
        instance.sample(PointN([3.0, -2.0]))
    );
}
