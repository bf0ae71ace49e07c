use shoal_core::prelude::*;
use shoal_sdf::prelude::*;
use shoal_storage::prelude::*;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use utilities::data_sets::island_altitudes;

fn jump_flood_to_convergence(c: &mut Criterion) {
    let mut group = c.benchmark_group("jump_flood_to_convergence");
    for resolution in RESOLUTIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            resolution,
            |b, &resolution| {
                let altitudes = island_altitudes(resolution, resolution as f32 / 4.0, 10.0);
                let depths = Array2::fill_with(*altitudes.extent(), |p| -altitudes.get(p));
                let mut cache = DistanceFieldCache::new(resolution as u32, 1.0).unwrap();

                b.iter(|| {
                    cache.seed(&depths).unwrap();
                    cache.run_to_convergence()
                });
            },
        );
    }
    group.finish();
}

fn populate_realtime_instance(c: &mut Criterion) {
    let mut group = c.benchmark_group("populate_realtime_instance");
    for resolution in RESOLUTIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            resolution,
            |b, &resolution| {
                let region = CaptureRegion::square(Point2f::ZERO, 512.0);
                let mut registry = GeometryRegistry::new();
                registry.add(
                    "terrain",
                    HeightfieldGeometry::new(
                        island_altitudes(resolution, resolution as f32 / 4.0, 10.0),
                        region.extent(),
                    ),
                );
                let mut instance = CacheInstance::realtime(DistanceFieldConfig {
                    resolution: resolution as u32,
                    region,
                    ..Default::default()
                })
                .unwrap();

                b.iter(|| instance.populate(&registry).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, jump_flood_to_convergence, populate_realtime_instance);
criterion_main!(benches);

const RESOLUTIONS: [i32; 3] = [64, 128, 256];
