use shoal_cascade::prelude::*;
use shoal_core::prelude::*;
use shoal_storage::prelude::*;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use utilities::data_sets::random_layers;

fn combine_cascades(c: &mut Criterion) {
    let mut group = c.benchmark_group("combine_cascades");
    for resolution in RESOLUTIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            resolution,
            |b, &resolution| {
                let descriptors = CascadeConfig {
                    cascade_count: CASCADE_COUNT,
                    resolution,
                    ..Default::default()
                }
                .compute(8.0, Point2f::ZERO)
                .unwrap();
                let raw = LayeredArray2::from_layers(
                    Point2i::fill(resolution as i32),
                    random_layers(CASCADE_COUNT, resolution as i32, 7),
                )
                .unwrap();
                let mut combiner = CascadeCombiner::new(CASCADE_COUNT, resolution).unwrap();
                let config = CombineConfig {
                    time: 0.5,
                    ..Default::default()
                };

                b.iter(|| combiner.combine(&descriptors, &raw, &config).unwrap());
            },
        );
    }
    group.finish();
}

fn rasterize_inputs(c: &mut Criterion) {
    let mut group = c.benchmark_group("rasterize_inputs");
    for resolution in RESOLUTIONS.iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(resolution),
            resolution,
            |b, &resolution| {
                let descriptors = CascadeConfig {
                    cascade_count: CASCADE_COUNT,
                    resolution,
                    ..Default::default()
                }
                .compute(8.0, Point2f::ZERO)
                .unwrap();
                let mut store = WaveBufferStore::new(CASCADE_COUNT, resolution);
                for i in 0..CASCADE_COUNT {
                    let wavelength = descriptors.cascade(i).min_wavelength() * 1.5;
                    store
                        .register_input(FnWaveInput::new(wavelength, move |p: Point2f| {
                            (p.x() / wavelength).sin()
                        }))
                        .unwrap();
                }

                b.iter(|| store.rasterize(&descriptors));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, combine_cascades, rasterize_inputs);
criterion_main!(benches);

const CASCADE_COUNT: usize = 7;
const RESOLUTIONS: [u32; 3] = [64, 128, 256];
