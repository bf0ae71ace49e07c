use shoal_core::prelude::*;
use shoal_storage::prelude::*;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn decompress_array_with_bincode_lz4(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_array_with_bincode_lz4");
    for size in ARRAY_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_with_setup(
                || {
                    BincodeCompression::new(Lz4 { level: 10 })
                        .compress(&set_up_array(size))
                        .unwrap()
                },
                |compressed_array| {
                    compressed_array.decompress().unwrap();
                },
            );
        });
    }
    group.finish();
}

fn decompress_array_with_bincode_snappy(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_array_with_bincode_snappy");
    for size in ARRAY_SIZES.iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter_with_setup(
                || {
                    BincodeCompression::new(Snappy)
                        .compress(&set_up_array(size))
                        .unwrap()
                },
                |compressed_array| {
                    compressed_array.decompress().unwrap();
                },
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    decompress_array_with_bincode_lz4,
    decompress_array_with_bincode_snappy
);
criterion_main!(benches);

const ARRAY_SIZES: [i32; 3] = [64, 256, 512];

fn set_up_array(size: i32) -> Array2<DepthDistance> {
    let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(size));

    // Might be tough to compress this.
    Array2::fill_with(extent, |p| {
        DepthDistance::new((p.x() % 3 + p.y() % 3) as f32, (p.x() + p.y()) as f32)
    })
}
