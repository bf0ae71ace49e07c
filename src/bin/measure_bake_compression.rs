use shoal::{prelude::*, storage::IntoRawBytes};

fn main() {
    let args: Vec<_> = std::env::args().collect();
    let resolution: u32 = match args.get(1).map(|a| a.parse()) {
        Some(Ok(resolution)) => resolution,
        Some(Err(e)) => {
            eprintln!("Invalid resolution {:?}: {}", args[1], e);
            std::process::exit(1);
        }
        None => 512,
    };

    println!("Baking a {0}x{0} distance field", resolution);

    let baked = bake_island(resolution);

    #[cfg(feature = "snappy")]
    {
        println!("Compressing with Snappy: \n");
        measure_compression_rate(Snappy, &baked);
    }

    #[cfg(feature = "lz4")]
    {
        println!("Compressing with LZ4: \n");
        measure_compression_rate(Lz4 { level: 10 }, &baked);
    }
}

fn bake_island(resolution: u32) -> BakedDistanceField {
    // A cone-shaped island covering the middle fifth of the region.
    let region = CaptureRegion::square(Point2f::ZERO, 1024.0);
    let island_radius = region.side() / 10.0;
    let mut registry = GeometryRegistry::new();
    registry.add(
        "terrain",
        FnGeometry::new(region.extent(), move |p: Point2f| {
            20.0 * (1.0 - p.norm() / island_radius)
        }),
    );

    let mut instance = CacheInstance::realtime(DistanceFieldConfig {
        resolution,
        region,
        ..Default::default()
    })
    .unwrap();
    instance.populate(&registry).unwrap();

    instance.bake().unwrap()
}

#[allow(dead_code)]
fn measure_compression_rate<B: BytesCompression>(bytes_compression: B, baked: &BakedDistanceField) {
    let source_size_bytes = baked.texels.into_raw_bytes().len();

    let compressed = baked.compress(bytes_compression).unwrap();
    let compressed_size_bytes = compressed.compressed_data.len();

    println!(
        "source = {} bytes, compressed = {} bytes; rate = {:.1}%\n",
        source_size_bytes,
        compressed_size_bytes,
        100.0 * (compressed_size_bytes as f32 / source_size_bytes as f32)
    );
}
