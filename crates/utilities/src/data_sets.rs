use shoal_core::prelude::*;
use shoal_storage::Array2;

use rand::{rngs::StdRng, Rng, SeedableRng};

/// A cone-shaped island in the middle of a square heightfield. Altitude is `peak` at the center, crosses 0 at `radius` texels
/// from the center, and keeps sloping down into the sea beyond that.
pub fn island_altitudes(array_edge_length: i32, radius: f32, peak: f32) -> Array2<f32> {
    let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(array_edge_length));
    let center = Point2f::fill(array_edge_length as f32 / 2.0);

    Array2::fill_with(extent, |p| {
        let texel_center = Point2f::from(p) + Point2f::fill(0.5);
        let r = (texel_center - center).norm();

        peak * (1.0 - r / radius)
    })
}

/// Every texel is 1 unit below the reference level 0, except `seed`, which is 1 unit above it.
pub fn single_seed_altitudes(array_edge_length: i32, seed: Point2i) -> Array2<f32> {
    let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(array_edge_length));

    Array2::fill_with(extent, |p| if p == seed { 1.0 } else { -1.0 })
}

/// Deterministic uniform noise in `[-1, 1)`, one array per layer.
pub fn random_layers(num_layers: usize, array_edge_length: i32, seed: u64) -> Vec<Array2<f32>> {
    let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(array_edge_length));
    let mut rng = StdRng::seed_from_u64(seed);

    (0..num_layers)
        .map(|_| Array2::fill_with(extent, |_| rng.gen_range(-1.0..1.0)))
        .collect()
}
