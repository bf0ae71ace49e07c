//! Reading combined results back on the CPU, for collision and buoyancy queries.

use crate::{Cascade, CascadeDescriptorSet};

use shoal_core::prelude::*;
use shoal_storage::{sample_bilinear, Array2, LayeredArray2, SampleValue};

/// Chooses the finest cascade whose extent, shrunk by one texel, contains all of `area` and whose waves are long enough to
/// resolve `min_spatial_length`. The coarsest cascade is exempt from the wavelength criterion, so it is chosen for any area it
/// covers when no finer cascade qualifies.
pub fn suggest_cascade(
    descriptors: &CascadeDescriptorSet,
    area: &Extent2f,
    min_spatial_length: f32,
) -> Option<usize> {
    let coarsest = descriptors.coarsest_index();

    descriptors
        .iter()
        .find(|cascade| {
            let valid_extent = cascade.world_extent().shrunk(cascade.texel_width);
            let covers = !valid_extent.is_degenerate() && valid_extent.contains_extent(area);
            let resolves = cascade.index == coarsest
                || cascade.max_wavelength / 2.0 >= min_spatial_length / 2.0;

            covers && resolves
        })
        .map(|cascade| cascade.index)
}

/// Bilinearly samples `layer`, which covers `cascade`, at a world position.
#[inline]
pub fn sample_cascade<T: SampleValue>(cascade: &Cascade, layer: &Array2<T>, world: Point2f) -> T {
    sample_bilinear(layer, cascade.world_to_texel_coords(world))
}

/// Samples the combined `results` at `world` from the cascade chosen by `suggest_cascade`.
pub fn sample_combined<T: SampleValue>(
    descriptors: &CascadeDescriptorSet,
    results: &LayeredArray2<T>,
    world: Point2f,
    min_spatial_length: f32,
) -> Option<T> {
    let area = Extent2f::from_min_and_shape(world, Point2f::ZERO);
    let index = suggest_cascade(descriptors, &area, min_spatial_length)?;
    if index >= results.num_layers() {
        return None;
    }

    Some(sample_cascade(
        descriptors.cascade(index),
        results.layer(index),
        world,
    ))
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

    fn three_cascades() -> CascadeDescriptorSet {
        // World sizes 8, 16, 32 around the origin.
        let cascades = (0..3)
            .map(|index| {
                let texel_width = (1 << index) as f32;
                Cascade {
                    index,
                    resolution: 8,
                    texel_width,
                    center: Point2f::ZERO,
                    max_wavelength: 2.0 * texel_width,
                }
            })
            .collect();

        CascadeDescriptorSet::from_cascades(cascades).unwrap()
    }

    #[test]
    fn finest_covering_cascade_is_suggested() {
        let descriptors = three_cascades();

        // Cascade 0 is valid over [-3, 3).
        let small = Extent2f::from_center_and_size(Point2f::ZERO, 2.0);
        assert_eq!(suggest_cascade(&descriptors, &small, 0.0), Some(0));

        let medium = Extent2f::from_center_and_size(Point2f::ZERO, 10.0);
        assert_eq!(suggest_cascade(&descriptors, &medium, 0.0), Some(1));

        let too_big = Extent2f::from_center_and_size(Point2f::ZERO, 100.0);
        assert_eq!(suggest_cascade(&descriptors, &too_big, 0.0), None);
    }

    #[test]
    fn long_spatial_length_skips_fine_cascades() {
        let descriptors = three_cascades();
        let small = Extent2f::from_center_and_size(Point2f::ZERO, 2.0);

        // Cascade 1 resolves up to 4.
        assert_eq!(suggest_cascade(&descriptors, &small, 3.0), Some(1));
        // Only the coarsest is left, and it is exempt.
        assert_eq!(suggest_cascade(&descriptors, &small, 1000.0), Some(2));
    }
}
