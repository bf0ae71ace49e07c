use crate::CascadeDescriptorSet;

use serde::{Deserialize, Serialize};

/// Decides which cascade a wave input is drawn into.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub enum DrawFilter {
    /// Drawn into the one cascade whose wavelength band contains this wavelength.
    Wavelength(f32),
    /// Drawn into every cascade's combined result, after the combine pass.
    NoPreference,
}

impl DrawFilter {
    /// A wavelength of 0 means the input is not tied to any level of detail.
    #[inline]
    pub fn from_wavelength(wavelength: f32) -> Self {
        if wavelength == 0.0 {
            DrawFilter::NoPreference
        } else {
            DrawFilter::Wavelength(wavelength)
        }
    }

    /// Returns `true` iff cascade `index` should receive this input during rasterization. `NoPreference` inputs are never
    /// rasterized into the raw buffers.
    ///
    /// Bands are half-open, `[min_wavelength, max_wavelength)`, except that the finest cascade takes everything below its band
    /// and the coarsest takes everything above its band.
    pub fn accepts(&self, descriptors: &CascadeDescriptorSet, index: usize) -> bool {
        let wavelength = match *self {
            DrawFilter::Wavelength(w) => w,
            DrawFilter::NoPreference => return false,
        };

        let cascade = descriptors.cascade(index);
        let min = if index == 0 {
            f32::NEG_INFINITY
        } else {
            cascade.min_wavelength()
        };
        let max = if index == descriptors.coarsest_index() {
            f32::INFINITY
        } else {
            cascade.max_wavelength
        };

        min <= wavelength && wavelength < max
    }

    /// The finest cascade that accepts this input, if any.
    pub fn assign(&self, descriptors: &CascadeDescriptorSet) -> Option<usize> {
        (0..descriptors.len()).find(|&i| self.accepts(descriptors, i))
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
    use crate::CascadeConfig;

    use shoal_core::prelude::*;

    fn descriptors() -> CascadeDescriptorSet {
        // Max wavelengths are 3, 6, 12.
        CascadeConfig {
            cascade_count: 3,
            resolution: 8,
            min_texels_per_wave: 3.0,
            min_scale: 1.0,
            max_scale: None,
        }
        .compute(1.0, Point2f::ZERO)
        .unwrap()
    }

    #[test]
    fn max_wavelength_goes_to_next_cascade() {
        let d = descriptors();

        assert_eq!(DrawFilter::Wavelength(3.0).assign(&d), Some(1));
        assert_eq!(DrawFilter::Wavelength(2.99).assign(&d), Some(0));
        assert_eq!(DrawFilter::Wavelength(6.0).assign(&d), Some(2));
    }

    #[test]
    fn short_waves_go_to_finest() {
        let d = descriptors();

        assert_eq!(DrawFilter::Wavelength(0.01).assign(&d), Some(0));
        assert_eq!(DrawFilter::Wavelength(1.0).assign(&d), Some(0));
    }

    #[test]
    fn long_waves_go_to_coarsest() {
        let d = descriptors();

        assert_eq!(DrawFilter::Wavelength(12.0).assign(&d), Some(2));
        assert_eq!(DrawFilter::Wavelength(1000.0).assign(&d), Some(2));
    }

    #[test]
    fn each_wavelength_has_exactly_one_cascade() {
        let d = descriptors();

        for i in 1..200 {
            let filter = DrawFilter::Wavelength(i as f32 * 0.1);
            let accepted = (0..d.len()).filter(|&c| filter.accepts(&d, c)).count();
            assert_eq!(accepted, 1, "{:?}", filter);
        }
    }

    #[test]
    fn zero_wavelength_has_no_preference() {
        let d = descriptors();
        let filter = DrawFilter::from_wavelength(0.0);

        assert_eq!(filter, DrawFilter::NoPreference);
        assert_eq!(filter.assign(&d), None);
    }
}
