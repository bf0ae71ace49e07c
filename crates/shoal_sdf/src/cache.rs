use crate::{
    jump_flood::{jump_flood_step, resolve, seed, FloodTexel},
    Result, SdfError,
};

use shoal_core::prelude::*;
use shoal_storage::{Array2, DepthDistance, StorageError};

use tracing::debug;

/// Where a `DistanceFieldCache` is in its computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheState {
    Empty,
    Seeded,
    /// The pass with jump length `jump` was the last one run.
    Propagating { jump: u32 },
    Converged,
}

/// A pair of same-sized working buffers for jump flooding. Exactly one of them is authoritative at a time. Each pass reads the
/// authoritative buffer, writes the other, then flips which one is authoritative.
pub struct DistanceFieldCache {
    resolution: u32,
    texel_width: f32,
    buffers: [Array2<FloodTexel>; 2],
    current: usize,
    state: CacheState,
}

impl DistanceFieldCache {
    /// Allocates both buffers, reporting allocation failure instead of aborting.
    pub fn new(resolution: u32, texel_width: f32) -> Result<Self> {
        if resolution == 0 {
            return Err(SdfError::NonPositiveResolution);
        }

        let extent = Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(resolution as i32));
        let current = Array2::try_fill(extent, FloodTexel::EMPTY)?;
        let ping_pong = Array2::try_fill(extent, FloodTexel::EMPTY)?;

        Ok(Self {
            resolution,
            texel_width,
            buffers: [current, ping_pong],
            current: 0,
            state: CacheState::Empty,
        })
    }

    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    #[inline]
    pub fn texel_width(&self) -> f32 {
        self.texel_width
    }

    #[inline]
    pub fn state(&self) -> CacheState {
        self.state
    }

    /// The authoritative buffer.
    #[inline]
    pub fn current(&self) -> &Array2<FloodTexel> {
        &self.buffers[self.current]
    }

    /// Initializes the authoritative buffer from `depths`, which must have the cache's shape.
    pub fn seed(&mut self, depths: &Array2<f32>) -> Result<()> {
        let expected = self.current().shape();
        if depths.shape() != expected {
            return Err(StorageError::LayerShapeMismatch {
                expected,
                actual: depths.shape(),
            }
            .into());
        }

        let current = self.current;
        seed(depths, &mut self.buffers[current]);
        self.state = CacheState::Seeded;

        Ok(())
    }

    /// The jump length of the next pass, if there is one.
    pub fn next_jump(&self) -> Option<u32> {
        let jump = match self.state {
            CacheState::Seeded => 1,
            CacheState::Propagating { jump } => jump * 2,
            CacheState::Empty | CacheState::Converged => return None,
        };

        (jump < self.resolution).then(|| jump)
    }

    /// Runs one propagation pass. Returns `false` without doing anything if the cache is not seeded or has already converged.
    pub fn step(&mut self) -> bool {
        let jump = match self.next_jump() {
            Some(jump) => jump,
            None => {
                if self.state != CacheState::Empty {
                    self.state = CacheState::Converged;
                }
                return false;
            }
        };

        let texel_width = self.texel_width;
        let (read, write) = self.ping_pong();
        jump_flood_step(read, write, jump as i32, texel_width);
        self.current = 1 - self.current;
        self.state = CacheState::Propagating { jump };

        if self.next_jump().is_none() {
            self.state = CacheState::Converged;
        }

        true
    }

    /// Runs passes until converged, returning how many were run.
    pub fn run_to_convergence(&mut self) -> usize {
        let mut passes = 0;
        while self.step() {
            passes += 1;
        }
        debug!(
            "Jump flood converged after {} passes at resolution {}",
            passes, self.resolution
        );

        passes
    }

    /// The depth and distance channels of the authoritative buffer.
    pub fn resolve(&self) -> Array2<DepthDistance> {
        resolve(self.current())
    }

    fn ping_pong(&mut self) -> (&Array2<FloodTexel>, &mut Array2<FloodTexel>) {
        let (first, second) = self.buffers.split_at_mut(1);
        if self.current == 0 {
            (&first[0], &mut second[0])
        } else {
            (&second[0], &mut first[0])
        }
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
    use utilities::data_sets::single_seed_altitudes;

    fn depths_from_altitudes(altitudes: &Array2<f32>) -> Array2<f32> {
        let values = altitudes.values_slice().iter().map(|a| -a).collect();

        Array2::new(*altitudes.extent(), values)
    }

    #[test]
    fn state_machine_walks_through_every_jump() {
        let mut cache = DistanceFieldCache::new(8, 1.0).unwrap();
        assert_eq!(cache.state(), CacheState::Empty);
        assert!(!cache.step());
        assert_eq!(cache.state(), CacheState::Empty);

        let depths = depths_from_altitudes(&single_seed_altitudes(8, PointN([3, 3])));
        cache.seed(&depths).unwrap();
        assert_eq!(cache.state(), CacheState::Seeded);

        assert!(cache.step());
        assert_eq!(cache.state(), CacheState::Propagating { jump: 1 });
        assert!(cache.step());
        assert_eq!(cache.state(), CacheState::Propagating { jump: 2 });
        assert!(cache.step());
        assert_eq!(cache.state(), CacheState::Converged);
        assert!(!cache.step());
    }

    #[test]
    fn single_seed_converges_to_exact_distance() {
        let cases = [
            (16, PointN([0, 0])),
            (13, PointN([7, 2])),
            (64, PointN([50, 31])),
        ];
        for &(resolution, seed_point) in cases.iter() {
            let texel_width = 0.5;
            let mut cache = DistanceFieldCache::new(resolution as u32, texel_width).unwrap();
            let depths = depths_from_altitudes(&single_seed_altitudes(resolution, seed_point));
            cache.seed(&depths).unwrap();

            let passes = cache.run_to_convergence();
            assert_eq!(passes as u32, shoal_core::int_math::ceil_log2(resolution as u32));

            let field = cache.resolve();
            for p in field.extent().iter_points() {
                let exact = texel_width * Point2f::from(p - seed_point).norm();
                let estimate = shoal_storage::Get::get(&field, p).distance;
                assert!(
                    (estimate - exact).abs() <= texel_width,
                    "texel {:?} estimate {} exact {}",
                    p,
                    estimate,
                    exact
                );
            }
        }
    }

    #[test]
    fn single_texel_cache_is_converged_after_seeding() {
        let mut cache = DistanceFieldCache::new(1, 1.0).unwrap();
        let depths = Array2::fill(*cache.current().extent(), 2.0);
        cache.seed(&depths).unwrap();

        assert_eq!(cache.run_to_convergence(), 0);
        assert_eq!(cache.state(), CacheState::Converged);
    }

    #[test]
    fn seeding_with_wrong_shape_fails() {
        let mut cache = DistanceFieldCache::new(4, 1.0).unwrap();
        let depths = Array2::fill(
            Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(3)),
            0.0,
        );

        assert!(matches!(cache.seed(&depths), Err(SdfError::Storage(_))));
        assert_eq!(cache.state(), CacheState::Empty);
    }
}
