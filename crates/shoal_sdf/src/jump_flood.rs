//! The passes of the [jump flooding algorithm](https://en.wikipedia.org/wiki/Jump_flooding_algorithm).
//!
//! Each working texel remembers the boundary texel its distance estimate came from. A pass with jump length `k` looks at the
//! 9 texels `p + k * {-1, 0, 1}^2` and adopts whichever of their boundary texels is closest to `p`. Running passes with
//! `k = 1, 2, 4, ...` while `k < resolution` carries the nearest boundary texel of a single seed to every texel exactly.
//!
//! A candidate's distance is recomputed from `p` to its boundary texel, not extended from the neighbor's stored estimate by the
//! jump length.

use shoal_core::prelude::*;
use shoal_storage::{Array2, DepthDistance, Get, FAR_DISTANCE};

use float_ord::FloatOrd;
use rayon::prelude::*;

/// One texel of the working buffers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FloodTexel {
    /// Water depth below the reference level. Texels with `depth <= 0` are the boundary.
    pub depth: f32,
    /// World-space distance to `nearest`, or `FAR_DISTANCE` when no boundary has been found yet.
    pub distance: f32,
    pub nearest: Option<Point2i>,
}

impl FloodTexel {
    pub const EMPTY: Self = Self {
        depth: 0.0,
        distance: FAR_DISTANCE,
        nearest: None,
    };

    /// The initial state of texel `p` with the given `depth`.
    #[inline]
    pub fn seed(p: Point2i, depth: f32) -> Self {
        if depth <= 0.0 {
            Self {
                depth,
                distance: 0.0,
                nearest: Some(p),
            }
        } else {
            Self {
                depth,
                distance: FAR_DISTANCE,
                nearest: None,
            }
        }
    }

    #[inline]
    pub fn resolve(&self) -> DepthDistance {
        DepthDistance::new(self.depth, self.distance)
    }
}

/// Writes the initial state of every texel of `depths` into `out`.
pub fn seed(depths: &Array2<f32>, out: &mut Array2<FloodTexel>) {
    debug_assert_eq!(depths.extent(), out.extent());

    let min_x = out.extent().minimum.x();
    out.par_for_each_row_mut(|y, row| {
        for (i, texel) in row.iter_mut().enumerate() {
            let p = PointN([min_x + i as i32, y]);
            *texel = FloodTexel::seed(p, depths.get(p));
        }
    });
}

/// One propagation pass with jump length `jump`. Reads only from `read` and writes every texel of `write`. Neighbors outside
/// of the array are skipped.
pub fn jump_flood_step(
    read: &Array2<FloodTexel>,
    write: &mut Array2<FloodTexel>,
    jump: i32,
    texel_width: f32,
) {
    debug_assert_eq!(read.extent(), write.extent());

    let offsets: Vec<Point2i> = Point2i::moore_offsets(true)
        .into_iter()
        .map(|o| o * jump)
        .collect();
    let min_x = write.extent().minimum.x();

    write.par_for_each_row_mut(|y, row| {
        for (i, out) in row.iter_mut().enumerate() {
            let p = PointN([min_x + i as i32, y]);
            let here: FloodTexel = read.get(p);

            let best = offsets
                .iter()
                .map(|o| p + *o)
                .filter(|q| read.contains(*q))
                .filter_map(|q| read.get(q).nearest)
                .map(|nearest| {
                    let distance = texel_width * Point2f::from(p - nearest).norm();
                    (nearest, distance)
                })
                .min_by_key(|(_, distance)| FloatOrd(*distance));

            *out = match best {
                Some((nearest, distance)) => FloodTexel {
                    depth: here.depth,
                    distance,
                    nearest: Some(nearest),
                },
                None => here,
            };
        }
    });
}

/// The depth and distance channels of every texel.
pub fn resolve(flood: &Array2<FloodTexel>) -> Array2<DepthDistance> {
    let values = flood
        .values_slice()
        .par_iter()
        .map(FloodTexel::resolve)
        .collect();

    Array2::new(*flood.extent(), values)
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

    use shoal_storage::GetMut;

    use pretty_assertions::assert_eq;

    fn extent(edge: i32) -> Extent2i {
        Extent2i::from_min_and_shape(Point2i::ZERO, Point2i::fill(edge))
    }

    #[test]
    fn seed_marks_boundary() {
        let depths = Array2::new(extent(2), vec![-1.0, 0.0, 0.5, 3.0]);
        let mut flood = Array2::fill(extent(2), FloodTexel::EMPTY);

        seed(&depths, &mut flood);

        assert_eq!(flood.get(PointN([0, 0])).nearest, Some(PointN([0, 0])));
        assert_eq!(flood.get(PointN([1, 0])).nearest, Some(PointN([1, 0])));
        assert_eq!(flood.get(PointN([0, 1])).nearest, None);
        assert_eq!(flood.get(PointN([0, 1])).distance, FAR_DISTANCE);
        assert_eq!(flood.get(PointN([1, 1])).depth, 3.0);
    }

    #[test]
    fn one_step_reaches_neighbors_at_jump_length() {
        let mut depths = Array2::fill(extent(5), 1.0);
        *depths.get_mut(PointN([2, 2])) = -1.0;
        let mut read = Array2::fill(extent(5), FloodTexel::EMPTY);
        let mut write = read.clone();
        seed(&depths, &mut read);

        jump_flood_step(&read, &mut write, 2, 0.5);

        assert_eq!(write.get(PointN([0, 0])).distance, 0.5 * 8.0f32.sqrt());
        assert_eq!(write.get(PointN([4, 2])).distance, 1.0);
        assert_eq!(write.get(PointN([2, 2])).distance, 0.0);
        // Not a multiple of the jump away.
        assert_eq!(write.get(PointN([3, 2])).nearest, None);
    }

    #[test]
    fn resolve_keeps_both_channels() {
        let mut flood = Array2::fill(extent(1), FloodTexel::EMPTY);
        *flood.get_mut(PointN([0, 0])) = FloodTexel {
            depth: 2.0,
            distance: 3.0,
            nearest: Some(PointN([5, 5])),
        };

        let resolved = resolve(&flood);

        assert_eq!(resolved.get(PointN([0, 0])), DepthDistance::new(2.0, 3.0));
    }
}
