use glam::Vec2;

use super::glsl::fract2;

/// Result of one voronoi evaluation.
///
/// `cell` is the random offset of the winning seed. It is stable across the
/// whole cell, so callers use it as a pseudo cell id.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VoronoiSample {
    pub distance: f32,
    pub cell: Vec2,
}

/// Starting "best" distance. Any seed in the 3x3 neighbourhood is closer.
const FAR: f32 = 8.0;

/// Hashes an integer lattice point to a pseudo-random offset in `[0, 1]²`.
///
/// The matrix is column-major: columns `(15.27, 47.63)` and `(99.41, 89.98)`.
#[inline]
pub fn voronoi_random(seed: Vec2, offset: f32) -> Vec2 {
    let m = Vec2::new(
        15.27 * seed.x + 99.41 * seed.y,
        47.63 * seed.x + 89.98 * seed.y,
    );
    let h = fract2(Vec2::new(m.x.sin(), m.y.sin()) * 46839.32);
    Vec2::new(
        (h.y * offset).sin() * 0.5 + 0.5,
        (h.x * offset).cos() * 0.5 + 0.5,
    )
}

/// Cell noise over `seed`, scaled by `density`.
///
/// Scans the 3x3 neighbourhood row by row (`y` outer, `x` inner) and keeps the
/// first strict minimum, so equal distances resolve to the earliest neighbour.
pub fn voronoi(seed: Vec2, offset: f32, density: f32) -> VoronoiSample {
    let scaled = seed * density;
    let g = scaled.floor();
    let f = scaled - g;

    let neighbours = (-1..=1).flat_map(|y| {
        (-1..=1).map(move |x| {
            let lattice = Vec2::new(x as f32, y as f32);
            (lattice, voronoi_random(lattice + g, offset))
        })
    });
    nearest_seed(f, neighbours)
}

/// Closest `(lattice, random_offset)` seed to `f`, in iteration order.
///
/// Only a strictly smaller distance replaces the current best.
fn nearest_seed(f: Vec2, candidates: impl IntoIterator<Item = (Vec2, Vec2)>) -> VoronoiSample {
    let mut best = VoronoiSample {
        distance: FAR,
        cell: Vec2::ZERO,
    };

    for (lattice, random_offset) in candidates {
        let d = (lattice + random_offset).distance(f);
        if d < best.distance {
            best = VoronoiSample {
                distance: d,
                cell: random_offset,
            };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_calls_are_identical() {
        let uv = Vec2::new(0.3125, 0.71875);
        let a = voronoi(uv, 2.6, 12.4);
        let b = voronoi(uv, 2.6, 12.4);
        assert_eq!(a.distance.to_bits(), b.distance.to_bits());
        assert_eq!(a.cell.x.to_bits(), b.cell.x.to_bits());
        assert_eq!(a.cell.y.to_bits(), b.cell.y.to_bits());
    }

    #[test]
    fn distance_stays_inside_neighbourhood_bound() {
        let bound = std::f32::consts::SQRT_2 + 1e-5;
        for i in 0..=32 {
            for j in 0..=32 {
                let uv = Vec2::new(i as f32 / 32.0, j as f32 / 32.0);
                for (offset, density) in [(2.6, 12.4), (9.4, 16.4), (17.2, 15.8)] {
                    let s = voronoi(uv, offset, density);
                    assert!(s.distance >= 0.0, "negative distance at {uv:?}");
                    assert!(s.distance <= bound, "distance {} at {uv:?}", s.distance);
                }
            }
        }
    }

    #[test]
    fn random_offsets_are_unit_square() {
        for i in -8..8 {
            for j in -8..8 {
                let r = voronoi_random(Vec2::new(i as f32, j as f32), 6.4);
                assert!((0.0..=1.0).contains(&r.x));
                assert!((0.0..=1.0).contains(&r.y));
            }
        }
    }

    #[test]
    fn cell_id_matches_a_neighbour_hash() {
        let uv = Vec2::new(0.4, 0.6);
        let density = 9.0;
        let offset = 4.0;
        let s = voronoi(uv, offset, density);
        let g = (uv * density).floor();

        let found = (-1..=1).any(|y| {
            (-1..=1).any(|x| voronoi_random(g + Vec2::new(x as f32, y as f32), offset) == s.cell)
        });
        assert!(found);
    }

    #[test]
    fn winner_is_a_minimum_over_the_scan() {
        let uv = Vec2::new(0.15, 0.85);
        let (offset, density) = (11.6, 13.2);
        let s = voronoi(uv, offset, density);
        let scaled = uv * density;
        let g = scaled.floor();
        let f = scaled - g;

        for y in -1..=1 {
            for x in -1..=1 {
                let lattice = Vec2::new(x as f32, y as f32);
                let d = (lattice + voronoi_random(lattice + g, offset)).distance(f);
                assert!(s.distance <= d);
            }
        }
    }

    #[test]
    fn equidistant_seeds_keep_the_earlier_one() {
        // Both seeds land 0.5 from the cell centre: one below, one to the right.
        let f = Vec2::splat(0.5);
        let below = (Vec2::new(0.0, -1.0), Vec2::new(0.5, 1.0));
        let right = (Vec2::new(1.0, 0.0), Vec2::new(0.0, 0.5));

        let s = nearest_seed(f, [below, right]);
        assert_eq!(s.distance, 0.5);
        assert_eq!(s.cell, below.1);

        let s = nearest_seed(f, [right, below]);
        assert_eq!(s.cell, right.1);
    }

    #[test]
    fn empty_scan_keeps_the_far_sentinel() {
        let none: [(Vec2, Vec2); 0] = [];
        let s = nearest_seed(Vec2::ZERO, none);
        assert_eq!(s.distance, FAR);
        assert_eq!(s.cell, Vec2::ZERO);
    }
}
