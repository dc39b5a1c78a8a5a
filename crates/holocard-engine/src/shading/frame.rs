use glam::Vec2;

use super::glsl::step;

/// Rounded-rectangle border in UV space.
///
/// `thickness_border` must stay below `corner_radius`. This is not checked:
/// at or above it the inner corner disks collapse and the ring turns negative
/// near the corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameParameters {
    pub corner_radius: f32,
    pub thickness_border: f32,
}

impl FrameParameters {
    pub const fn new(corner_radius: f32, thickness_border: f32) -> Self {
        Self { corner_radius, thickness_border }
    }
}

impl Default for FrameParameters {
    fn default() -> Self {
        Self::new(0.05, 0.005)
    }
}

/// Both halves of the frame mask at one UV.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FrameMask {
    /// Filled outer silhouette, used as alpha.
    pub outside: f32,
    /// Filled inner shape subtracted from `outside`.
    pub inside: f32,
}

impl FrameMask {
    #[inline]
    pub fn ring(self) -> f32 {
        self.outside - self.inside
    }
}

#[inline]
fn disk(uv: Vec2, center: Vec2, radius: f32) -> f32 {
    1.0 - step(radius, (uv - center).length())
}

#[inline]
fn band(coord: f32, half_width: f32) -> f32 {
    1.0 - step(half_width, (coord - 0.5).abs())
}

/// Union of the four corner disks and the two central bands, clamped.
pub fn outside_frame(uv: Vec2, corner_radius: f32) -> f32 {
    let r = corner_radius;
    let far = 1.0 - r;

    let disks = disk(uv, Vec2::new(r, r), r)
        + disk(uv, Vec2::new(far, r), r)
        + disk(uv, Vec2::new(r, far), r)
        + disk(uv, Vec2::new(far, far), r);
    let bands = band(uv.x, 0.5 - r) + band(uv.y, 0.5 - r);

    (bands + disks).clamp(0.0, 1.0)
}

/// The outer construction shrunk by the border thickness.
///
/// The square test subtracted at the end keeps the two widened bands from
/// reaching the card edges.
pub fn inside_frame(uv: Vec2, params: FrameParameters) -> f32 {
    let r = params.corner_radius;
    let t = params.thickness_border;
    let near = r + t;
    let far = 1.0 - r - t;
    let radius = r - t;

    let disks = disk(uv, Vec2::new(near, near), radius)
        + disk(uv, Vec2::new(far, near), radius)
        + disk(uv, Vec2::new(far, far), radius)
        + disk(uv, Vec2::new(near, far), radius);

    let half_width = 0.5 - r + t;
    let square = step(
        0.5 - t * 2.0,
        (uv.x - 0.5).abs().max((uv.y - 0.5).abs()),
    );
    let bands = band(uv.x, half_width) + band(uv.y, half_width) - square;

    (disks + bands).clamp(0.0, 1.0)
}

pub fn frame(uv: Vec2, params: FrameParameters) -> FrameMask {
    FrameMask {
        outside: outside_frame(uv, params.corner_radius),
        inside: inside_frame(uv, params),
    }
}

/// Border ring value: `outside - inside`.
pub fn frame_mask(uv: Vec2, params: FrameParameters) -> f32 {
    frame(uv, params).ring()
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRID: u32 = 128;

    fn grid() -> impl Iterator<Item = Vec2> {
        (0..=GRID).flat_map(|i| {
            (0..=GRID).map(move |j| Vec2::new(i as f32 / GRID as f32, j as f32 / GRID as f32))
        })
    }

    // ── range ─────────────────────────────────────────────────────────────

    #[test]
    fn mask_is_within_unit_range() {
        let p = FrameParameters::default();
        for uv in grid() {
            let m = frame_mask(uv, p);
            assert!((0.0..=1.0).contains(&m), "mask {m} at {uv:?}");
        }
    }

    // ── symmetry ──────────────────────────────────────────────────────────

    #[test]
    fn mask_is_mirror_symmetric() {
        let p = FrameParameters::default();
        for uv in grid() {
            let m = frame_mask(uv, p);
            assert_eq!(m, frame_mask(Vec2::new(1.0 - uv.x, uv.y), p), "x mirror at {uv:?}");
            assert_eq!(m, frame_mask(Vec2::new(uv.x, 1.0 - uv.y), p), "y mirror at {uv:?}");
        }
    }

    // ── fixed points ──────────────────────────────────────────────────────

    #[test]
    fn card_center_is_not_border() {
        let mask = frame(Vec2::new(0.5, 0.5), FrameParameters::new(0.05, 0.005));
        assert_eq!(mask.ring(), 0.0);
        assert_eq!(mask.outside, 1.0);
    }

    #[test]
    fn exact_corner_is_outside_silhouette() {
        let mask = frame(Vec2::ZERO, FrameParameters::new(0.05, 0.005));
        assert_eq!(mask.outside, 0.0);
        assert_eq!(mask.inside, 0.0);
        assert_eq!(mask.ring(), 0.0);
    }

    #[test]
    fn edge_strip_is_border() {
        let p = FrameParameters::default();
        assert_eq!(frame_mask(Vec2::new(0.005, 0.5), p), 1.0);
        assert_eq!(frame_mask(Vec2::new(0.5, 0.995), p), 1.0);
        assert_eq!(frame_mask(Vec2::new(0.02, 0.5), p), 0.0);
    }

    #[test]
    fn border_exists_somewhere() {
        let p = FrameParameters::default();
        assert!(grid().any(|uv| frame_mask(uv, p) == 1.0));
    }

    // ── degenerate thickness ──────────────────────────────────────────────

    #[test]
    fn zero_thickness_vanishes_in_interior() {
        let p = FrameParameters::new(0.05, 0.0);
        for uv in grid() {
            if uv.x == 0.0 || uv.y == 0.0 || uv.x == 1.0 || uv.y == 1.0 {
                continue;
            }
            assert_eq!(frame_mask(uv, p), 0.0, "at {uv:?}");
        }
    }

    #[test]
    fn thickness_equal_to_radius_inverts_near_corners() {
        let p = FrameParameters::new(0.05, 0.05);
        let near_corner = Vec2::new(1.0 / 128.0, 1.0 / 128.0);
        let mask = frame(near_corner, p);
        assert_eq!(mask.outside, 0.0);
        assert_eq!(mask.inside, 1.0);
        assert_eq!(mask.ring(), -1.0);

        assert_eq!(frame_mask(Vec2::new(0.5, 0.5), p), 0.0);
    }
}
