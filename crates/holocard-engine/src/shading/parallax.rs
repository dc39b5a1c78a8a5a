use glam::{Vec2, Vec3};

/// Unit vector from a surface point towards the camera.
///
/// Computed once per vertex. Interpolated values are used as-is by the pixel
/// stage, without a second normalization.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewDirection(pub Vec3);

impl ViewDirection {
    /// `normalize(camera - world_position)` expressed in the shading frame.
    /// Returns `Vec3::ZERO` when the two coincide.
    ///
    /// The card formulas are tuned for a left-handed world; the scene is
    /// right-handed, so X is mirrored. `card.wgsl` applies the same flip.
    #[inline]
    pub fn from_world(camera: Vec3, world_position: Vec3) -> Self {
        let v = (camera - world_position).normalize_or_zero();
        Self(Vec3::new(-v.x, v.y, v.z))
    }

    #[inline]
    pub fn xy(self) -> Vec2 {
        self.0.truncate()
    }
}

/// `base_uv + view.xy * strength`.
#[inline]
pub fn parallax_uv(base_uv: Vec2, view: ViewDirection, strength: Vec2) -> Vec2 {
    base_uv + view.xy() * strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_on_view_has_no_offset() {
        let view = ViewDirection::from_world(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO);
        let uv = Vec2::new(0.25, 0.75);
        assert_eq!(parallax_uv(uv, view, Vec2::new(0.45, 0.45)), uv);
    }

    #[test]
    fn displacement_scales_linearly_with_strength() {
        let view = ViewDirection::from_world(Vec3::new(3.0, -2.0, 8.0), Vec3::new(0.5, 0.5, 0.0));
        let uv = Vec2::new(0.5, 0.5);
        let s = Vec2::new(0.05, 0.15);

        let d1 = parallax_uv(uv, view, s) - uv;
        let d2 = parallax_uv(uv, view, s * 2.0) - uv;
        assert!((d2 - d1 * 2.0).length() < 1e-6);
    }

    #[test]
    fn zero_axis_strength_pins_that_axis() {
        let view = ViewDirection::from_world(Vec3::new(4.0, 4.0, 4.0), Vec3::ZERO);
        let uv = Vec2::new(0.3, 0.6);
        let out = parallax_uv(uv, view, Vec2::new(0.2, 0.0));
        assert_eq!(out.y, uv.y);
        assert!(out.x < uv.x);
    }

    #[test]
    fn camera_to_the_right_mirrors_into_negative_x() {
        let view = ViewDirection::from_world(Vec3::new(3.0, 0.0, 4.0), Vec3::ZERO);
        assert!((view.0 - Vec3::new(-0.6, 0.0, 0.8)).length() < 1e-6);
    }

    #[test]
    fn coincident_points_give_zero_direction() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(ViewDirection::from_world(p, p).0, Vec3::ZERO);
    }
}
