use glam::{Mat4, Vec2, Vec3};
use image::{Rgba, RgbaImage};

use super::card::{shade, Fragment};
use super::layers::LayerStack;
use super::params::CardShading;
use super::parallax::ViewDirection;

/// Card plane size in world units.
pub const CARD_SIZE: Vec2 = Vec2::new(3.5, 5.0);

/// Position on the card plane (local space, `z = 0`) for a UV.
#[inline]
pub fn card_local_position(uv: Vec2) -> Vec3 {
    ((uv - Vec2::splat(0.5)) * CARD_SIZE).extend(0.0)
}

/// Rasterizes one card face with the CPU kernel.
///
/// The image covers the card's UV square exactly; image row 0 is the top edge
/// (`v = 1`). `card_world` places the face in the scene and `camera` is a
/// world-space position, so the view direction matches the GPU path.
pub fn rasterize_face(
    shading: &CardShading,
    layers: &LayerStack<'_>,
    width: u32,
    height: u32,
    card_world: Mat4,
    camera: Vec3,
) -> RgbaImage {
    let mut out = RgbaImage::new(width, height);
    let size = Vec2::new(width.max(1) as f32, height.max(1) as f32);

    for (x, y, px) in out.enumerate_pixels_mut() {
        let uv = Vec2::new(
            (x as f32 + 0.5) / size.x,
            1.0 - (y as f32 + 0.5) / size.y,
        );
        let world = card_world.transform_point3(card_local_position(uv));
        let view = ViewDirection::from_world(camera, world);
        let c = shade(shading, Fragment { uv, view }, layers);
        *px = Rgba(c.to_rgba8());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn corners_are_transparent_and_center_opaque() {
        let img = rasterize_face(
            &CardShading::front(),
            &LayerStack::new(),
            35,
            50,
            Mat4::IDENTITY,
            Vec3::new(0.0, 0.0, 10.0),
        );
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(34, 49)[3], 0);
        assert_eq!(img.get_pixel(17, 25)[3], 255);
    }

    #[test]
    fn left_edge_shows_the_border() {
        let img = rasterize_face(
            &CardShading::back(),
            &LayerStack::new(),
            200,
            200,
            Mat4::IDENTITY,
            Vec3::new(0.0, 0.0, 10.0),
        );
        // Border adds a full unit of red and removes the same from green.
        let edge = img.get_pixel(0, 100);
        let inner = img.get_pixel(20, 100);
        assert_eq!(edge[0], 255);
        assert_eq!(edge[3], 255);
        assert!(edge[1] < inner[1]);
    }

    #[test]
    fn local_position_spans_card() {
        assert_eq!(card_local_position(Vec2::ZERO), Vec3::new(-1.75, -2.5, 0.0));
        assert_eq!(card_local_position(Vec2::ONE), Vec3::new(1.75, 2.5, 0.0));
    }

    #[test]
    fn back_face_uses_the_world_view_direction() {
        // Back card: half turn about Y behind the front, seen head-on from -Z.
        let world = Mat4::from_translation(Vec3::new(0.0, 0.0, -0.01)) * Mat4::from_rotation_y(PI);
        let camera = world.transform_point3(Vec3::new(0.0, 0.0, 10.0));

        let uv = Vec2::new(0.9, 0.5);
        let p = world.transform_point3(card_local_position(uv));
        let view = ViewDirection::from_world(camera, p);
        // u = 0.9 sits at world -X; the raw direction points +X, the mirrored one -X.
        assert!(view.0.x < 0.0);
        assert!(view.0.z < 0.0);
    }
}
