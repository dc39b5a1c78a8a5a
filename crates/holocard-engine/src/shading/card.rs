use glam::{Vec2, Vec3};

use crate::coords::ColorRgba;

use super::frame::frame;
use super::layers::{LayerStack, TextureSampler};
use super::params::{CardShading, VoronoiChannel};
use super::parallax::ViewDirection;
use super::voronoi::voronoi;

/// Per-pixel inputs produced by the vertex stage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Fragment {
    pub uv: Vec2,
    pub view: ViewDirection,
}

/// Constant texture bindings of a card face, farthest layer first.
pub struct CardTextures<'a> {
    pub layer1: &'a dyn TextureSampler,
    pub layer2: &'a dyn TextureSampler,
    pub layer2_stencil: &'a dyn TextureSampler,
    pub layer3: &'a dyn TextureSampler,
    pub layer3_stencil: &'a dyn TextureSampler,
}

impl CardShading {
    /// Layer 1 at the surface, layers 2 and 3 at the near and far parallax strengths.
    pub fn layer_stack<'a>(&self, textures: &CardTextures<'a>) -> LayerStack<'a> {
        LayerStack::new()
            .with_layer(textures.layer1, None, Vec2::ZERO)
            .with_layer(textures.layer2, Some(textures.layer2_stencil), self.parallax_near)
            .with_layer(textures.layer3, Some(textures.layer3_stencil), self.parallax_far)
    }
}

/// Cell vector of three channels: the `x` cell hash of each.
fn cell_vector(uv: Vec2, channels: &[VoronoiChannel; 3]) -> Vec3 {
    let [a, b, c] = channels.map(|ch| voronoi(uv, ch.offset, ch.density).cell.x);
    Vec3::new(a, b, c)
}

/// `base + color1·(v·cells1)·k − color2·(v·cells2)·k`.
pub fn voronoi_effect(shading: &CardShading, frag: Fragment) -> Vec3 {
    let view = frag.view.0;
    let k = shading.holographic_factor;

    let cells1 = cell_vector(frag.uv, &shading.voronoi1);
    let color1 = shading.voronoi_color1 * view.dot(cells1) * k;

    let cells2 = cell_vector(frag.uv, &shading.voronoi2);
    let color2 = -1.0 * shading.voronoi_color2 * view.dot(cells2) * k;

    shading.base_color + color1 + color2
}

/// Final card color. Alpha is the outer rounded silhouette.
///
/// Channels are not clamped; the render target does that on write.
pub fn shade(shading: &CardShading, frag: Fragment, layers: &LayerStack<'_>) -> ColorRgba {
    let effect = voronoi_effect(shading, frag);
    let mask = frame(frag.uv, shading.frame);
    let ring = mask.ring();
    let ink = layers.composite(frag.uv, frag.view).x;

    ColorRgba::new(
        effect.x + ring + 0.1,
        effect.y - ink - ring,
        effect.z - ink - ring + 0.1,
        mask.outside,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shading::layers::SolidTexture;
    use glam::Vec4;

    fn blank() -> SolidTexture {
        SolidTexture::PLACEHOLDER
    }

    fn frag(uv: Vec2, view: Vec3) -> Fragment {
        Fragment { uv, view: ViewDirection(view) }
    }

    #[test]
    fn zero_holographic_factor_leaves_base_color() {
        let shading = CardShading { holographic_factor: 0.0, ..CardShading::front() };
        let e = voronoi_effect(&shading, frag(Vec2::new(0.3, 0.4), Vec3::new(0.2, 0.3, 0.93)));
        assert!((e - shading.base_color).abs().max_element() < 1e-6);
    }

    #[test]
    fn center_pixel_without_ink() {
        let shading = CardShading::front();
        let t = blank();
        let textures = CardTextures {
            layer1: &t,
            layer2: &t,
            layer2_stencil: &t,
            layer3: &t,
            layer3_stencil: &t,
        };
        let layers = shading.layer_stack(&textures);
        let f = frag(Vec2::splat(0.5), Vec3::Z);

        let effect = voronoi_effect(&shading, f);
        let c = shade(&shading, f, &layers);

        assert_eq!(c.r, effect.x + 0.1);
        assert_eq!(c.g, effect.y);
        assert_eq!(c.b, effect.z + 0.1);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn ink_darkens_green_and_blue_only() {
        let shading = CardShading::back();
        let ink = SolidTexture(Vec4::new(0.4, 0.9, 0.9, 1.0));
        let none = blank();
        let textures = CardTextures {
            layer1: &ink,
            layer2: &none,
            layer2_stencil: &none,
            layer3: &none,
            layer3_stencil: &none,
        };
        let layers = shading.layer_stack(&textures);
        let f = frag(Vec2::splat(0.5), Vec3::Z);

        let clean = shade(&shading, f, &LayerStack::new());
        let inked = shade(&shading, f, &layers);

        assert_eq!(inked.r, clean.r);
        assert!((clean.g - inked.g - 0.4).abs() < 1e-6);
        assert!((clean.b - inked.b - 0.4).abs() < 1e-6);
    }

    #[test]
    fn border_pixel_is_red_shifted() {
        let shading = CardShading::front();
        let f_edge = frag(Vec2::new(0.005, 0.5), Vec3::Z);
        let c = shade(&shading, f_edge, &LayerStack::new());
        let e = voronoi_effect(&shading, f_edge);

        assert_eq!(c.r, e.x + 1.0 + 0.1);
        assert_eq!(c.g, e.y - 1.0);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn corner_is_cut_out() {
        let shading = CardShading::front();
        let c = shade(&shading, frag(Vec2::ZERO, Vec3::Z), &LayerStack::new());
        assert_eq!(c.a, 0.0);
    }

    #[test]
    fn same_inputs_same_color() {
        let shading = CardShading::back();
        let f = frag(Vec2::new(0.71, 0.13), Vec3::new(0.1, -0.2, 0.97));
        assert_eq!(
            shade(&shading, f, &LayerStack::new()),
            shade(&shading, f, &LayerStack::new())
        );
    }
}
