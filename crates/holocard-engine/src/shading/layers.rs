use glam::{Vec2, Vec4};
use image::RgbaImage;

use super::glsl::saturate4;
use super::parallax::{parallax_uv, ViewDirection};

/// Source of RGBA samples in `[0, 1]`.
pub trait TextureSampler {
    fn sample(&self, uv: Vec2) -> Vec4;
}

/// Constant color everywhere.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SolidTexture(pub Vec4);

impl SolidTexture {
    /// Stand-in for an absent stencil; subtracting it is a no-op.
    pub const PLACEHOLDER: SolidTexture = SolidTexture(Vec4::ZERO);
}

impl TextureSampler for SolidTexture {
    #[inline]
    fn sample(&self, _uv: Vec2) -> Vec4 {
        self.0
    }
}

/// Bilinear, repeat-addressed sampler over an RGBA8 image.
///
/// Row 0 of `image` is `v = 0`. Loaders flip decoded files so `v` grows upwards.
#[derive(Debug, Clone)]
pub struct ImageTexture {
    image: RgbaImage,
}

impl ImageTexture {
    pub fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    fn texel(&self, x: i64, y: i64) -> Vec4 {
        let w = self.image.width() as i64;
        let h = self.image.height() as i64;
        let px = self.image.get_pixel(x.rem_euclid(w) as u32, y.rem_euclid(h) as u32);
        Vec4::new(px[0] as f32, px[1] as f32, px[2] as f32, px[3] as f32) / 255.0
    }
}

impl TextureSampler for ImageTexture {
    fn sample(&self, uv: Vec2) -> Vec4 {
        if self.image.width() == 0 || self.image.height() == 0 {
            return Vec4::ZERO;
        }

        // Texel centres sit at half-integer coordinates.
        let x = uv.x * self.image.width() as f32 - 0.5;
        let y = uv.y * self.image.height() as f32 - 0.5;
        let x0 = x.floor();
        let y0 = y.floor();
        let tx = x - x0;
        let ty = y - y0;
        let (x0, y0) = (x0 as i64, y0 as i64);

        let top = self.texel(x0, y0).lerp(self.texel(x0 + 1, y0), tx);
        let bottom = self.texel(x0, y0 + 1).lerp(self.texel(x0 + 1, y0 + 1), tx);
        top.lerp(bottom, ty)
    }
}

/// One parallax layer.
pub struct Layer<'a> {
    pub color: &'a dyn TextureSampler,
    /// Coverage of this layer, subtracted from every layer behind it.
    pub stencil: Option<&'a dyn TextureSampler>,
    pub parallax: Vec2,
}

/// Back-to-front ordered layers. Index 0 is the farthest.
#[derive(Default)]
pub struct LayerStack<'a> {
    layers: Vec<Layer<'a>>,
}

impl<'a> LayerStack<'a> {
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    pub fn with_layer(
        mut self,
        color: &'a dyn TextureSampler,
        stencil: Option<&'a dyn TextureSampler>,
        parallax: Vec2,
    ) -> Self {
        self.layers.push(Layer { color, stencil, parallax });
        self
    }

    /// Sums the layers after each one has the stencils of all nearer layers
    /// subtracted. Every partial result is clamped to `[0, 1]`.
    pub fn composite(&self, uv: Vec2, view: ViewDirection) -> Vec4 {
        let uvs: Vec<Vec2> = self
            .layers
            .iter()
            .map(|l| parallax_uv(uv, view, l.parallax))
            .collect();

        let mut sum = Vec4::ZERO;
        for (i, layer) in self.layers.iter().enumerate() {
            let cover = self.layers[i + 1..]
                .iter()
                .zip(&uvs[i + 1..])
                .filter_map(|(nearer, &nuv)| nearer.stencil.map(|s| s.sample(nuv)))
                .fold(Vec4::ZERO, |acc, s| acc + s);

            sum += saturate4(layer.color.sample(uvs[i]) - cover);
        }
        saturate4(sum)
    }
}
