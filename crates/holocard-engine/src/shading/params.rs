use glam::{Vec2, Vec3};

use super::frame::FrameParameters;

/// One voronoi evaluation feeding a single color channel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VoronoiChannel {
    pub offset: f32,
    pub density: f32,
}

impl VoronoiChannel {
    pub const fn new(offset: f32, density: f32) -> Self {
        Self { offset, density }
    }
}

/// Which side of the card a parameter set belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum CardFace {
    Front,
    Back,
}

impl CardFace {
    pub const ALL: [CardFace; 2] = [CardFace::Front, CardFace::Back];

    pub fn label(self) -> &'static str {
        match self {
            CardFace::Front => "front",
            CardFace::Back => "back",
        }
    }
}

/// Immutable shading constants for one card face.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CardShading {
    pub base_color: Vec3,
    pub voronoi_color1: Vec3,
    pub voronoi_color2: Vec3,
    /// Additive overlay channels.
    pub voronoi1: [VoronoiChannel; 3],
    /// Subtractive overlay channels.
    pub voronoi2: [VoronoiChannel; 3],
    pub holographic_factor: f32,
    pub frame: FrameParameters,
    pub parallax_near: Vec2,
    pub parallax_far: Vec2,
}

const BASE_COLOR: Vec3 = Vec3::new(1.0, 0.988_235_3, 0.952_941_2);
const VORONOI_COLOR1: Vec3 = Vec3::new(0.44, 0.16, 0.0);
const VORONOI_COLOR2: Vec3 = Vec3::new(0.51, 0.34, 0.0);

const VORONOI1: [VoronoiChannel; 3] = [
    VoronoiChannel::new(2.6, 12.4),
    VoronoiChannel::new(6.4, 14.6),
    VoronoiChannel::new(4.0, 9.0),
];
const VORONOI2: [VoronoiChannel; 3] = [
    VoronoiChannel::new(11.6, 13.2),
    VoronoiChannel::new(9.4, 16.4),
    VoronoiChannel::new(17.2, 15.8),
];

impl CardShading {
    pub fn front() -> Self {
        Self {
            holographic_factor: 0.9,
            parallax_near: Vec2::new(0.05, 0.05),
            parallax_far: Vec2::new(0.15, 0.15),
            ..Self::shared()
        }
    }

    pub fn back() -> Self {
        Self {
            holographic_factor: 0.5,
            parallax_near: Vec2::new(0.2, 0.0),
            parallax_far: Vec2::new(0.45, 0.0),
            ..Self::shared()
        }
    }

    pub fn for_face(face: CardFace) -> Self {
        match face {
            CardFace::Front => Self::front(),
            CardFace::Back => Self::back(),
        }
    }

    fn shared() -> Self {
        Self {
            base_color: BASE_COLOR,
            voronoi_color1: VORONOI_COLOR1,
            voronoi_color2: VORONOI_COLOR2,
            voronoi1: VORONOI1,
            voronoi2: VORONOI2,
            holographic_factor: 0.0,
            frame: FrameParameters::new(0.05, 0.005),
            parallax_near: Vec2::ZERO,
            parallax_far: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_share_colors_and_frame() {
        let f = CardShading::front();
        let b = CardShading::back();
        assert_eq!(f.base_color, b.base_color);
        assert_eq!(f.frame, b.frame);
        assert_eq!(f.voronoi1, b.voronoi1);
        assert_eq!(f.voronoi2, b.voronoi2);
    }

    #[test]
    fn back_parallax_is_horizontal_and_stronger() {
        let f = CardShading::front();
        let b = CardShading::back();
        assert_eq!(b.parallax_near.y, 0.0);
        assert_eq!(b.parallax_far.y, 0.0);
        assert!(b.parallax_far.x > f.parallax_far.x);
        assert!(f.holographic_factor > b.holographic_factor);
    }

    #[test]
    fn border_thinner_than_corner() {
        let p = CardShading::front().frame;
        assert!(p.thickness_border < p.corner_radius);
    }
}
