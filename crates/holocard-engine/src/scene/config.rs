use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use glam::{Mat4, Quat, Vec3};

use crate::coords::ColorRgba;
use crate::render::DIAMOND_COLOR;
use crate::shading::CardFace;

use super::{HemisphericLight, OrbitCamera};

/// File names of the five card layers, relative to the asset directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardTextureNames {
    pub layer1: String,
    pub layer2: String,
    pub layer2_stencil: String,
    pub layer3: String,
    pub layer3_stencil: String,
}

impl CardTextureNames {
    /// Front face: both stencils use the placeholder.
    pub fn front() -> Self {
        Self {
            layer1: "cardTexture1.png".into(),
            layer2: "cardTexture2.png".into(),
            layer2_stencil: "placeHolderTexture.png".into(),
            layer3: "cardTexture3.png".into(),
            layer3_stencil: "placeHolderTexture.png".into(),
        }
    }

    pub fn back() -> Self {
        Self {
            layer1: "layer1.png".into(),
            layer2: "layer2.png".into(),
            layer2_stencil: "layer2b.png".into(),
            layer3: "layer3.png".into(),
            layer3_stencil: "layer3b.png".into(),
        }
    }

    /// In binding order: layer1, layer2, layer2 stencil, layer3, layer3 stencil.
    pub fn in_order(&self) -> [&str; 5] {
        [
            self.layer1.as_str(),
            self.layer2.as_str(),
            self.layer2_stencil.as_str(),
            self.layer3.as_str(),
            self.layer3_stencil.as_str(),
        ]
    }
}

/// Translation and uniform scale applied to the imported model.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ModelPlacement {
    pub translation: Vec3,
    pub scale: f32,
}

impl Default for ModelPlacement {
    fn default() -> Self {
        Self {
            translation: Vec3::new(0.0, -1.55, -1.0),
            scale: 0.75,
        }
    }
}

impl ModelPlacement {
    pub fn world(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), Quat::IDENTITY, self.translation)
    }
}

/// Everything the studio needs to assemble the scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    pub asset_dir: PathBuf,
    /// Model file relative to `asset_dir`; `None` skips the king pass.
    pub model_file: Option<PathBuf>,
    pub front_textures: CardTextureNames,
    pub back_textures: CardTextureNames,

    pub clear_color: ColorRgba,
    pub diamond_color: ColorRgba,
    pub camera: OrbitCamera,
    pub light: HemisphericLight,
    pub king: ModelPlacement,
    /// Distance between the two card faces along Z.
    pub card_gap: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("assets"),
            model_file: Some(PathBuf::from("king.glb")),
            front_textures: CardTextureNames::front(),
            back_textures: CardTextureNames::back(),
            clear_color: ColorRgba::new(0.5, 0.0, 0.1, 1.0),
            diamond_color: DIAMOND_COLOR,
            camera: OrbitCamera::default(),
            light: HemisphericLight::default(),
            king: ModelPlacement::default(),
            card_gap: 0.01,
        }
    }
}

impl SceneConfig {
    pub fn asset_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.asset_dir.join(name)
    }

    pub fn model_path(&self) -> Option<PathBuf> {
        self.model_file.as_ref().map(|m| self.asset_path(m))
    }

    pub fn textures(&self, face: CardFace) -> &CardTextureNames {
        match face {
            CardFace::Front => &self.front_textures,
            CardFace::Back => &self.back_textures,
        }
    }

    /// Front faces +Z at the origin; back is turned half a revolution about Y
    /// and pushed behind it.
    pub fn card_world(&self, face: CardFace) -> Mat4 {
        match face {
            CardFace::Front => Mat4::IDENTITY,
            CardFace::Back => {
                Mat4::from_translation(Vec3::new(0.0, 0.0, -self.card_gap)) * Mat4::from_rotation_y(PI)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_card_faces_away() {
        let cfg = SceneConfig::default();
        let n = cfg.card_world(CardFace::Back).transform_vector3(Vec3::Z);
        assert!((n - Vec3::NEG_Z).length() < 1e-6);
        let p = cfg.card_world(CardFace::Back).transform_point3(Vec3::ZERO);
        assert!((p.z + 0.01).abs() < 1e-6);
    }

    #[test]
    fn king_sits_below_and_behind_the_card() {
        let w = ModelPlacement::default().world();
        let p = w.transform_point3(Vec3::ZERO);
        assert!((p - Vec3::new(0.0, -1.55, -1.0)).length() < 1e-6);
        assert!((w.transform_vector3(Vec3::X).length() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn asset_paths_join_the_directory() {
        let cfg = SceneConfig {
            asset_dir: PathBuf::from("/data"),
            ..Default::default()
        };
        assert_eq!(cfg.model_path(), Some(PathBuf::from("/data/king.glb")));
        assert_eq!(cfg.textures(CardFace::Back).in_order()[2], "layer2b.png");
    }
}
