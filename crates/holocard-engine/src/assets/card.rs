use std::path::Path;

use image::RgbaImage;

use crate::scene::{CardTextureNames, SceneConfig};
use crate::shading::{CardFace, CardTextures, ImageTexture};

use super::model::{load_model, ModelData};
use super::texture::load_texture_or_placeholder;
use super::AssetError;

/// Decoded layer images for one card face.
pub struct CardImages {
    pub layer1: ImageTexture,
    pub layer2: ImageTexture,
    pub layer2_stencil: ImageTexture,
    pub layer3: ImageTexture,
    pub layer3_stencil: ImageTexture,
}

impl CardImages {
    /// Loads every layer from `dir`; unreadable files become placeholders.
    pub fn load(dir: &Path, names: &CardTextureNames) -> Self {
        let [l1, l2, l2b, l3, l3b] =
            names.in_order().map(|name| ImageTexture::new(load_texture_or_placeholder(&dir.join(name))));
        Self {
            layer1: l1,
            layer2: l2,
            layer2_stencil: l2b,
            layer3: l3,
            layer3_stencil: l3b,
        }
    }

    /// CPU samplers for the shading kernel.
    pub fn samplers(&self) -> CardTextures<'_> {
        CardTextures {
            layer1: &self.layer1,
            layer2: &self.layer2,
            layer2_stencil: &self.layer2_stencil,
            layer3: &self.layer3,
            layer3_stencil: &self.layer3_stencil,
        }
    }

    /// Raw images in GPU binding order.
    pub fn images(&self) -> [&RgbaImage; 5] {
        [
            self.layer1.image(),
            self.layer2.image(),
            self.layer2_stencil.image(),
            self.layer3.image(),
            self.layer3_stencil.image(),
        ]
    }
}

/// Every file the scene reads, decoded.
pub struct SceneAssets {
    pub front: CardImages,
    pub back: CardImages,
    /// `None` when no model is configured or the file does not exist.
    pub model: Option<ModelData>,
}

impl SceneAssets {
    /// Loads textures (with placeholders) and the model.
    ///
    /// A missing model file is logged and skipped; a model that exists but
    /// fails to import is an error.
    pub fn load(config: &SceneConfig) -> Result<Self, AssetError> {
        let front = CardImages::load(&config.asset_dir, &config.front_textures);
        let back = CardImages::load(&config.asset_dir, &config.back_textures);

        let model = match config.model_path() {
            None => None,
            Some(path) => match load_model(&path) {
                Ok(model) => Some(model),
                Err(e) if e.is_not_found() => {
                    log::warn!("{e:#}; king pass disabled");
                    None
                }
                Err(e) => return Err(e),
            },
        };

        Ok(Self { front, back, model })
    }

    pub fn card(&self, face: CardFace) -> &CardImages {
        match face {
            CardFace::Front => &self.front,
            CardFace::Back => &self.back,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn empty_asset_dir_loads_placeholders_without_model() {
        let config = SceneConfig {
            asset_dir: PathBuf::from("definitely/not/a/dir"),
            ..Default::default()
        };
        let assets = SceneAssets::load(&config).unwrap();
        assert!(assets.model.is_none());
        for img in assets.card(CardFace::Back).images() {
            assert_eq!(img.dimensions(), (1, 1));
        }
    }

    #[test]
    fn no_model_configured() {
        let config = SceneConfig {
            asset_dir: PathBuf::from("definitely/not/a/dir"),
            model_file: None,
            ..Default::default()
        };
        assert!(SceneAssets::load(&config).unwrap().model.is_none());
    }
}
