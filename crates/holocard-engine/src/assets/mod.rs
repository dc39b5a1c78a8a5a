//! Asset loading: card layer images and the glTF model.
//!
//! Textures are decoded with `image` and flipped so `v` grows upwards. Missing
//! files degrade to placeholders and log a warning instead of failing.

mod card;
mod error;
mod model;
mod texture;

pub use card::{CardImages, SceneAssets};
pub use error::AssetError;
pub use model::{load_model, ModelData, ModelPrimitive};
pub use texture::{load_texture, load_texture_or_placeholder, placeholder_image};
