use std::path::Path;

use image::{Rgba, RgbaImage};

use super::AssetError;

/// 1×1 fully transparent image. Subtracting or adding it is a no-op.
pub fn placeholder_image() -> RgbaImage {
    RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 0]))
}

/// Decodes an image file to RGBA8, flipped so row 0 is the bottom (`v = 0`).
pub fn load_texture(path: &Path) -> Result<RgbaImage, AssetError> {
    let bytes = std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode_texture(&bytes).map_err(|source| AssetError::Image {
        path: path.to_path_buf(),
        source,
    })
}

pub(crate) fn decode_texture(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    let mut img = image::load_from_memory(bytes)?.to_rgba8();
    image::imageops::flip_vertical_in_place(&mut img);
    Ok(img)
}

/// Like [`load_texture`], but substitutes [`placeholder_image`] on failure.
pub fn load_texture_or_placeholder(path: &Path) -> RgbaImage {
    match load_texture(path) {
        Ok(img) => {
            log::debug!("texture {} ({}x{})", path.display(), img.width(), img.height());
            img
        }
        Err(e) => {
            log::warn!("{e:#}; using transparent placeholder");
            placeholder_image()
        }
    }
}
