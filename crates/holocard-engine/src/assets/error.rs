use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a texture or model from disk.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to import glTF {path}")]
    Gltf {
        path: PathBuf,
        #[source]
        source: gltf::Error,
    },

    #[error("model {path} has no triangle geometry")]
    EmptyModel { path: PathBuf },
}

impl AssetError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            AssetError::Io { path, .. }
            | AssetError::Image { path, .. }
            | AssetError::Gltf { path, .. }
            | AssetError::EmptyModel { path } => path,
        }
    }

    /// True when the file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            AssetError::Io { source, .. } => source.kind() == std::io::ErrorKind::NotFound,
            AssetError::Gltf { source: gltf::Error::Io(e), .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}
