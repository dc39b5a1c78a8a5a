//! Scene description: camera, light and the placement of every object.

mod camera;
mod config;
mod light;

pub use camera::OrbitCamera;
pub use config::{CardTextureNames, ModelPlacement, SceneConfig};
pub use light::HemisphericLight;
