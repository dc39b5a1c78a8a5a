//! Holocard engine crate.
//!
//! Platform runtime, GPU device and the holographic card scene:
//! - `shading`: CPU reference of the card material (pure functions)
//! - `render`: wgpu renderers for the card faces, the diamond frame and the king
//! - `scene` / `assets`: camera, light, placement and file loading

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod shading;
pub mod render;
pub mod scene;
pub mod assets;
