//! Holographic card shading kernel.
//!
//! CPU reference of the card material. The WGSL shader in
//! `render/shaders/card.wgsl` evaluates the same formulas per fragment; keep the
//! two in step.
//!
//! Everything here is a pure function of its inputs:
//! - `voronoi`: cell noise used for the holographic overlay
//! - `frame`: rounded-rectangle border ring and silhouette
//! - `parallax`: view-dependent UV offsets
//! - `layers`: stencil-subtracted parallax layer compositing
//! - `card`: the per-pixel pipeline combining the above

mod card;
mod frame;
mod glsl;
mod layers;
mod params;
mod parallax;
mod raster;
mod voronoi;

pub use card::{shade, voronoi_effect, CardTextures, Fragment};
pub use frame::{frame, frame_mask, inside_frame, outside_frame, FrameMask, FrameParameters};
pub use layers::{ImageTexture, Layer, LayerStack, SolidTexture, TextureSampler};
pub use params::{CardFace, CardShading, VoronoiChannel};
pub use parallax::{parallax_uv, ViewDirection};
pub use raster::{card_local_position, rasterize_face, CARD_SIZE};
pub use voronoi::{voronoi, voronoi_random, VoronoiSample};
