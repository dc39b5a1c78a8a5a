//! Color and viewport types shared by the kernel and the renderers.
//!
//! Vector math uses `glam`; this module only holds the engine's own value types.

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
