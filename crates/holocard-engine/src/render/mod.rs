//! GPU rendering subsystem.
//!
//! Each renderer owns its GPU resources (pipelines, buffers, bind groups) and
//! records one render pass that loads the attachments left by earlier passes.
//! Pipelines are cached per surface format, depth format and stencil state.
//!
//! Convention:
//! - World space is right-handed, +Y up; card faces lie in the XY plane.
//! - Mesh UV `(0, 0)` is the bottom-left corner; textures are uploaded flipped to match.

mod card;
mod common;
mod composite;
mod ctx;
mod diamond;
mod mesh;
mod model;
mod stencil;
mod texture;

pub use card::{CardFaceDesc, CardRenderer};
pub use common::{CameraView, MeshVertex};
pub use composite::{SceneRenderer, KING_STENCIL_REF};
pub use ctx::{RenderCtx, RenderTarget};
pub use diamond::{DiamondFrameRenderer, DIAMOND_COLOR, DIAMOND_OUTLINE};
pub use mesh::{GeometryError, GpuMesh, MeshData};
pub use model::ModelRenderer;
pub use stencil::{StencilScope, StencilStack, StencilState};
pub use texture::GpuTexture;
