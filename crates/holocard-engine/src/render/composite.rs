use crate::assets::SceneAssets;
use crate::scene::{OrbitCamera, SceneConfig};
use crate::shading::{CardFace, CardShading};

use super::card::{CardFaceDesc, CardRenderer};
use super::common::CameraView;
use super::diamond::{DiamondFrameRenderer, DIAMOND_OUTLINE};
use super::mesh::GeometryError;
use super::model::ModelRenderer;
use super::stencil::{StencilStack, StencilState};
use super::{RenderCtx, RenderTarget};

/// Stencil value the diamond frame writes and the king tests against.
pub const KING_STENCIL_REF: u32 = 2;

/// Draws the whole scene in its fixed order:
/// card faces, then the diamond frame (stencil write), then the king (stencil test).
pub struct SceneRenderer {
    cards: CardRenderer,
    diamond: DiamondFrameRenderer,
    king: Option<ModelRenderer>,
    stencil: StencilStack,
}

impl SceneRenderer {
    pub fn new(
        ctx: &RenderCtx<'_>,
        assets: &SceneAssets,
        config: &SceneConfig,
    ) -> Result<Self, GeometryError> {
        let faces: Vec<CardFaceDesc<'_>> = CardFace::ALL
            .iter()
            .map(|&face| CardFaceDesc {
                face,
                shading: CardShading::for_face(face),
                world: config.card_world(face),
                images: assets.card(face).images(),
            })
            .collect();

        let cards = CardRenderer::new(ctx, &faces);
        let diamond = DiamondFrameRenderer::new(
            ctx,
            &DIAMOND_OUTLINE,
            config.card_world(CardFace::Front),
            config.diamond_color,
        )?;
        let king = assets
            .model
            .as_ref()
            .map(|model| ModelRenderer::new(ctx, model, config.king.world(), &config.light));

        Ok(Self {
            cards,
            diamond,
            king,
            stencil: StencilStack::new(),
        })
    }

    pub fn has_king(&self) -> bool {
        self.king.is_some()
    }

    pub fn render(&mut self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, camera: &OrbitCamera) {
        let view = CameraView {
            view_proj: camera.view_projection(ctx.viewport.aspect()),
            position: camera.eye(),
        };

        self.cards.render(ctx, target, &view, self.stencil.current());

        {
            let scope = self.stencil.scope(StencilState::write_reference(KING_STENCIL_REF));
            self.diamond.render(ctx, target, &view, scope.state());
        }

        if let Some(king) = self.king.as_mut() {
            let scope = self.stencil.scope(StencilState::masked_equal(KING_STENCIL_REF));
            king.render(ctx, target, &view, scope.state());
        }

        debug_assert_eq!(self.stencil.depth(), 0);
    }
}
