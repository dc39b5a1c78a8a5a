use anyhow::Result;

use holocard_engine::assets::SceneAssets;
use holocard_engine::coords::Viewport;
use holocard_engine::core::{App, AppControl, FrameCtx};
use holocard_engine::input::Key;
use holocard_engine::render::{GeometryError, RenderCtx, SceneRenderer};
use holocard_engine::scene::{OrbitCamera, SceneConfig};

use crate::inspector::Inspector;

/// Interactive card viewer.
///
/// GPU resources are created on the first frame, once a device exists.
pub struct Viewer {
    config: SceneConfig,
    assets: SceneAssets,
    camera: OrbitCamera,
    renderer: Option<SceneRenderer>,
    inspector: Inspector,
    title_dirty: bool,
}

pub const TITLE: &str = "Holocard";

impl Viewer {
    pub fn new(config: SceneConfig) -> Result<Self> {
        let assets = SceneAssets::load(&config)?;
        match &assets.model {
            Some(model) => log::info!("model loaded ({} triangles)", model.triangle_count()),
            None => log::info!("no model; king pass disabled"),
        }

        Ok(Self {
            camera: config.camera,
            config,
            assets,
            renderer: None,
            inspector: Inspector::default(),
            title_dirty: false,
        })
    }

    fn ensure_renderer(&mut self, ctx: &FrameCtx<'_, '_>) -> Result<&mut SceneRenderer, GeometryError> {
        let renderer = match self.renderer.take() {
            Some(renderer) => renderer,
            None => {
                let size = ctx.gpu.size();
                let rctx = RenderCtx::new(
                    ctx.gpu.device(),
                    ctx.gpu.queue(),
                    ctx.gpu.surface_format(),
                    ctx.gpu.depth_stencil_format(),
                    Viewport::new(size.width as f32, size.height as f32),
                );
                let renderer = SceneRenderer::new(&rctx, &self.assets, &self.config)?;
                log::debug!("scene renderer ready (king: {})", renderer.has_king());
                renderer
            }
        };
        Ok(self.renderer.insert(renderer))
    }
}

impl App for Viewer {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.keys_pressed.contains(&Key::Escape) {
            return AppControl::Exit;
        }

        self.camera.apply_input(ctx.input, ctx.input_frame);
        let report = self
            .inspector
            .update(ctx.input, ctx.input_frame, ctx.time.now, &self.camera);
        if let Some(line) = report {
            ctx.window.set_title(&format!("{TITLE} | {line}"));
            self.title_dirty = true;
        } else if self.title_dirty && !self.inspector.is_visible() {
            ctx.window.set_title(TITLE);
            self.title_dirty = false;
        }

        let clear = self.config.clear_color;
        let camera = self.camera;
        let renderer = match self.ensure_renderer(ctx) {
            Ok(renderer) => renderer,
            Err(err) => {
                ctx.runtime
                    .fail(anyhow::Error::new(err).context("failed to build scene renderer"));
                return AppControl::Exit;
            }
        };

        ctx.render(clear, |rctx, target| renderer.render(rctx, target, &camera))
    }

    fn on_exit(&mut self) {
        log::info!("viewer closed");
    }
}
