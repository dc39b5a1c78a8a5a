use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec3;

use holocard_engine::assets::CardImages;
use holocard_engine::scene::SceneConfig;
use holocard_engine::shading::{rasterize_face, CardFace, CardShading, CARD_SIZE};

/// Renders `face` with the CPU kernel, seen head-on from the default camera
/// distance in front of that face, and writes a PNG.
pub fn run(config: &SceneConfig, face: CardFace, out: &Path, width: u32) -> Result<()> {
    anyhow::ensure!(width > 0, "width must be positive");
    let height = ((width as f32) * CARD_SIZE.y / CARD_SIZE.x).round().max(1.0) as u32;

    let images = CardImages::load(&config.asset_dir, config.textures(face));
    let shading = CardShading::for_face(face);
    let layers = shading.layer_stack(&images.samplers());
    let world = config.card_world(face);
    let camera = world.transform_point3(Vec3::new(0.0, 0.0, config.camera.radius));

    log::info!("rasterizing {} face at {width}x{height}", face.label());
    let img = rasterize_face(&shading, &layers, width, height, world, camera);

    img.save(out)
        .with_context(|| format!("failed to write {}", out.display()))?;
    log::info!("wrote {}", out.display());
    Ok(())
}
