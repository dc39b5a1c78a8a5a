use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use image::RgbaImage;

use crate::shading::{CardFace, CardShading, VoronoiChannel, CARD_SIZE};

use super::common::{
    alpha_blend, create_mesh_pipeline, create_uniform_buffer, sampler_entry, texture_entry,
    uniform_entry, CameraUniform, CameraView, MeshPipelineDesc, PipelineKey,
};
use super::mesh::{GpuMesh, MeshData};
use super::stencil::StencilState;
use super::texture::{create_repeat_sampler, GpuTexture};
use super::{RenderCtx, RenderTarget};

/// Per-face material constants, laid out for `shaders/card.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct CardUniform {
    pub world: [[f32; 4]; 4],
    pub base_color: [f32; 4],
    pub voronoi_color1: [f32; 4],
    pub voronoi_color2: [f32; 4],
    pub voronoi1_offset: [f32; 4],
    pub voronoi1_density: [f32; 4],
    pub voronoi2_offset: [f32; 4],
    pub voronoi2_density: [f32; 4],
    /// near.xy, far.xy
    pub parallax: [f32; 4],
    /// holographic factor, corner radius, border thickness, unused
    pub params: [f32; 4],
}

fn rgb(v: Vec3) -> [f32; 4] {
    v.extend(0.0).to_array()
}

fn offsets(channels: &[VoronoiChannel; 3]) -> [f32; 4] {
    [channels[0].offset, channels[1].offset, channels[2].offset, 0.0]
}

fn densities(channels: &[VoronoiChannel; 3]) -> [f32; 4] {
    [channels[0].density, channels[1].density, channels[2].density, 0.0]
}

impl CardUniform {
    pub fn new(shading: &CardShading, world: Mat4) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            base_color: rgb(shading.base_color),
            voronoi_color1: rgb(shading.voronoi_color1),
            voronoi_color2: rgb(shading.voronoi_color2),
            voronoi1_offset: offsets(&shading.voronoi1),
            voronoi1_density: densities(&shading.voronoi1),
            voronoi2_offset: offsets(&shading.voronoi2),
            voronoi2_density: densities(&shading.voronoi2),
            parallax: [
                shading.parallax_near.x,
                shading.parallax_near.y,
                shading.parallax_far.x,
                shading.parallax_far.y,
            ],
            params: [
                shading.holographic_factor,
                shading.frame.corner_radius,
                shading.frame.thickness_border,
                0.0,
            ],
        }
    }
}

/// Everything needed to put one card face on screen.
pub struct CardFaceDesc<'a> {
    pub face: CardFace,
    pub shading: CardShading,
    pub world: Mat4,
    /// layer1, layer2, layer2 stencil, layer3, layer3 stencil
    pub images: [&'a RgbaImage; 5],
}

struct FaceResources {
    _uniform: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    _textures: Vec<GpuTexture>,
}

/// Draws the holographic card faces.
///
/// Faces alpha-blend over the scene and cut out their rounded silhouette in the
/// fragment shader. They test depth but never write it, so geometry drawn later
/// shows through the cutouts.
pub struct CardRenderer {
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    camera_ubo: wgpu::Buffer,
    mesh: GpuMesh,
    faces: Vec<FaceResources>,
}

impl CardRenderer {
    pub fn new(ctx: &RenderCtx<'_>, faces: &[CardFaceDesc<'_>]) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("holocard card shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/card.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("holocard card bgl"),
            entries: &[
                uniform_entry::<CameraUniform>(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform_entry::<CardUniform>(1, wgpu::ShaderStages::VERTEX_FRAGMENT),
                texture_entry(2),
                texture_entry(3),
                texture_entry(4),
                texture_entry(5),
                texture_entry(6),
                sampler_entry(7),
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("holocard card pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let camera_ubo = create_uniform_buffer(
            ctx.device,
            "holocard card camera ubo",
            &CameraUniform::new(Mat4::IDENTITY, Vec3::ZERO),
        );
        let sampler = create_repeat_sampler(ctx.device);
        let mesh = GpuMesh::upload(ctx.device, "holocard card plane", &MeshData::plane(CARD_SIZE));

        let faces = faces
            .iter()
            .map(|desc| {
                let label = format!("holocard card {}", desc.face.label());
                let uniform = create_uniform_buffer(
                    ctx.device,
                    &label,
                    &CardUniform::new(&desc.shading, desc.world),
                );
                let textures: Vec<GpuTexture> = desc
                    .images
                    .iter()
                    .map(|img| GpuTexture::from_image(ctx.device, ctx.queue, &label, img))
                    .collect();

                let mut entries = vec![
                    wgpu::BindGroupEntry { binding: 0, resource: camera_ubo.as_entire_binding() },
                    wgpu::BindGroupEntry { binding: 1, resource: uniform.as_entire_binding() },
                ];
                entries.extend(textures.iter().enumerate().map(|(i, t)| wgpu::BindGroupEntry {
                    binding: 2 + i as u32,
                    resource: wgpu::BindingResource::TextureView(&t.view),
                }));
                entries.push(wgpu::BindGroupEntry {
                    binding: 7,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                });

                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&label),
                    layout: &bind_group_layout,
                    entries: &entries,
                });

                log::debug!("card face `{}` uploaded", desc.face.label());

                FaceResources {
                    _uniform: uniform,
                    bind_group,
                    _textures: textures,
                }
            })
            .collect();

        Self {
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            camera_ubo,
            mesh,
            faces,
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraView,
        stencil: StencilState,
    ) {
        if self.faces.is_empty() {
            return;
        }

        ctx.queue.write_buffer(
            &self.camera_ubo,
            0,
            bytemuck::bytes_of(&CameraUniform::new(camera.view_proj, camera.position)),
        );

        let key = PipelineKey::new(ctx.surface_format, ctx.depth_stencil_format, stencil);
        let pipeline = self.pipelines.entry(key).or_insert_with(|| {
            create_mesh_pipeline(
                ctx.device,
                &MeshPipelineDesc {
                    label: "holocard card pipeline",
                    shader: &self.shader,
                    layout: &self.pipeline_layout,
                    key,
                    cull_mode: Some(wgpu::Face::Back),
                    blend: Some(alpha_blend()),
                    depth_write_enabled: false,
                    depth_compare: wgpu::CompareFunction::Less,
                },
            )
        });

        let mut rpass = target.begin_load_pass("holocard card pass");
        rpass.set_pipeline(pipeline);
        rpass.set_stencil_reference(stencil.reference);
        for face in &self.faces {
            rpass.set_bind_group(0, &face.bind_group, &[]);
            self.mesh.draw(&mut rpass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<CardUniform>(), 64 + 9 * 16);
        assert_eq!(std::mem::size_of::<CardUniform>() % 16, 0);
    }

    #[test]
    fn uniform_packs_face_constants() {
        let u = CardUniform::new(&CardShading::back(), Mat4::IDENTITY);
        assert_eq!(u.voronoi1_offset, [2.6, 6.4, 4.0, 0.0]);
        assert_eq!(u.voronoi2_density, [13.2, 16.4, 15.8, 0.0]);
        assert_eq!(u.parallax, [0.2, 0.0, 0.45, 0.0]);
        assert_eq!(u.params, [0.5, 0.05, 0.005, 0.0]);
    }
}
