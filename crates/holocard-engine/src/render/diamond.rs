use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};

use crate::coords::ColorRgba;

use super::common::{
    alpha_blend, create_mesh_pipeline, create_uniform_buffer, uniform_entry, CameraUniform,
    CameraView, MeshPipelineDesc, PipelineKey,
};
use super::mesh::{GeometryError, GpuMesh, MeshData};
use super::stencil::StencilState;
use super::{RenderCtx, RenderTarget};

/// Diamond window through which the king is visible, in the card plane.
pub const DIAMOND_OUTLINE: [Vec2; 4] = [
    Vec2::new(-1.25, 0.0),
    Vec2::new(0.0, 1.75),
    Vec2::new(1.25, 0.0),
    Vec2::new(0.0, -1.75),
];

pub const DIAMOND_COLOR: ColorRgba = ColorRgba::new(1.0, 0.0, 0.0, 0.7);

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct FlatUniform {
    pub world: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// Unlit translucent polygon that also marks its pixels in the stencil buffer.
///
/// Single-sided: seen from behind the card it neither draws nor marks.
pub struct DiamondFrameRenderer {
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    camera_ubo: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    mesh: GpuMesh,
}

impl DiamondFrameRenderer {
    pub fn new(
        ctx: &RenderCtx<'_>,
        outline: &[Vec2],
        world: Mat4,
        color: ColorRgba,
    ) -> Result<Self, GeometryError> {
        let mesh = MeshData::convex_polygon(outline)?;
        let mesh = GpuMesh::upload(ctx.device, "holocard diamond mesh", &mesh);

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("holocard flat shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/flat.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("holocard flat bgl"),
            entries: &[
                uniform_entry::<CameraUniform>(0, wgpu::ShaderStages::VERTEX),
                uniform_entry::<FlatUniform>(1, wgpu::ShaderStages::VERTEX_FRAGMENT),
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("holocard flat pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let camera_ubo = create_uniform_buffer(
            ctx.device,
            "holocard diamond camera ubo",
            &CameraUniform::new(Mat4::IDENTITY, Vec3::ZERO),
        );
        let flat_ubo = create_uniform_buffer(
            ctx.device,
            "holocard diamond ubo",
            &FlatUniform {
                world: world.to_cols_array_2d(),
                color: color.to_array(),
            },
        );

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("holocard diamond bind group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: camera_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: flat_ubo.as_entire_binding() },
            ],
        });

        Ok(Self {
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            camera_ubo,
            bind_group,
            mesh,
        })
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraView,
        stencil: StencilState,
    ) {
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
                    label: "holocard diamond pipeline",
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

        let mut rpass = target.begin_load_pass("holocard diamond pass");
        rpass.set_pipeline(pipeline);
        rpass.set_stencil_reference(stencil.reference);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        self.mesh.draw(&mut rpass);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_triangulates() {
        let m = MeshData::convex_polygon(&DIAMOND_OUTLINE).unwrap();
        assert_eq!(m.triangle_count(), 2);
    }

    #[test]
    fn diamond_fits_inside_the_card() {
        let half = crate::shading::CARD_SIZE * 0.5;
        for p in DIAMOND_OUTLINE {
            assert!(p.x.abs() < half.x && p.y.abs() < half.y);
        }
    }

    #[test]
    fn flat_uniform_is_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<FlatUniform>(), 80);
    }
}
