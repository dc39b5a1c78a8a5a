use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::assets::ModelData;
use crate::scene::HemisphericLight;

use super::common::{
    create_mesh_pipeline, create_uniform_buffer, uniform_entry, CameraUniform, CameraView,
    MeshPipelineDesc, PipelineKey,
};
use super::mesh::GpuMesh;
use super::stencil::StencilState;
use super::{RenderCtx, RenderTarget};

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ModelUniform {
    pub world: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
    pub base_color: [f32; 4],
}

impl ModelUniform {
    pub fn new(world: Mat4, base_color: [f32; 4]) -> Self {
        Self {
            world: world.to_cols_array_2d(),
            normal_matrix: world.inverse().transpose().to_cols_array_2d(),
            base_color,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct LightUniform {
    pub direction: [f32; 4],
    pub diffuse: [f32; 4],
    pub specular: [f32; 4],
    /// rgb ground color, a intensity
    pub ground: [f32; 4],
}

impl From<&HemisphericLight> for LightUniform {
    fn from(light: &HemisphericLight) -> Self {
        Self {
            direction: light.direction.extend(0.0).to_array(),
            diffuse: light.diffuse.extend(1.0).to_array(),
            specular: light.specular.extend(1.0).to_array(),
            ground: light.ground.extend(light.intensity).to_array(),
        }
    }
}

struct Primitive {
    mesh: GpuMesh,
    bind_group: wgpu::BindGroup,
}

/// Opaque lit model, drawn with depth test and write.
pub struct ModelRenderer {
    shader: wgpu::ShaderModule,
    pipeline_layout: wgpu::PipelineLayout,
    pipelines: HashMap<PipelineKey, wgpu::RenderPipeline>,

    camera_ubo: wgpu::Buffer,
    primitives: Vec<Primitive>,
}

impl ModelRenderer {
    pub fn new(ctx: &RenderCtx<'_>, model: &ModelData, world: Mat4, light: &HemisphericLight) -> Self {
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("holocard model shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/model.wgsl").into()),
        });

        let bind_group_layout = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("holocard model bgl"),
            entries: &[
                uniform_entry::<CameraUniform>(0, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform_entry::<ModelUniform>(1, wgpu::ShaderStages::VERTEX_FRAGMENT),
                uniform_entry::<LightUniform>(2, wgpu::ShaderStages::FRAGMENT),
            ],
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("holocard model pipeline layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let camera_ubo = create_uniform_buffer(
            ctx.device,
            "holocard model camera ubo",
            &CameraUniform::new(Mat4::IDENTITY, Vec3::ZERO),
        );
        let light_ubo = create_uniform_buffer(ctx.device, "holocard light ubo", &LightUniform::from(light));

        let primitives = model
            .primitives
            .iter()
            .enumerate()
            .map(|(i, prim)| {
                let label = format!("holocard model primitive {i}");
                let mesh = GpuMesh::upload(ctx.device, &label, &prim.mesh);
                let ubo = create_uniform_buffer(ctx.device, &label, &ModelUniform::new(world, prim.base_color));

                let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
                    label: Some(&label),
                    layout: &bind_group_layout,
                    entries: &[
                        wgpu::BindGroupEntry { binding: 0, resource: camera_ubo.as_entire_binding() },
                        wgpu::BindGroupEntry { binding: 1, resource: ubo.as_entire_binding() },
                        wgpu::BindGroupEntry { binding: 2, resource: light_ubo.as_entire_binding() },
                    ],
                });

                Primitive { mesh, bind_group }
            })
            .collect::<Vec<_>>();

        log::debug!("model uploaded: {} primitives", primitives.len());

        Self {
            shader,
            pipeline_layout,
            pipelines: HashMap::new(),
            camera_ubo,
            primitives,
        }
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &CameraView,
        stencil: StencilState,
    ) {
        if self.primitives.is_empty() {
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
                    label: "holocard model pipeline",
                    shader: &self.shader,
                    layout: &self.pipeline_layout,
                    key,
                    cull_mode: Some(wgpu::Face::Back),
                    blend: None,
                    depth_write_enabled: true,
                    depth_compare: wgpu::CompareFunction::Less,
                },
            )
        });

        let mut rpass = target.begin_load_pass("holocard model pass");
        rpass.set_pipeline(pipeline);
        rpass.set_stencil_reference(stencil.reference);
        for prim in &self.primitives {
            rpass.set_bind_group(0, &prim.bind_group, &[]);
            prim.mesh.draw(&mut rpass);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniforms_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<ModelUniform>(), 144);
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
    }

    #[test]
    fn light_packs_intensity_with_ground() {
        let u = LightUniform::from(&HemisphericLight::default());
        assert_eq!(u.ground, [0.29, 0.0, 0.55, 2.0]);
        assert_eq!(u.direction, [2.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn normal_matrix_of_uniform_scale_is_inverse_scale() {
        let u = ModelUniform::new(Mat4::from_scale(Vec3::splat(0.5)), [1.0; 4]);
        assert!((u.normal_matrix[0][0] - 2.0).abs() < 1e-6);
        assert_eq!(u.normal_matrix[3][3], 1.0);
    }
}
