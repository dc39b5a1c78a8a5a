/// A single acquired frame.
///
/// Short-lived: holding the surface texture blocks acquisition of the next one.
/// The depth/stencil attachment is owned by [`Gpu`](super::Gpu) and borrowed per frame.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,
    pub view: wgpu::TextureView,
    pub encoder: wgpu::CommandEncoder,
}
