//! CPU mesh building and GPU upload.

use glam::{Mat3, Mat4, Vec2, Vec3};
use thiserror::Error;
use wgpu::util::DeviceExt;

use super::common::MeshVertex;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("polygon needs at least 3 points, got {0}")]
    TooFewPoints(usize),
    #[error("polygon is not convex at point {index}")]
    NotConvex { index: usize },
    #[error("polygon has zero area")]
    Degenerate,
}

/// Indexed triangle list in CPU memory. Triangles wind counter-clockwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Plane of `size` centred on the origin in the XY plane, facing +Z.
    ///
    /// UV `(0, 0)` is the bottom-left corner.
    pub fn plane(size: Vec2) -> Self {
        let h = size * 0.5;
        let corners = [
            (Vec2::new(-h.x, -h.y), [0.0, 0.0]),
            (Vec2::new(h.x, -h.y), [1.0, 0.0]),
            (Vec2::new(h.x, h.y), [1.0, 1.0]),
            (Vec2::new(-h.x, h.y), [0.0, 1.0]),
        ];

        Self {
            vertices: corners
                .iter()
                .map(|&(p, uv)| MeshVertex::new(p.extend(0.0), Vec3::Z, uv))
                .collect(),
            indices: vec![0, 1, 2, 0, 2, 3],
        }
    }

    /// Fan-triangulates a convex outline in the XY plane, facing +Z.
    ///
    /// Either winding is accepted. Collinear points are kept.
    pub fn convex_polygon(outline: &[Vec2]) -> Result<Self, GeometryError> {
        let n = outline.len();
        if n < 3 {
            return Err(GeometryError::TooFewPoints(n));
        }

        let area2: f32 = (0..n)
            .map(|i| outline[i].perp_dot(outline[(i + 1) % n]))
            .sum();
        if area2.abs() <= f32::EPSILON {
            return Err(GeometryError::Degenerate);
        }

        let sign = area2.signum();
        for i in 0..n {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            let c = outline[(i + 2) % n];
            if (b - a).perp_dot(c - b) * sign < 0.0 {
                return Err(GeometryError::NotConvex { index: (i + 1) % n });
            }
        }

        let mut points: Vec<Vec2> = outline.to_vec();
        if sign < 0.0 {
            points.reverse();
        }

        let min = points.iter().copied().fold(Vec2::splat(f32::INFINITY), Vec2::min);
        let max = points.iter().copied().fold(Vec2::splat(f32::NEG_INFINITY), Vec2::max);
        let extent = (max - min).max(Vec2::splat(f32::EPSILON));

        let vertices = points
            .iter()
            .map(|&p| {
                let uv = (p - min) / extent;
                MeshVertex::new(p.extend(0.0), Vec3::Z, uv.to_array())
            })
            .collect();

        let indices = (1..n as u32 - 1).flat_map(|i| [0, i, i + 1]).collect();

        Ok(Self { vertices, indices })
    }

    /// Applies `m` to positions and its normal matrix to normals.
    pub fn transform(&mut self, m: Mat4) {
        let normal_matrix = Mat3::from_mat4(m).inverse().transpose();
        for v in &mut self.vertices {
            v.position = m.transform_point3(Vec3::from(v.position)).to_array();
            v.normal = (normal_matrix * Vec3::from(v.normal)).normalize_or_zero().to_array();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Vertex and index buffers for one [`MeshData`].
pub struct GpuMesh {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
        }
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diamond() -> Vec<Vec2> {
        vec![
            Vec2::new(-1.25, 0.0),
            Vec2::new(0.0, 1.75),
            Vec2::new(1.25, 0.0),
            Vec2::new(0.0, -1.75),
        ]
    }

    fn signed_area(mesh: &MeshData) -> f32 {
        mesh.indices
            .chunks(3)
            .map(|t| {
                let p = |i: u32| Vec3::from(mesh.vertices[i as usize].position).truncate();
                let (a, b, c) = (p(t[0]), p(t[1]), p(t[2]));
                (b - a).perp_dot(c - a) * 0.5
            })
            .sum()
    }

    #[test]
    fn plane_is_two_ccw_triangles() {
        let m = MeshData::plane(Vec2::new(3.5, 5.0));
        assert_eq!(m.triangle_count(), 2);
        assert!((signed_area(&m) - 17.5).abs() < 1e-5);
    }

    #[test]
    fn clockwise_diamond_is_rewound() {
        let m = MeshData::convex_polygon(&diamond()).unwrap();
        assert_eq!(m.vertices.len(), 4);
        assert_eq!(m.triangle_count(), 2);
        // Rhombus area: d1 * d2 / 2.
        assert!((signed_area(&m) - 2.5 * 3.5 / 2.0).abs() < 1e-5);
    }

    #[test]
    fn polygon_uvs_span_the_bounds() {
        let m = MeshData::convex_polygon(&diamond()).unwrap();
        let left = m.vertices.iter().find(|v| v.position[0] == -1.25).unwrap();
        assert_eq!(left.uv, [0.0, 0.5]);
    }

    #[test]
    fn concave_outline_is_rejected() {
        let arrow = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(0.5, 1.0),
        ];
        assert!(matches!(
            MeshData::convex_polygon(&arrow),
            Err(GeometryError::NotConvex { .. })
        ));
    }

    #[test]
    fn degenerate_outlines_are_rejected() {
        assert_eq!(
            MeshData::convex_polygon(&[Vec2::ZERO, Vec2::X]),
            Err(GeometryError::TooFewPoints(2))
        );
        assert_eq!(
            MeshData::convex_polygon(&[Vec2::ZERO, Vec2::X, Vec2::X * 2.0]),
            Err(GeometryError::Degenerate)
        );
    }

    #[test]
    fn transform_moves_points_and_keeps_unit_normals() {
        let mut m = MeshData::plane(Vec2::ONE);
        m.transform(Mat4::from_scale_rotation_translation(
            Vec3::splat(0.75),
            glam::Quat::IDENTITY,
            Vec3::new(0.0, -1.55, -1.0),
        ));
        let p = Vec3::from(m.vertices[0].position);
        assert!((p - Vec3::new(-0.375, -1.925, -1.0)).length() < 1e-5);
        let n = Vec3::from(m.vertices[0].normal);
        assert!((n - Vec3::Z).length() < 1e-5);
    }
}
