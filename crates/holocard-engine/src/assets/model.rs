use std::path::Path;

use glam::{Mat4, Vec3};

use crate::render::{MeshData, MeshVertex};

use super::AssetError;

/// One drawable piece of a model: geometry in model space plus its material color.
#[derive(Debug, Clone)]
pub struct ModelPrimitive {
    pub mesh: MeshData,
    pub base_color: [f32; 4],
}

/// Flattened model: node transforms are baked into vertex data.
#[derive(Debug, Clone, Default)]
pub struct ModelData {
    pub primitives: Vec<ModelPrimitive>,
}

impl ModelData {
    pub fn triangle_count(&self) -> usize {
        self.primitives.iter().map(|p| p.mesh.triangle_count()).sum()
    }
}

/// Imports a glTF/GLB file and flattens its default scene.
pub fn load_model(path: &Path) -> Result<ModelData, AssetError> {
    std::fs::metadata(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (document, buffers, _images) = gltf::import(path).map_err(|source| AssetError::Gltf {
        path: path.to_path_buf(),
        source,
    })?;

    let mut model = ModelData::default();
    let scene = document.default_scene().or_else(|| document.scenes().next());
    if let Some(scene) = scene {
        for node in scene.nodes() {
            collect_node(&node, Mat4::IDENTITY, &buffers, &mut model);
        }
    }

    if model.primitives.is_empty() {
        return Err(AssetError::EmptyModel { path: path.to_path_buf() });
    }

    log::info!(
        "model {}: {} primitives, {} triangles",
        path.display(),
        model.primitives.len(),
        model.triangle_count()
    );
    Ok(model)
}

fn collect_node(
    node: &gltf::Node<'_>,
    parent: Mat4,
    buffers: &[gltf::buffer::Data],
    out: &mut ModelData,
) {
    let transform = parent * Mat4::from_cols_array_2d(&node.transform().matrix());

    if let Some(mesh) = node.mesh() {
        for primitive in mesh.primitives() {
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                log::debug!("skipping non-triangle primitive {:?} in {:?}", primitive.mode(), mesh.name());
                continue;
            }
            if let Some(mut data) = read_primitive(&primitive, buffers) {
                data.transform(transform);
                out.primitives.push(ModelPrimitive {
                    mesh: data,
                    base_color: primitive.material().pbr_metallic_roughness().base_color_factor(),
                });
            }
        }
    }

    for child in node.children() {
        collect_node(&child, transform, buffers, out);
    }
}

fn read_primitive(primitive: &gltf::Primitive<'_>, buffers: &[gltf::buffer::Data]) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));

    let positions: Vec<Vec3> = reader.read_positions()?.map(Vec3::from).collect();
    if positions.is_empty() {
        return None;
    }

    let indices: Vec<u32> = reader
        .read_indices()
        .map(|iter| iter.into_u32().collect())
        .unwrap_or_else(|| (0..positions.len() as u32).collect());

    let normals: Vec<Vec3> = match reader.read_normals() {
        Some(iter) => iter.map(Vec3::from).collect(),
        None => face_normals(&positions, &indices),
    };

    let uvs: Option<Vec<[f32; 2]>> = reader.read_tex_coords(0).map(|iter| iter.into_f32().collect());

    let vertices = positions
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let n = normals.get(i).copied().unwrap_or(Vec3::Y);
            let uv = uvs.as_ref().and_then(|u| u.get(i).copied()).unwrap_or([0.0, 0.0]);
            MeshVertex::new(p, n, uv)
        })
        .collect();

    Some(MeshData { vertices, indices })
}

/// Area-weighted vertex normals for meshes that ship without them.
fn face_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        let (Some(&pa), Some(&pb), Some(&pc)) = (positions.get(a), positions.get(b), positions.get(c)) else {
            continue;
        };
        let n = (pb - pa).cross(pc - pa);
        for i in [a, b, c] {
            normals[i] += n;
        }
    }
    normals
        .into_iter()
        .map(|n| {
            let n = n.normalize_or_zero();
            if n == Vec3::ZERO { Vec3::Y } else { n }
        })
        .collect()
}
