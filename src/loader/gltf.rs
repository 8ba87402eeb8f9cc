//! glTF import. The node tree is kept intact; meshes with several
//! primitives are merged into a single geometry per node.

use std::path::Path;

use glam::{Quat, Vec3};

use crate::geometry::Geometry;
use crate::loader::{LoadError, ModelGraph, ModelNode};

pub fn load(path: &Path) -> Result<ModelGraph, LoadError> {
    let (document, buffers, _images) = gltf::import(path).map_err(|error| LoadError::Gltf {
        path: path.to_path_buf(),
        message: error.to_string(),
    })?;

    let mut roots = Vec::new();
    for scene in document.scenes() {
        for node in scene.nodes() {
            roots.push(convert_node(path, &node, &buffers)?);
        }
    }

    Ok(ModelGraph { roots })
}

fn convert_node(
    path: &Path,
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
) -> Result<ModelNode, LoadError> {
    let (translation, rotation, scale) = node.transform().decomposed();

    let geometry = match node.mesh() {
        Some(mesh) => {
            let geometry = mesh_geometry(path, &mesh, buffers)?;
            // A mesh with no primitives carries nothing drawable.
            (geometry.vertex_count() > 0).then_some(geometry)
        }
        None => None,
    };

    let mut children = Vec::new();
    for child in node.children() {
        children.push(convert_node(path, &child, buffers)?);
    }

    Ok(ModelNode {
        name: node.name().unwrap_or("Unnamed").to_string(),
        translation: Vec3::from(translation),
        rotation: Quat::from_array(rotation),
        scale: Vec3::from(scale),
        geometry,
        children,
    })
}

/// Merges all primitives of a mesh, rebasing each primitive's indices
/// past the vertices of the ones before it.
fn mesh_geometry(
    path: &Path,
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
) -> Result<Geometry, LoadError> {
    let mut geometry = Geometry::default();
    let mut indices: Vec<u32> = Vec::new();

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            return Err(gltf_error(
                path,
                format!("unsupported primitive mode {:?}", primitive.mode()),
            ));
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .ok_or_else(|| gltf_error(path, "primitive has no positions"))?
            .map(Vec3::from)
            .collect();

        let mut normals: Vec<Vec3> = match reader.read_normals() {
            Some(normals) => normals.map(Vec3::from).collect(),
            None => Vec::new(),
        };
        normals.resize(positions.len(), Vec3::ZERO);

        let base = geometry.positions.len() as u32;
        match reader.read_indices() {
            Some(read) => indices.extend(read.into_u32().map(|index| base + index)),
            // Unindexed primitives draw their vertices in order.
            None => indices.extend(base..base + positions.len() as u32),
        }

        geometry.positions.extend(positions);
        geometry.normals.extend(normals);
    }

    geometry.indices = Some(indices);
    Ok(geometry)
}

fn gltf_error(path: &Path, message: impl Into<String>) -> LoadError {
    LoadError::Gltf {
        path: path.to_path_buf(),
        message: message.into(),
    }
}
