//! Wavefront OBJ import. Supports positions (v), normals (vn), texture
//! coordinates (vt, parsed but discarded) and faces (f) with fan
//! triangulation for quads and n-gons.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use glam::Vec3;

use crate::geometry::Geometry;
use crate::loader::{LoadError, ModelGraph, ModelNode};

pub fn load(path: &Path) -> Result<ModelGraph, LoadError> {
    let contents = fs::read_to_string(path)?;
    parse(path, &contents)
}

/// Parses OBJ contents into a single-root graph. Files with no faces
/// produce a graph without geometry.
pub fn parse(path: &Path, contents: &str) -> Result<ModelGraph, LoadError> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut normals: Vec<Vec3> = Vec::new();
    let mut tex_coord_count = 0usize;

    let mut mesh = MeshAccumulator::default();
    let mut object_name: Option<String> = None;

    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        match tag {
            "v" => positions.push(parse_vec3(path, line_number, &mut parts)?),
            "vn" => normals.push(parse_vec3(path, line_number, &mut parts)?),
            "vt" => tex_coord_count += 1,
            "f" => {
                let mut face = Vec::new();
                for spec in parts {
                    face.push(mesh.resolve_vertex(
                        path,
                        line_number,
                        spec,
                        &positions,
                        &normals,
                        tex_coord_count,
                    )?);
                }

                if face.len() < 3 {
                    return Err(parse_error(
                        path,
                        line_number,
                        "face needs at least 3 vertices",
                    ));
                }

                // Fan triangulation, keeping the file's winding.
                for i in 1..face.len() - 1 {
                    mesh.indices.extend([face[0], face[i], face[i + 1]]);
                }
            }
            "o" | "g" => {
                if object_name.is_none() {
                    let rest = line[tag.len()..].trim();
                    if !rest.is_empty() {
                        object_name = Some(rest.to_string());
                    }
                }
            }
            // mtllib, usemtl, s and friends carry no geometry.
            _ => {}
        }
    }

    if mesh.indices.is_empty() {
        return Ok(ModelGraph::default());
    }

    let name = object_name.unwrap_or_else(|| file_stem(path));
    let geometry = Geometry {
        positions: mesh.positions,
        normals: mesh.normals,
        indices: Some(mesh.indices),
        ..Default::default()
    };

    Ok(ModelGraph::single(ModelNode::with_geometry(name, geometry)))
}

/// Deduplicates face corners by (position, normal) pair so shared
/// corners reuse one vertex while split normals stay split.
#[derive(Default)]
struct MeshAccumulator {
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
    cache: HashMap<(usize, Option<usize>), u32>,
}

impl MeshAccumulator {
    fn resolve_vertex(
        &mut self,
        path: &Path,
        line_number: usize,
        spec: &str,
        positions: &[Vec3],
        normals: &[Vec3],
        tex_coord_count: usize,
    ) -> Result<u32, LoadError> {
        let mut fields = spec.split('/');

        let position_field = fields.next().unwrap_or("");
        if position_field.is_empty() {
            return Err(parse_error(
                path,
                line_number,
                format!("face vertex {spec:?} is missing a position index"),
            ));
        }
        let position = parse_index(path, line_number, position_field, positions.len())?;

        // Texture coordinates are validated but not kept.
        if let Some(field) = fields.next() {
            if !field.is_empty() {
                parse_index(path, line_number, field, tex_coord_count)?;
            }
        }

        let normal = match fields.next() {
            Some(field) if !field.is_empty() => {
                Some(parse_index(path, line_number, field, normals.len())?)
            }
            _ => None,
        };

        if let Some(&vertex) = self.cache.get(&(position, normal)) {
            return Ok(vertex);
        }

        let vertex = self.positions.len() as u32;
        self.positions.push(positions[position]);
        self.normals
            .push(normal.map_or(Vec3::ZERO, |index| normals[index]));
        self.cache.insert((position, normal), vertex);

        Ok(vertex)
    }
}

fn parse_vec3<'a>(
    path: &Path,
    line_number: usize,
    parts: &mut impl Iterator<Item = &'a str>,
) -> Result<Vec3, LoadError> {
    let mut values = [0.0f32; 3];
    for value in &mut values {
        let Some(token) = parts.next() else {
            return Err(parse_error(path, line_number, "expected 3 values"));
        };
        *value = token.parse().map_err(|_| {
            parse_error(path, line_number, format!("invalid number {token:?}"))
        })?;
    }
    Ok(Vec3::from_array(values))
}

/// OBJ indices are 1-based; negative values count back from the most
/// recently declared element.
fn parse_index(
    path: &Path,
    line_number: usize,
    token: &str,
    count: usize,
) -> Result<usize, LoadError> {
    let index: i64 = token
        .parse()
        .map_err(|_| parse_error(path, line_number, format!("invalid index {token:?}")))?;

    let resolved = match index {
        0 => return Err(parse_error(path, line_number, "index 0 is not valid")),
        i if i > 0 => (i - 1) as usize,
        i => {
            let back = (-i) as usize;
            if back > count {
                return Err(parse_error(
                    path,
                    line_number,
                    format!("index {index} reaches before the first element"),
                ));
            }
            count - back
        }
    };

    if resolved >= count {
        return Err(parse_error(
            path,
            line_number,
            format!("index {index} out of range (have {count} elements)"),
        ));
    }

    Ok(resolved)
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> LoadError {
    LoadError::ObjParse {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}
