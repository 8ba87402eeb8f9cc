//! STL import, binary and ASCII. Both variants produce an unindexed
//! triangle soup with the facet normal copied to each corner.

use std::fs;
use std::path::Path;

use glam::Vec3;
use nom::{
    bytes::complete::tag,
    character::complete::{multispace0, multispace1, not_line_ending},
    multi::many0,
    number::complete::float,
    sequence::preceded,
    IResult,
};

use crate::geometry::Geometry;
use crate::loader::{LoadError, ModelGraph, ModelNode};

const BINARY_HEADER_LEN: usize = 80;
const BINARY_FACET_LEN: usize = 50;

struct Facet {
    normal: Vec3,
    vertices: [Vec3; 3],
}

pub fn load(path: &Path) -> Result<ModelGraph, LoadError> {
    let data = fs::read(path)?;
    parse(path, &data)
}

/// Format sniffing: content starting with "solid" is tried as ASCII
/// first, with a binary fallback since binary headers may start with
/// the same bytes.
pub fn parse(path: &Path, data: &[u8]) -> Result<ModelGraph, LoadError> {
    if data.starts_with(b"solid") {
        if let Ok(text) = std::str::from_utf8(data) {
            if let Ok(graph) = parse_ascii(path, text) {
                return Ok(graph);
            }
        }
    }

    parse_binary(path, data)
}

pub fn parse_binary(path: &Path, data: &[u8]) -> Result<ModelGraph, LoadError> {
    if data.len() < BINARY_HEADER_LEN + 4 {
        return Err(stl_error(path, "too small for a binary header"));
    }

    let body = &data[BINARY_HEADER_LEN..];
    let facet_count = u32::from_le_bytes([body[0], body[1], body[2], body[3]]) as usize;
    let records = &body[4..];

    if records.len() < facet_count * BINARY_FACET_LEN {
        return Err(stl_error(
            path,
            format!("header promises {facet_count} facets but the file is truncated"),
        ));
    }

    let facets = records
        .chunks_exact(BINARY_FACET_LEN)
        .take(facet_count)
        .map(|record| Facet {
            normal: read_vec3(record, 0),
            vertices: [
                read_vec3(record, 12),
                read_vec3(record, 24),
                read_vec3(record, 36),
            ],
            // The attribute byte count at 48..50 is ignored.
        })
        .collect();

    Ok(graph_from_facets(file_stem(path), facets))
}

pub fn parse_ascii(path: &Path, input: &str) -> Result<ModelGraph, LoadError> {
    match ascii_solid(input) {
        Ok((_, (name, facets))) => {
            let name = name.unwrap_or_else(|| file_stem(path));
            Ok(graph_from_facets(name, facets))
        }
        Err(error) => Err(stl_error(path, error.to_string())),
    }
}

fn graph_from_facets(name: String, facets: Vec<Facet>) -> ModelGraph {
    if facets.is_empty() {
        return ModelGraph::default();
    }

    let mut geometry = Geometry::default();
    for facet in facets {
        geometry.positions.extend(facet.vertices);
        geometry.normals.extend([facet.normal; 3]);
    }

    ModelGraph::single(ModelNode::with_geometry(name, geometry))
}

fn read_vec3(record: &[u8], offset: usize) -> Vec3 {
    let at = |i: usize| {
        f32::from_le_bytes([record[i], record[i + 1], record[i + 2], record[i + 3]])
    };
    Vec3::new(at(offset), at(offset + 4), at(offset + 8))
}

fn ascii_solid(input: &str) -> IResult<&str, (Option<String>, Vec<Facet>)> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, name) = solid_name(input)?;
    let (input, facets) = many0(facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = not_line_ending(input)?;

    Ok((input, (name, facets)))
}

/// The rest of the "solid" line is an optional name; it has to be
/// consumed or the first facet line would not parse.
fn solid_name(input: &str) -> IResult<&str, Option<String>> {
    let (input, raw) = not_line_ending(input)?;
    let name = raw.trim();

    Ok((input, (!name.is_empty()).then(|| name.to_string())))
}

fn facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, normal) = vec3(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = vertex(input)?;
    let (input, b) = vertex(input)?;
    let (input, c) = vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;

    Ok((
        input,
        Facet {
            normal,
            vertices: [a, b, c],
        },
    ))
}

fn vertex(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = preceded(multispace0, tag("vertex"))(input)?;
    vec3(input)
}

fn vec3(input: &str) -> IResult<&str, Vec3> {
    let (input, _) = multispace0(input)?;
    let (input, x) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, y) = float(input)?;
    let (input, _) = multispace1(input)?;
    let (input, z) = float(input)?;

    Ok((input, Vec3::new(x, y, z)))
}

fn stl_error(path: &Path, message: impl Into<String>) -> LoadError {
    LoadError::StlParse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string())
}
