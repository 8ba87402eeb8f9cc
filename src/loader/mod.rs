pub mod gltf;
pub mod handoff;
pub mod obj;
pub mod stl;

pub use handoff::{ModelLoader, RequestId, ResultCell};

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use glam::{Quat, Vec3};
use thiserror::Error;

use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelFormat {
    Obj,
    Stl,
    Gltf,
}

impl ModelFormat {
    /// Short name shown in overlays and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            ModelFormat::Obj => "OBJ",
            ModelFormat::Stl => "STL",
            ModelFormat::Gltf => "GLTF",
        }
    }

    /// Bundled sample model for this format.
    pub fn default_asset_path(&self) -> &'static Path {
        Path::new(match self {
            ModelFormat::Obj => "assets/models/pyramid.obj",
            ModelFormat::Stl => "assets/models/cube.stl",
            ModelFormat::Gltf => "assets/models/triangle.gltf",
        })
    }

    pub fn from_extension(path: &Path) -> Option<ModelFormat> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "obj" => Some(ModelFormat::Obj),
            "stl" => Some(ModelFormat::Stl),
            "gltf" | "glb" => Some(ModelFormat::Gltf),
            _ => None,
        }
    }
}

impl fmt::Display for ModelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "obj" => Ok(ModelFormat::Obj),
            "stl" => Ok(ModelFormat::Stl),
            "gltf" | "glb" => Ok(ModelFormat::Gltf),
            other => Err(format!(
                "unknown model format {other:?}, expected one of: obj, stl, gltf"
            )),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load glTF from {}: {message}", .path.display())]
    Gltf { path: PathBuf, message: String },

    #[error("{}:{line}: {message}", .path.display())]
    ObjParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("invalid STL data in {}: {message}", .path.display())]
    StlParse { path: PathBuf, message: String },

    #[error("{} contains no meshes", .0.display())]
    NoMeshes(PathBuf),

    #[error("cannot tell the model format of {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("model load worker exited without a result")]
    WorkerPanicked,
}

/// One node of a parsed model, normalized across formats. OBJ and STL
/// produce a single root; glTF keeps its full node tree.
#[derive(Debug, Clone)]
pub struct ModelNode {
    pub name: String,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub geometry: Option<Geometry>,
    pub children: Vec<ModelNode>,
}

impl ModelNode {
    pub fn with_geometry(name: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            name: name.into(),
            geometry: Some(geometry),
            ..Self::default()
        }
    }
}

impl Default for ModelNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            geometry: None,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelGraph {
    pub roots: Vec<ModelNode>,
}

impl ModelGraph {
    pub fn single(node: ModelNode) -> Self {
        Self { roots: vec![node] }
    }

    pub fn has_geometry(&self) -> bool {
        fn node_has_geometry(node: &ModelNode) -> bool {
            node.geometry.is_some() || node.children.iter().any(node_has_geometry)
        }

        self.roots.iter().any(node_has_geometry)
    }

    pub fn visit_geometries<F>(&self, f: &mut F)
    where
        F: FnMut(&Geometry),
    {
        fn visit<F: FnMut(&Geometry)>(node: &ModelNode, f: &mut F) {
            if let Some(geometry) = &node.geometry {
                f(geometry);
            }
            for child in &node.children {
                visit(child, f);
            }
        }

        for root in &self.roots {
            visit(root, f);
        }
    }

    pub fn visit_geometries_mut<F>(&mut self, f: &mut F)
    where
        F: FnMut(&mut Geometry),
    {
        fn visit<F: FnMut(&mut Geometry)>(node: &mut ModelNode, f: &mut F) {
            if let Some(geometry) = &mut node.geometry {
                f(geometry);
            }
            for child in &mut node.children {
                visit(child, f);
            }
        }

        for root in &mut self.roots {
            visit(root, f);
        }
    }
}

/// Parses the file at `path` as `format`. A file that parses but holds
/// no geometry at all (a camera-only glTF, say) is reported as
/// [`LoadError::NoMeshes`].
pub fn load_model(path: &Path, format: ModelFormat) -> Result<ModelGraph, LoadError> {
    let graph = match format {
        ModelFormat::Obj => obj::load(path)?,
        ModelFormat::Stl => stl::load(path)?,
        ModelFormat::Gltf => gltf::load(path)?,
    };

    if !graph.has_geometry() {
        return Err(LoadError::NoMeshes(path.to_path_buf()));
    }

    Ok(graph)
}

pub fn detect_format(path: &Path) -> Result<ModelFormat, LoadError> {
    ModelFormat::from_extension(path)
        .ok_or_else(|| LoadError::UnsupportedFormat(path.display().to_string()))
}
