use std::fmt;

use crate::loader::{ModelFormat, ModelGraph};

/// Totals shown in the viewer overlay after a model is prepared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSummary {
    pub vertices: usize,
    pub faces: usize,
    pub format: ModelFormat,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Format: {} | Vertices: {} | Faces: {}",
            self.format, self.vertices, self.faces
        )
    }
}

/// Prepares a freshly loaded model for display: recomputes smooth
/// vertex normals, computes bounds, recenters every mesh, and tallies
/// the totals.
///
/// Face counts accumulate fractionally across meshes and round once at
/// the end. A graph without meshes is left alone and yields `None`.
pub fn inspect(graph: &mut ModelGraph, format: ModelFormat) -> Option<ModelSummary> {
    if !graph.has_geometry() {
        log::warn!("model has no meshes to inspect");
        return None;
    }

    let mut vertices = 0usize;
    let mut faces = 0f64;

    graph.visit_geometries_mut(&mut |geometry| {
        geometry.compute_vertex_normals();
        geometry.compute_bounds();
        geometry.recenter();

        vertices += geometry.vertex_count();
        faces += geometry.face_count();
    });

    Some(ModelSummary {
        vertices,
        faces: faces.round() as usize,
        format,
    })
}
