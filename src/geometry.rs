use std::f32::consts::PI;

use glam::Vec3;
use id_arena::Id;

use crate::math::bounds::{BoundingSphere, AABB};

pub type GeometryId = Id<Geometry>;

/// Triangle mesh data. Indexed when `indices` is present, a plain triangle
/// soup otherwise (every three consecutive positions form a face).
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
    pub bounding_box: Option<AABB>,
    pub bounding_sphere: Option<BoundingSphere>,
}

impl Geometry {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Fractional when a non-indexed position count is not a multiple of
    /// three; callers accumulate across meshes and round once.
    pub fn face_count(&self) -> f64 {
        match &self.indices {
            Some(indices) => indices.len() as f64 / 3.0,
            None => self.positions.len() as f64 / 3.0,
        }
    }

    fn triangles(&self) -> Vec<[usize; 3]> {
        match &self.indices {
            Some(indices) => indices
                .chunks_exact(3)
                .map(|tri| [tri[0] as usize, tri[1] as usize, tri[2] as usize])
                .collect(),
            None => (0..self.positions.len() / 3)
                .map(|face| [face * 3, face * 3 + 1, face * 3 + 2])
                .collect(),
        }
    }

    /// Replaces the normal attribute with area-weighted vertex normals
    /// derived from the current positions.
    pub fn compute_vertex_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];

        for [a, b, c] in self.triangles() {
            let edge1 = self.positions[b] - self.positions[a];
            let edge2 = self.positions[c] - self.positions[a];
            // The unnormalized cross product weights each face by its area.
            let face_normal = edge1.cross(edge2);

            normals[a] += face_normal;
            normals[b] += face_normal;
            normals[c] += face_normal;
        }

        for normal in &mut normals {
            *normal = normal.normalize_or_zero();
        }

        self.normals = normals;
    }

    pub fn compute_bounds(&mut self) {
        self.bounding_box = AABB::from_points(&self.positions);
        self.bounding_sphere = Some(BoundingSphere::from_points(&self.positions));
    }

    /// Translates every position so the bounding-box center lands at the
    /// origin. Computes bounds first if they are missing; already-computed
    /// bounds are shifted along with the positions.
    pub fn recenter(&mut self) {
        if self.bounding_box.is_none() {
            self.compute_bounds();
        }
        let Some(bounding_box) = self.bounding_box else {
            return;
        };

        let offset = -bounding_box.center();
        for position in &mut self.positions {
            *position += offset;
        }

        self.bounding_box = Some(bounding_box.translate(offset));
        self.bounding_sphere = self.bounding_sphere.map(|sphere| sphere.translate(offset));
    }
}

/// Axis-aligned box spanning `width` x `height` x `depth`, centered at the
/// origin. Four vertices per face so each face keeps a flat normal.
pub fn cuboid(width: f32, height: f32, depth: f32) -> Geometry {
    let (x, y, z) = (width * 0.5, height * 0.5, depth * 0.5);

    #[rustfmt::skip]
    let faces: [(Vec3, [Vec3; 4]); 6] = [
        // Front (Z+)
        (Vec3::Z, [
            Vec3::new(-x, -y,  z), Vec3::new( x, -y,  z),
            Vec3::new( x,  y,  z), Vec3::new(-x,  y,  z),
        ]),
        // Back (Z-)
        (Vec3::NEG_Z, [
            Vec3::new( x, -y, -z), Vec3::new(-x, -y, -z),
            Vec3::new(-x,  y, -z), Vec3::new( x,  y, -z),
        ]),
        // Top (Y+)
        (Vec3::Y, [
            Vec3::new(-x,  y,  z), Vec3::new( x,  y,  z),
            Vec3::new( x,  y, -z), Vec3::new(-x,  y, -z),
        ]),
        // Bottom (Y-)
        (Vec3::NEG_Y, [
            Vec3::new(-x, -y, -z), Vec3::new( x, -y, -z),
            Vec3::new( x, -y,  z), Vec3::new(-x, -y,  z),
        ]),
        // Right (X+)
        (Vec3::X, [
            Vec3::new( x, -y,  z), Vec3::new( x, -y, -z),
            Vec3::new( x,  y, -z), Vec3::new( x,  y,  z),
        ]),
        // Left (X-)
        (Vec3::NEG_X, [
            Vec3::new(-x, -y, -z), Vec3::new(-x, -y,  z),
            Vec3::new(-x,  y,  z), Vec3::new(-x,  y, -z),
        ]),
    ];

    let mut positions = Vec::with_capacity(24);
    let mut normals = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (normal, corners) in faces {
        let base = positions.len() as u32;
        positions.extend(corners);
        normals.extend([normal; 4]);
        indices.extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Geometry {
        positions,
        normals,
        indices: Some(indices),
        ..Default::default()
    }
}

/// Latitude/longitude sphere centered at the origin. `segments` divides the
/// equator, `rings` runs pole to pole.
pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Geometry {
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        let y = phi.cos();
        let ring_radius = phi.sin();

        for seg in 0..=segments {
            let theta = 2.0 * PI * seg as f32 / segments as f32;
            let x = ring_radius * theta.cos();
            let z = ring_radius * theta.sin();

            positions.push(Vec3::new(x, y, z) * radius);
            normals.push(Vec3::new(x, y, z));
        }
    }

    for ring in 0..rings {
        for seg in 0..segments {
            let current = ring * (segments + 1) + seg;
            let next = current + segments + 1;

            indices.extend([current, current + 1, next]);
            indices.extend([current + 1, next + 1, next]);
        }
    }

    Geometry {
        positions,
        normals,
        indices: Some(indices),
        ..Default::default()
    }
}

/// Cone with its apex up at `height / 2` and a capped base circle at
/// `-height / 2`, centered at the origin.
pub fn cone(radius: f32, height: f32, segments: u32) -> Geometry {
    let half = height * 0.5;
    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut indices = Vec::new();

    // Side: one apex vertex per segment so the slant normal can vary.
    for seg in 0..=segments {
        let theta = 2.0 * PI * seg as f32 / segments as f32;
        let slant = Vec3::new(height * theta.cos(), radius, height * theta.sin()).normalize();

        positions.push(Vec3::new(0.0, half, 0.0));
        normals.push(slant);
        positions.push(Vec3::new(radius * theta.cos(), -half, radius * theta.sin()));
        normals.push(slant);
    }

    for seg in 0..segments {
        let apex = seg * 2;
        let base = apex + 1;
        indices.extend([apex, base + 2, base]);
    }

    // Base cap.
    let center = positions.len() as u32;
    positions.push(Vec3::new(0.0, -half, 0.0));
    normals.push(Vec3::NEG_Y);

    let rim = positions.len() as u32;
    for seg in 0..=segments {
        let theta = 2.0 * PI * seg as f32 / segments as f32;
        positions.push(Vec3::new(radius * theta.cos(), -half, radius * theta.sin()));
        normals.push(Vec3::NEG_Y);
    }

    for seg in 0..segments {
        indices.extend([center, rim + seg, rim + seg + 1]);
    }

    Geometry {
        positions,
        normals,
        indices: Some(indices),
        ..Default::default()
    }
}
