use glam::{Mat4, Vec3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    /// Sphere centered on the point cloud's box center, wide enough to hold
    /// every point. Returns a zero sphere for an empty slice.
    pub fn from_points(points: &[Vec3]) -> BoundingSphere {
        let Some(aabb) = AABB::from_points(points) else {
            return BoundingSphere {
                center: Vec3::ZERO,
                radius: 0.0,
            };
        };

        let center = aabb.center();
        let radius = points
            .iter()
            .map(|point| (*point - center).length_squared())
            .fold(0.0f32, f32::max)
            .sqrt();

        BoundingSphere { center, radius }
    }

    pub fn transform(&self, matrix: &Mat4) -> BoundingSphere {
        let center = matrix.transform_point3(self.center);
        let scale = matrix.to_scale_rotation_translation().0;
        let radius = self.radius * scale.max_element();
        BoundingSphere { center, radius }
    }

    pub fn translate(&self, offset: Vec3) -> BoundingSphere {
        BoundingSphere {
            center: self.center + offset,
            radius: self.radius,
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        (point - self.center).length_squared() <= self.radius * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(point1: Vec3, point2: Vec3) -> AABB {
        let min = point1.min(point2);
        let max = point1.max(point2);
        AABB { min, max }
    }

    /// None for an empty slice; a degenerate (zero-size) box for a single point.
    pub fn from_points(points: &[Vec3]) -> Option<AABB> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for point in rest {
            min = min.min(*point);
            max = max.max(*point);
        }
        Some(AABB { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn translate(&self, offset: Vec3) -> AABB {
        AABB {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aabb_from_points_spans_extremes() {
        let points = [
            Vec3::new(-1.0, 2.0, 0.5),
            Vec3::new(3.0, -4.0, 0.0),
            Vec3::new(0.0, 0.0, -2.0),
        ];

        let aabb = AABB::from_points(&points).unwrap();
        assert_eq!(aabb.min, Vec3::new(-1.0, -4.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 0.5));
        assert_eq!(aabb.center(), Vec3::new(1.0, -1.0, -0.75));
    }

    #[test]
    fn aabb_from_points_empty_is_none() {
        assert!(AABB::from_points(&[]).is_none());
    }

    #[test]
    fn aabb_union_covers_both() {
        let a = AABB::new(Vec3::ZERO, Vec3::ONE);
        let b = AABB::new(Vec3::splat(-2.0), Vec3::splat(-1.0));
        let union = a.union(&b);

        assert_eq!(union.min, Vec3::splat(-2.0));
        assert_eq!(union.max, Vec3::ONE);
        assert!(union.contains_point(Vec3::splat(-1.5)));
        assert!(union.contains_point(Vec3::splat(0.5)));
    }

    #[test]
    fn sphere_from_points_holds_every_point() {
        let points = [
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(-2.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];

        let sphere = BoundingSphere::from_points(&points);
        assert!((sphere.center - Vec3::new(0.0, 0.5, 0.0)).length() < 1e-6);
        for point in points {
            assert!(sphere.contains_point(point));
        }
    }

    #[test]
    fn sphere_transform_scales_radius_by_max_axis() {
        let sphere = BoundingSphere {
            center: Vec3::ZERO,
            radius: 1.0,
        };
        let matrix = Mat4::from_scale(Vec3::new(1.0, 3.0, 2.0));
        let transformed = sphere.transform(&matrix);

        assert!((transformed.radius - 3.0).abs() < 1e-6);
    }
}
