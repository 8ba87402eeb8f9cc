use glam::{Mat4, Vec3};

pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn looking_at(eye: Vec3, target: Vec3, fov_y: f32) -> Self {
        Self {
            eye,
            target,
            fov_y,
            ..Self::default()
        }
    }

    pub fn get_vp_matrix(&self, aspect: f32) -> Mat4 {
        let view = Mat4::look_at_lh(self.eye, self.target, self.up);
        let projection =
            Mat4::perspective_lh(self.fov_y.to_radians(), aspect, self.near, self.far);
        projection * view
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_y: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_projects_to_screen_center() {
        let camera = Camera::looking_at(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO, 60.0);
        let clip = camera.get_vp_matrix(16.0 / 9.0).project_point3(Vec3::ZERO);

        assert!(clip.x.abs() < 1e-6);
        assert!(clip.y.abs() < 1e-6);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }

    #[test]
    fn points_behind_near_plane_fall_outside_depth_range() {
        let camera = Camera::default();
        // 0.05 in front of the eye, inside the 0.1 near plane.
        let clip = camera
            .get_vp_matrix(1.0)
            .project_point3(Vec3::new(0.0, 0.0, 9.95));

        assert!(!(0.0..=1.0).contains(&clip.z));
    }
}
