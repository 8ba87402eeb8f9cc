//! An orange cube that circles the origin while spinning and pulsing.

use glam::Vec3;

use crate::animation::{Animator, FrameContext, Orbit, Pulse, Spin};
use crate::camera::Camera;
use crate::geometry;
use crate::light::{AmbientLight, DirectionalLight, Light};
use crate::material::{palette, Material, ViewMode};
use crate::render::{collect_draw_items, DrawItem};
use crate::scene_graph::Scene;

use super::{spawn_mesh, Demo};

pub struct OrbitDemo {
    scene: Scene,
    camera: Camera,
    lights: Vec<Light>,
    animators: Vec<Box<dyn Animator>>,
}

impl OrbitDemo {
    pub fn new() -> Self {
        let mut scene = Scene::new();
        let cube = spawn_mesh(
            &mut scene,
            "cube",
            geometry::cuboid(1.0, 1.0, 1.0),
            Material::colored(palette::ORANGE),
            None,
        );

        let animators: Vec<Box<dyn Animator>> = vec![
            Box::new(Orbit {
                target: cube,
                radius: 2.0,
            }),
            Box::new(Spin {
                target: cube,
                rate: Vec3::new(0.005, 0.01, 0.0),
            }),
            Box::new(Pulse {
                target: cube,
                amplitude: 0.3,
                frequency: 2.0,
            }),
        ];

        Self {
            scene,
            camera: Camera::looking_at(Vec3::new(0.0, 2.0, 10.0), Vec3::ZERO, 60.0),
            lights: vec![
                Light::Ambient(AmbientLight::new(palette::WHITE, 0.5)),
                Light::Directional(DirectionalLight::new(
                    Vec3::new(5.0, 5.0, 5.0),
                    palette::WHITE,
                    1.0,
                )),
            ],
            animators,
        }
    }
}

impl Default for OrbitDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for OrbitDemo {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn lights(&self) -> &[Light] {
        &self.lights
    }

    fn update(&mut self, ctx: &FrameContext) {
        for animator in &mut self.animators {
            animator.apply(&mut self.scene, ctx);
        }
        self.scene.late_update();
    }

    fn draw_items(&self) -> Vec<DrawItem> {
        collect_draw_items(&self.scene, ViewMode::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlState;

    fn context(frame: u32) -> FrameContext {
        let delta = 1.0 / 60.0;
        FrameContext {
            time: frame as f32 * delta,
            delta,
            controls: ControlState::default(),
        }
    }

    #[test]
    fn draws_a_single_cube() {
        let mut demo = OrbitDemo::new();
        demo.update(&context(0));
        assert_eq!(demo.draw_items().len(), 1);
    }

    #[test]
    fn cube_orbits_at_radius_two() {
        let mut demo = OrbitDemo::new();

        for frame in 0..120 {
            demo.update(&context(frame));
            let position = demo.draw_items()[0].world.w_axis.truncate();
            let planar = (position.x * position.x + position.z * position.z).sqrt();
            assert!((planar - 2.0).abs() < 1e-4, "off orbit at frame {frame}");
        }
    }

    #[test]
    fn cube_scale_pulses_around_one() {
        let mut demo = OrbitDemo::new();
        let mut smallest = f32::MAX;
        let mut largest = f32::MIN;

        // Four seconds covers a full pulse period.
        for frame in 0..240 {
            demo.update(&context(frame));
            let scale = demo.draw_items()[0].world.x_axis.truncate().length();
            smallest = smallest.min(scale);
            largest = largest.max(scale);
        }

        assert!(smallest < 0.75, "never shrank: {smallest}");
        assert!(largest > 1.25, "never grew: {largest}");
    }
}
