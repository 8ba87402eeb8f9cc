//! Three nested groups, each carrying a mesh. Posing the root from the
//! sliders moves the whole arm.

use glam::Vec3;

use crate::animation::{Animator, FrameContext, SliderPose};
use crate::camera::Camera;
use crate::geometry;
use crate::light::{AmbientLight, Light, PointLight};
use crate::material::{palette, Material, ViewMode};
use crate::render::{collect_draw_items, DrawItem};
use crate::scene_graph::{ObjectId, Scene};

use super::{spawn_group, spawn_mesh, Demo};

pub struct HierarchyDemo {
    scene: Scene,
    camera: Camera,
    lights: Vec<Light>,
    pose: SliderPose,
    root: ObjectId,
}

impl HierarchyDemo {
    pub fn new() -> Self {
        let mut scene = Scene::new();

        let parent = spawn_group(&mut scene, "parent", Vec3::ZERO, None);
        let child = spawn_group(&mut scene, "child", Vec3::new(4.0, 0.0, 0.0), Some(parent));
        let grandchild = spawn_group(
            &mut scene,
            "grandchild",
            Vec3::new(2.0, 0.0, 0.0),
            Some(child),
        );

        spawn_mesh(
            &mut scene,
            "parent box",
            geometry::cuboid(2.0, 2.0, 2.0),
            Material::colored(palette::ORANGE),
            Some(parent),
        );
        spawn_mesh(
            &mut scene,
            "child sphere",
            geometry::uv_sphere(0.5, 32, 32),
            Material::colored(palette::SKY_BLUE),
            Some(child),
        );
        spawn_mesh(
            &mut scene,
            "grandchild cone",
            geometry::cone(0.5, 1.0, 32),
            Material::colored(palette::LIME_GREEN),
            Some(grandchild),
        );

        Self {
            scene,
            camera: Camera::looking_at(Vec3::new(0.0, 5.0, 10.0), Vec3::ZERO, 60.0),
            lights: vec![
                Light::Ambient(AmbientLight::new(palette::WHITE, 1.0)),
                Light::Point(PointLight::new(
                    Vec3::new(10.0, 10.0, 10.0),
                    palette::WHITE,
                    1.0,
                )),
            ],
            pose: SliderPose { target: parent },
            root: parent,
        }
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }
}

impl Default for HierarchyDemo {
    fn default() -> Self {
        Self::new()
    }
}

impl Demo for HierarchyDemo {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn lights(&self) -> &[Light] {
        &self.lights
    }

    fn update(&mut self, ctx: &FrameContext) {
        self.pose.apply(&mut self.scene, ctx);
        self.scene.late_update();
    }

    fn draw_items(&self) -> Vec<DrawItem> {
        collect_draw_items(&self.scene, ViewMode::Default)
    }
}
