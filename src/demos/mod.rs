//! Runnable scenes. Each demo owns a scene graph and its animators and
//! exposes the per-frame surface the engine drives.

pub mod hierarchy;
pub mod orbit;
pub mod parametric;
pub mod viewer;

pub use hierarchy::HierarchyDemo;
pub use orbit::OrbitDemo;
pub use parametric::{Layout, ParametricDemo};
pub use viewer::ViewerDemo;

use glam::Vec3;

use crate::animation::FrameContext;
use crate::camera::Camera;
use crate::geometry::Geometry;
use crate::light::Light;
use crate::material::Material;
use crate::render::DrawItem;
use crate::scene_graph::{Object3D, ObjectId, Scene};

pub trait Demo {
    fn camera(&self) -> &Camera;
    fn lights(&self) -> &[Light];
    /// Advances animators and refreshes world transforms.
    fn update(&mut self, ctx: &FrameContext);
    fn draw_items(&self) -> Vec<DrawItem>;
    /// One line of status text, logged whenever it changes.
    fn overlay(&self) -> Option<String> {
        None
    }
}

fn spawn_mesh(
    scene: &mut Scene,
    name: &str,
    geometry: Geometry,
    material: Material,
    parent: Option<ObjectId>,
) -> ObjectId {
    let geometry_id = scene.add_geometry(geometry);
    let mut object = Object3D::named(name);
    object.geometry_id = Some(geometry_id);
    object.material = material;

    let object_id = scene.add_object(object);
    if parent.is_some() {
        scene.set_object_parent(object_id, parent);
    }
    object_id
}

fn spawn_group(
    scene: &mut Scene,
    name: &str,
    translation: Vec3,
    parent: Option<ObjectId>,
) -> ObjectId {
    let mut object = Object3D::named(name);
    object.transform.set_translation(translation);

    let object_id = scene.add_object(object);
    if parent.is_some() {
        scene.set_object_parent(object_id, parent);
    }
    object_id
}
