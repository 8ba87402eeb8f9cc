use glam::{EulerRot, Mat4, Vec3};
use id_arena::Arena;

use crate::geometry::{Geometry, GeometryId};
use crate::loader::{ModelGraph, ModelNode};
use crate::material::Material;
use crate::scene_graph::object3d::{Object3D, ObjectId};
use crate::scene_graph::transform::Transform;

pub struct Scene {
    pub objects: Arena<Object3D>,
    pub geometries: Arena<Geometry>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Arena::new(),
            geometries: Arena::new(),
        }
    }

    pub fn add_object(&mut self, object: Object3D) -> ObjectId {
        self.objects.alloc(object)
    }

    pub fn get_object(&self, id: ObjectId) -> Option<&Object3D> {
        self.objects.get(id)
    }

    pub fn get_object_mut(&mut self, id: ObjectId) -> Option<&mut Object3D> {
        self.objects.get_mut(id)
    }

    pub fn get_object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, object)| object.name == name)
            .map(|(id, _)| id)
    }

    pub fn add_geometry(&mut self, geometry: Geometry) -> GeometryId {
        self.geometries.alloc(geometry)
    }

    pub fn get_geometry(&self, id: GeometryId) -> Option<&Geometry> {
        self.geometries.get(id)
    }

    #[allow(dead_code)]
    pub fn get_geometry_mut(&mut self, id: GeometryId) -> Option<&mut Geometry> {
        self.geometries.get_mut(id)
    }

    /// Instantiates a loaded model under `parent`, moving its geometries
    /// into the scene. Returns the last spawned root node.
    pub fn spawn_model_graph(
        &mut self,
        graph: ModelGraph,
        material: Material,
        parent: Option<ObjectId>,
    ) -> Option<ObjectId> {
        let mut last_object_id = None;

        for node in graph.roots {
            last_object_id = Some(self.spawn_model_node(node, parent, material));
        }

        last_object_id
    }

    fn spawn_model_node(
        &mut self,
        node: ModelNode,
        parent: Option<ObjectId>,
        material: Material,
    ) -> ObjectId {
        let mut object = Object3D::named(node.name);
        let (x, y, z) = node.rotation.to_euler(EulerRot::XYZ);
        object
            .transform
            .set_transform(node.translation, Vec3::new(x, y, z), node.scale);
        object.material = material;
        object.geometry_id = node.geometry.map(|geometry| self.add_geometry(geometry));

        let object_id = self.add_object(object);

        if parent.is_some() {
            self.set_object_parent(object_id, parent);
        }

        for child in node.children {
            self.spawn_model_node(child, Some(object_id), material);
        }

        object_id
    }

    /// Updates all object transforms in hierarchical order
    fn update_transforms(&self) {
        // Find all root objects (objects without parents)
        let root_objects = self.objects.iter().filter_map(|(id, object)| {
            if object.parent_id.is_none() {
                Some(id)
            } else {
                None
            }
        });

        // Update transforms starting from root objects
        for root_id in root_objects {
            self.update_object_transform_recursive(root_id, Mat4::IDENTITY);
        }
    }

    /// Recursively updates an object's world transform and its children
    fn update_object_transform_recursive(&self, object_id: ObjectId, parent_world_matrix: Mat4) {
        if let Some(object) = self.objects.get(object_id) {
            // Only update if the world transform is dirty
            if object.transform.is_world_dirty() {
                let local_matrix = *object.transform.get_local_matrix();
                let world_matrix = parent_world_matrix * local_matrix;
                object.transform.set_world_matrix(world_matrix);
            }

            // Update all children with this object's world matrix
            let world_matrix = *object.transform.get_world_matrix();
            for &child_id in &object.child_ids {
                self.update_object_transform_recursive(child_id, world_matrix);
            }
        }
    }

    /// Invalidates world transforms for an object and all its descendants
    pub fn invalidate_object_hierarchy(&self, object_id: ObjectId) {
        if let Some(object) = self.objects.get(object_id) {
            object.transform.invalidate_world();

            for &child_id in &object.child_ids {
                self.invalidate_object_hierarchy(child_id);
            }
        }
    }

    /// Sets the parent of an object and updates child relationships
    pub fn set_object_parent(&mut self, child_id: ObjectId, new_parent_id: Option<ObjectId>) {
        // Remove from old parent's children list
        if let Some(child) = self.objects.get(child_id) {
            if let Some(old_parent_id) = child.parent_id {
                if let Some(old_parent) = self.objects.get_mut(old_parent_id) {
                    old_parent.child_ids.retain(|&id| id != child_id);
                }
            }
        }

        // Set new parent and add to new parent's children list
        if let Some(child) = self.objects.get_mut(child_id) {
            child.parent_id = new_parent_id;

            if let Some(new_parent_id) = new_parent_id {
                if let Some(new_parent) = self.objects.get_mut(new_parent_id) {
                    new_parent.child_ids.push(child_id);
                }
            }
        }

        // Invalidate world transforms for the moved object and its descendants
        self.invalidate_object_hierarchy(child_id);
    }

    pub fn set_object_translation(&mut self, object_id: ObjectId, translation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_translation(translation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    /// Sets XYZ Euler angles in radians.
    pub fn set_object_rotation(&mut self, object_id: ObjectId, rotation: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_rotation(rotation);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_scale(&mut self, object_id: ObjectId, scale: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.set_scale(scale);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn set_object_uniform_scale(&mut self, object_id: ObjectId, scale: f32) {
        self.set_object_scale(object_id, Vec3::splat(scale));
    }

    pub fn translate_object(&mut self, object_id: ObjectId, delta: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.translate(delta);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    /// Adds per-axis Euler deltas in radians.
    pub fn rotate_object(&mut self, object_id: ObjectId, delta: Vec3) {
        if let Some(object) = self.objects.get_mut(object_id) {
            object.transform.rotate(delta);
        }
        self.invalidate_object_hierarchy(object_id);
    }

    pub fn get_object_transform(&self, object_id: ObjectId) -> Option<&Transform> {
        self.objects.get(object_id).map(|object| &object.transform)
    }

    pub fn late_update(&mut self) {
        self.update_transforms();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn world_position(scene: &Scene, id: ObjectId) -> Vec3 {
        scene
            .get_object(id)
            .unwrap()
            .transform
            .get_world_matrix()
            .w_axis
            .truncate()
    }

    fn child_at(scene: &mut Scene, name: &str, parent: ObjectId, translation: Vec3) -> ObjectId {
        let mut object = Object3D::named(name);
        object.transform.set_translation(translation);
        let id = scene.add_object(object);
        scene.set_object_parent(id, Some(parent));
        id
    }

    #[test]
    fn child_position_follows_parent_rotation() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("parent"));
        let child = child_at(&mut scene, "child", parent, Vec3::new(4.0, 0.0, 0.0));

        scene.set_object_rotation(parent, Vec3::new(0.0, FRAC_PI_2, 0.0));
        scene.late_update();

        let position = world_position(&scene, child);
        assert!(
            (position - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5,
            "got {position:?}"
        );
    }

    #[test]
    fn grandchild_composes_both_rotations() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("parent"));
        let child = child_at(&mut scene, "child", parent, Vec3::new(4.0, 0.0, 0.0));
        let grandchild = child_at(&mut scene, "grandchild", child, Vec3::new(2.0, 0.0, 0.0));

        scene.set_object_rotation(parent, Vec3::new(0.0, FRAC_PI_2, 0.0));
        scene.set_object_rotation(child, Vec3::new(0.0, FRAC_PI_2, 0.0));
        scene.late_update();

        // Child frame puts the grandchild at (4, 0, -2); the parent's
        // quarter turn then carries that to (-2, 0, -4).
        let position = world_position(&scene, grandchild);
        assert!(
            (position - Vec3::new(-2.0, 0.0, -4.0)).length() < 1e-5,
            "got {position:?}"
        );
    }

    #[test]
    fn parent_scale_propagates_to_children() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("parent"));
        let child = child_at(&mut scene, "child", parent, Vec3::new(1.0, 0.0, 0.0));

        scene.set_object_uniform_scale(parent, 3.0);
        scene.late_update();

        assert!((world_position(&scene, child) - Vec3::new(3.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn moving_parent_after_update_refreshes_descendants() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("parent"));
        let child = child_at(&mut scene, "child", parent, Vec3::new(1.0, 0.0, 0.0));

        scene.late_update();
        scene.translate_object(parent, Vec3::new(0.0, 5.0, 0.0));
        scene.late_update();

        assert!((world_position(&scene, child) - Vec3::new(1.0, 5.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn mutating_foreign_id_is_a_no_op() {
        let mut other = Scene::new();
        let foreign = other.add_object(Object3D::named("elsewhere"));

        let mut scene = Scene::new();
        scene.add_object(Object3D::named("here"));
        scene.set_object_rotation(foreign, Vec3::new(0.0, 1.0, 0.0));
        scene.late_update();

        assert!(scene.get_object(foreign).is_none());
        assert_eq!(other.get_object(foreign).unwrap().transform.rotation(), Vec3::ZERO);
    }

    #[test]
    fn get_object_by_name_finds_nested_nodes() {
        let mut scene = Scene::new();
        let parent = scene.add_object(Object3D::named("root"));
        child_at(&mut scene, "arm", parent, Vec3::ZERO);

        assert!(scene.get_object_by_name("arm").is_some());
        assert!(scene.get_object_by_name("leg").is_none());
    }
}
