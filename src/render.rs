use glam::Mat4;

use crate::geometry::GeometryId;
use crate::material::{representation, Representation, ViewMode};
use crate::scene_graph::Scene;

/// One renderable item: a resolved world transform plus how to draw
/// the geometry it points at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    pub world: Mat4,
    pub geometry: GeometryId,
    pub representation: Representation,
}

/// Emits an item for every geometry-bearing object, resolving each
/// material through the active view mode. World transforms must be up
/// to date before calling.
pub fn collect_draw_items(scene: &Scene, mode: ViewMode) -> Vec<DrawItem> {
    scene
        .objects
        .iter()
        .filter_map(|(_, object)| {
            let geometry = object.geometry_id?;

            Some(DrawItem {
                world: *object.transform.get_world_matrix(),
                geometry,
                representation: representation(mode, &object.material),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cuboid;
    use crate::material::Material;
    use crate::scene_graph::Object3D;
    use glam::Vec3;

    fn scene_with_group_and_two_meshes() -> Scene {
        let mut scene = Scene::new();
        let group = scene.add_object(Object3D::named("group"));

        for name in ["a", "b"] {
            let geometry = scene.add_geometry(cuboid(1.0, 1.0, 1.0));
            let mut object = Object3D::named(name);
            object.geometry_id = Some(geometry);
            object.material = Material::default();
            let id = scene.add_object(object);
            scene.set_object_parent(id, Some(group));
        }

        scene
    }

    #[test]
    fn only_geometry_bearing_objects_are_drawn() {
        let mut scene = scene_with_group_and_two_meshes();
        scene.late_update();

        let items = collect_draw_items(&scene, ViewMode::Default);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn switching_modes_changes_representation_not_population() {
        let mut scene = scene_with_group_and_two_meshes();
        scene.late_update();

        let solid = collect_draw_items(&scene, ViewMode::Default);
        let wire = collect_draw_items(&scene, ViewMode::Wireframe);

        assert_eq!(solid.len(), wire.len());
        assert!(solid
            .iter()
            .all(|item| matches!(item.representation, Representation::Solid { .. })));
        assert!(wire
            .iter()
            .all(|item| matches!(item.representation, Representation::Wireframe { .. })));
        for (a, b) in solid.iter().zip(&wire) {
            assert_eq!(a.world, b.world);
            assert_eq!(a.geometry, b.geometry);
        }
    }

    #[test]
    fn items_carry_composed_world_transforms() {
        let mut scene = scene_with_group_and_two_meshes();
        let group = scene.get_object_by_name("group").unwrap();
        scene.set_object_translation(group, Vec3::new(0.0, 7.0, 0.0));
        scene.late_update();

        let items = collect_draw_items(&scene, ViewMode::Default);
        for item in items {
            assert_eq!(item.world.w_axis.truncate(), Vec3::new(0.0, 7.0, 0.0));
        }
    }
}
