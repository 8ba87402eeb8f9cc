//! A row of cubes built from a RON layout description.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context};
use glam::Vec3;
use serde::Deserialize;

use crate::animation::{Animator, FrameContext, SliderScale, SliderSpin};
use crate::camera::Camera;
use crate::geometry;
use crate::light::{AmbientLight, DirectionalLight, Light};
use crate::material::{palette, Material, ViewMode};
use crate::render::{collect_draw_items, DrawItem};
use crate::scene_graph::Scene;

use super::{spawn_mesh, Demo};

const BUNDLED_LAYOUT: &str = include_str!("../../assets/parametric.ron");

fn default_scale() -> f32 {
    1.0
}

/// One cube in the row. `scale` and `rotate` may be omitted from the
/// file.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRow {
    pub x: f32,
    pub color: String,
    #[serde(default = "default_scale")]
    pub scale: f32,
    #[serde(default)]
    pub rotate: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Layout {
    pub items: Vec<ItemRow>,
}

impl Layout {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading layout {}", path.display()))?;
        ron::from_str(&text).with_context(|| format!("parsing layout {}", path.display()))
    }

    pub fn bundled() -> anyhow::Result<Self> {
        ron::from_str(BUNDLED_LAYOUT).context("parsing the bundled layout")
    }
}

pub struct ParametricDemo {
    scene: Scene,
    camera: Camera,
    lights: Vec<Light>,
    animators: Vec<Box<dyn Animator>>,
}

impl std::fmt::Debug for ParametricDemo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParametricDemo").finish_non_exhaustive()
    }
}

impl ParametricDemo {
    pub fn new(layout: &Layout) -> anyhow::Result<Self> {
        let mut scene = Scene::new();
        let mut animators: Vec<Box<dyn Animator>> = Vec::new();

        for (index, item) in layout.items.iter().enumerate() {
            let color = palette::by_name(&item.color).ok_or_else(|| {
                anyhow!("unknown color {:?} in layout item {index}", item.color)
            })?;

            let id = spawn_mesh(
                &mut scene,
                &format!("item {index}"),
                geometry::cuboid(1.0, 1.0, 1.0),
                Material::colored(color),
                None,
            );
            scene.set_object_translation(id, Vec3::new(item.x, 0.0, 0.0));
            scene.set_object_uniform_scale(id, item.scale);

            animators.push(Box::new(SliderScale {
                target: id,
                base: item.scale,
            }));
            if item.rotate {
                animators.push(Box::new(SliderSpin { target: id }));
            }
        }

        Ok(Self {
            scene,
            camera: Camera::looking_at(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, 75.0),
            lights: vec![
                Light::Ambient(AmbientLight::new(palette::WHITE, 0.5)),
                Light::Directional(DirectionalLight::new(
                    Vec3::new(5.0, 5.0, 5.0),
                    palette::WHITE,
                    1.0,
                )),
            ],
            animators,
        })
    }
}

impl Demo for ParametricDemo {
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

    fn context() -> FrameContext {
        FrameContext {
            time: 0.0,
            delta: 1.0 / 60.0,
            controls: ControlState::default(),
        }
    }

    fn item_scale(demo: &ParametricDemo, index: usize) -> Vec3 {
        let id = demo.scene.get_object_by_name(&format!("item {index}")).unwrap();
        demo.scene.get_object_transform(id).unwrap().scale()
    }

    fn item_rotation_y(demo: &ParametricDemo, index: usize) -> f32 {
        let id = demo.scene.get_object_by_name(&format!("item {index}")).unwrap();
        demo.scene.get_object_transform(id).unwrap().rotation().y
    }

    #[test]
    fn bundled_layout_builds_three_cubes() {
        let layout = Layout::bundled().unwrap();
        let mut demo = ParametricDemo::new(&layout).unwrap();
        demo.update(&context());

        assert_eq!(demo.draw_items().len(), 3);
    }

    #[test]
    fn omitted_fields_fall_back_to_defaults() {
        let layout: Layout = ron::from_str(r#"(items: [(x: 1.0, color: "red")])"#).unwrap();

        assert_eq!(layout.items[0].scale, 1.0);
        assert!(!layout.items[0].rotate);
    }

    #[test]
    fn only_marked_items_rotate() {
        let layout = Layout::bundled().unwrap();
        let mut demo = ParametricDemo::new(&layout).unwrap();

        let mut ctx = context();
        ctx.controls.rotation_speed = 0.05;
        for _ in 0..10 {
            demo.update(&ctx);
        }

        assert_eq!(item_rotation_y(&demo, 0), 0.0);
        assert!((item_rotation_y(&demo, 1) - 0.5).abs() < 1e-5);
        assert_eq!(item_rotation_y(&demo, 2), 0.0);
    }

    #[test]
    fn global_scale_multiplies_each_base() {
        let layout = Layout::bundled().unwrap();
        let mut demo = ParametricDemo::new(&layout).unwrap();

        let mut ctx = context();
        ctx.controls.global_scale = 2.0;
        demo.update(&ctx);

        assert_eq!(item_scale(&demo, 0), Vec3::splat(2.0));
        assert_eq!(item_scale(&demo, 1), Vec3::splat(3.0));
        assert_eq!(item_scale(&demo, 2), Vec3::splat(2.0));
    }

    #[test]
    fn unknown_color_is_rejected_by_name() {
        let layout = Layout {
            items: vec![ItemRow {
                x: 0.0,
                color: "chartreuse".to_string(),
                scale: 1.0,
                rotate: false,
            }],
        };

        let error = ParametricDemo::new(&layout).unwrap_err();
        assert!(error.to_string().contains("chartreuse"));
    }
}
