//! Loads models on a worker thread, inspects them and swaps them into
//! the scene when the parse lands.

use std::path::PathBuf;

use glam::Vec3;

use crate::animation::{Animator, FrameContext, Spin};
use crate::camera::Camera;
use crate::inspect::{inspect, ModelSummary};
use crate::light::{AmbientLight, DirectionalLight, Light, PointLight};
use crate::loader::{ModelFormat, ModelGraph, ModelLoader, RequestId};
use crate::material::{palette, Material, ViewMode};
use crate::render::{collect_draw_items, DrawItem};
use crate::scene_graph::{Object3D, ObjectId, Scene};

use super::Demo;

/// The loaded model slowly turns around Y.
const SPIN_RATE: Vec3 = Vec3::new(0.0, 0.005, 0.0);

const MODEL_ROOT: &str = "model";

pub struct ViewerDemo {
    scene: Scene,
    camera: Camera,
    lights: Vec<Light>,
    loader: ModelLoader,
    root: ObjectId,
    spin: Spin,
    mode: ViewMode,
    summary: Option<ModelSummary>,
}

impl ViewerDemo {
    pub fn new(path: impl Into<PathBuf>, format: ModelFormat, mode: ViewMode) -> Self {
        let (scene, root) = stage();
        let mut loader = ModelLoader::new();
        loader.request(path, format);

        Self {
            scene,
            camera: Camera {
                far: 5000.0,
                ..Camera::looking_at(Vec3::new(0.0, 0.0, 10.0), Vec3::ZERO, 60.0)
            },
            lights: vec![
                Light::Ambient(AmbientLight::new(palette::WHITE, 0.5)),
                Light::Directional(DirectionalLight::new(
                    Vec3::new(10.0, 10.0, 10.0),
                    palette::WHITE,
                    1.0,
                )),
                Light::Point(PointLight::new(
                    Vec3::new(-10.0, -10.0, -10.0),
                    palette::WHITE,
                    0.8,
                )),
            ],
            loader,
            root,
            spin: Spin {
                target: root,
                rate: SPIN_RATE,
            },
            mode,
            summary: None,
        }
    }

    /// Queues a load; the scene swaps over once the parse lands. A
    /// newer request supersedes any still in flight.
    pub fn load(&mut self, path: impl Into<PathBuf>, format: ModelFormat) -> RequestId {
        self.loader.request(path, format)
    }

    /// Loads the bundled sample model for `format`.
    pub fn load_format(&mut self, format: ModelFormat) -> RequestId {
        self.load(format.default_asset_path(), format)
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    pub fn summary(&self) -> Option<&ModelSummary> {
        self.summary.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loader.has_pending()
    }

    fn swap_in(&mut self, graph: ModelGraph) {
        // Carry the accumulated turn over so a reload does not snap
        // the model back to its starting pose.
        let rotation = self
            .scene
            .get_object_transform(self.root)
            .map(|transform| transform.rotation())
            .unwrap_or(Vec3::ZERO);

        let (mut scene, root) = stage();
        scene.set_object_rotation(root, rotation);
        scene.spawn_model_graph(graph, model_material(), Some(root));

        self.scene = scene;
        self.root = root;
        self.spin = Spin {
            target: root,
            rate: SPIN_RATE,
        };
    }
}

fn stage() -> (Scene, ObjectId) {
    let mut scene = Scene::new();
    let root = scene.add_object(Object3D::named(MODEL_ROOT));
    (scene, root)
}

fn model_material() -> Material {
    Material {
        color: palette::TAN,
        metalness: 0.2,
        roughness: 0.8,
    }
}

impl Demo for ViewerDemo {
    fn camera(&self) -> &Camera {
        &self.camera
    }

    fn lights(&self) -> &[Light] {
        &self.lights
    }

    fn update(&mut self, ctx: &FrameContext) {
        if let Some(completed) = self.loader.poll() {
            match completed.result {
                // A graph that yields no summary has nothing to show;
                // the current model stays up in that case too.
                Ok(mut graph) => {
                    if let Some(summary) = inspect(&mut graph, completed.format) {
                        self.summary = Some(summary);
                        self.swap_in(graph);
                    }
                }
                Err(error) => log::error!("keeping the current model: {error}"),
            }
        }

        self.spin.apply(&mut self.scene, ctx);
        self.scene.late_update();
    }

    fn draw_items(&self) -> Vec<DrawItem> {
        collect_draw_items(&self.scene, self.mode)
    }

    fn overlay(&self) -> Option<String> {
        self.summary.as_ref().map(|summary| summary.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::ControlState;
    use crate::material::Representation;
    use std::fs;
    use std::time::{Duration, Instant};

    const TRIANGLE_OBJ: &str = "v -1 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";

    fn context() -> FrameContext {
        FrameContext {
            time: 0.0,
            delta: 1.0 / 60.0,
            controls: ControlState::default(),
        }
    }

    fn write_model(dir: &tempfile::TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, text).unwrap();
        path
    }

    fn pump(demo: &mut ViewerDemo) {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            demo.update(&context());
            if !demo.is_loading() {
                return;
            }
            assert!(Instant::now() < deadline, "load never completed");
            std::thread::sleep(Duration::from_millis(2));
        }
    }

    #[test]
    fn loaded_model_shows_up_in_the_draw_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "tri.obj", TRIANGLE_OBJ);

        let mut demo = ViewerDemo::new(path, ModelFormat::Obj, ViewMode::Default);
        assert!(demo.draw_items().is_empty());

        pump(&mut demo);

        assert_eq!(demo.draw_items().len(), 1);
        let summary = demo.summary().unwrap();
        assert_eq!(summary.vertices, 3);
        assert_eq!(summary.faces, 1);
        assert_eq!(summary.format, ModelFormat::Obj);
    }

    #[test]
    fn failed_load_keeps_the_current_model() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "tri.obj", TRIANGLE_OBJ);

        let mut demo = ViewerDemo::new(path, ModelFormat::Obj, ViewMode::Default);
        pump(&mut demo);

        demo.load(dir.path().join("missing.obj"), ModelFormat::Obj);
        pump(&mut demo);

        assert_eq!(demo.draw_items().len(), 1);
        assert_eq!(demo.summary().unwrap().vertices, 3);
    }

    #[test]
    fn reload_carries_the_accumulated_turn() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "tri.obj", TRIANGLE_OBJ);

        let mut demo = ViewerDemo::new(path.clone(), ModelFormat::Obj, ViewMode::Default);
        pump(&mut demo);

        for _ in 0..100 {
            demo.update(&context());
        }
        let turned = demo
            .scene
            .get_object_transform(demo.root)
            .unwrap()
            .rotation()
            .y;
        assert!(turned >= 0.5);

        demo.load(path, ModelFormat::Obj);
        pump(&mut demo);

        let after = demo
            .scene
            .get_object_transform(demo.root)
            .unwrap()
            .rotation()
            .y;
        assert!(after >= turned, "reload reset the turn: {after} < {turned}");
    }

    #[test]
    fn mode_switch_restyles_without_reloading() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_model(&dir, "tri.obj", TRIANGLE_OBJ);

        let mut demo = ViewerDemo::new(path, ModelFormat::Obj, ViewMode::Default);
        pump(&mut demo);

        let before = demo.draw_items();
        demo.set_mode(ViewMode::Wireframe);
        let after = demo.draw_items();

        assert_eq!(before.len(), after.len());
        assert_eq!(before[0].world, after[0].world);
        assert!(matches!(
            after[0].representation,
            Representation::Wireframe { .. }
        ));
    }
}
