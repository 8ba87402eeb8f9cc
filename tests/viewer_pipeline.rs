//! End-to-end model pipeline: a request goes out, a worker thread
//! parses the file, inspection prepares the meshes, and the result
//! shows up in the viewer's draw list and overlay.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use scenelab::animation::FrameContext;
use scenelab::controls::ControlState;
use scenelab::demos::{Demo, ViewerDemo};
use scenelab::loader::ModelFormat;
use scenelab::material::{Representation, ViewMode};

fn context() -> FrameContext {
    FrameContext {
        time: 0.0,
        delta: 1.0 / 60.0,
        controls: ControlState::default(),
    }
}

fn bundled(format: ModelFormat) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(format.default_asset_path())
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

fn viewer_for(format: ModelFormat) -> ViewerDemo {
    ViewerDemo::new(bundled(format), format, ViewMode::Default)
}

#[test]
fn pyramid_obj_flows_from_request_to_overlay() {
    let mut demo = viewer_for(ModelFormat::Obj);
    pump(&mut demo);

    let summary = demo.summary().expect("no summary after load");
    assert_eq!(summary.vertices, 5);
    assert_eq!(summary.faces, 6);
    assert_eq!(summary.format, ModelFormat::Obj);

    assert_eq!(demo.draw_items().len(), 1);
    assert_eq!(
        demo.overlay().as_deref(),
        Some("Format: OBJ | Vertices: 5 | Faces: 6")
    );
}

#[test]
fn cube_stl_expands_to_a_triangle_soup() {
    let mut demo = viewer_for(ModelFormat::Stl);
    pump(&mut demo);

    let summary = demo.summary().expect("no summary after load");
    assert_eq!(summary.vertices, 36);
    assert_eq!(summary.faces, 12);
    assert_eq!(summary.format, ModelFormat::Stl);
}

#[test]
fn triangle_gltf_counts_indexed_faces() {
    let mut demo = viewer_for(ModelFormat::Gltf);
    pump(&mut demo);

    let summary = demo.summary().expect("no summary after load");
    assert_eq!(summary.vertices, 3);
    assert_eq!(summary.faces, 1);
    assert_eq!(summary.format, ModelFormat::Gltf);
    assert_eq!(demo.draw_items().len(), 1);
}

#[test]
fn newest_request_wins_regardless_of_finish_order() {
    let mut demo = viewer_for(ModelFormat::Obj);
    // Supersede before the first result can land.
    demo.load(bundled(ModelFormat::Stl), ModelFormat::Stl);
    pump(&mut demo);

    let summary = demo.summary().expect("no summary after load");
    assert_eq!(summary.format, ModelFormat::Stl);
    assert_eq!(summary.vertices, 36);
}

#[test]
fn switching_view_modes_keeps_the_loaded_model() {
    let mut demo = viewer_for(ModelFormat::Obj);
    pump(&mut demo);

    let solid = demo.draw_items();
    demo.set_mode(ViewMode::Wireframe);
    let wireframe = demo.draw_items();
    demo.set_mode(ViewMode::Default);
    let solid_again = demo.draw_items();

    assert_eq!(solid.len(), wireframe.len());
    assert_eq!(solid.len(), solid_again.len());
    assert!(matches!(
        wireframe[0].representation,
        Representation::Wireframe { .. }
    ));
    assert!(matches!(
        solid_again[0].representation,
        Representation::Solid { .. }
    ));

    // Restyling never touches the geometry itself.
    let summary = demo.summary().unwrap();
    assert_eq!(summary.vertices, 5);
    assert_eq!(summary.faces, 6);
}

#[test]
fn failed_request_leaves_the_last_model_in_place() {
    let mut demo = viewer_for(ModelFormat::Obj);
    pump(&mut demo);

    demo.load("does/not/exist.obj", ModelFormat::Obj);
    pump(&mut demo);

    let summary = demo.summary().expect("summary was dropped");
    assert_eq!(summary.vertices, 5);
    assert_eq!(demo.draw_items().len(), 1);
}
