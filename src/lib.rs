//! A headless scene-graph playground: demos animate a transform
//! hierarchy frame by frame while models load on worker threads, and
//! every frame flattens into a list of draw items.

pub mod animation;
pub mod camera;
pub mod controls;
pub mod demos;
pub mod engine;
pub mod geometry;
pub mod inspect;
pub mod light;
pub mod loader;
pub mod material;
pub mod math;
pub mod render;
pub mod scene_graph;
