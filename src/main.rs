use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};

use scenelab::controls::ControlState;
use scenelab::demos::{Demo, HierarchyDemo, Layout, OrbitDemo, ParametricDemo, ViewerDemo};
use scenelab::engine;
use scenelab::loader::{detect_format, ModelFormat};
use scenelab::material::ViewMode;

#[derive(Parser)]
#[command(name = "scenelab", about = "Headless scene-graph exercises", version)]
struct Cli {
    /// Frames to simulate.
    #[arg(long, default_value_t = 120)]
    frames: u32,

    /// Simulated seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    #[command(flatten)]
    controls: ControlArgs,

    #[command(subcommand)]
    scene: SceneCommand,
}

/// Slider values, clamped to their ranges before the run starts.
#[derive(Args)]
struct ControlArgs {
    /// Pose rotation around Y in radians.
    #[arg(long, default_value_t = 0.0)]
    rotation_y: f32,

    /// Pose offset along X.
    #[arg(long, default_value_t = 0.0)]
    position_x: f32,

    /// Scale factor applied on top of each object's own scale.
    #[arg(long, default_value_t = 1.0)]
    global_scale: f32,

    /// Radians per frame for slider-driven spinners.
    #[arg(long, default_value_t = 0.01)]
    rotation_speed: f32,
}

#[derive(Subcommand)]
enum SceneCommand {
    /// An orbiting, spinning, pulsing cube.
    Orbit,
    /// Nested transform groups posed by the sliders.
    Hierarchy,
    /// A row of cubes described by a RON layout.
    Parametric {
        /// Layout file; defaults to the bundled one.
        #[arg(long)]
        layout: Option<PathBuf>,
    },
    /// Background model loading and inspection.
    Viewer {
        /// Model file; defaults to the bundled sample for the format.
        #[arg(long)]
        model: Option<PathBuf>,
        /// Forces a format instead of sniffing the file extension.
        #[arg(long)]
        format: Option<ModelFormat>,
        /// How loaded meshes are presented.
        #[arg(long, default_value = "default")]
        mode: ViewMode,
    },
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    if !cli.dt.is_finite() || cli.dt <= 0.0 {
        bail!("--dt must be a positive number of seconds");
    }

    let controls = ControlState {
        rotation_y: cli.controls.rotation_y,
        position_x: cli.controls.position_x,
        global_scale: cli.controls.global_scale,
        rotation_speed: cli.controls.rotation_speed,
    }
    .clamped();

    let mut demo: Box<dyn Demo> = match cli.scene {
        SceneCommand::Orbit => Box::new(OrbitDemo::new()),
        SceneCommand::Hierarchy => Box::new(HierarchyDemo::new()),
        SceneCommand::Parametric { layout } => {
            let layout = match layout {
                Some(path) => Layout::from_file(&path)?,
                None => Layout::bundled()?,
            };
            Box::new(ParametricDemo::new(&layout)?)
        }
        SceneCommand::Viewer {
            model,
            format,
            mode,
        } => {
            let (path, format) = resolve_model(model, format)?;
            Box::new(ViewerDemo::new(path, format, mode))
        }
    };

    let report = engine::run(demo.as_mut(), cli.frames, cli.dt, controls);
    log::info!(
        "ran {} frame(s) in {:.2?}, {} draw item(s) on the last frame",
        report.frames,
        report.elapsed,
        report.draw_items
    );

    Ok(())
}

fn resolve_model(
    model: Option<PathBuf>,
    format: Option<ModelFormat>,
) -> Result<(PathBuf, ModelFormat)> {
    match (model, format) {
        (Some(path), Some(format)) => Ok((path, format)),
        (Some(path), None) => {
            let format = detect_format(&path)?;
            Ok((path, format))
        }
        (None, Some(format)) => Ok((format.default_asset_path().to_path_buf(), format)),
        (None, None) => {
            let format = ModelFormat::Obj;
            Ok((format.default_asset_path().to_path_buf(), format))
        }
    }
}

fn init_logging() {
    let filters = std::env::var("RUST_LOG").unwrap_or_else(|_| String::from("info"));
    pretty_env_logger::formatted_builder()
        .parse_filters(&filters)
        .init();
}
