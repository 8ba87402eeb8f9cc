use std::fmt;
use std::str::FromStr;

use glam::Vec3;

/// CSS color keywords used by the built-in scenes and layout files.
pub mod palette {
    use glam::Vec3;

    pub const ORANGE: Vec3 = Vec3::new(1.0, 165.0 / 255.0, 0.0);
    pub const SKY_BLUE: Vec3 = Vec3::new(135.0 / 255.0, 206.0 / 255.0, 235.0 / 255.0);
    pub const LIME_GREEN: Vec3 = Vec3::new(50.0 / 255.0, 205.0 / 255.0, 50.0 / 255.0);
    pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
    pub const GREEN: Vec3 = Vec3::new(0.0, 128.0 / 255.0, 0.0);
    pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
    pub const TAN: Vec3 = Vec3::new(217.0 / 255.0, 191.0 / 255.0, 163.0 / 255.0);
    pub const WHITE: Vec3 = Vec3::ONE;

    pub fn by_name(name: &str) -> Option<Vec3> {
        match name {
            "orange" => Some(ORANGE),
            "skyblue" => Some(SKY_BLUE),
            "limegreen" => Some(LIME_GREEN),
            "red" => Some(RED),
            "green" => Some(GREEN),
            "blue" => Some(BLUE),
            "tan" => Some(TAN),
            "white" => Some(WHITE),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Vec3,
    pub metalness: f32,
    pub roughness: f32,
}

impl Material {
    pub fn colored(color: Vec3) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: palette::WHITE,
            metalness: 0.0,
            roughness: 1.0,
        }
    }
}

/// How meshes are presented, switchable at runtime without touching
/// the objects' own materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Default,
    Edges,
    Wireframe,
    Points,
}

impl ViewMode {
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Default => "default",
            ViewMode::Edges => "edges",
            ViewMode::Wireframe => "wireframe",
            ViewMode::Points => "points",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ViewMode::Default),
            "edges" => Ok(ViewMode::Edges),
            "wireframe" => Ok(ViewMode::Wireframe),
            "points" => Ok(ViewMode::Points),
            other => Err(format!(
                "unknown view mode {other:?}, expected one of: default, edges, wireframe, points"
            )),
        }
    }
}

/// Resolved appearance of one draw item under the active view mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Representation {
    Solid {
        color: Vec3,
        metalness: f32,
        roughness: f32,
    },
    SolidWithEdges {
        color: Vec3,
        edge_color: Vec3,
    },
    Wireframe {
        color: Vec3,
    },
    Points {
        color: Vec3,
        size: f32,
    },
}

pub fn representation(mode: ViewMode, material: &Material) -> Representation {
    match mode {
        ViewMode::Default => Representation::Solid {
            color: material.color,
            metalness: material.metalness,
            roughness: material.roughness,
        },
        ViewMode::Edges => Representation::SolidWithEdges {
            color: material.color,
            edge_color: palette::RED,
        },
        ViewMode::Wireframe => Representation::Wireframe {
            color: palette::ORANGE,
        },
        ViewMode::Points => Representation::Points {
            color: palette::BLUE,
            size: 0.02,
        },
    }
}
