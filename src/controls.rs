use std::f32::consts::PI;
use std::ops::RangeInclusive;

pub const ROTATION_Y_RANGE: RangeInclusive<f32> = -PI..=PI;
pub const POSITION_X_RANGE: RangeInclusive<f32> = -5.0..=5.0;
pub const GLOBAL_SCALE_RANGE: RangeInclusive<f32> = 0.5..=2.0;
pub const ROTATION_SPEED_RANGE: RangeInclusive<f32> = 0.0..=0.1;

/// Slider state shared with every frame update. Animators read these;
/// nothing here writes back, so one copy per frame is enough.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlState {
    /// Pose rotation around Y, in radians.
    pub rotation_y: f32,
    pub position_x: f32,
    pub global_scale: f32,
    /// Radians advanced per frame by self-rotating items.
    pub rotation_speed: f32,
}

impl ControlState {
    pub fn clamped(self) -> Self {
        fn clamp(value: f32, range: &RangeInclusive<f32>) -> f32 {
            value.clamp(*range.start(), *range.end())
        }

        Self {
            rotation_y: clamp(self.rotation_y, &ROTATION_Y_RANGE),
            position_x: clamp(self.position_x, &POSITION_X_RANGE),
            global_scale: clamp(self.global_scale, &GLOBAL_SCALE_RANGE),
            rotation_speed: clamp(self.rotation_speed, &ROTATION_SPEED_RANGE),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self {
            rotation_y: 0.0,
            position_x: 0.0,
            global_scale: 1.0,
            rotation_speed: 0.01,
        }
    }
}
