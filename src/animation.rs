use glam::Vec3;

use crate::controls::ControlState;
use crate::scene_graph::{ObjectId, Scene};

/// Per-frame timing and input, passed to every animator.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Seconds since the scene started running.
    pub time: f32,
    /// Seconds covered by this frame.
    pub delta: f32,
    pub controls: ControlState,
}

/// Mutates scene transforms once per frame. Animators target objects by
/// id; a target that no longer exists makes the frame a no-op rather
/// than an error.
pub trait Animator {
    fn apply(&mut self, scene: &mut Scene, ctx: &FrameContext);
}

/// Circles the target around the Y axis at `radius`, preserving its
/// height. One revolution per `2 * PI` seconds.
pub struct Orbit {
    pub target: ObjectId,
    pub radius: f32,
}

impl Animator for Orbit {
    fn apply(&mut self, scene: &mut Scene, ctx: &FrameContext) {
        let Some(transform) = scene.get_object_transform(self.target) else {
            return;
        };
        let y = transform.translation().y;

        scene.set_object_translation(
            self.target,
            Vec3::new(ctx.time.cos() * self.radius, y, ctx.time.sin() * self.radius),
        );
    }
}

/// Adds a fixed Euler delta every frame. The accumulated angles are
/// never wrapped.
pub struct Spin {
    pub target: ObjectId,
    /// Radians per frame, per axis.
    pub rate: Vec3,
}

impl Animator for Spin {
    fn apply(&mut self, scene: &mut Scene, _ctx: &FrameContext) {
        scene.rotate_object(self.target, self.rate);
    }
}

/// Breathing scale: `1 + amplitude * sin(time * frequency)`, applied
/// uniformly.
pub struct Pulse {
    pub target: ObjectId,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Animator for Pulse {
    fn apply(&mut self, scene: &mut Scene, ctx: &FrameContext) {
        let scale = 1.0 + self.amplitude * (ctx.time * self.frequency).sin();
        scene.set_object_uniform_scale(self.target, scale);
    }
}

/// Drives the target's Y rotation and X position straight from the
/// slider values.
pub struct SliderPose {
    pub target: ObjectId,
}

impl Animator for SliderPose {
    fn apply(&mut self, scene: &mut Scene, ctx: &FrameContext) {
        let Some(transform) = scene.get_object_transform(self.target) else {
            return;
        };
        let translation = transform.translation();
        let rotation = transform.rotation();

        scene.set_object_translation(
            self.target,
            Vec3::new(ctx.controls.position_x, translation.y, translation.z),
        );
        scene.set_object_rotation(
            self.target,
            Vec3::new(rotation.x, ctx.controls.rotation_y, rotation.z),
        );
    }
}

/// Spins the target around Y by the slider-controlled speed.
pub struct SliderSpin {
    pub target: ObjectId,
}

impl Animator for SliderSpin {
    fn apply(&mut self, scene: &mut Scene, ctx: &FrameContext) {
        scene.rotate_object(
            self.target,
            Vec3::new(0.0, ctx.controls.rotation_speed, 0.0),
        );
    }
}

/// Uniform scale of `base` times the global scale slider.
pub struct SliderScale {
    pub target: ObjectId,
    pub base: f32,
}

impl Animator for SliderScale {
    fn apply(&mut self, scene: &mut Scene, ctx: &FrameContext) {
        scene.set_object_uniform_scale(self.target, self.base * ctx.controls.global_scale);
    }
}
