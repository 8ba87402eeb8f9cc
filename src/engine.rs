//! Fixed-timestep frame loop.

use std::thread;
use std::time::{Duration, Instant};

use crate::animation::FrameContext;
use crate::controls::ControlState;
use crate::demos::Demo;

#[derive(Debug)]
pub struct RunReport {
    pub frames: u32,
    /// Draw list size on the last frame.
    pub draw_items: usize,
    pub elapsed: Duration,
}

/// Steps `demo` through `frames` frames of `dt` simulated seconds each.
///
/// Frame time is synthesized from the frame index, so a run is
/// reproducible regardless of how long updates actually take. Wall
/// time still passes between frames, which lets background loads land
/// mid-run.
pub fn run(demo: &mut dyn Demo, frames: u32, dt: f32, controls: ControlState) -> RunReport {
    let started = Instant::now();

    log::debug!(
        "camera at {}, {} light(s)",
        demo.camera().eye,
        demo.lights().len()
    );

    let mut overlay = None;
    let mut draw_items = 0;

    for frame in 0..frames {
        let ctx = FrameContext {
            time: frame as f32 * dt,
            delta: dt,
            controls,
        };

        demo.update(&ctx);
        draw_items = demo.draw_items().len();

        let current = demo.overlay();
        if current != overlay {
            if let Some(text) = &current {
                log::info!("{text}");
            }
            overlay = current;
        }

        thread::sleep(Duration::from_secs_f32(dt));
    }

    RunReport {
        frames,
        draw_items,
        elapsed: started.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Camera;
    use crate::light::Light;
    use crate::render::DrawItem;

    #[derive(Default)]
    struct CountingDemo {
        camera: Camera,
        times: Vec<f32>,
    }

    impl Demo for CountingDemo {
        fn camera(&self) -> &Camera {
            &self.camera
        }

        fn lights(&self) -> &[Light] {
            &[]
        }

        fn update(&mut self, ctx: &FrameContext) {
            self.times.push(ctx.time);
        }

        fn draw_items(&self) -> Vec<DrawItem> {
            Vec::new()
        }

        fn overlay(&self) -> Option<String> {
            Some(format!("{} frame(s)", self.times.len()))
        }
    }

    #[test]
    fn runs_the_requested_number_of_frames() {
        let mut demo = CountingDemo::default();
        let report = run(&mut demo, 5, 0.001, ControlState::default());

        assert_eq!(report.frames, 5);
        assert_eq!(demo.times.len(), 5);
        assert_eq!(report.draw_items, 0);
    }

    #[test]
    fn frame_time_advances_by_dt() {
        let mut demo = CountingDemo::default();
        // Powers of two keep the products exact.
        run(&mut demo, 4, 0.125, ControlState::default());

        assert_eq!(demo.times, vec![0.0, 0.125, 0.25, 0.375]);
    }
}
