//! Frame clock and the per-refresh update loop.
//!
//! One tick per display refresh: advance time, write it into the uniform
//! set, run the controls hook, render. The windowing layer schedules the
//! next tick by requesting a redraw; a stopped loop does nothing and is not
//! rescheduled.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::camera::Camera;
use crate::context::RenderContext;

/// Scene + renderer collaborator driven by the loop
pub trait FrameTarget {
    type Error;

    /// Controls/camera hook, runs before each render
    fn update_controls(&mut self, camera: &mut Camera);

    /// Issue one render of the surface with the current context
    fn render(&mut self, context: &RenderContext) -> Result<(), Self::Error>;
}

/// Monotonic animation time source
pub struct FrameClock {
    start: Instant,
    last_s: f32,
}

impl FrameClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
            last_s: 0.0,
        }
    }

    /// Wall-clock time since start
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Advance to `elapsed`, never going backwards; returns seconds
    pub fn advance(&mut self, elapsed: Duration) -> f32 {
        self.last_s = self.last_s.max(elapsed.as_secs_f32());
        self.last_s
    }

    /// Last time handed out (seconds)
    pub fn time_s(&self) -> f32 {
        self.last_s
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    /// A frame was issued at this animation time
    Rendered { time_s: f32 },
    /// The loop has been stopped; nothing was done
    Stopped,
    /// Nothing to present (zero-sized window); time was not advanced
    Skipped,
}

/// Rolling frame-rate statistics, reported once a second at debug level
pub struct FrameStats {
    frame_times: VecDeque<Duration>,
    last_frame: Option<Duration>,
    last_report: Duration,
    min_fps: f32,
    max_fps: f32,
}

impl FrameStats {
    const WINDOW: usize = 60;
    const REPORT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self {
            frame_times: VecDeque::with_capacity(Self::WINDOW),
            last_frame: None,
            last_report: Duration::ZERO,
            min_fps: f32::MAX,
            max_fps: 0.0,
        }
    }

    /// Record a frame issued at `now` (time since loop start)
    pub fn record_frame(&mut self, now: Duration) {
        if let Some(last) = self.last_frame {
            self.frame_times.push_back(now.saturating_sub(last));
            if self.frame_times.len() > Self::WINDOW {
                self.frame_times.pop_front();
            }

            let fps = self.current_fps();
            if fps > 0.0 {
                self.min_fps = self.min_fps.min(fps);
                self.max_fps = self.max_fps.max(fps);
            }
        }
        self.last_frame = Some(now);

        if now.saturating_sub(self.last_report) >= Self::REPORT_INTERVAL {
            let (min, avg, max) = self.stats();
            log::debug!("FPS - Min: {:.1}, Avg: {:.1}, Max: {:.1}", min, avg, max);
            self.last_report = now;
        }
    }

    /// Average over the rolling window
    pub fn current_fps(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total.as_secs_f32() / self.frame_times.len() as f32;

        if avg_frame_time > 0.0 {
            1.0 / avg_frame_time
        } else {
            0.0
        }
    }

    /// (min, avg, max) FPS
    pub fn stats(&self) -> (f32, f32, f32) {
        let min = if self.min_fps == f32::MAX { 0.0 } else { self.min_fps };
        (min, self.current_fps(), self.max_fps)
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

/// The update loop: owns the clock and the render context
pub struct FrameLoop {
    clock: FrameClock,
    context: RenderContext,
    state: LoopState,
    frames: u64,
    stats: FrameStats,
}

impl FrameLoop {
    /// Start in the running state with the clock at zero
    pub fn new(context: RenderContext) -> Self {
        Self {
            clock: FrameClock::start(),
            context,
            state: LoopState::Running,
            frames: 0,
            stats: FrameStats::new(),
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    /// Mutable access for event handlers between ticks
    pub fn context_mut(&mut self) -> &mut RenderContext {
        &mut self.context
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    /// Enter the stopped state (teardown); irreversible
    pub fn stop(&mut self) {
        if self.state == LoopState::Running {
            let (min, avg, max) = self.stats.stats();
            log::info!(
                "Frame loop stopped after {} frames (FPS min {:.1}, avg {:.1}, max {:.1})",
                self.frames,
                min,
                avg,
                max
            );
        }
        self.state = LoopState::Stopped;
    }

    /// Frames issued so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Run one tick at the current wall-clock time
    pub fn tick<T: FrameTarget>(&mut self, target: &mut T) -> Result<TickOutcome, T::Error> {
        let elapsed = self.clock.elapsed();
        self.tick_at(elapsed, target)
    }

    /// Run one tick as if `elapsed` had passed since the loop started
    pub fn tick_at<T: FrameTarget>(
        &mut self,
        elapsed: Duration,
        target: &mut T,
    ) -> Result<TickOutcome, T::Error> {
        if self.state == LoopState::Stopped {
            return Ok(TickOutcome::Stopped);
        }
        if !self.context.is_presentable() {
            return Ok(TickOutcome::Skipped);
        }

        let time_s = self.clock.advance(elapsed);
        self.context.uniforms.time = time_s;

        target.update_controls(&mut self.context.camera);
        target.render(&self.context)?;

        self.frames += 1;
        self.stats.record_frame(elapsed);

        Ok(TickOutcome::Rendered { time_s })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Viewport;
    use crate::params::{CameraParams, SceneParams, SurfaceParams};
    use glam::Vec3;

    /// Records what each render call saw
    #[derive(Default)]
    struct RecordingTarget {
        events: Vec<&'static str>,
        rendered_times: Vec<f32>,
        fail_next: bool,
    }

    impl FrameTarget for RecordingTarget {
        type Error = &'static str;

        fn update_controls(&mut self, camera: &mut Camera) {
            self.events.push("controls");
            camera.position.x += 1.0;
        }

        fn render(&mut self, context: &RenderContext) -> Result<(), Self::Error> {
            if self.fail_next {
                self.fail_next = false;
                return Err("surface lost");
            }
            self.events.push("render");
            self.rendered_times.push(context.uniforms.time);
            Ok(())
        }
    }

    fn frame_loop() -> FrameLoop {
        let viewport = Viewport::new(1280, 720, 1.0, 2.0);
        let camera = Camera::new(&CameraParams::default(), viewport.aspect());
        let context = RenderContext::new(
            viewport,
            camera,
            &SceneParams::default(),
            &SurfaceParams::default(),
            2.0,
        );
        FrameLoop::new(context)
    }

    #[test]
    fn test_clock_never_goes_backwards() {
        let mut clock = FrameClock::start();
        let samples = [0.0, 0.016, 0.033, 0.020, 0.050, 0.049, 1.0];
        let mut previous = 0.0;
        for s in samples {
            let t = clock.advance(Duration::from_secs_f32(s));
            assert!(t >= previous, "{} < {}", t, previous);
            previous = t;
        }
        assert_eq!(clock.time_s(), 1.0);
    }

    #[test]
    fn test_tick_order_and_time_uniform() {
        let mut frame_loop = frame_loop();
        let mut target = RecordingTarget::default();

        let outcome = frame_loop
            .tick_at(Duration::from_millis(16), &mut target)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Rendered { time_s: 0.016 });
        assert_eq!(target.events, vec!["controls", "render"]);
        assert_eq!(target.rendered_times, vec![0.016]);
        assert_eq!(frame_loop.context().uniforms.time, 0.016);
        assert_eq!(frame_loop.context().camera.position, Vec3::new(1.0, 5.0, 1.0));
        assert_eq!(frame_loop.frame_count(), 1);
    }

    #[test]
    fn test_time_monotonic_across_ticks() {
        let mut frame_loop = frame_loop();
        let mut target = RecordingTarget::default();

        // Variable, occasionally regressing refresh intervals
        let mut elapsed_ms = 0u64;
        for i in 0..240u64 {
            elapsed_ms += 7 + (i * 13) % 20;
            let sample = if i % 17 == 0 { elapsed_ms.saturating_sub(10) } else { elapsed_ms };
            frame_loop
                .tick_at(Duration::from_millis(sample), &mut target)
                .unwrap();
        }

        assert_eq!(target.rendered_times.len(), 240);
        assert!(target.rendered_times.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_stopped_loop_does_nothing() {
        let mut frame_loop = frame_loop();
        let mut target = RecordingTarget::default();

        frame_loop.tick_at(Duration::from_millis(16), &mut target).unwrap();
        frame_loop.stop();

        let outcome = frame_loop
            .tick_at(Duration::from_millis(32), &mut target)
            .unwrap();

        assert_eq!(outcome, TickOutcome::Stopped);
        assert_eq!(frame_loop.state(), LoopState::Stopped);
        assert_eq!(target.rendered_times, vec![0.016]);
        assert_eq!(frame_loop.context().uniforms.time, 0.016);
    }

    #[test]
    fn test_minimized_window_skips_render() {
        let mut frame_loop = frame_loop();
        let mut target = RecordingTarget::default();

        frame_loop.context_mut().resize(0, 0, 1.0);
        for ms in [16, 33, 50] {
            let outcome = frame_loop
                .tick_at(Duration::from_millis(ms), &mut target)
                .unwrap();
            assert_eq!(outcome, TickOutcome::Skipped);
        }
        assert!(target.events.is_empty());
        assert_eq!(frame_loop.frame_count(), 0);
        assert!(frame_loop.is_running());

        frame_loop.context_mut().resize(1280, 720, 1.0);
        let outcome = frame_loop
            .tick_at(Duration::from_millis(66), &mut target)
            .unwrap();
        assert_eq!(outcome, TickOutcome::Rendered { time_s: 0.066 });
        assert_eq!(target.events, vec!["controls", "render"]);
    }

    #[test]
    fn test_render_error_propagates_and_loop_continues() {
        let mut frame_loop = frame_loop();
        let mut target = RecordingTarget {
            fail_next: true,
            ..Default::default()
        };

        let err = frame_loop.tick_at(Duration::from_millis(16), &mut target);
        assert_eq!(err, Err("surface lost"));
        assert_eq!(frame_loop.frame_count(), 0);
        assert!(frame_loop.is_running());

        let ok = frame_loop.tick_at(Duration::from_millis(33), &mut target);
        assert_eq!(ok, Ok(TickOutcome::Rendered { time_s: 0.033 }));
    }

    #[test]
    fn test_frame_stats() {
        let mut stats = FrameStats::new();
        assert_eq!(stats.stats(), (0.0, 0.0, 0.0));

        for i in 0..=120u64 {
            stats.record_frame(Duration::from_millis(i * 20));
        }

        let (min, avg, max) = stats.stats();
        assert!((avg - 50.0).abs() < 0.01);
        assert!((min - 50.0).abs() < 0.01);
        assert!((max - 50.0).abs() < 0.01);
    }
}
