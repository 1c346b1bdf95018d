//! Tick-driven control loop.
//!
//! A [`Behavior`] decides what happens in one tick: it mutates the grid and
//! the pose and returns the motion requests it wants performed. The
//! [`Controller`] owns the run state, forwards requests to the actuator,
//! renders frames and checks the stop flag between ticks.
//!
//! ```text
//! ┌──────────┐  tick(map, pose)  ┌──────────┐
//! │Controller│ ────────────────► │ Behavior │  coverage plan / reactive
//! │          │ ◄──────────────── │          │
//! └────┬─────┘    TickRecord     └──────────┘
//!      │ execute(request)
//!      ▼
//! ┌──────────┐
//! │ Actuator │  stepper drive / simulated surface
//! └──────────┘
//! ```

mod coverage;
mod reactive;

pub use coverage::CoverageBehavior;
pub use reactive::{ReactiveBehavior, react};

use crate::actuation::Actuator;
use crate::config::AppConfig;
use crate::core::{CliffReport, MotionRequest, RobotPose};
use crate::grid::GridMap;
use crate::render::render_frame;
use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Result of one tick
#[derive(Clone, Debug, PartialEq)]
pub struct TickRecord {
    /// Requests to perform, in order
    pub requests: Vec<MotionRequest>,
    /// Fused sensor state, for behaviors that sample sensors
    pub cliffs: Option<CliffReport>,
    /// Pose after the tick
    pub pose: RobotPose,
}

/// A control strategy driven one tick at a time
pub trait Behavior {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Run one tick. `None` when the behavior has nothing left to do.
    fn tick(&mut self, map: &mut GridMap, pose: &mut RobotPose) -> Option<TickRecord>;
}

/// Why a run ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Behavior reported completion
    Finished,
    /// Running flag was cleared
    Stopped,
    /// Configured tick limit reached
    TickLimit,
}

/// Totals for one run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub requests: u64,
    pub edge_cells: usize,
    pub path_cells: usize,
    pub outcome: RunOutcome,
}

/// Owns the grid and pose for one run and drives a [`Behavior`]
pub struct Controller<A: Actuator> {
    map: GridMap,
    pose: RobotPose,
    actuator: A,
    running: Arc<AtomicBool>,
    tick_interval: Duration,
    render_every: u64,
    max_ticks: u64,
    frames: Option<Box<dyn Write>>,
    ticks: u64,
    requests: u64,
}

impl<A: Actuator> Controller<A> {
    /// Controller with no pacing, no rendering and no tick limit
    pub fn new(map: GridMap, pose: RobotPose, actuator: A) -> Self {
        Self {
            map,
            pose,
            actuator,
            running: Arc::new(AtomicBool::new(true)),
            tick_interval: Duration::ZERO,
            render_every: 0,
            max_ticks: 0,
            frames: None,
            ticks: 0,
            requests: 0,
        }
    }

    /// Controller for the configured grid, start pose and pacing
    pub fn from_config(config: &AppConfig, actuator: A) -> Self {
        Self::new(
            GridMap::new(config.grid.width, config.grid.height),
            config.start_pose(),
            actuator,
        )
        .with_tick_interval(config.controller.tick_interval())
        .with_render_every(config.controller.render_every)
        .with_max_ticks(config.controller.max_ticks)
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Render a frame every `every` ticks (0 = never)
    pub fn with_render_every(mut self, every: u64) -> Self {
        self.render_every = every;
        self
    }

    /// Stop after `max_ticks` ticks (0 = unlimited)
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = max_ticks;
        self
    }

    /// Destination for rendered frames
    pub fn with_frame_sink(mut self, sink: Box<dyn Write>) -> Self {
        self.frames = Some(sink);
        self
    }

    /// Share an externally owned running flag
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    /// Flag checked between ticks; clear it to stop the run
    pub fn running_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.running)
    }

    pub fn map(&self) -> &GridMap {
        &self.map
    }

    pub fn pose(&self) -> RobotPose {
        self.pose
    }

    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Ticks executed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one tick and perform its requests
    pub fn step<B: Behavior + ?Sized>(&mut self, behavior: &mut B) -> Option<TickRecord> {
        let record = behavior.tick(&mut self.map, &mut self.pose)?;
        self.ticks += 1;

        for &request in &record.requests {
            self.actuator.execute(request);
            self.requests += 1;
        }

        log::trace!(
            "tick {}: pose ({}, {}) {} after {} request(s)",
            self.ticks,
            self.pose.x,
            self.pose.y,
            self.pose.direction,
            record.requests.len()
        );

        if self.render_every > 0 && self.ticks % self.render_every == 0 {
            self.render();
        }
        Some(record)
    }

    /// Drive `behavior` until it finishes, the tick limit is hit, or the
    /// running flag is cleared
    pub fn run<B: Behavior + ?Sized>(&mut self, behavior: &mut B) -> RunSummary {
        log::info!(
            "Starting {} on {}x{} grid at ({}, {}) facing {}",
            behavior.name(),
            self.map.width(),
            self.map.height(),
            self.pose.x,
            self.pose.y,
            self.pose.direction
        );

        let outcome = loop {
            if !self.running.load(Ordering::Relaxed) {
                log::info!("Stop requested after {} ticks", self.ticks);
                break RunOutcome::Stopped;
            }
            if self.max_ticks > 0 && self.ticks >= self.max_ticks {
                break RunOutcome::TickLimit;
            }
            if self.step(behavior).is_none() {
                break RunOutcome::Finished;
            }
            if !self.tick_interval.is_zero() {
                std::thread::sleep(self.tick_interval);
            }
        };

        let summary = self.summary(outcome);
        log::info!(
            "{} ended ({:?}): {} ticks, {} requests, {} edge / {} path cells",
            behavior.name(),
            summary.outcome,
            summary.ticks,
            summary.requests,
            summary.edge_cells,
            summary.path_cells
        );
        summary
    }

    fn summary(&self, outcome: RunOutcome) -> RunSummary {
        RunSummary {
            ticks: self.ticks,
            requests: self.requests,
            edge_cells: self.map.edge_count(),
            path_cells: self.map.path_count(),
            outcome,
        }
    }

    fn render(&mut self) {
        let Some(sink) = self.frames.as_mut() else {
            return;
        };
        let frame = render_frame(&self.map, &self.pose);
        if let Err(e) = sink.write_all(frame.as_bytes()).and_then(|_| sink.flush()) {
            log::warn!("Dropping frame output: {}", e);
            self.frames = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuation::RecordingActuator;
    use crate::core::Direction;
    use std::sync::Mutex;

    /// Steps forward a fixed number of times
    struct Walk(u32);

    impl Behavior for Walk {
        fn name(&self) -> &'static str {
            "walk"
        }

        fn tick(&mut self, map: &mut GridMap, pose: &mut RobotPose) -> Option<TickRecord> {
            if self.0 == 0 {
                return None;
            }
            self.0 -= 1;
            map.mark_path(pose.x, pose.y);
            pose.step_forward();
            Some(TickRecord {
                requests: vec![MotionRequest::MoveForward { cells: 1 }],
                cliffs: None,
                pose: *pose,
            })
        }
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn controller() -> Controller<RecordingActuator> {
        Controller::new(
            GridMap::new(4, 4),
            RobotPose::new(0, 3, Direction::Up),
            RecordingActuator::new(),
        )
    }

    #[test]
    fn test_run_until_finished() {
        let mut ctrl = controller();
        let summary = ctrl.run(&mut Walk(3));

        assert_eq!(summary.outcome, RunOutcome::Finished);
        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.requests, 3);
        assert_eq!(summary.path_cells, 3);
        assert_eq!(ctrl.pose().position(), crate::core::GridCoord::new(0, 0));
        assert_eq!(ctrl.actuator().requests().len(), 3);
    }

    #[test]
    fn test_tick_limit() {
        let mut ctrl = controller().with_max_ticks(2);
        let summary = ctrl.run(&mut Walk(10));
        assert_eq!(summary.outcome, RunOutcome::TickLimit);
        assert_eq!(summary.ticks, 2);
    }

    #[test]
    fn test_cleared_flag_stops_before_next_tick() {
        let mut ctrl = controller();
        ctrl.running_flag().store(false, Ordering::Relaxed);
        let summary = ctrl.run(&mut Walk(10));
        assert_eq!(summary.outcome, RunOutcome::Stopped);
        assert_eq!(summary.ticks, 0);
        assert!(ctrl.map().iter().all(|(_, c)| c.is_unmarked()));
    }

    #[test]
    fn test_frames_rendered_every_n_ticks() {
        let buffer = SharedBuffer::default();
        let mut ctrl = controller()
            .with_render_every(2)
            .with_frame_sink(Box::new(buffer.clone()));
        ctrl.run(&mut Walk(4));

        let output = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        let rules = output.lines().filter(|l| *l == "----").count();
        assert_eq!(rules, 2);
    }
}
