//! Simulated working surface for hardware-free runs.
//!
//! [`SimulatedSurface`] stands in for the physical world on both sides of
//! the control core:
//!
//! | Boundary | Simulation |
//! |----------|------------|
//! | Distance sensors | Probe the cell next to the robot on each side: panel range on the surface, drop range (or no echo) off it |
//! | Actuation | Apply requests to the true robot pose |
//!
//! The controller code is identical to a physical run; only the sensor and
//! actuator handed to it change.

mod noise;

use crate::actuation::Actuator;
use crate::config::SimulationConfig;
use crate::core::{GridCoord, MotionRequest, RobotPose, SensorDirection};
use crate::error::Result;
use crate::sensors::DistanceSensor;
use noise::RangeNoise;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

struct SurfaceState {
    width: usize,
    height: usize,
    pose: RobotPose,
    noise: RangeNoise,
    floor_distance_cm: f32,
    /// `None`: ground is out of sensor range past the edge
    drop_distance_cm: Option<f32>,
    cell_size_mm: f32,
    /// Teleop travel not yet amounting to a whole cell
    travel_residual_mm: f32,
    /// Teleop rotation not yet amounting to a quarter turn
    heading_residual_deg: f32,
    executed: Vec<MotionRequest>,
}

impl SurfaceState {
    fn on_surface(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    fn apply(&mut self, request: MotionRequest) {
        match request {
            MotionRequest::MoveForward { cells } => {
                for _ in 0..cells {
                    self.pose.step_forward();
                }
            }
            MotionRequest::TurnRight => self.pose.turn_right(),
            MotionRequest::TurnLeft => self.pose.turn_left(),
            MotionRequest::Straight { millimeters } => {
                self.travel_residual_mm += millimeters;
                while self.travel_residual_mm >= self.cell_size_mm {
                    self.travel_residual_mm -= self.cell_size_mm;
                    self.pose.step_forward();
                }
                // Reversing keeps the heading; step back along it
                while self.travel_residual_mm <= -self.cell_size_mm {
                    self.travel_residual_mm += self.cell_size_mm;
                    let back = self.pose.position() + self.pose.direction.opposite().delta();
                    self.pose.x = back.x;
                    self.pose.y = back.y;
                }
            }
            MotionRequest::Rotate { degrees } => {
                self.heading_residual_deg += degrees;
                while self.heading_residual_deg >= 90.0 {
                    self.heading_residual_deg -= 90.0;
                    self.pose.turn_right();
                }
                while self.heading_residual_deg <= -90.0 {
                    self.heading_residual_deg += 90.0;
                    self.pose.turn_left();
                }
            }
        }
        self.executed.push(request);
    }
}

/// Rectangular panel with a simulated robot on it
///
/// Clones share state, so one handle can serve as the sensor source and
/// another as the actuator.
#[derive(Clone)]
pub struct SimulatedSurface {
    inner: Arc<Mutex<SurfaceState>>,
}

impl SimulatedSurface {
    /// Create a `width × height` surface with the robot at `start`
    pub fn new(
        width: usize,
        height: usize,
        start: RobotPose,
        config: &SimulationConfig,
        cell_size_mm: f32,
    ) -> Self {
        let drop_distance_cm = if config.drop_distance_cm > 0.0 {
            Some(config.drop_distance_cm)
        } else {
            None
        };
        Self {
            inner: Arc::new(Mutex::new(SurfaceState {
                width,
                height,
                pose: start,
                noise: RangeNoise::from_config(config),
                floor_distance_cm: config.floor_distance_cm,
                drop_distance_cm,
                cell_size_mm,
                travel_residual_mm: 0.0,
                heading_residual_deg: 0.0,
                executed: Vec::new(),
            })),
        }
    }

    /// Noise-free surface, for deterministic runs
    pub fn ideal(width: usize, height: usize, start: RobotPose) -> Self {
        let config = SimulationConfig {
            range_stddev_cm: 0.0,
            miss_rate: 0.0,
            ..SimulationConfig::default()
        };
        Self::new(width, height, start, &config, 100.0)
    }

    fn lock(&self) -> MutexGuard<'_, SurfaceState> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// True robot pose
    pub fn pose(&self) -> RobotPose {
        self.lock().pose
    }

    /// Move the robot without issuing a request
    pub fn place(&self, pose: RobotPose) {
        self.lock().pose = pose;
    }

    /// Check if a cell is part of the panel
    pub fn on_surface(&self, coord: GridCoord) -> bool {
        self.lock().on_surface(coord)
    }

    /// Requests executed so far
    pub fn executed(&self) -> Vec<MotionRequest> {
        self.lock().executed.clone()
    }
}

impl DistanceSensor for SimulatedSurface {
    fn read_distance(
        &mut self,
        sensor: SensorDirection,
        _timeout: Duration,
    ) -> Result<Option<f32>> {
        let mut state = self.lock();
        let probe = state.pose.position() + state.pose.heading_of(sensor).delta();
        let base = if state.on_surface(probe) {
            Some(state.floor_distance_cm)
        } else {
            state.drop_distance_cm
        };
        Ok(state.noise.perturb(base))
    }
}

impl Actuator for SimulatedSurface {
    fn execute(&mut self, request: MotionRequest) {
        let mut state = self.lock();
        state.apply(request);
        if !state.on_surface(state.pose.position()) {
            log::warn!(
                "Simulated robot left the surface at ({}, {})",
                state.pose.x,
                state.pose.y
            );
        }
    }
}
