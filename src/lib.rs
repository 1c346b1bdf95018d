//! # Parikrama
//!
//! Coverage and edge-avoidance control for a small robot working a
//! rectangular panel (solar panel, table top) with no walls around it.
//!
//! ## Overview
//!
//! The robot moves on a grid of cells. Position is exact: it only changes
//! through whole-cell moves the controller issues itself. Two strategies
//! share one control loop:
//!
//! - **Coverage**: trace the perimeter clockwise from the corner, then
//!   sweep the interior in an inward spiral
//! - **Reactive**: sample four downward distance sensors every tick, mark
//!   drop-offs as edges, and turn right whenever the way ahead falls away
//!
//! ## Quick Start
//!
//! ```rust
//! use parikrama::control::{Controller, CoverageBehavior};
//! use parikrama::core::{Direction, RobotPose};
//! use parikrama::grid::GridMap;
//! use parikrama::sim::SimulatedSurface;
//!
//! let start = RobotPose::new(0, 0, Direction::Up);
//! let surface = SimulatedSurface::ideal(6, 4, start);
//!
//! let mut controller = Controller::new(GridMap::new(6, 4), start, surface.clone());
//! let summary = controller.run(&mut CoverageBehavior::new(6, 4));
//!
//! assert_eq!(summary.edge_cells + summary.path_cells, 24);
//! assert_eq!(surface.pose(), controller.pose());
//! ```
//!
//! ## Coordinate System
//!
//! - Origin at the top-left cell
//! - X: columns, growing right
//! - Y: rows, growing down (`Up` is `-y`)
//!
//! ## Backends
//!
//! Sensors and drive are reached through the [`sensors::DistanceSensor`]
//! and [`actuation::Actuator`] seams. Pin-level code sits behind
//! [`hardware::Hardware`], with an in-memory mock and a Raspberry Pi GPIO
//! backend (feature `raspberry-pi`). [`sim::SimulatedSurface`] replaces
//! both seams for hardware-free runs.

// Core types
pub mod core;

// Grid storage
pub mod grid;

// Perimeter and spiral generators
pub mod planning;

// Configuration and errors
pub mod config;
pub mod error;

// Pin I/O, sensing and drive
pub mod actuation;
pub mod hardware;
pub mod sensors;

// Control loop and strategies
pub mod control;

// Text frames
pub mod render;

// Simulated surface
pub mod sim;

// UDP teleoperation
pub mod teleop;

pub use config::AppConfig;
pub use control::{Behavior, Controller, CoverageBehavior, ReactiveBehavior, RunOutcome, RunSummary};
pub use crate::core::{CliffReport, Direction, GridCoord, MotionRequest, RobotPose, SensorDirection};
pub use error::{Error, Result};
pub use grid::{Cell, GridMap};
pub use render::render_frame;
