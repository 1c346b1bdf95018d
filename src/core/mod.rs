//! Core types: coordinates, headings, pose, and the sensor/actuation
//! boundary types shared by every other module.

mod direction;
mod point;
mod pose;
mod types;

pub use direction::Direction;
pub use point::GridCoord;
pub use pose::RobotPose;
pub use types::{CliffReport, MotionRequest, SensorDirection};
