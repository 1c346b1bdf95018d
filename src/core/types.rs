//! Sensor and actuation boundary types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Mounting position of a downward-facing distance sensor, relative to the body
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SensorDirection {
    /// Ahead of the drive axis
    Front,
    /// Behind the drive axis
    Back,
    /// Left flank
    Left,
    /// Right flank
    Right,
}

impl SensorDirection {
    /// All mounted sensors
    pub const ALL: [SensorDirection; 4] = [
        SensorDirection::Front,
        SensorDirection::Back,
        SensorDirection::Left,
        SensorDirection::Right,
    ];

    /// Short name used in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorDirection::Front => "front",
            SensorDirection::Back => "back",
            SensorDirection::Left => "left",
            SensorDirection::Right => "right",
        }
    }
}

impl fmt::Display for SensorDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fused drop-off state, one flag per sensor
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CliffReport {
    /// Drop-off ahead
    pub front: bool,
    /// Drop-off behind
    pub back: bool,
    /// Drop-off on the left
    pub left: bool,
    /// Drop-off on the right
    pub right: bool,
}

impl CliffReport {
    /// Report with every sensor clear
    pub const CLEAR: CliffReport = CliffReport {
        front: false,
        back: false,
        left: false,
        right: false,
    };

    /// Check if any sensor reports a drop-off
    #[inline]
    pub fn any_triggered(&self) -> bool {
        self.front || self.back || self.left || self.right
    }

    /// Flag for one sensor
    #[inline]
    pub fn get(&self, sensor: SensorDirection) -> bool {
        match sensor {
            SensorDirection::Front => self.front,
            SensorDirection::Back => self.back,
            SensorDirection::Left => self.left,
            SensorDirection::Right => self.right,
        }
    }

    /// Set the flag for one sensor
    #[inline]
    pub fn set(&mut self, sensor: SensorDirection, cliff: bool) {
        match sensor {
            SensorDirection::Front => self.front = cliff,
            SensorDirection::Back => self.back = cliff,
            SensorDirection::Left => self.left = cliff,
            SensorDirection::Right => self.right = cliff,
        }
    }
}

/// Motion requested from the actuation layer
///
/// The control core only issues the grid primitives (`MoveForward`,
/// `TurnRight`, `TurnLeft`). `Straight` and `Rotate` carry free-form
/// amounts for teleoperation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionRequest {
    /// Drive forward a whole number of cells
    MoveForward {
        /// Number of cells
        cells: u32,
    },
    /// Clockwise quarter turn in place
    TurnRight,
    /// Counterclockwise quarter turn in place
    TurnLeft,
    /// Straight travel (negative for backward)
    Straight {
        /// Distance in millimetres
        millimeters: f32,
    },
    /// Tank turn in place (positive = clockwise)
    Rotate {
        /// Angle in degrees
        degrees: f32,
    },
}

impl MotionRequest {
    /// Get request type as string
    pub fn request_type(&self) -> &'static str {
        match self {
            Self::MoveForward { .. } => "move_forward",
            Self::TurnRight => "turn_right",
            Self::TurnLeft => "turn_left",
            Self::Straight { .. } => "straight",
            Self::Rotate { .. } => "rotate",
        }
    }

    /// Check if this is one of the grid primitives
    pub fn is_grid_primitive(&self) -> bool {
        matches!(
            self,
            Self::MoveForward { .. } | Self::TurnRight | Self::TurnLeft
        )
    }
}
