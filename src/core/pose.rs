//! Robot pose on the grid.
//!
//! Position is exact: it only changes through [`RobotPose::step_forward`],
//! one cell at a time, so there is no drift to correct. Bounds are not
//! checked here; the grid clamps its own writes.

use super::direction::Direction;
use super::point::GridCoord;
use super::types::SensorDirection;
use serde::{Deserialize, Serialize};

/// Position and heading of the robot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RobotPose {
    /// Column
    pub x: i32,
    /// Row
    pub y: i32,
    /// Heading
    pub direction: Direction,
}

impl RobotPose {
    /// Create a pose
    #[inline]
    pub fn new(x: i32, y: i32, direction: Direction) -> Self {
        Self { x, y, direction }
    }

    /// Current cell
    #[inline]
    pub fn position(&self) -> GridCoord {
        GridCoord::new(self.x, self.y)
    }

    /// Counterclockwise quarter turn in place
    #[inline]
    pub fn turn_left(&mut self) {
        self.direction = self.direction.counter_clockwise();
    }

    /// Clockwise quarter turn in place
    #[inline]
    pub fn turn_right(&mut self) {
        self.direction = self.direction.clockwise();
    }

    /// Move one cell along the current heading
    #[inline]
    pub fn step_forward(&mut self) {
        let next = self.position() + self.direction.delta();
        self.x = next.x;
        self.y = next.y;
    }

    /// Cell directly ahead of the robot
    #[inline]
    pub fn cell_ahead(&self) -> GridCoord {
        self.position() + self.direction.delta()
    }

    /// World heading of a body-mounted sensor
    pub fn heading_of(&self, sensor: SensorDirection) -> Direction {
        match sensor {
            SensorDirection::Front => self.direction,
            SensorDirection::Right => self.direction.clockwise(),
            SensorDirection::Back => self.direction.opposite(),
            SensorDirection::Left => self.direction.counter_clockwise(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_left_turns() {
        let mut pose = RobotPose::new(3, 4, Direction::Down);
        for _ in 0..4 {
            pose.turn_left();
        }
        assert_eq!(pose, RobotPose::new(3, 4, Direction::Down));
    }

    #[test]
    fn test_four_right_turns() {
        let mut pose = RobotPose::new(0, 0, Direction::Left);
        for _ in 0..4 {
            pose.turn_right();
        }
        assert_eq!(pose.direction, Direction::Left);
    }

    #[test]
    fn test_turns_keep_position() {
        let mut pose = RobotPose::new(2, 2, Direction::Up);
        pose.turn_right();
        assert_eq!(pose.position(), GridCoord::new(2, 2));
        assert_eq!(pose.direction, Direction::Right);
        pose.turn_left();
        pose.turn_left();
        assert_eq!(pose.direction, Direction::Left);
    }

    #[test]
    fn test_step_forward_unit_vectors() {
        let cases = [
            (Direction::Up, (0, -1)),
            (Direction::Down, (0, 1)),
            (Direction::Left, (-1, 0)),
            (Direction::Right, (1, 0)),
        ];
        for (direction, (dx, dy)) in cases {
            let mut pose = RobotPose::new(5, 5, direction);
            pose.step_forward();
            assert_eq!(pose.x, 5 + dx);
            assert_eq!(pose.y, 5 + dy);
            assert_eq!(pose.direction, direction);
        }
    }

    #[test]
    fn test_step_forward_unbounded() {
        let mut pose = RobotPose::new(0, 0, Direction::Up);
        pose.step_forward();
        pose.step_forward();
        assert_eq!(pose.position(), GridCoord::new(0, -2));
    }

    #[test]
    fn test_sensor_headings() {
        let pose = RobotPose::new(0, 0, Direction::Right);
        assert_eq!(pose.heading_of(SensorDirection::Front), Direction::Right);
        assert_eq!(pose.heading_of(SensorDirection::Right), Direction::Down);
        assert_eq!(pose.heading_of(SensorDirection::Back), Direction::Left);
        assert_eq!(pose.heading_of(SensorDirection::Left), Direction::Up);
    }
}
