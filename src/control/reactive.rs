//! Reactive edge avoidance: no lookahead, one sensor sample per tick.

use super::{Behavior, TickRecord};
use crate::core::{CliffReport, MotionRequest, RobotPose};
use crate::grid::GridMap;
use crate::sensors::{DistanceSensor, DistanceSensorArray};

/// Apply one cliff report to the grid and pose.
///
/// Any triggered sensor marks the current cell as an edge; the cell is
/// always marked as path. A drop ahead turns the robot right in place,
/// otherwise it advances one cell and marks the cell it arrives on.
pub fn react(report: &CliffReport, map: &mut GridMap, pose: &mut RobotPose) -> MotionRequest {
    if report.any_triggered() {
        map.mark_edge(pose.x, pose.y);
    }
    map.mark_path(pose.x, pose.y);

    if report.front {
        pose.turn_right();
        MotionRequest::TurnRight
    } else {
        pose.step_forward();
        map.mark_path(pose.x, pose.y);
        MotionRequest::MoveForward { cells: 1 }
    }
}

/// Sensor-driven behavior; never finishes on its own
pub struct ReactiveBehavior<S> {
    sensors: DistanceSensorArray<S>,
}

impl<S: DistanceSensor> ReactiveBehavior<S> {
    pub fn new(sensors: DistanceSensorArray<S>) -> Self {
        Self { sensors }
    }

    pub fn sensors(&self) -> &DistanceSensorArray<S> {
        &self.sensors
    }
}

impl<S: DistanceSensor> Behavior for ReactiveBehavior<S> {
    fn name(&self) -> &'static str {
        "reactive"
    }

    fn tick(&mut self, map: &mut GridMap, pose: &mut RobotPose) -> Option<TickRecord> {
        let report = self.sensors.read_cliff_report();
        if report.any_triggered() {
            log::debug!("Cliff at ({}, {}): {:?}", pose.x, pose.y, report);
        }

        let request = react(&report, map, pose);
        Some(TickRecord {
            requests: vec![request],
            cliffs: Some(report),
            pose: *pose,
        })
    }
}
