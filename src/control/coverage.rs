//! Fixed-pattern coverage: perimeter trace, then inward spiral.
//!
//! Each tick takes the next planned cell, routes the robot to it with grid
//! primitives (along x first, then y) and marks it. Consecutive planned
//! cells are adjacent, so a tick is usually a single forward step with at
//! most one turn; routing only matters for the first cell and the hand-off
//! from perimeter to spiral.

use super::{Behavior, TickRecord};
use crate::core::{Direction, GridCoord, MotionRequest, RobotPose};
use crate::grid::GridMap;
use crate::planning::{CoveragePlan, MarkKind};

/// Turn in place until facing `target`
fn face(pose: &mut RobotPose, target: Direction, requests: &mut Vec<MotionRequest>) {
    match pose.direction.clockwise_turns_to(target) {
        0 => {}
        3 => {
            pose.turn_left();
            requests.push(MotionRequest::TurnLeft);
        }
        turns => {
            for _ in 0..turns {
                pose.turn_right();
                requests.push(MotionRequest::TurnRight);
            }
        }
    }
}

/// Drive `cells` along `direction`, one cell per request
fn travel(
    pose: &mut RobotPose,
    direction: Direction,
    cells: u32,
    requests: &mut Vec<MotionRequest>,
) {
    if cells == 0 {
        return;
    }
    face(pose, direction, requests);
    for _ in 0..cells {
        pose.step_forward();
        requests.push(MotionRequest::MoveForward { cells: 1 });
    }
}

/// Primitives that take `pose` to `target`, x axis first
pub fn route_to(pose: &mut RobotPose, target: GridCoord) -> Vec<MotionRequest> {
    let mut requests = Vec::new();

    let dx = target.x - pose.x;
    let heading = if dx > 0 { Direction::Right } else { Direction::Left };
    travel(pose, heading, dx.unsigned_abs(), &mut requests);

    let dy = target.y - pose.y;
    let heading = if dy > 0 { Direction::Down } else { Direction::Up };
    travel(pose, heading, dy.unsigned_abs(), &mut requests);

    requests
}

/// Walks a [`CoveragePlan`] cell by cell
pub struct CoverageBehavior {
    plan: CoveragePlan,
    visited: usize,
}

impl CoverageBehavior {
    /// Full plan (perimeter and spiral) for a surface
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_plan(CoveragePlan::new(width, height))
    }

    pub fn with_plan(plan: CoveragePlan) -> Self {
        Self { plan, visited: 0 }
    }

    /// Planned cells reached so far
    pub fn visited(&self) -> usize {
        self.visited
    }
}

impl Behavior for CoverageBehavior {
    fn name(&self) -> &'static str {
        "coverage"
    }

    fn tick(&mut self, map: &mut GridMap, pose: &mut RobotPose) -> Option<TickRecord> {
        let cell = self.plan.next()?;
        let requests = route_to(pose, cell.coord);

        match cell.mark {
            MarkKind::Edge => map.mark_edge(cell.coord.x, cell.coord.y),
            MarkKind::Path => map.mark_path(cell.coord.x, cell.coord.y),
        }
        self.visited += 1;

        Some(TickRecord {
            requests,
            cliffs: None,
            pose: *pose,
        })
    }
}
