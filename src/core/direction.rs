//! Heading of the robot on the grid.
//!
//! Orientation is a closed set of four states. Quarter turns move through
//! an explicit transition table, so there is no integer wraparound to get
//! wrong:
//!
//! ```text
//!             Up
//!              ↑
//!   Left ←─────┼─────→ Right      turn_right: Up → Right → Down → Left → Up
//!              ↓                  turn_left:  Up → Left → Down → Right → Up
//!            Down
//! ```

use super::point::GridCoord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four grid headings
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward row 0
    #[default]
    Up,
    /// Toward increasing x
    Right,
    /// Toward increasing y
    Down,
    /// Toward column 0
    Left,
}

impl Direction {
    /// All headings in clockwise order starting at `Up`
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Heading after a clockwise quarter turn
    #[inline]
    pub fn clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    /// Heading after a counterclockwise quarter turn
    #[inline]
    pub fn counter_clockwise(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Reverse heading
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Unit cell offset for one step in this heading
    #[inline]
    pub fn delta(self) -> GridCoord {
        match self {
            Direction::Up => GridCoord::new(0, -1),
            Direction::Right => GridCoord::new(1, 0),
            Direction::Down => GridCoord::new(0, 1),
            Direction::Left => GridCoord::new(-1, 0),
        }
    }

    /// Heading matching a unit offset, if it is one
    pub fn from_delta(delta: GridCoord) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.delta() == delta)
    }

    /// Number of clockwise quarter turns needed to reach `target`
    pub fn clockwise_turns_to(self, target: Direction) -> u8 {
        let mut heading = self;
        let mut turns = 0;
        while heading != target {
            heading = heading.clockwise();
            turns += 1;
        }
        turns
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        };
        f.write_str(name)
    }
}
