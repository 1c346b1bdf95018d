//! Grid coordinate type

use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Grid coordinates (integer cell indices)
///
/// `x` grows to the right, `y` grows downward (row index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridCoord {
    /// X coordinate (column index)
    pub x: i32,
    /// Y coordinate (row index)
    pub y: i32,
}

impl GridCoord {
    /// Create a new grid coordinate
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another coordinate
    #[inline]
    pub fn manhattan_distance(&self, other: &GridCoord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

impl Add for GridCoord {
    type Output = GridCoord;

    #[inline]
    fn add(self, rhs: GridCoord) -> GridCoord {
        GridCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for GridCoord {
    #[inline]
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manhattan_distance() {
        let a = GridCoord::new(1, 2);
        let b = GridCoord::new(4, -2);
        assert_eq!(a.manhattan_distance(&b), 7);
        assert_eq!(b.manhattan_distance(&a), 7);
    }

    #[test]
    fn test_add() {
        assert_eq!(GridCoord::new(2, 2) + GridCoord::new(0, -1), GridCoord::new(2, 1));
    }
}
