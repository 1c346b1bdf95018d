//! Coverage grid for the working surface.
//!
//! Each cell carries two independent flags:
//!
//! - **edge**: boundary of the surface, either traced by the perimeter
//!   pattern or detected by a cliff sensor
//! - **path**: visited by the robot or covered by the spiral
//!
//! Coordinates are `(x, y)` with the origin in the top-left corner, `x`
//! growing right and `y` growing down.

mod storage;

pub use storage::{Cell, GridMap};
