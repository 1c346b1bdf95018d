//! Plain-text grid frames.
//!
//! One character per cell: `'R'` robot, `'E'` edge, `'.'` path, `' '`
//! unmarked, in that priority. Rows are newline-terminated and followed by
//! a rule of `width` dashes.

use crate::core::RobotPose;
use crate::grid::GridMap;

const ROBOT: char = 'R';
const EDGE: char = 'E';
const PATH: char = '.';
const EMPTY: char = ' ';
const RULE: char = '-';

/// Render the grid and robot position
pub fn render_frame(map: &GridMap, pose: &RobotPose) -> String {
    let (width, height) = (map.width(), map.height());
    let mut frame = String::with_capacity((width + 1) * (height + 1));

    for y in 0..height {
        let Some(row) = map.row(y) else {
            break;
        };
        for (x, cell) in row.iter().enumerate() {
            let ch = if pose.x == x as i32 && pose.y == y as i32 {
                ROBOT
            } else if cell.is_edge {
                EDGE
            } else if cell.on_path {
                PATH
            } else {
                EMPTY
            };
            frame.push(ch);
        }
        frame.push('\n');
    }

    frame.extend(std::iter::repeat_n(RULE, width));
    frame.push('\n');
    frame
}
