//! Clockwise perimeter trace.

use crate::core::GridCoord;

/// Boundary cells of a `width × height` rectangle in clockwise order
///
/// Starts at `(0, 0)`, runs along the top row, down the right column,
/// back along the bottom row and up the left column. Shared corners are
/// yielded once, so a `w × h` rectangle with `w, h >= 2` produces
/// `2·(w + h) − 4` cells. A single row or column degenerates to that row
/// or column; a zero dimension yields nothing.
#[derive(Clone, Debug)]
pub struct PerimeterTrace {
    width: i32,
    height: i32,
    index: usize,
    len: usize,
}

impl PerimeterTrace {
    /// Trace for a rectangle of the given size
    pub fn new(width: usize, height: usize) -> Self {
        let len = match (width, height) {
            (0, _) | (_, 0) => 0,
            (w, 1) => w,
            (1, h) => h,
            (w, h) => 2 * (w + h) - 4,
        };
        Self {
            width: width as i32,
            height: height as i32,
            index: 0,
            len,
        }
    }

    /// Number of cells in the full trace
    pub fn cell_total(&self) -> usize {
        self.len
    }

    fn cell(&self, index: usize) -> GridCoord {
        let (w, h) = (self.width, self.height);
        let mut i = index as i32;

        if i < w {
            return GridCoord::new(i, 0);
        }
        i -= w;
        if i < h - 1 {
            return GridCoord::new(w - 1, 1 + i);
        }
        i -= h - 1;
        if i < w - 1 {
            return GridCoord::new(w - 2 - i, h - 1);
        }
        i -= w - 1;
        GridCoord::new(0, h - 2 - i)
    }
}

impl Iterator for PerimeterTrace {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        if self.index >= self.len {
            return None;
        }
        let coord = self.cell(self.index);
        self.index += 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PerimeterTrace {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn trace(w: usize, h: usize) -> Vec<(i32, i32)> {
        PerimeterTrace::new(w, h).map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_small_rectangle_order() {
        assert_eq!(
            trace(3, 3),
            vec![
                (0, 0),
                (1, 0),
                (2, 0),
                (2, 1),
                (2, 2),
                (1, 2),
                (0, 2),
                (0, 1)
            ]
        );
        assert_eq!(trace(2, 2), vec![(0, 0), (1, 0), (1, 1), (0, 1)]);
    }

    #[test]
    fn test_cell_count_and_uniqueness() {
        for w in 2..12 {
            for h in 2..12 {
                let cells = trace(w, h);
                let unique: HashSet<_> = cells.iter().copied().collect();
                assert_eq!(cells.len(), 2 * (w + h) - 4, "{}x{}", w, h);
                assert_eq!(unique.len(), cells.len(), "{}x{}", w, h);
            }
        }
    }

    #[test]
    fn test_only_boundary_cells() {
        let (w, h) = (7, 5);
        for (x, y) in trace(w, h) {
            let on_boundary = x == 0 || y == 0 || x == w as i32 - 1 || y == h as i32 - 1;
            assert!(on_boundary, "({}, {}) is interior", x, y);
        }
    }

    #[test]
    fn test_consecutive_cells_adjacent() {
        let cells = trace(6, 4);
        for pair in cells.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            assert_eq!((a.0 - b.0).abs() + (a.1 - b.1).abs(), 1);
        }
    }

    #[test]
    fn test_degenerate_shapes() {
        assert_eq!(trace(4, 1), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(trace(1, 3), vec![(0, 0), (0, 1), (0, 2)]);
        assert_eq!(trace(1, 1), vec![(0, 0)]);
        assert!(trace(0, 5).is_empty());
        assert!(trace(5, 0).is_empty());
    }

    #[test]
    fn test_restartable_and_exact_size() {
        let trace = PerimeterTrace::new(5, 4);
        assert_eq!(trace.len(), 14);
        let first: Vec<_> = trace.clone().collect();
        let second: Vec<_> = trace.collect();
        assert_eq!(first, second);
    }
}
