//! Inward spiral over the interior of a rectangle.

use crate::core::GridCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Leg {
    Top,
    Right,
    Bottom,
    Left,
}

/// Interior cells of a `width × height` rectangle, spiralling inward
///
/// The sweep starts one cell inside the border and walks the shrinking
/// ring clockwise:
///
/// ```text
///   top row    left → right, then top += 1
///   right col  top → bottom, then right -= 1
///   bottom row right → left, then bottom -= 1   (if rows remain)
///   left col   bottom → top, then left += 1     (if columns remain)
/// ```
///
/// Stops once `left > right` or `top > bottom`. Every interior cell is
/// yielded exactly once.
#[derive(Clone, Debug)]
pub struct InwardSpiral {
    left: i32,
    right: i32,
    top: i32,
    bottom: i32,
    leg: Leg,
    offset: i32,
}

impl InwardSpiral {
    /// Spiral for a rectangle of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            left: 1,
            right: width as i32 - 2,
            top: 1,
            bottom: height as i32 - 2,
            leg: Leg::Top,
            offset: 0,
        }
    }

    /// Number of interior cells the spiral covers
    pub fn cell_total(width: usize, height: usize) -> usize {
        width.saturating_sub(2) * height.saturating_sub(2)
    }

    #[inline]
    fn finish_leg(&mut self, next: Leg) {
        self.leg = next;
        self.offset = 0;
    }
}

impl Iterator for InwardSpiral {
    type Item = GridCoord;

    fn next(&mut self) -> Option<GridCoord> {
        loop {
            if self.left > self.right || self.top > self.bottom {
                return None;
            }

            match self.leg {
                Leg::Top => {
                    let x = self.left + self.offset;
                    if x <= self.right {
                        self.offset += 1;
                        return Some(GridCoord::new(x, self.top));
                    }
                    self.top += 1;
                    self.finish_leg(Leg::Right);
                }
                Leg::Right => {
                    let y = self.top + self.offset;
                    if y <= self.bottom {
                        self.offset += 1;
                        return Some(GridCoord::new(self.right, y));
                    }
                    self.right -= 1;
                    self.finish_leg(Leg::Bottom);
                }
                Leg::Bottom => {
                    let x = self.right - self.offset;
                    if x >= self.left {
                        self.offset += 1;
                        return Some(GridCoord::new(x, self.bottom));
                    }
                    self.bottom -= 1;
                    self.finish_leg(Leg::Left);
                }
                Leg::Left => {
                    let y = self.bottom - self.offset;
                    if y >= self.top {
                        self.offset += 1;
                        return Some(GridCoord::new(self.left, y));
                    }
                    self.left += 1;
                    self.finish_leg(Leg::Top);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn spiral(w: usize, h: usize) -> Vec<(i32, i32)> {
        InwardSpiral::new(w, h).map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn test_spiral_order_5x5() {
        assert_eq!(
            spiral(5, 5),
            vec![
                (1, 1),
                (2, 1),
                (3, 1),
                (3, 2),
                (3, 3),
                (2, 3),
                (1, 3),
                (1, 2),
                (2, 2)
            ]
        );
    }

    #[test]
    fn test_covers_interior_once() {
        for w in 4..14 {
            for h in 4..14 {
                let cells = spiral(w, h);
                let unique: HashSet<_> = cells.iter().copied().collect();
                assert_eq!(cells.len(), (w - 2) * (h - 2), "{}x{}", w, h);
                assert_eq!(unique.len(), cells.len(), "{}x{}", w, h);
                for (x, y) in cells {
                    assert!(x >= 1 && y >= 1 && x <= w as i32 - 2 && y <= h as i32 - 2);
                }
                assert_eq!(InwardSpiral::cell_total(w, h), (w - 2) * (h - 2));
            }
        }
    }

    #[test]
    fn test_consecutive_cells_adjacent() {
        for (w, h) in [(30, 12), (6, 9), (9, 6), (5, 4)] {
            let cells = spiral(w, h);
            for pair in cells.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert_eq!((a.0 - b.0).abs() + (a.1 - b.1).abs(), 1, "{}x{}", w, h);
            }
        }
    }

    #[test]
    fn test_thin_interiors() {
        assert_eq!(spiral(5, 3), vec![(1, 1), (2, 1), (3, 1)]);
        assert_eq!(spiral(3, 5), vec![(1, 1), (1, 2), (1, 3)]);
        assert_eq!(spiral(3, 3), vec![(1, 1)]);
    }

    #[test]
    fn test_no_interior() {
        for (w, h) in [(0, 0), (1, 1), (2, 2), (2, 10), (10, 2), (1, 5)] {
            assert!(spiral(w, h).is_empty(), "{}x{}", w, h);
        }
    }

    #[test]
    fn test_exhausted_iterator_stays_done() {
        let mut it = InwardSpiral::new(4, 4);
        assert_eq!(it.by_ref().count(), 4);
        assert_eq!(it.next(), None);
        assert_eq!(it.next(), None);
    }
}
