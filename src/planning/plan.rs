//! Full coverage plan: perimeter first, then the interior spiral.

use super::perimeter::PerimeterTrace;
use super::spiral::InwardSpiral;
use crate::core::GridCoord;

/// How a planned cell is recorded in the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkKind {
    /// Boundary cell from the perimeter trace
    Edge,
    /// Interior cell from the spiral
    Path,
}

/// One planned cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedCell {
    /// Target cell
    pub coord: GridCoord,
    /// How to mark it on arrival
    pub mark: MarkKind,
}

/// Perimeter trace followed by the inward spiral
#[derive(Clone, Debug)]
pub struct CoveragePlan {
    perimeter: PerimeterTrace,
    spiral: InwardSpiral,
}

impl CoveragePlan {
    /// Plan for a surface of the given size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            perimeter: PerimeterTrace::new(width, height),
            spiral: InwardSpiral::new(width, height),
        }
    }
}

impl Iterator for CoveragePlan {
    type Item = PlannedCell;

    fn next(&mut self) -> Option<PlannedCell> {
        if let Some(coord) = self.perimeter.next() {
            return Some(PlannedCell {
                coord,
                mark: MarkKind::Edge,
            });
        }
        self.spiral.next().map(|coord| PlannedCell {
            coord,
            mark: MarkKind::Path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_covers_whole_surface() {
        let (w, h) = (8, 6);
        let cells: Vec<PlannedCell> = CoveragePlan::new(w, h).collect();
        assert_eq!(cells.len(), w * h);

        let edges = cells.iter().filter(|c| c.mark == MarkKind::Edge).count();
        assert_eq!(edges, 2 * (w + h) - 4);
        assert_eq!(cells[0].coord, GridCoord::new(0, 0));
        assert_eq!(cells[edges].coord, GridCoord::new(1, 1));
        assert_eq!(cells[edges].mark, MarkKind::Path);
    }

    #[test]
    fn test_perimeter_hands_off_next_to_spiral() {
        let cells: Vec<PlannedCell> = CoveragePlan::new(6, 6).collect();
        let last_edge = cells[19].coord;
        let first_path = cells[20].coord;
        assert_eq!(last_edge, GridCoord::new(0, 1));
        assert_eq!(last_edge.manhattan_distance(&first_path), 1);
    }
}
