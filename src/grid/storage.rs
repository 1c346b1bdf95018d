//! Dense row-major cell storage.

use crate::core::GridCoord;

/// One grid cell. Both flags are independent and may be set together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Cell lies on (or was detected at) the surface boundary
    pub is_edge: bool,
    /// Robot has visited or is planned to visit this cell
    pub on_path: bool,
}

impl Cell {
    /// Check if neither flag is set
    #[inline]
    pub fn is_unmarked(&self) -> bool {
        !self.is_edge && !self.on_path
    }
}

/// Fixed-size coverage grid
///
/// Every write is bounds-clamped: marks outside `[0, width) × [0, height)`
/// are dropped without touching state or reporting an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl GridMap {
    /// Create an unmarked grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Width in cells
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Check if a coordinate lies inside the grid
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.contains(x, y) {
            Some(y as usize * self.width + x as usize)
        } else {
            None
        }
    }

    /// Mark a cell as edge. No-op outside the grid.
    pub fn mark_edge(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx].is_edge = true;
        }
    }

    /// Mark a cell as on-path. No-op outside the grid.
    pub fn mark_path(&mut self, x: i32, y: i32) {
        if let Some(idx) = self.index(x, y) {
            self.cells[idx].on_path = true;
        }
    }

    /// Read a cell, `None` outside the grid
    #[inline]
    pub fn cell_at(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Read a cell by coordinate, `None` outside the grid
    #[inline]
    pub fn get(&self, coord: GridCoord) -> Option<Cell> {
        self.cell_at(coord.x, coord.y)
    }

    /// Number of cells flagged as edge
    pub fn edge_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_edge).count()
    }

    /// Number of cells flagged as on-path
    pub fn path_count(&self) -> usize {
        self.cells.iter().filter(|c| c.on_path).count()
    }

    /// Reset every cell to unmarked
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Iterate over all cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            let coord = GridCoord::new((idx % width) as i32, (idx / width) as i32);
            (coord, *cell)
        })
    }

    /// Iterate over one row, `None` if the row is outside the grid
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y < self.height {
            let start = y * self.width;
            Some(&self.cells[start..start + self.width])
        } else {
            None
        }
    }
}
