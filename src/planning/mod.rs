//! Fixed coverage patterns.
//!
//! Generators are pure iterators over grid dimensions. They never touch
//! the grid themselves; the caller decides how to mark each cell. Each one
//! is `Clone`, so a pattern can be restarted from a saved copy.
//!
//! - [`PerimeterTrace`]: clockwise walk of the boundary ring
//! - [`InwardSpiral`]: shrinking clockwise sweep of the interior
//! - [`CoveragePlan`]: perimeter then spiral, with the mark kind for each cell

mod perimeter;
mod plan;
mod spiral;

pub use perimeter::PerimeterTrace;
pub use plan::{CoveragePlan, MarkKind, PlannedCell};
pub use spiral::InwardSpiral;
