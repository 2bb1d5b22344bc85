// neighbors.rs - Moore-neighborhood counts on a torus

use crate::{Cell, Grid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NeighborCounts {
    pub blue: u8,
    pub orange: u8,
}

impl NeighborCounts {
    pub const fn new(blue: u8, orange: u8) -> Self {
        Self { blue, orange }
    }

    pub const fn total(self) -> u8 {
        self.blue + self.orange
    }
}

/// Counts Blue and Orange cells among the 8 wrapped neighbors of `(x, y)`.
///
/// Offsets are applied as `(x + dx + width) % width`, so on grids narrower
/// than 3 the same cell can be visited more than once and each visit counts.
pub fn count_neighbors(grid: &Grid, x: usize, y: usize) -> NeighborCounts {
    let (width, height) = (grid.width(), grid.height());
    let mut counts = NeighborCounts::default();

    // dx + width for dx in -1..=1
    for oy in [height - 1, height, height + 1] {
        let ny = (y + oy) % height;
        let row = grid.row(ny);
        for ox in [width - 1, width, width + 1] {
            if ox == width && oy == height {
                continue; // the cell itself
            }
            match row[(x + ox) % width] {
                Cell::Blue => counts.blue += 1,
                Cell::Orange => counts.orange += 1,
                _ => {}
            }
        }
    }
    counts
}
