// rule.rs - Per-cell transition rule
//
// Survival window is 3..=5 live neighbors, birth needs exactly 3 and takes
// the plurality color (Orange on ties). Dying cells fade through four
// tombstone steps that never count as neighbors.

use crate::neighbors::{NeighborCounts, count_neighbors};
use crate::{Cell, Grid};

pub const SURVIVAL_MIN: u8 = 3;
pub const SURVIVAL_MAX: u8 = 5;
pub const BIRTH_COUNT: u8 = 3;

/// Next state of a cell given its current state and neighbor counts.
pub fn transition(cell: Cell, counts: NeighborCounts) -> Cell {
    if let Some(next) = cell.decay() {
        return next;
    }

    let total = counts.total();
    match cell {
        Cell::Blue | Cell::Orange => {
            if (SURVIVAL_MIN..=SURVIVAL_MAX).contains(&total) {
                cell
            } else {
                Cell::Dead
            }
        }
        _ if total == BIRTH_COUNT => {
            if counts.blue > counts.orange {
                Cell::Blue
            } else {
                Cell::Orange
            }
        }
        _ => Cell::Empty,
    }
}

/// Evaluates `(x, y)` of `grid`; decaying cells skip the neighbor scan.
#[inline]
pub fn next_state(grid: &Grid, x: usize, y: usize) -> Cell {
    let cell = grid.get(x, y);
    match cell.decay() {
        Some(next) => next,
        None => transition(cell, count_neighbors(grid, x, y)),
    }
}
