// grid.rs - Toroidal grid storage and the current/next buffer pair

use crate::Cell;
use crate::scheduler::Scheduler;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be non-zero (got {width}x{height})")]
    ZeroDimension { width: usize, height: usize },
}

/// Fixed-size row-major grid of cells. Edges wrap for neighbor lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn same_shape(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        self.cells[y * self.width + x] = cell;
    }

    pub fn row(&self, y: usize) -> &[Cell] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.width)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn census(&self) -> Census {
        let mut counts = [0usize; 7];
        for &cell in &self.cells {
            counts[cell as usize] += 1;
        }
        Census { counts }
    }
}

/// Per-state cell counts for one generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Census {
    counts: [usize; 7],
}

impl Census {
    pub fn get(&self, cell: Cell) -> usize {
        self.counts[cell as usize]
    }

    pub fn living(&self) -> usize {
        self.get(Cell::Blue) + self.get(Cell::Orange)
    }

    pub fn decaying(&self) -> usize {
        self.counts[Cell::Dead as usize..].iter().sum()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// The double buffer. Only the owner of a `Generations` may swap.
#[derive(Debug, Clone)]
pub struct Generations {
    current: Grid,
    next: Grid,
    generation: u64,
}

impl Generations {
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        Ok(Self {
            current: Grid::new(width, height)?,
            next: Grid::new(width, height)?,
            generation: 0,
        })
    }

    /// Wraps an already populated grid; the next buffer is allocated to match.
    pub fn from_grid(current: Grid) -> Self {
        let next = Grid {
            width: current.width,
            height: current.height,
            cells: vec![Cell::Empty; current.cells.len()],
        };
        Self {
            current,
            next,
            generation: 0,
        }
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    /// Mutable access for seeding between generations.
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
    }

    /// Computes the next generation and makes it current.
    pub fn advance(&mut self, scheduler: &Scheduler) {
        self.advance_with(|current, next| scheduler.update(current, next));
    }

    /// Swaps only if `update` returns; an unwinding update leaves the
    /// generation unchanged.
    pub(crate) fn advance_with(&mut self, update: impl FnOnce(&Grid, &mut Grid)) {
        update(&self.current, &mut self.next);
        self.swap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::fork_join;
    use std::num::NonZeroUsize;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Grid::new(0, 4),
            Err(GridError::ZeroDimension { width: 0, height: 4 })
        );
        assert!(Grid::new(3, 0).is_err());
    }

    #[test]
    fn row_major_layout() {
        let mut grid = Grid::new(4, 3).unwrap();
        grid.set(3, 1, Cell::Orange);
        assert_eq!(grid.cells()[7], Cell::Orange);
        assert_eq!(grid.row(1)[3], Cell::Orange);
        assert_eq!(grid.rows().count(), 3);
    }

    #[test]
    fn census_counts_every_state() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.set(0, 0, Cell::Blue);
        grid.set(1, 0, Cell::Blue);
        grid.set(2, 0, Cell::Orange);
        grid.set(0, 1, Cell::Dead2);
        let census = grid.census();
        assert_eq!(census.get(Cell::Blue), 2);
        assert_eq!(census.living(), 3);
        assert_eq!(census.decaying(), 1);
        assert_eq!(census.get(Cell::Empty), 5);
        assert_eq!(census.total(), 9);
    }

    #[test]
    fn swap_exchanges_buffers_without_copying() {
        let mut grid = Grid::new(2, 2).unwrap();
        grid.set(1, 1, Cell::Blue);
        let mut game = Generations::from_grid(grid);
        let before = game.current().cells().as_ptr();
        game.swap();
        assert_ne!(game.current().cells().as_ptr(), before);
        assert_eq!(game.current().census().living(), 0);
        game.swap();
        assert_eq!(game.current().cells().as_ptr(), before);
        assert_eq!(game.current().get(1, 1), Cell::Blue);
        assert_eq!(game.generation(), 2);
    }

    #[test]
    fn failed_update_is_never_swapped_in() {
        let mut grid = Grid::new(3, 6).unwrap();
        grid.set(1, 1, Cell::Orange);
        let mut game = Generations::from_grid(grid);
        game.advance(&Scheduler::sequential());
        let before = game.current().clone();

        let workers = NonZeroUsize::new(3).unwrap();
        let result = catch_unwind(AssertUnwindSafe(|| {
            game.advance_with(|_current, next| {
                fork_join(next.width(), workers, next.cells_mut(), |rows, chunk| {
                    if rows.end == 6 {
                        panic!("worker failed");
                    }
                    chunk.fill(Cell::Blue);
                })
            })
        }));

        assert!(result.is_err());
        assert_eq!(game.generation(), 1);
        assert_eq!(game.current(), &before);
    }
}
