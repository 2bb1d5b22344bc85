// cell.rs - Cell states for two-color tombstone Life

use thiserror::Error;

/// State of a single cell. The discriminant is the value written by the
/// dense-cell and sparse-pixel encoders.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Cell {
    #[default]
    Empty = 0,
    Blue = 1,
    Orange = 2,
    Dead = 3,
    Dead1 = 4,
    Dead2 = 5,
    Dead3 = 6,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CellError {
    #[error("cell state {0} is out of range (expected 0..=6)")]
    InvalidState(u8),
}

impl Cell {
    pub const ALL: [Cell; 7] = [
        Cell::Empty,
        Cell::Blue,
        Cell::Orange,
        Cell::Dead,
        Cell::Dead1,
        Cell::Dead2,
        Cell::Dead3,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Next tombstone step, or `None` if the cell is not decaying.
    pub const fn decay(self) -> Option<Cell> {
        match self {
            Cell::Dead => Some(Cell::Dead1),
            Cell::Dead1 => Some(Cell::Dead2),
            Cell::Dead2 => Some(Cell::Dead3),
            Cell::Dead3 => Some(Cell::Empty),
            Cell::Empty | Cell::Blue | Cell::Orange => None,
        }
    }
}

impl TryFrom<u8> for Cell {
    type Error = CellError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Cell::ALL
            .get(value as usize)
            .copied()
            .ok_or(CellError::InvalidState(value))
    }
}
