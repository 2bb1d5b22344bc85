// encode.rs - Binary frame formats for streaming generations

use crate::{Cell, CellError, Grid};
use thiserror::Error;

/// Sparse-pixel end-of-frame marker.
pub const END_OF_FRAME: u32 = 0xFFFF_FFFF;
/// Largest width or height addressable by the 12-bit sparse coordinates.
pub const SPARSE_MAX_DIMENSION: usize = 1 << 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    #[default]
    Off,
    DenseCells,
    SparsePixels,
    DensePixels,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    #[error("{width}x{height} grid exceeds the 4096x4096 sparse-pixel coordinate space")]
    CoordinateOverflow { width: usize, height: usize },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("frame length {0} is not a multiple of 4")]
    Truncated(usize),
    #[error("frame has no end-of-frame marker")]
    MissingTerminator,
    #[error("{0} bytes follow the end-of-frame marker")]
    TrailingBytes(usize),
    #[error(transparent)]
    InvalidState(#[from] CellError),
}

/// RGB shown for each state in dense-pixel frames.
pub const fn pixel_rgb(cell: Cell) -> (u8, u8, u8) {
    match cell {
        Cell::Blue => (0, 0, 255),
        Cell::Orange => (255, 128, 0),
        Cell::Dead => (0, 0, 0),
        Cell::Dead1 => (136, 136, 136),
        Cell::Dead2 => (160, 160, 160),
        Cell::Dead3 => (238, 238, 238),
        Cell::Empty => (255, 255, 255),
    }
}

/// `blue | green << 8 | red << 16`, written little-endian.
pub const fn pack_pixel((r, g, b): (u8, u8, u8)) -> u32 {
    b as u32 | (g as u32) << 8 | (r as u32) << 16
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SparseCell {
    pub x: u16,
    pub y: u16,
    pub cell: Cell,
}

impl SparseCell {
    pub fn pack(self) -> u32 {
        (self.x as u32 & 0xFFF) | (self.y as u32 & 0xFFF) << 12 | (self.cell.value() as u32) << 24
    }

    pub fn unpack(word: u32) -> Result<Self, CellError> {
        Ok(Self {
            x: (word & 0xFFF) as u16,
            y: ((word >> 12) & 0xFFF) as u16,
            cell: Cell::try_from((word >> 24) as u8)?,
        })
    }
}

impl Protocol {
    /// Exact frame size in bytes; `None` when it depends on the grid content.
    pub fn frame_len(self, grid: &Grid) -> Option<usize> {
        let cells = grid.width() * grid.height();
        match self {
            Protocol::Off => Some(0),
            Protocol::DenseCells => Some(cells),
            Protocol::DensePixels => Some(cells * 4),
            Protocol::SparsePixels => None,
        }
    }

    /// Checks that `width`x`height` grids can be encoded in this format.
    pub fn supports(self, width: usize, height: usize) -> Result<(), EncodeError> {
        if self == Protocol::SparsePixels
            && (width > SPARSE_MAX_DIMENSION || height > SPARSE_MAX_DIMENSION)
        {
            return Err(EncodeError::CoordinateOverflow { width, height });
        }
        Ok(())
    }

    /// Appends one complete frame of `grid` to `out`.
    pub fn encode(self, grid: &Grid, out: &mut Vec<u8>) -> Result<(), EncodeError> {
        self.supports(grid.width(), grid.height())?;
        if let Some(len) = self.frame_len(grid) {
            out.reserve(len);
        }

        match self {
            Protocol::Off => {}
            Protocol::DenseCells => {
                out.extend(grid.cells().iter().map(|&cell| cell.value()));
            }
            Protocol::DensePixels => {
                for &cell in grid.cells() {
                    out.extend_from_slice(&pack_pixel(pixel_rgb(cell)).to_le_bytes());
                }
            }
            Protocol::SparsePixels => {
                for (y, row) in grid.rows().enumerate() {
                    for (x, &cell) in row.iter().enumerate() {
                        if cell == Cell::Empty {
                            continue;
                        }
                        let word = SparseCell { x: x as u16, y: y as u16, cell }.pack();
                        out.extend_from_slice(&word.to_le_bytes());
                    }
                }
                out.extend_from_slice(&END_OF_FRAME.to_le_bytes());
            }
        }
        Ok(())
    }
}

/// Decodes one sparse-pixel frame, which must end exactly at its marker.
pub fn decode_sparse(frame: &[u8]) -> Result<Vec<SparseCell>, DecodeError> {
    if frame.len() % 4 != 0 {
        return Err(DecodeError::Truncated(frame.len()));
    }

    let mut cells = Vec::with_capacity(frame.len() / 4);
    for (i, chunk) in frame.chunks_exact(4).enumerate() {
        let word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        if word == END_OF_FRAME {
            let rest = frame.len() - (i + 1) * 4;
            if rest != 0 {
                return Err(DecodeError::TrailingBytes(rest));
            }
            return Ok(cells);
        }
        cells.push(SparseCell::unpack(word)?);
    }
    Err(DecodeError::MissingTerminator)
}
