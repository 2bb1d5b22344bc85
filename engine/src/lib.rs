//! Generation engine for two-color Life with tombstone decay.
//!
//! Cells are Blue, Orange, Empty, or one of four decay steps. Each
//! generation is computed from the current grid into the next one by a
//! fork-join [`Scheduler`], then the two buffers are swapped.

pub mod cell;
pub mod encode;
pub mod grid;
pub mod neighbors;
pub mod rule;
pub mod scheduler;
pub mod seed;

pub use cell::{Cell, CellError};
pub use encode::{DecodeError, EncodeError, Protocol, SparseCell, decode_sparse};
pub use grid::{Census, Generations, Grid, GridError};
pub use neighbors::{NeighborCounts, count_neighbors};
pub use rule::{next_state, transition};
pub use scheduler::{Scheduler, row_slices};
pub use seed::{PATTERNS, Pattern, SeedPolicy, find_pattern, populate, seeded_rng, stamp};
