// scheduler.rs - Fork-join generation update over disjoint row slices

use crate::rule::next_state;
use crate::{Cell, Grid};
use std::num::NonZeroUsize;
use std::ops::Range;
use tracing::trace;

/// Splits `0..rows` into `workers` contiguous slices of `rows / workers`
/// rows each; the last slice also takes the remainder.
pub fn row_slices(rows: usize, workers: NonZeroUsize) -> Vec<Range<usize>> {
    let workers = workers.get();
    let per_worker = rows / workers;
    (0..workers)
        .map(|i| {
            let start = i * per_worker;
            let end = if i == workers - 1 { rows } else { start + per_worker };
            start..end
        })
        .collect()
}

/// Writes the next state of every cell in `rows` into `out`, which holds
/// exactly those rows of the next buffer.
fn update_rows(current: &Grid, rows: Range<usize>, out: &mut [Cell]) {
    let width = current.width();
    debug_assert_eq!(out.len(), rows.len() * width);
    for (y, next_row) in rows.zip(out.chunks_exact_mut(width)) {
        for (x, slot) in next_row.iter_mut().enumerate() {
            *slot = next_state(current, x, y);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scheduler {
    workers: NonZeroUsize,
}

impl Scheduler {
    pub fn new(workers: NonZeroUsize) -> Self {
        Self { workers }
    }

    pub fn sequential() -> Self {
        Self::new(NonZeroUsize::MIN)
    }

    /// One worker per available hardware thread.
    pub fn available() -> Self {
        Self::new(std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN))
    }

    pub fn workers(&self) -> NonZeroUsize {
        self.workers
    }

    /// Fills `next` with the generation after `current`.
    ///
    /// `current` is only read. Each task owns a disjoint row range of `next`,
    /// and the call returns once every task has joined. A panicking task
    /// propagates out of this call after the others finish.
    pub fn update(&self, current: &Grid, next: &mut Grid) {
        assert!(
            current.same_shape(next),
            "next buffer is {}x{}, current is {}x{}",
            next.width(),
            next.height(),
            current.width(),
            current.height()
        );

        let width = current.width();
        let height = current.height();
        trace!(workers = self.workers.get(), width, height, "updating generation");

        fork_join(width, self.workers, next.cells_mut(), |rows, out| {
            update_rows(current, rows, out)
        });
    }
}

/// Runs `task` once per row slice of `out` (a row-major buffer `width`
/// cells wide) and returns after every call has finished. With one worker
/// the single call runs on the caller's thread.
pub(crate) fn fork_join<F>(width: usize, workers: NonZeroUsize, out: &mut [Cell], task: F)
where
    F: Fn(Range<usize>, &mut [Cell]) + Sync,
{
    let height = out.len() / width;
    if workers.get() == 1 {
        task(0..height, out);
        return;
    }

    let task = &task;
    let mut rest = out;
    rayon::scope(|scope| {
        for rows in row_slices(height, workers) {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(rows.len() * width);
            rest = tail;
            scope.spawn(move |_| task(rows, chunk));
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workers(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn slices_cover_rows_exactly() {
        for rows in [1, 7, 10, 64, 500] {
            for p in 1..=12 {
                let slices = row_slices(rows, workers(p));
                assert_eq!(slices.len(), p);
                assert_eq!(slices[0].start, 0);
                assert_eq!(slices.last().unwrap().end, rows);
                for pair in slices.windows(2) {
                    assert_eq!(pair[0].end, pair[1].start);
                }
                let covered: usize = slices.iter().map(|r| r.len()).sum();
                assert_eq!(covered, rows);
            }
        }
    }

    #[test]
    fn last_slice_absorbs_remainder() {
        let slices = row_slices(10, workers(4));
        assert_eq!(slices, vec![0..2, 2..4, 4..6, 6..10]);
        // More workers than rows: every slice but the last is empty.
        let slices = row_slices(3, workers(5));
        assert_eq!(slices, vec![0..0, 0..0, 0..0, 0..0, 0..3]);
    }

    #[test]
    fn next_buffer_is_fully_overwritten() {
        let current = Grid::new(4, 4).unwrap();
        let mut next = Grid::new(4, 4).unwrap();
        next.fill(Cell::Dead2);
        Scheduler::new(workers(3)).update(&current, &mut next);
        assert_eq!(next.census().get(Cell::Empty), 16);
    }

    #[test]
    fn panicking_slice_fails_the_whole_call() {
        let mut out = vec![Cell::Empty; 4 * 8];
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            fork_join(4, workers(4), &mut out, |rows, chunk| {
                if rows.start == 2 {
                    panic!("slice {rows:?} failed");
                }
                chunk.fill(Cell::Blue);
            })
        }));
        let payload = result.unwrap_err();
        assert_eq!(payload.downcast_ref::<String>().unwrap(), "slice 2..4 failed");
        // Sibling slices still ran to completion before the panic surfaced.
        assert!(out[..8].iter().all(|&c| c == Cell::Blue));
        assert!(out[16..].iter().all(|&c| c == Cell::Blue));
        assert!(out[8..16].iter().all(|&c| c == Cell::Empty));
    }

    #[test]
    fn fork_join_hands_every_row_to_exactly_one_task() {
        let mut out = vec![Cell::Empty; 3 * 10];
        fork_join(3, workers(4), &mut out, |rows, chunk| {
            assert_eq!(chunk.len(), rows.len() * 3);
            for cell in chunk {
                assert_eq!(*cell, Cell::Empty);
                *cell = Cell::Orange;
            }
        });
        assert!(out.iter().all(|&c| c == Cell::Orange));
    }

    #[test]
    #[should_panic(expected = "next buffer")]
    fn mismatched_shapes_panic() {
        let current = Grid::new(4, 4).unwrap();
        let mut next = Grid::new(4, 5).unwrap();
        Scheduler::sequential().update(&current, &mut next);
    }
}
