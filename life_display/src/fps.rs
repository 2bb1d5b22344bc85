// fps.rs - Frames-per-second counter owned by whichever loop drives generations

use std::time::{Duration, Instant};

const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, Default)]
pub struct FpsCounter {
    frames: u32,
    last_report: Option<Instant>,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one frame. Returns the frame count once a full second has
    /// elapsed since the previous report (or since the first tick).
    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        let last = *self.last_report.get_or_insert(now);
        self.frames += 1;

        if now.duration_since(last) >= REPORT_INTERVAL {
            let fps = self.frames;
            self.frames = 0;
            self.last_report = Some(now);
            Some(fps)
        } else {
            None
        }
    }
}
