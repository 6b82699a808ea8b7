//! Progress reporting for the long running passes.
//!
//! A [`Progress`] sink is handed to the passes explicitly, it is only ever
//! written to. Whether one is present or not never changes a result.
//! Implementations must be `Sync` because threshold application reports
//! from its worker threads.

use std::fmt;

use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ApplyThresholds,
    Encode,
    DecodeHeader,
    Decode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::ApplyThresholds => "Applying thresholds",
            Stage::Encode => "Encoding data",
            Stage::DecodeHeader => "Decoding size header",
            Stage::Decode => "Decoding data",
        })
    }
}

pub trait Progress: Send + Sync {
    /// `done` out of `total` units of `stage` are finished
    fn update(&self, stage: Stage, done: usize, total: usize);
}

/// Discards all progress
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn update(&self, _stage: Stage, _done: usize, _total: usize) {}
}

/// Writes progress to the `log` facade, stage completion as info, the rest as debug
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl Progress for LogProgress {
    fn update(&self, stage: Stage, done: usize, total: usize) {
        if done >= total {
            info!("{stage}: [{total}/{total}] complete");
        } else {
            debug!("{stage}: [{done}/{total}]");
        }
    }
}

/// Throttles updates of a sequential pass to roughly `steps` reports in total.
pub(crate) struct Reporter<'p> {
    progress: &'p dyn Progress,
    stage: Stage,
    total: usize,
    every: usize,
    since_last: usize,
}

impl<'p> Reporter<'p> {
    pub fn new(progress: &'p dyn Progress, stage: Stage, total: usize, steps: usize) -> Self {
        Self {
            progress,
            stage,
            total,
            every: (total / steps.max(1)).max(1),
            since_last: 0,
        }
    }

    pub fn advance(&mut self, done: usize, by: usize) {
        self.since_last += by;
        if self.since_last >= self.every {
            self.since_last = 0;
            self.progress
                .update(self.stage, done.min(self.total), self.total);
        }
    }

    pub fn finish(&self) {
        self.progress.update(self.stage, self.total, self.total);
    }
}
