//! Wall-clock accounting per extrapolation stage.
//!
//! A `Profile` is handed to the extrapolator by the caller and accumulates
//! across calls, so one profile can cover a whole sequence of solves. It never
//! influences the numerics.

use std::fmt;
use std::time::{Duration, Instant};

/// Stages of one extrapolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Orthonormalize,
    Operator,
    Gram,
    Solve,
    Assemble,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::Orthonormalize,
        Stage::Operator,
        Stage::Gram,
        Stage::Solve,
        Stage::Assemble,
    ];

    fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::Orthonormalize => "orthonormalize",
            Stage::Operator => "operator",
            Stage::Gram => "gram",
            Stage::Solve => "solve",
            Stage::Assemble => "assemble",
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Entry {
    total: Duration,
    count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Profile {
    entries: [Entry; 5],
    active: Option<(Stage, Instant)>,
}

impl Profile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing `stage`, closing any stage still open.
    pub fn start(&mut self, stage: Stage) {
        self.stop();
        self.active = Some((stage, Instant::now()));
    }

    /// Close the open stage, if any.
    pub fn stop(&mut self) {
        if let Some((stage, t0)) = self.active.take() {
            let e = &mut self.entries[stage.index()];
            e.total += t0.elapsed();
            e.count += 1;
        }
    }

    /// Time `f` under `stage`.
    pub fn time<R>(&mut self, stage: Stage, f: impl FnOnce() -> R) -> R {
        self.start(stage);
        let r = f();
        self.stop();
        r
    }

    pub fn total(&self, stage: Stage) -> Duration {
        self.entries[stage.index()].total
    }

    pub fn count(&self, stage: Stage) -> usize {
        self.entries[stage.index()].count
    }

    pub fn elapsed(&self) -> Duration {
        self.entries.iter().map(|e| e.total).sum()
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<16} {:>8} {:>14}", "stage", "calls", "total (ms)")?;
        for stage in Stage::ALL {
            let e = self.entries[stage.index()];
            writeln!(
                f,
                "{:<16} {:>8} {:>14.3}",
                stage.name(),
                e.count,
                e.total.as_secs_f64() * 1e3
            )?;
        }
        Ok(())
    }
}
