//! Pipeline observer: hooks for profiling and debugging.
//!
//! Observers receive notifications at stage boundaries without coupling to
//! stage logic. The analysis itself never logs; an observer (or the optional
//! `tracing` spans) is the only window into a running analysis.

use std::time::{Duration, Instant};

/// Input length gate.
pub const STAGE_GATE: &str = "gate";
/// Heading detection.
pub const STAGE_STRUCTURE: &str = "structure";
/// Keyword extraction.
pub const STAGE_KEYWORDS: &str = "keywords";

/// Every stage, in execution order.
pub const STAGES: &[&str] = &[STAGE_GATE, STAGE_STRUCTURE, STAGE_KEYWORDS];

/// Measures the wall time of one stage.
#[derive(Debug, Clone, Copy)]
pub struct StageClock {
    started: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// What a stage reports when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageReport {
    pub elapsed: Duration,
    /// Number of items the stage produced (lines, keywords), if meaningful
    pub items: Option<usize>,
}

impl StageReport {
    pub fn new(elapsed: Duration) -> Self {
        Self {
            elapsed,
            items: None,
        }
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = Some(items);
        self
    }
}

/// Callbacks at stage boundaries. Both methods default to no-ops.
pub trait AnalysisObserver {
    fn on_stage_start(&mut self, _stage: &'static str) {}

    fn on_stage_end(&mut self, _stage: &'static str, _report: &StageReport) {}
}

/// Observer that ignores every callback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

/// Observer that records every finished stage.
#[derive(Debug, Clone, Default)]
pub struct StageTimings {
    pub stages: Vec<(&'static str, StageReport)>,
}

impl StageTimings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for `stage`, if it ran.
    pub fn get(&self, stage: &str) -> Option<&StageReport> {
        self.stages
            .iter()
            .find(|(name, _)| *name == stage)
            .map(|(_, report)| report)
    }

    pub fn total(&self) -> Duration {
        self.stages.iter().map(|(_, r)| r.elapsed).sum()
    }
}

impl AnalysisObserver for StageTimings {
    fn on_stage_end(&mut self, stage: &'static str, report: &StageReport) {
        self.stages.push((stage, *report));
    }
}
