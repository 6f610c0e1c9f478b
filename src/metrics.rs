//! Per-run counters and the append-only step log.
//!
//! Every entry point builds a fresh [`Recorder`], feeds it steps while the
//! algorithm runs, and freezes it into a [`Run`] that is handed back to the
//! caller next to the result. Counters only ever go up.

use std::fmt;
use std::time::{Duration, Instant};

/// Counters scoped to one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Metrics {
    /// Element comparisons.
    pub comparisons: u64,
    /// Element exchanges.
    pub swaps: u64,
    /// Single-position writes.
    pub assignments: u64,
    /// Generic work units for algorithms without a compare/swap split.
    pub operations: u64,
    /// Peak auxiliary storage in algorithm-defined units.
    pub space_used: u64,
    /// Wall-clock time of the core loop, excluding setup.
    pub execution_time: Duration,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Comparisons:    {}", self.comparisons)?;
        writeln!(f, "Swaps:          {}", self.swaps)?;
        writeln!(f, "Assignments:    {}", self.assignments)?;
        writeln!(f, "Operations:     {}", self.operations)?;
        writeln!(f, "Space used:     {}", self.space_used)?;
        write!(
            f,
            "Execution time: {:.6}s",
            self.execution_time.as_secs_f64()
        )
    }
}

/// One finished invocation of one algorithm.
///
/// Immutable once returned: fields are only reachable through accessors.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Run<S> {
    algorithm: &'static str,
    metrics: Metrics,
    steps: Vec<S>,
}

impl<S> Run<S> {
    /// Name of the algorithm that produced this run.
    pub fn algorithm(&self) -> &'static str {
        self.algorithm
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Steps in emission order.
    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Last recorded step, if any.
    pub fn last_step(&self) -> Option<&S> {
        self.steps.last()
    }

    /// Consumes the run, returning its steps.
    pub fn into_steps(self) -> Vec<S> {
        self.steps
    }

    /// Performance summary for the metrics table.
    pub fn summary(&self) -> PerformanceSummary {
        PerformanceSummary {
            algorithm: self.algorithm,
            metrics: self.metrics,
            steps: self.steps.len(),
        }
    }
}

/// Algorithm name, counters and trace length of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PerformanceSummary {
    pub algorithm: &'static str,
    pub metrics: Metrics,
    pub steps: usize,
}

impl fmt::Display for PerformanceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Algorithm:      {}", self.algorithm)?;
        writeln!(f, "Steps:          {}", self.steps)?;
        write!(f, "{}", self.metrics)
    }
}

/// Mutable counterpart of [`Run`] used while an algorithm executes.
#[derive(Debug)]
pub struct Recorder<S> {
    algorithm: &'static str,
    metrics: Metrics,
    steps: Vec<S>,
    clock: Option<Instant>,
}

impl<S> Recorder<S> {
    /// Creates a recorder with zeroed counters and an empty log.
    pub fn new(algorithm: &'static str) -> Self {
        Self {
            algorithm,
            metrics: Metrics::default(),
            steps: Vec::new(),
            clock: None,
        }
    }

    /// Appends one step.
    pub fn record(&mut self, step: S) {
        self.steps.push(step);
    }

    pub fn count_comparison(&mut self) {
        self.metrics.comparisons += 1;
    }

    pub fn count_operation(&mut self) {
        self.metrics.operations += 1;
    }

    pub fn count_operations(&mut self, n: u64) {
        self.metrics.operations += n;
    }

    pub(crate) fn count_swap(&mut self) {
        self.metrics.swaps += 1;
    }

    pub(crate) fn count_assignment(&mut self) {
        self.metrics.assignments += 1;
    }

    /// Raises `space_used` to `units` if that is a new peak.
    pub fn note_space(&mut self, units: u64) {
        self.metrics.space_used = self.metrics.space_used.max(units);
    }

    /// Starts timing the core loop.
    pub fn start_clock(&mut self) {
        self.clock = Some(Instant::now());
    }

    /// Stops timing; accumulates into `execution_time`.
    pub fn stop_clock(&mut self) {
        if let Some(started) = self.clock.take() {
            self.metrics.execution_time += started.elapsed();
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn steps(&self) -> &[S] {
        &self.steps
    }

    /// Freezes the recorder into a [`Run`].
    pub fn finish(mut self) -> Run<S> {
        self.stop_clock();
        tracing::trace!(
            algorithm = self.algorithm,
            steps = self.steps.len(),
            comparisons = self.metrics.comparisons,
            swaps = self.metrics.swaps,
            assignments = self.metrics.assignments,
            operations = self.metrics.operations,
            "run finished"
        );
        Run {
            algorithm: self.algorithm,
            metrics: self.metrics,
            steps: self.steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_recorder_is_zeroed() {
        let rec = Recorder::<u8>::new("test");
        assert_eq!(*rec.metrics(), Metrics::default());
        assert!(rec.steps().is_empty());
    }

    #[test]
    fn test_record_preserves_order() {
        let mut rec = Recorder::new("test");
        rec.record('a');
        rec.record('b');
        rec.record('c');
        let run = rec.finish();
        assert_eq!(run.steps(), &['a', 'b', 'c']);
        assert_eq!(run.algorithm(), "test");
        assert_eq!(run.last_step(), Some(&'c'));
    }

    #[test]
    fn test_space_keeps_peak() {
        let mut rec = Recorder::<()>::new("test");
        rec.note_space(10);
        rec.note_space(4);
        assert_eq!(rec.metrics().space_used, 10);
        rec.note_space(12);
        assert_eq!(rec.metrics().space_used, 12);
    }

    #[test]
    fn test_counters() {
        let mut rec = Recorder::<()>::new("test");
        rec.count_comparison();
        rec.count_swap();
        rec.count_assignment();
        rec.count_operation();
        rec.count_operations(3);
        let m = *rec.metrics();
        assert_eq!(m.comparisons, 1);
        assert_eq!(m.swaps, 1);
        assert_eq!(m.assignments, 1);
        assert_eq!(m.operations, 4);
    }

    #[test]
    fn test_summary_display() {
        let mut rec = Recorder::new("Bubble Sort");
        rec.record(());
        let summary = rec.finish().summary();
        assert_eq!(summary.steps, 1);
        let text = summary.to_string();
        assert!(text.starts_with("Algorithm:      Bubble Sort"));
        assert!(text.contains("Comparisons:    0"));
    }

    #[test]
    fn test_clock_without_start_is_zero() {
        let mut rec = Recorder::<()>::new("test");
        rec.stop_clock();
        assert_eq!(rec.metrics().execution_time, Duration::ZERO);
    }
}
