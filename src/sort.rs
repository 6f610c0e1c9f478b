//! Shared contract for the comparison sorts.
//!
//! Each strategy implements [`Sorter::sort_in_place`] against an
//! [`ArrayTracer`], whose `compare`/`swap`/`assign` primitives keep counters
//! and snapshots in lockstep. [`Sorter::sort`] wraps that with the private
//! copy, the `Initial`/`Final` snapshots and the clock.

use crate::metrics::{Recorder, Run};
use crate::sort_bubble::BubbleSort;
use crate::sort_heap::HeapSort;
use crate::sort_insertion::InsertionSort;
use crate::sort_merge::MergeSort;
use crate::sort_quick::QuickSort;
use crate::sort_selection::SelectionSort;

/// One state transition of a sort. Every variant owns a full array snapshot.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortStep<T> {
    /// Input as received, before any work.
    Initial { array: Vec<T> },
    /// Positions `i` and `j` were exchanged.
    Swap { i: usize, j: usize, array: Vec<T> },
    /// `value` was written at `index`.
    Assign { index: usize, value: T, array: Vec<T> },
    /// The sub-range `left..=right` was merged.
    Merge { left: usize, right: usize, array: Vec<T> },
    /// One partition call over `low..=high` finished.
    Partition { low: usize, high: usize, array: Vec<T> },
    /// A sift-down moved the element at `root` to `largest`.
    Heapify { root: usize, largest: usize, array: Vec<T> },
    /// Sorted output.
    Final { array: Vec<T> },
}

impl<T> SortStep<T> {
    /// Tag of the step as shown by the shell.
    pub fn kind(&self) -> &'static str {
        match self {
            SortStep::Initial { .. } => "initial",
            SortStep::Swap { .. } => "swap",
            SortStep::Assign { .. } => "assign",
            SortStep::Merge { .. } => "merge",
            SortStep::Partition { .. } => "partition",
            SortStep::Heapify { .. } => "heapify",
            SortStep::Final { .. } => "final",
        }
    }

    /// Array snapshot carried by the step.
    pub fn array(&self) -> &[T] {
        match self {
            SortStep::Initial { array }
            | SortStep::Swap { array, .. }
            | SortStep::Assign { array, .. }
            | SortStep::Merge { array, .. }
            | SortStep::Partition { array, .. }
            | SortStep::Heapify { array, .. }
            | SortStep::Final { array } => array,
        }
    }

    /// Positions to highlight, `None` for the sentinel-only steps.
    pub fn highlighted(&self) -> Option<(usize, usize)> {
        match *self {
            SortStep::Initial { .. } | SortStep::Final { .. } => None,
            SortStep::Swap { i, j, .. } => Some((i, j)),
            SortStep::Assign { index, .. } => Some((index, index)),
            SortStep::Merge { left, right, .. } => Some((left, right)),
            SortStep::Partition { low, high, .. } => Some((low, high)),
            SortStep::Heapify { root, largest, .. } => Some((root, largest)),
        }
    }
}

/// Recorder specialised for array sorts.
#[derive(Debug)]
pub struct ArrayTracer<T> {
    recorder: Recorder<SortStep<T>>,
}

impl<T: PartialOrd + Clone> ArrayTracer<T> {
    pub(crate) fn new(algorithm: &'static str) -> Self {
        Self {
            recorder: Recorder::new(algorithm),
        }
    }

    /// Returns `a > b` and counts one comparison.
    pub fn compare(&mut self, a: &T, b: &T) -> bool {
        self.recorder.count_comparison();
        a > b
    }

    /// Exchanges `data[i]` and `data[j]`, counting and snapshotting the result.
    pub fn swap(&mut self, data: &mut [T], i: usize, j: usize) {
        data.swap(i, j);
        self.recorder.count_swap();
        self.recorder.record(SortStep::Swap {
            i,
            j,
            array: data.to_vec(),
        });
    }

    /// Writes `value` at `data[index]`, counting and snapshotting the result.
    pub fn assign(&mut self, data: &mut [T], index: usize, value: T) {
        data[index] = value.clone();
        self.recorder.count_assignment();
        self.recorder.record(SortStep::Assign {
            index,
            value,
            array: data.to_vec(),
        });
    }

    /// Records a non-mutating milestone (merge, partition, heapify).
    pub fn record(&mut self, step: SortStep<T>) {
        self.recorder.record(step);
    }

    pub(crate) fn recorder_mut(&mut self) -> &mut Recorder<SortStep<T>> {
        &mut self.recorder
    }

    pub(crate) fn finish(self) -> Run<SortStep<T>> {
        self.recorder.finish()
    }
}

/// A comparison sort that reports every state transition.
pub trait Sorter {
    /// Display name, e.g. `"Bubble Sort"`.
    fn name(&self) -> &'static str;

    /// Sorts `data` in place, routing every compare, swap and write through
    /// `tracer`.
    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>);

    /// Sorts a private copy of `input` and returns it with the full trace.
    ///
    /// `input` is never modified.
    fn sort<T: PartialOrd + Clone>(&self, input: &[T]) -> (Vec<T>, Run<SortStep<T>>) {
        tracing::debug!(algorithm = self.name(), len = input.len(), "sorting");

        let mut data = input.to_vec();
        let mut tracer = ArrayTracer::new(self.name());
        tracer.record(SortStep::Initial {
            array: data.clone(),
        });

        tracer.recorder_mut().start_clock();
        self.sort_in_place(&mut data, &mut tracer);
        tracer.recorder_mut().stop_clock();

        tracer.record(SortStep::Final {
            array: data.clone(),
        });
        (data, tracer.finish())
    }
}

/// Selector over the six sorting strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SortAlgorithm {
    Bubble,
    Selection,
    Insertion,
    Merge,
    Quick,
    Heap,
}

impl SortAlgorithm {
    /// All strategies in menu order.
    pub const ALL: [SortAlgorithm; 6] = [
        SortAlgorithm::Bubble,
        SortAlgorithm::Selection,
        SortAlgorithm::Insertion,
        SortAlgorithm::Merge,
        SortAlgorithm::Quick,
        SortAlgorithm::Heap,
    ];
}

impl Sorter for SortAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            SortAlgorithm::Bubble => BubbleSort.name(),
            SortAlgorithm::Selection => SelectionSort.name(),
            SortAlgorithm::Insertion => InsertionSort.name(),
            SortAlgorithm::Merge => MergeSort.name(),
            SortAlgorithm::Quick => QuickSort.name(),
            SortAlgorithm::Heap => HeapSort.name(),
        }
    }

    fn sort_in_place<T: PartialOrd + Clone>(&self, data: &mut [T], tracer: &mut ArrayTracer<T>) {
        match self {
            SortAlgorithm::Bubble => BubbleSort.sort_in_place(data, tracer),
            SortAlgorithm::Selection => SelectionSort.sort_in_place(data, tracer),
            SortAlgorithm::Insertion => InsertionSort.sort_in_place(data, tracer),
            SortAlgorithm::Merge => MergeSort.sort_in_place(data, tracer),
            SortAlgorithm::Quick => QuickSort.sort_in_place(data, tracer),
            SortAlgorithm::Heap => HeapSort.sort_in_place(data, tracer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_is_strict() {
        let mut tracer = ArrayTracer::<i32>::new("test");
        assert!(tracer.compare(&2, &1));
        assert!(!tracer.compare(&1, &1));
        assert!(!tracer.compare(&0, &1));
        let run = tracer.finish();
        assert_eq!(run.metrics().comparisons, 3);
        assert!(run.is_empty());
    }

    #[test]
    fn test_swap_snapshots_post_state() {
        let mut tracer = ArrayTracer::new("test");
        let mut data = vec![1, 2, 3];
        tracer.swap(&mut data, 0, 2);
        assert_eq!(data, vec![3, 2, 1]);

        data[1] = 99;
        let run = tracer.finish();
        assert_eq!(run.metrics().swaps, 1);
        assert_eq!(
            run.steps(),
            &[SortStep::Swap {
                i: 0,
                j: 2,
                array: vec![3, 2, 1]
            }]
        );
    }

    #[test]
    fn test_assign_snapshots_post_state() {
        let mut tracer = ArrayTracer::new("test");
        let mut data = vec![5, 6];
        tracer.assign(&mut data, 1, 7);
        let run = tracer.finish();
        assert_eq!(data, vec![5, 7]);
        assert_eq!(run.metrics().assignments, 1);
        assert_eq!(run.steps()[0].array(), &[5, 7]);
        assert_eq!(run.steps()[0].kind(), "assign");
    }

    #[test]
    fn test_selector_names() {
        let names: Vec<_> = SortAlgorithm::ALL.iter().map(|a| a.name()).collect();
        assert_eq!(
            names,
            vec![
                "Bubble Sort",
                "Selection Sort",
                "Insertion Sort",
                "Merge Sort",
                "Quick Sort",
                "Heap Sort"
            ]
        );
    }

    #[test]
    fn test_every_sorter_brackets_trace() {
        let input = [4, 1, 3, 1, 2];
        for algo in SortAlgorithm::ALL {
            let (sorted, run) = algo.sort(&input);
            assert_eq!(sorted, vec![1, 1, 2, 3, 4], "{}", algo.name());
            assert_eq!(run.steps()[0].kind(), "initial");
            assert_eq!(run.steps()[0].array(), &input);
            assert_eq!(run.last_step().map(|s| s.kind()), Some("final"));
            assert_eq!(run.last_step().map(|s| s.array()), Some(&sorted[..]));
            assert_eq!(run.algorithm(), algo.name());
        }
    }

    #[test]
    fn test_empty_input() {
        for algo in SortAlgorithm::ALL {
            let (sorted, run) = algo.sort::<i32>(&[]);
            assert!(sorted.is_empty());
            assert_eq!(run.len(), 2, "{}", algo.name());
        }
    }

    #[test]
    fn test_highlighted() {
        let step = SortStep::Swap {
            i: 1,
            j: 3,
            array: vec![0u8; 4],
        };
        assert_eq!(step.highlighted(), Some((1, 3)));
        let step = SortStep::Final { array: vec![0u8] };
        assert_eq!(step.highlighted(), None);
    }
}
