//! # algotrace - Instrumented Classic Algorithms
//!
//! Sorting, searching, dynamic programming and greedy algorithms that report
//! not just a result but how they got there.
//!
//! Every entry point returns its result together with a [`Run`]:
//! 1. **Metrics**: comparisons, swaps, assignments, generic operations, peak
//!    auxiliary space and the wall-clock time of the core loop
//! 2. **Steps**: an ordered log of owned snapshots, one per state transition,
//!    that a front end can replay frame by frame
//!
//! Each call builds a fresh recorder, so runs never leak into each other and a
//! solver can be shared freely.
//!
//! ## Example
//!
//! ```
//! use algotrace_rs::{SortAlgorithm, SortStep, Sorter};
//!
//! let (sorted, run) = SortAlgorithm::Bubble.sort(&[5, 2, 4, 1]);
//! assert_eq!(sorted, vec![1, 2, 4, 5]);
//!
//! // One Swap step per counted swap, bracketed by Initial and Final
//! let swaps = run.steps().iter().filter(|s| matches!(s, SortStep::Swap { .. })).count();
//! assert_eq!(swaps as u64, run.metrics().swaps);
//! println!("{}", run.summary());
//! ```
//!
//! ## Failure modes
//!
//! - Invalid input (mismatched lengths, ragged matrices, zero weights, bad bit
//!   strings) is an [`Error`] raised before any work is done
//! - Infeasible inputs (no exact change, search miss) are ordinary `None`
//!   results
//! - A negative cycle in Floyd–Warshall is reported on the result and as a
//!   step
//!
//! ## Features
//!
//! - `serde`: derives `Serialize` for runs, metrics and every step type

mod activity;
mod coin_change;
mod error;
mod fibonacci;
mod floyd_warshall;
mod huffman;
mod knapsack;
mod kruskal;
mod lcs;
mod metrics;
mod search;
mod sort;
mod sort_bubble;
mod sort_heap;
mod sort_insertion;
mod sort_merge;
mod sort_quick;
mod sort_selection;
mod union_find;

#[cfg(test)]
mod tests;

pub use activity::{Activity, ActivityComparison, ActivitySelection, ActivityStep};
pub use coin_change::{ChangeComparison, CoinChange, DpChangeStep, GreedyChangeStep};
pub use error::{Error, Result};
pub use fibonacci::{Fibonacci, FibonacciComparison, FibonacciStep, MAX_N as FIBONACCI_MAX_N};
pub use floyd_warshall::{
    format_matrix, AllPairs, FloydWarshall, FloydWarshallStep, Matrix, Predecessors,
};
pub use huffman::{
    compression_ratio, DecodeMove, Encoded, HuffmanCoder, HuffmanNode, HuffmanStep, HuffmanTree,
    NodeLabel, NodeSummary,
};
pub use knapsack::{
    Decision, FractionalSolution, FractionalStep, Knapsack, KnapsackComparison, KnapsackSolution,
    KnapsackStep, RatedItem,
};
pub use kruskal::{is_connected, mst_weight, Edge, Kruskal, KruskalStep};
pub use lcs::{alignment, is_subsequence, Direction, Lcs, LcsResult, LcsStep};
pub use metrics::{Metrics, PerformanceSummary, Recorder, Run};
pub use search::{BinarySearch, SearchStep};
pub use sort::{ArrayTracer, SortAlgorithm, SortStep, Sorter};
pub use sort_bubble::BubbleSort;
pub use sort_heap::HeapSort;
pub use sort_insertion::InsertionSort;
pub use sort_merge::MergeSort;
pub use sort_quick::QuickSort;
pub use sort_selection::SelectionSort;
pub use union_find::UnionFind;
