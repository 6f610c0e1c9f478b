//! All-pairs shortest paths with full relaxation traces.
//!
//! Weights are `f64`, with `f64::INFINITY` marking a missing edge. The
//! predecessor matrix stores the next hop from `i` towards `j`, so paths are
//! rebuilt by walking forward from the start vertex.

use crate::error::{Error, Result};
use crate::metrics::{Recorder, Run};
use std::fmt::Write as _;

pub type Matrix = Vec<Vec<f64>>;
pub type Predecessors = Vec<Vec<Option<usize>>>;

/// One state transition of Floyd–Warshall. Each step owns both matrices.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FloydWarshallStep {
    Init {
        dist: Matrix,
        pred: Predecessors,
    },
    /// Going through `k` shortened `i -> j`.
    Update {
        k: usize,
        i: usize,
        j: usize,
        dist: Matrix,
        pred: Predecessors,
    },
    NoUpdate {
        k: usize,
        i: usize,
        j: usize,
        dist: Matrix,
        pred: Predecessors,
    },
    /// `vertex` lies on a negative cycle; no final step follows.
    NegativeCycle {
        vertex: usize,
        dist: Matrix,
        pred: Predecessors,
    },
    Final {
        dist: Matrix,
        pred: Predecessors,
    },
}

impl FloydWarshallStep {
    pub fn kind(&self) -> &'static str {
        match self {
            FloydWarshallStep::Init { .. } => "init",
            FloydWarshallStep::Update { .. } => "update",
            FloydWarshallStep::NoUpdate { .. } => "no_update",
            FloydWarshallStep::NegativeCycle { .. } => "negative_cycle",
            FloydWarshallStep::Final { .. } => "final",
        }
    }
}

/// Output of [`FloydWarshall::solve`].
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairs {
    pub distances: Matrix,
    pub predecessors: Predecessors,
    /// First vertex found with a negative self-distance.
    pub negative_cycle: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FloydWarshall;

impl FloydWarshall {
    pub const NAME: &'static str = "Floyd-Warshall";

    /// Computes shortest distances between every pair of vertices.
    ///
    /// The matrix must be square and NaN-free.
    pub fn solve(&self, graph: &[Vec<f64>]) -> Result<(AllPairs, Run<FloydWarshallStep>)> {
        validate(graph)?;
        let n = graph.len();
        tracing::debug!(vertices = n, "floyd-warshall");

        let mut rec = Recorder::new(Self::NAME);
        let mut dist: Matrix = graph.to_vec();
        let mut pred: Predecessors = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            Some(i)
                        } else if dist[i][j].is_finite() {
                            Some(j)
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .collect();

        rec.note_space((2 * n * n) as u64);
        rec.record(FloydWarshallStep::Init {
            dist: dist.clone(),
            pred: pred.clone(),
        });

        rec.start_clock();
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    rec.count_operation();
                    let through = dist[i][k] + dist[k][j];
                    if dist[i][k].is_finite() && dist[k][j].is_finite() && through < dist[i][j] {
                        dist[i][j] = through;
                        pred[i][j] = pred[i][k];
                        rec.record(FloydWarshallStep::Update {
                            k,
                            i,
                            j,
                            dist: dist.clone(),
                            pred: pred.clone(),
                        });
                    } else {
                        rec.record(FloydWarshallStep::NoUpdate {
                            k,
                            i,
                            j,
                            dist: dist.clone(),
                            pred: pred.clone(),
                        });
                    }
                }
            }
        }
        rec.stop_clock();

        if let Some(vertex) = (0..n).find(|&i| dist[i][i] < 0.0) {
            tracing::warn!(vertex, "negative cycle detected");
            rec.record(FloydWarshallStep::NegativeCycle {
                vertex,
                dist: dist.clone(),
                pred: pred.clone(),
            });
            let result = AllPairs {
                distances: dist,
                predecessors: pred,
                negative_cycle: Some(vertex),
            };
            return Ok((result, rec.finish()));
        }

        rec.record(FloydWarshallStep::Final {
            dist: dist.clone(),
            pred: pred.clone(),
        });
        let result = AllPairs {
            distances: dist,
            predecessors: pred,
            negative_cycle: None,
        };
        Ok((result, rec.finish()))
    }

    /// Rebuilds the vertex sequence from `start` to `end`.
    ///
    /// Empty when no path exists. The walk gives up after `n` hops, which a
    /// matrix produced by [`solve`](Self::solve) never needs.
    pub fn path(
        &self,
        pred: &[Vec<Option<usize>>],
        start: usize,
        end: usize,
    ) -> Result<Vec<usize>> {
        let n = pred.len();
        for vertex in [start, end] {
            if vertex >= n {
                return Err(Error::VertexOutOfRange { vertex, vertices: n });
            }
        }

        let mut path = Vec::new();
        if pred[start][end].is_none() {
            return Ok(path);
        }

        let mut current = start;
        while current != end {
            path.push(current);
            match pred[current].get(end).copied().flatten() {
                Some(next) if next < n => current = next,
                _ => return Ok(Vec::new()),
            }
            if path.len() > n {
                break;
            }
        }
        path.push(end);
        Ok(path)
    }
}

/// Renders a distance matrix as an aligned table.
///
/// Missing edges print as `∞`; whole numbers print without a fraction.
pub fn format_matrix(matrix: &[Vec<f64>], names: Option<&[String]>) -> String {
    let n = matrix.len();
    let names: Vec<String> = (0..n)
        .map(|i| {
            names
                .and_then(|names| names.get(i).cloned())
                .unwrap_or_else(|| i.to_string())
        })
        .collect();
    let cells: Vec<Vec<String>> = matrix
        .iter()
        .map(|row| row.iter().map(|&v| format_value(v)).collect())
        .collect();
    let widths: Vec<usize> = (0..n)
        .map(|j| {
            cells
                .iter()
                .filter_map(|row| row.get(j).map(|c| c.chars().count()))
                .chain(std::iter::once(names[j].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::from("  ");
    let header: Vec<String> = (0..n).map(|j| pad(&names[j], widths[j])).collect();
    out.push_str(&header.join(" "));
    out.push('\n');
    for (i, row) in cells.iter().enumerate() {
        let padded: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(j, c)| pad(c, widths.get(j).copied().unwrap_or(0)))
            .collect();
        let _ = writeln!(out, "{} {}", names[i], padded.join(" "));
    }
    out
}

fn format_value(value: f64) -> String {
    if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{text:<width$}")
}

fn validate(graph: &[Vec<f64>]) -> Result<()> {
    let n = graph.len();
    for (row, cells) in graph.iter().enumerate() {
        if cells.len() != n {
            return Err(Error::NotSquare {
                row,
                len: cells.len(),
                expected: n,
            });
        }
        if let Some(col) = cells.iter().position(|w| w.is_nan()) {
            return Err(Error::NotANumber { row, col });
        }
    }
    Ok(())
}
