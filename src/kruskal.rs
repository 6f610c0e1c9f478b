//! Minimum spanning tree (or forest) by Kruskal's algorithm.

use crate::error::{Error, Result};
use crate::metrics::{Recorder, Run};
use crate::union_find::UnionFind;

/// Undirected weighted edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Edge {
    pub u: usize,
    pub v: usize,
    pub weight: i64,
}

impl Edge {
    pub fn new(u: usize, v: usize, weight: i64) -> Self {
        Self { u, v, weight }
    }
}

impl From<(usize, usize, i64)> for Edge {
    fn from((u, v, weight): (usize, usize, i64)) -> Self {
        Self { u, v, weight }
    }
}

/// One state transition of Kruskal's algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum KruskalStep {
    /// Input edges, and whether the graph is connected.
    Init { edges: Vec<Edge>, connected: bool },
    /// Edges in processing order.
    Sort { edges: Vec<Edge> },
    Add { edge: Edge, mst: Vec<Edge> },
    /// `edge` would close a cycle.
    Skip { edge: Edge, mst: Vec<Edge> },
    Final { mst: Vec<Edge> },
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Kruskal;

impl Kruskal {
    pub const NAME: &'static str = "Kruskal's MST";

    /// Returns the edges of a minimum spanning forest.
    ///
    /// A disconnected graph is logged and flagged on the `Init` step; the
    /// result then has fewer than `vertices - 1` edges.
    pub fn find_mst(
        &self,
        vertices: usize,
        edges: &[Edge],
    ) -> Result<(Vec<Edge>, Run<KruskalStep>)> {
        validate(vertices, edges)?;
        tracing::debug!(vertices, edges = edges.len(), "kruskal");

        let mut rec = Recorder::new(Self::NAME);
        if vertices == 0 {
            return Ok((Vec::new(), rec.finish()));
        }

        let connected = is_connected(vertices, edges)?;
        if !connected {
            tracing::warn!(vertices, "graph is disconnected, result is a spanning forest");
        }
        rec.record(KruskalStep::Init {
            edges: edges.to_vec(),
            connected,
        });

        rec.start_clock();
        let mut sorted = edges.to_vec();
        sorted.sort_by_key(|e| e.weight);
        rec.record(KruskalStep::Sort {
            edges: sorted.clone(),
        });

        let mut sets = UnionFind::new(vertices);
        rec.note_space(vertices as u64);
        let mut mst = Vec::new();
        for edge in sorted {
            rec.count_operation();
            if sets.union(edge.u, edge.v) {
                mst.push(edge);
                rec.record(KruskalStep::Add {
                    edge,
                    mst: mst.clone(),
                });
            } else {
                rec.record(KruskalStep::Skip {
                    edge,
                    mst: mst.clone(),
                });
            }
            if mst.len() == vertices - 1 {
                break;
            }
        }
        rec.stop_clock();

        rec.record(KruskalStep::Final { mst: mst.clone() });
        Ok((mst, rec.finish()))
    }
}

/// True when every vertex is reachable from vertex 0.
///
/// A graph with no edges is connected only if it has at most one vertex.
pub fn is_connected(vertices: usize, edges: &[Edge]) -> Result<bool> {
    validate(vertices, edges)?;
    if edges.is_empty() {
        return Ok(vertices <= 1);
    }

    let mut adjacency = vec![Vec::new(); vertices];
    for e in edges {
        adjacency[e.u].push(e.v);
        adjacency[e.v].push(e.u);
    }

    let mut visited = vec![false; vertices];
    let mut stack = vec![0];
    visited[0] = true;
    while let Some(node) = stack.pop() {
        for &next in &adjacency[node] {
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }
    Ok(visited.into_iter().all(|v| v))
}

/// Sum of edge weights.
pub fn mst_weight(edges: &[Edge]) -> i64 {
    edges.iter().map(|e| e.weight).sum()
}

fn validate(vertices: usize, edges: &[Edge]) -> Result<()> {
    for e in edges {
        for vertex in [e.u, e.v] {
            if vertex >= vertices {
                return Err(Error::VertexOutOfRange { vertex, vertices });
            }
        }
    }
    Ok(())
}
