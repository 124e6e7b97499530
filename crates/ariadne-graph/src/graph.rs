//! In-memory directed/undirected multigraph with stable integer identifiers.
//!
//! Vertices and edges get dense `u32` ids on insertion; removal leaves holes,
//! so ids stay stable for the lifetime of the graph. Parallel edges and
//! self-loops are permitted.
//!
//! Directedness is a graph-wide flag that algorithms may temporarily override
//! through [`Graph::push_directedness`], which returns a scoped guard
//! restoring the previous value on drop, including on unwind. Under the
//! undirected interpretation every stored edge is traversable both ways;
//! stored endpoint order is retained for incidence purposes.

use std::cell::Cell;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;
use crate::property::EdgePropMap;

pub type VertexId = u32;
pub type EdgeId = u32;

/// A directed edge `source → target`. Under an undirected interpretation the
/// endpoint order is incidental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: VertexId,
    pub target: VertexId,
}

/// Edge weight lookup: a missing weight map means unit weight.
#[inline]
pub fn edge_weight(weight: Option<&EdgePropMap>, e: EdgeId) -> f64 {
    match weight {
        Some(map) => map.get_f64(e),
        None => 1.0,
    }
}

// ─────────────────────────────────────────────
// Graph
// ─────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Graph {
    directed: Cell<bool>,
    alive: Vec<bool>,
    vertex_count: usize,
    edges: Vec<Option<Edge>>,
    edge_count: usize,
    /// `out[v]` = `[(edge_id, target)]` for every stored edge leaving `v`.
    out: Vec<Vec<(EdgeId, VertexId)>>,
    /// `inc[v]` = `[(edge_id, source)]` for every stored edge entering `v`.
    inc: Vec<Vec<(EdgeId, VertexId)>>,
}

impl Graph {
    pub fn new(directed: bool) -> Self {
        Self { directed: Cell::new(directed), ..Default::default() }
    }

    pub fn new_directed() -> Self {
        Self::new(true)
    }

    pub fn new_undirected() -> Self {
        Self::new(false)
    }

    /// A graph with `n` vertices (ids `0..n`) and no edges.
    pub fn with_vertices(n: usize, directed: bool) -> Self {
        let mut g = Self::new(directed);
        for _ in 0..n {
            g.add_vertex();
        }
        g
    }

    // ── Directedness ───────────────────────────────────

    /// Current effective directedness (override-aware).
    pub fn is_directed(&self) -> bool {
        self.directed.get()
    }

    /// Temporarily reinterpret the graph's directedness. The previous value
    /// is restored when the returned guard is dropped.
    pub fn push_directedness(&self, directed: bool) -> DirectednessGuard<'_> {
        let prev = self.directed.get();
        self.directed.set(directed);
        DirectednessGuard { graph: self, prev }
    }

    // ── Mutations ──────────────────────────────────────

    pub fn add_vertex(&mut self) -> VertexId {
        let id = self.alive.len() as VertexId;
        self.alive.push(true);
        self.out.push(Vec::new());
        self.inc.push(Vec::new());
        self.vertex_count += 1;
        id
    }

    pub fn add_edge(&mut self, source: VertexId, target: VertexId) -> Result<EdgeId, GraphError> {
        if !self.contains_vertex(source) {
            return Err(GraphError::VertexNotFound(source));
        }
        if !self.contains_vertex(target) {
            return Err(GraphError::VertexNotFound(target));
        }
        let id = self.edges.len() as EdgeId;
        self.edges.push(Some(Edge { id, source, target }));
        self.out[source as usize].push((id, target));
        self.inc[target as usize].push((id, source));
        self.edge_count += 1;
        Ok(id)
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Result<(), GraphError> {
        let edge = self
            .edges
            .get_mut(e as usize)
            .and_then(Option::take)
            .ok_or(GraphError::EdgeNotFound(e))?;
        self.out[edge.source as usize].retain(|&(id, _)| id != e);
        self.inc[edge.target as usize].retain(|&(id, _)| id != e);
        self.edge_count -= 1;
        Ok(())
    }

    /// Remove a vertex and every incident edge. The id becomes a hole; it is
    /// never reused.
    pub fn remove_vertex(&mut self, v: VertexId) -> Result<(), GraphError> {
        if !self.contains_vertex(v) {
            return Err(GraphError::VertexNotFound(v));
        }
        let incident: Vec<EdgeId> = self.out[v as usize]
            .iter()
            .chain(self.inc[v as usize].iter())
            .map(|&(id, _)| id)
            .collect();
        for e in incident {
            // Parallel self-loops appear in both lists; the second take is a no-op.
            let _ = self.remove_edge(e);
        }
        self.alive[v as usize] = false;
        self.vertex_count -= 1;
        Ok(())
    }

    // ── Queries ────────────────────────────────────────

    pub fn contains_vertex(&self, v: VertexId) -> bool {
        self.alive.get(v as usize).copied().unwrap_or(false)
    }

    pub fn num_vertices(&self) -> usize {
        self.vertex_count
    }

    pub fn num_edges(&self) -> usize {
        self.edge_count
    }

    /// Exclusive upper bound on vertex ids; sized for dense per-vertex arrays
    /// even when removal left holes.
    pub fn vertex_bound(&self) -> usize {
        self.alive.len()
    }

    /// Exclusive upper bound on edge ids.
    pub fn edge_bound(&self) -> usize {
        self.edges.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, &a)| a)
            .map(|(i, _)| i as VertexId)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter().flatten()
    }

    pub fn edge(&self, e: EdgeId) -> Option<&Edge> {
        self.edges.get(e as usize).and_then(Option::as_ref)
    }

    pub fn edge_endpoints(&self, e: EdgeId) -> Result<(VertexId, VertexId), GraphError> {
        self.edge(e)
            .map(|edge| (edge.source, edge.target))
            .ok_or(GraphError::EdgeNotFound(e))
    }

    /// Edges leaving `v` under the effective directedness: `(edge_id,
    /// neighbor)`. Undirected graphs also yield the stored incoming edges; a
    /// self-loop then appears twice, once per orientation.
    pub fn out_edges(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, VertexId)> + '_ {
        let extra: &[(EdgeId, VertexId)] =
            if self.is_directed() { &[] } else { &self.inc[v as usize] };
        self.out[v as usize].iter().chain(extra.iter()).copied()
    }

    /// Edges entering `v` under the effective directedness.
    pub fn in_edges(&self, v: VertexId) -> impl Iterator<Item = (EdgeId, VertexId)> + '_ {
        let extra: &[(EdgeId, VertexId)] =
            if self.is_directed() { &[] } else { &self.out[v as usize] };
        self.inc[v as usize].iter().chain(extra.iter()).copied()
    }

    pub fn out_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.out_edges(v).map(|(_, w)| w)
    }

    pub fn in_neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.in_edges(v).map(|(_, w)| w)
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        let base = self.out[v as usize].len();
        if self.is_directed() { base } else { base + self.inc[v as usize].len() }
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        let base = self.inc[v as usize].len();
        if self.is_directed() { base } else { base + self.out[v as usize].len() }
    }

    /// Sum of weights over [`Graph::out_edges`]; unit weights without a map.
    pub fn weighted_out_degree(&self, v: VertexId, weight: Option<&EdgePropMap>) -> f64 {
        self.out_edges(v).map(|(e, _)| edge_weight(weight, e)).sum()
    }

    pub fn weighted_in_degree(&self, v: VertexId, weight: Option<&EdgePropMap>) -> f64 {
        self.in_edges(v).map(|(e, _)| edge_weight(weight, e)).sum()
    }
}

// ─────────────────────────────────────────────
// DirectednessGuard
// ─────────────────────────────────────────────

/// Scoped directedness override. Restores the graph's previous directedness
/// when dropped, so an early `?` return cannot leak a reinterpreted graph.
#[must_use = "dropping the guard immediately restores the previous directedness"]
pub struct DirectednessGuard<'g> {
    graph: &'g Graph,
    prev: bool,
}

impl Drop for DirectednessGuard<'_> {
    fn drop(&mut self) {
        self.graph.directed.set(self.prev);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
