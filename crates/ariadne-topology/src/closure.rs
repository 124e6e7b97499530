//! Transitive closure of a directed graph.

use std::collections::VecDeque;
use std::time::Instant;

use ariadne_graph::{Graph, GraphError, VertexIndex};

/// Builds the transitive closure of `g`: a new directed graph on the same
/// vertex ids (holes included) with an edge `(u, v)` whenever `g` has a
/// directed path of at least one edge from `u` to `v`. A vertex on a cycle
/// therefore gains a self-loop. Undirected graphs are rejected.
pub fn transitive_closure(g: &Graph) -> Result<Graph, GraphError> {
    if !g.is_directed() {
        return Err(GraphError::InvalidArgument(
            "transitive closure requires a directed graph".into(),
        ));
    }
    let start = Instant::now();

    // Reproduce the id space, holes and all, so edges land on familiar ids.
    let mut closure = Graph::with_vertices(g.vertex_bound(), true);
    for v in 0..g.vertex_bound() as u32 {
        if !g.contains_vertex(v) {
            closure.remove_vertex(v)?;
        }
    }

    let index = VertexIndex::build(g);
    let n = index.len();
    let mut adj: Vec<Vec<usize>> = vec![vec![]; n];
    for e in g.edges() {
        adj[index.idx(e.source)].push(index.idx(e.target));
    }

    let mut seen = vec![usize::MAX; n]; // stamped per source, avoids clearing
    let mut queue = VecDeque::new();
    for src in 0..n {
        queue.clear();
        for &w in &adj[src] {
            if seen[w] != src {
                seen[w] = src;
                queue.push_back(w);
            }
        }
        while let Some(v) = queue.pop_front() {
            closure.add_edge(index.vertex(src), index.vertex(v))?;
            for &w in &adj[v] {
                if seen[w] != src {
                    seen[w] = src;
                    queue.push_back(w);
                }
            }
        }
    }

    tracing::debug!(
        vertices = g.num_vertices(),
        closure_edges = closure.num_edges(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "transitive closure done"
    );
    Ok(closure)
}

// ── Tests ───────────────────────────────────────────────────────────────────
