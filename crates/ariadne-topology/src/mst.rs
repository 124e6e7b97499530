//! Minimum spanning trees: Kruskal without a root, Prim from one.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;

use ordered_float::OrderedFloat;

use ariadne_graph::{
    edge_weight, EdgeId, EdgePropMap, Graph, GraphError, ValueType, VertexId, VertexIndex,
};

use crate::components::UnionFind;

/// Marks a minimum spanning tree (or forest) of `g`.
///
/// The graph is treated as undirected for the duration of the call. Without a
/// `root` the tree is grown by Kruskal's algorithm over globally sorted edges;
/// with one, by Prim's algorithm and only the root's component is spanned.
/// Returns a `Bool` edge map with `true` on tree edges. Self-loops never make
/// the tree.
pub fn min_spanning_tree(
    g: &Graph,
    weight: Option<&EdgePropMap>,
    root: Option<VertexId>,
) -> Result<EdgePropMap, GraphError> {
    let _guard = g.push_directedness(false);
    let start = Instant::now();

    let mut tree = EdgePropMap::new(ValueType::Bool);
    for e in g.edges() {
        tree.set_bool(e.id, false)?;
    }

    match root {
        None => kruskal(g, weight, &mut tree)?,
        Some(r) => {
            if !g.contains_vertex(r) {
                return Err(GraphError::VertexNotFound(r));
            }
            prim(g, weight, r, &mut tree)?;
        }
    }

    tracing::debug!(elapsed_ms = start.elapsed().as_millis() as u64, "mst done");
    Ok(tree)
}

fn kruskal(
    g: &Graph,
    weight: Option<&EdgePropMap>,
    tree: &mut EdgePropMap,
) -> Result<(), GraphError> {
    let index = VertexIndex::build(g);

    let mut edges: Vec<(OrderedFloat<f64>, EdgeId, usize, usize)> = g
        .edges()
        .filter(|e| e.source != e.target)
        .map(|e| {
            (
                OrderedFloat(edge_weight(weight, e.id)),
                e.id,
                index.idx(e.source),
                index.idx(e.target),
            )
        })
        .collect();
    edges.sort();

    let mut uf = UnionFind::new(index.len());
    for (_, id, si, ti) in edges {
        if uf.find(si) != uf.find(ti) {
            uf.union(si, ti);
            tree.set_bool(id, true)?;
        }
    }
    Ok(())
}

fn prim(
    g: &Graph,
    weight: Option<&EdgePropMap>,
    root: VertexId,
    tree: &mut EdgePropMap,
) -> Result<(), GraphError> {
    let index = VertexIndex::build(g);
    let mut visited = vec![false; index.len()];
    visited[index.idx(root)] = true;

    // lazy Prim: stale heap entries are discarded on pop
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, EdgeId, usize)>> = BinaryHeap::new();
    for (eid, nb) in g.out_edges(root) {
        if nb != root {
            heap.push(Reverse((OrderedFloat(edge_weight(weight, eid)), eid, index.idx(nb))));
        }
    }

    while let Some(Reverse((_, eid, ti))) = heap.pop() {
        if visited[ti] {
            continue;
        }
        visited[ti] = true;
        tree.set_bool(eid, true)?;
        let v = index.vertex(ti);
        for (ne, nb) in g.out_edges(v) {
            if nb != v && !visited[index.idx(nb)] {
                heap.push(Reverse((OrderedFloat(edge_weight(weight, ne)), ne, index.idx(nb))));
            }
        }
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────
