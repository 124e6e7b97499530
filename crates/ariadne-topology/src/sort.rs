//! Topological ordering by depth-first finish time.

use ariadne_graph::{Graph, VertexId, VertexIndex};

/// Orders the vertices of a DAG so that every edge `(u, v)` has `v` appear
/// before `u` (reverse topological order, the natural output of DFS finish
/// times). The caller is responsible for acyclicity; on a cyclic input the
/// order is meaningless but every vertex still appears exactly once.
pub fn topological_sort(g: &Graph) -> Vec<VertexId> {
    let index = VertexIndex::build(g);
    let n = index.len();
    let mut adj: Vec<Vec<usize>> = vec![vec![]; n];
    for e in g.edges() {
        adj[index.idx(e.source)].push(index.idx(e.target));
    }

    let mut visited = vec![false; n];
    let mut order: Vec<VertexId> = Vec::with_capacity(n);

    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some((v, ni)) = stack.last_mut() {
            let v = *v;
            if *ni < adj[v].len() {
                let w = adj[v][*ni];
                *ni += 1;
                if !visited[w] {
                    visited[w] = true;
                    stack.push((w, 0));
                }
            } else {
                order.push(index.vertex(v));
                stack.pop();
            }
        }
    }

    order
}

// ── Tests ───────────────────────────────────────────────────────────────────
