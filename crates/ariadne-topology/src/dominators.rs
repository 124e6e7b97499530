//! Immediate dominators via the Lengauer-Tarjan algorithm.

use std::time::Instant;

use ariadne_graph::{Graph, GraphError, ValueType, VertexId, VertexIndex, VertexPropMap};

const NONE: usize = usize::MAX;

/// Computes the dominator tree of a directed graph rooted at `root`.
///
/// Returns an `Int32` vertex map with the immediate dominator of every vertex
/// reachable from the root; the root dominates itself. Vertices the root
/// cannot reach have no entry. Undirected graphs are rejected.
pub fn dominator_tree(g: &Graph, root: VertexId) -> Result<VertexPropMap, GraphError> {
    if !g.is_directed() {
        return Err(GraphError::InvalidArgument(
            "dominator tree requires a directed graph".into(),
        ));
    }
    if !g.contains_vertex(root) {
        return Err(GraphError::VertexNotFound(root));
    }
    let start = Instant::now();

    let index = VertexIndex::build(g);
    let n = index.len();

    let mut succ: Vec<Vec<usize>> = vec![vec![]; n];
    let mut pred: Vec<Vec<usize>> = vec![vec![]; n];
    for e in g.edges() {
        succ[index.idx(e.source)].push(index.idx(e.target));
        pred[index.idx(e.target)].push(index.idx(e.source));
    }

    // DFS from the root, numbering vertices in visit order. Everything below
    // works in dfs-number space.
    let mut dfn = vec![NONE; n]; // dense idx -> dfs number
    let mut order: Vec<usize> = Vec::new(); // dfs number -> dense idx
    let mut parent = vec![NONE; n]; // in dfs numbers
    let mut stack: Vec<(usize, usize)> = vec![(index.idx(root), 0)]; // (idx, next slot)
    dfn[index.idx(root)] = 0;
    order.push(index.idx(root));

    while let Some((vi, ni)) = stack.last_mut() {
        let vi = *vi;
        if *ni < succ[vi].len() {
            let wi = succ[vi][*ni];
            *ni += 1;
            if dfn[wi] == NONE {
                dfn[wi] = order.len();
                parent[dfn[wi]] = dfn[vi];
                order.push(wi);
                stack.push((wi, 0));
            }
        } else {
            stack.pop();
        }
    }

    let reached = order.len();
    let mut semi: Vec<usize> = (0..reached).collect();
    let mut idom = vec![NONE; reached];
    let mut ancestor = vec![NONE; reached];
    let mut label: Vec<usize> = (0..reached).collect();
    let mut bucket: Vec<Vec<usize>> = vec![Vec::new(); reached];

    // Path-compressing EVAL over the ancestor forest.
    fn compress(v: usize, ancestor: &mut [usize], label: &mut [usize], semi: &[usize]) {
        let mut chain = Vec::new();
        let mut x = v;
        while ancestor[ancestor[x]] != NONE {
            chain.push(x);
            x = ancestor[x];
        }
        for &w in chain.iter().rev() {
            let a = ancestor[w];
            if semi[label[a]] < semi[label[w]] {
                label[w] = label[a];
            }
            ancestor[w] = ancestor[a];
        }
    }
    fn eval(v: usize, ancestor: &mut [usize], label: &mut [usize], semi: &[usize]) -> usize {
        if ancestor[v] == NONE {
            v
        } else {
            compress(v, ancestor, label, semi);
            label[v]
        }
    }

    for w in (1..reached).rev() {
        for &p in &pred[order[w]] {
            let pn = dfn[p];
            if pn == NONE {
                continue; // predecessor not reachable from the root
            }
            let u = eval(pn, &mut ancestor, &mut label, &semi);
            if semi[u] < semi[w] {
                semi[w] = semi[u];
            }
        }
        bucket[semi[w]].push(w);
        ancestor[w] = parent[w];

        let p = parent[w];
        for v in bucket[p].drain(..) {
            let u = eval(v, &mut ancestor, &mut label, &semi);
            idom[v] = if semi[u] < semi[v] { u } else { p };
        }
    }

    for w in 1..reached {
        if idom[w] != semi[w] {
            idom[w] = idom[idom[w]];
        }
    }
    idom[0] = 0;

    let mut out = VertexPropMap::new(ValueType::Int32);
    for w in 0..reached {
        out.set_i32(index.vertex(order[w]), index.vertex(order[idom[w]]) as i32)?;
    }

    tracing::debug!(
        reached,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "dominator tree done"
    );
    Ok(out)
}

// ── Tests ───────────────────────────────────────────────────────────────────
