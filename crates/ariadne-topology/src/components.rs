//! Connected components: weak (Union-Find), strong (Tarjan) and biconnected.

use std::time::Instant;

use ariadne_graph::{
    EdgePropMap, Graph, GraphError, ValueType, VertexIndex, VertexPropMap,
};

/// Component labelling over the vertices of a graph.
pub struct ComponentResult {
    /// `Int32` label per vertex, contiguous from zero.
    pub labels: VertexPropMap,
    pub component_count: usize,
    pub largest_component_size: usize,
    pub duration_ms: u64,
}

/// Biconnected decomposition of an undirected graph.
pub struct BiconnectedResult {
    /// `Int32` component label per edge.
    pub edge_labels: EdgePropMap,
    /// `Bool` articulation flag per vertex.
    pub articulation: VertexPropMap,
    pub component_count: usize,
    pub duration_ms: u64,
}

// ── Union-Find ──────────────────────────────────────────────────────────────

pub(crate) struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<usize>,
}

impl UnionFind {
    pub(crate) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
        }
    }

    pub(crate) fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]); // path compression
        }
        self.parent[x]
    }

    pub(crate) fn union(&mut self, x: usize, y: usize) {
        let rx = self.find(x);
        let ry = self.find(y);
        if rx == ry {
            return;
        }
        // union by rank
        if self.rank[rx] < self.rank[ry] {
            self.parent[rx] = ry;
        } else if self.rank[rx] > self.rank[ry] {
            self.parent[ry] = rx;
        } else {
            self.parent[ry] = rx;
            self.rank[rx] += 1;
        }
    }
}

/// Labels connected components.
///
/// On a directed graph this yields strongly connected components (Tarjan);
/// on an undirected one, plain connected components (Union-Find). Passing
/// `Some(directed)` overrides the graph's own directedness for the duration
/// of the call. Labels are renumbered so that scanning vertices in ascending
/// id order meets the labels `0, 1, 2, ...` in first-seen order.
pub fn label_components(
    g: &Graph,
    directed_override: Option<bool>,
) -> Result<ComponentResult, GraphError> {
    let _guard = directed_override.map(|d| g.push_directedness(d));
    let start = Instant::now();

    let index = VertexIndex::build(g);
    let n = index.len();
    let mut labels = VertexPropMap::new(ValueType::Int32);
    if n == 0 {
        return Ok(ComponentResult {
            labels,
            component_count: 0,
            largest_component_size: 0,
            duration_ms: 0,
        });
    }

    let raw = if g.is_directed() {
        tarjan_scc(g, &index)
    } else {
        union_find_cc(g, &index)
    };

    // Renumber contiguously in first-seen order over ascending vertex ids.
    let mut remap = vec![usize::MAX; n];
    let mut next = 0usize;
    let mut sizes: Vec<usize> = Vec::new();
    for i in 0..n {
        let r = raw[i];
        if remap[r] == usize::MAX {
            remap[r] = next;
            sizes.push(0);
            next += 1;
        }
        sizes[remap[r]] += 1;
        labels.set_i32(index.vertex(i), remap[r] as i32)?;
    }

    let largest = sizes.iter().copied().max().unwrap_or(0);
    tracing::debug!(components = next, largest, "component labelling done");

    Ok(ComponentResult {
        labels,
        component_count: next,
        largest_component_size: largest,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn union_find_cc(g: &Graph, index: &VertexIndex) -> Vec<usize> {
    let n = index.len();
    let mut uf = UnionFind::new(n);
    for e in g.edges() {
        uf.union(index.idx(e.source), index.idx(e.target));
    }
    (0..n).map(|i| uf.find(i)).collect()
}

/// Tarjan's algorithm, iterative to stay off the call stack on deep graphs.
fn tarjan_scc(g: &Graph, index: &VertexIndex) -> Vec<usize> {
    let n = index.len();
    let mut adj: Vec<Vec<usize>> = vec![vec![]; n];
    for e in g.edges() {
        adj[index.idx(e.source)].push(index.idx(e.target));
    }

    let mut index_counter = 0usize;
    let mut stack: Vec<usize> = Vec::new();
    let mut on_stack = vec![false; n];
    let mut indices = vec![usize::MAX; n];
    let mut lowlinks = vec![usize::MAX; n];
    let mut component = vec![usize::MAX; n];
    let mut next_comp = 0usize;

    for start_node in 0..n {
        if indices[start_node] != usize::MAX {
            continue;
        }

        let mut dfs_stack: Vec<(usize, usize)> = vec![(start_node, 0)]; // (node, neighbor_idx)
        indices[start_node] = index_counter;
        lowlinks[start_node] = index_counter;
        index_counter += 1;
        stack.push(start_node);
        on_stack[start_node] = true;

        while let Some((v, ni)) = dfs_stack.last_mut() {
            let v = *v;
            if *ni < adj[v].len() {
                let w = adj[v][*ni];
                *ni += 1;
                if indices[w] == usize::MAX {
                    indices[w] = index_counter;
                    lowlinks[w] = index_counter;
                    index_counter += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    dfs_stack.push((w, 0));
                } else if on_stack[w] {
                    lowlinks[v] = lowlinks[v].min(indices[w]);
                }
            } else {
                if lowlinks[v] == indices[v] {
                    // v is root of an SCC
                    let cid = next_comp;
                    next_comp += 1;
                    loop {
                        let w = stack.pop().expect("tarjan stack underflow");
                        on_stack[w] = false;
                        component[w] = cid;
                        if w == v {
                            break;
                        }
                    }
                }
                let lv = lowlinks[v];
                dfs_stack.pop();
                if let Some((parent, _)) = dfs_stack.last() {
                    lowlinks[*parent] = lowlinks[*parent].min(lv);
                }
            }
        }
    }

    component
}

// ── Biconnected components ──────────────────────────────────────────────────

/// Labels the biconnected components of `g` and flags articulation points.
///
/// The graph is treated as undirected for the duration of the call. Each
/// self-loop forms a trivial component of its own.
pub fn label_biconnected_components(g: &Graph) -> Result<BiconnectedResult, GraphError> {
    let _guard = g.push_directedness(false);
    let start = Instant::now();

    let index = VertexIndex::build(g);
    let n = index.len();
    let mut edge_labels = EdgePropMap::new(ValueType::Int32);
    let mut articulation = VertexPropMap::new(ValueType::Bool);
    for v in g.vertices() {
        articulation.set_bool(v, false)?;
    }

    // (neighbor idx, edge id) per vertex; self-loops handled after the DFS.
    let mut adj: Vec<Vec<(usize, u32)>> = vec![vec![]; n];
    let mut self_loops: Vec<u32> = Vec::new();
    for e in g.edges() {
        if e.source == e.target {
            self_loops.push(e.id);
            continue;
        }
        let si = index.idx(e.source);
        let ti = index.idx(e.target);
        adj[si].push((ti, e.id));
        adj[ti].push((si, e.id));
    }

    let mut disc = vec![usize::MAX; n];
    let mut low = vec![usize::MAX; n];
    let mut time = 0usize;
    let mut edge_stack: Vec<u32> = Vec::new();
    let mut comp_count = 0usize;

    for root in 0..n {
        if disc[root] != usize::MAX {
            continue;
        }
        disc[root] = time;
        low[root] = time;
        time += 1;
        let mut root_children = 0usize;

        // (vertex, edge taken to reach it, next adjacency slot)
        let mut frames: Vec<(usize, Option<u32>, usize)> = vec![(root, None, 0)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.0;
            if frame.2 < adj[v].len() {
                let (w, e) = adj[v][frame.2];
                frame.2 += 1;
                if frame.1 == Some(e) {
                    continue; // the edge we arrived on
                }
                if disc[w] == usize::MAX {
                    edge_stack.push(e);
                    disc[w] = time;
                    low[w] = time;
                    time += 1;
                    if frames.len() == 1 {
                        root_children += 1;
                    }
                    frames.push((w, Some(e), 0));
                } else if disc[w] < disc[v] {
                    // back edge to an ancestor; the other orientation is skipped
                    edge_stack.push(e);
                    low[v] = low[v].min(disc[w]);
                }
            } else {
                let arrival = frame.1;
                frames.pop();
                if let Some(&(u, _, _)) = frames.last() {
                    low[u] = low[u].min(low[v]);
                    if low[v] >= disc[u] {
                        // u separates v's subtree; pop one component
                        let label = comp_count as i32;
                        comp_count += 1;
                        while let Some(popped) = edge_stack.pop() {
                            edge_labels.set_i32(popped, label)?;
                            if Some(popped) == arrival {
                                break;
                            }
                        }
                        if frames.len() > 1 {
                            articulation.set_bool(index.vertex(u), true)?;
                        }
                    }
                }
            }
        }

        if root_children > 1 {
            articulation.set_bool(index.vertex(root), true)?;
        }
    }

    for e in self_loops {
        edge_labels.set_i32(e, comp_count as i32)?;
        comp_count += 1;
    }

    tracing::debug!(components = comp_count, "biconnected labelling done");

    Ok(BiconnectedResult {
        edge_labels,
        articulation,
        component_count: comp_count,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

// ── Tests ───────────────────────────────────────────────────────────────────
