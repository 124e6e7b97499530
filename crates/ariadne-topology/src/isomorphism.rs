//! Graph isomorphism by backtracking with degree-signature pruning.

use std::collections::HashMap;
use std::time::Instant;

use ariadne_graph::{Graph, GraphError, ValueType, VertexIndex, VertexPropMap};

/// Tests whether `g1` and `g2` are isomorphic. On success also returns an
/// `Int32` vertex map sending every `g1` vertex to its image in `g2`.
///
/// Parallel edges must match in multiplicity. Exponential in the worst case;
/// the degree-signature ordering keeps typical inputs fast.
pub fn isomorphism(g1: &Graph, g2: &Graph) -> Result<(bool, Option<VertexPropMap>), GraphError> {
    let start = Instant::now();

    if g1.is_directed() != g2.is_directed() {
        return Ok((false, None));
    }
    if g1.num_vertices() != g2.num_vertices() || g1.num_edges() != g2.num_edges() {
        return Ok((false, None));
    }
    if g1.num_vertices() == 0 {
        return Ok((true, Some(VertexPropMap::new(ValueType::Int32))));
    }

    let s1 = Side::build(g1);
    let s2 = Side::build(g2);

    // Degree multisets must agree before any search is worth running.
    let mut sig1: Vec<(usize, usize)> = s1.sigs.clone();
    let mut sig2: Vec<(usize, usize)> = s2.sigs.clone();
    sig1.sort_unstable();
    sig2.sort_unstable();
    if sig1 != sig2 {
        return Ok((false, None));
    }

    let n = s1.sigs.len();
    // Assign high-degree vertices first; they constrain the search most.
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_unstable_by(|&a, &b| s1.sigs[b].cmp(&s1.sigs[a]));

    let mut mapping = vec![usize::MAX; n]; // g1 idx -> g2 idx
    let mut used = vec![false; n];

    if !assign(&s1, &s2, &order, 0, &mut mapping, &mut used) {
        return Ok((false, None));
    }

    let mut out = VertexPropMap::new(ValueType::Int32);
    for (i, &j) in mapping.iter().enumerate() {
        out.set_i32(s1.index.vertex(i), s2.index.vertex(j) as i32)?;
    }

    tracing::debug!(
        vertices = n,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "isomorphism found"
    );
    Ok((true, Some(out)))
}

/// One graph's view of the search: dense index, degree signatures and edge
/// multiplicities under its own effective directedness.
struct Side {
    index: VertexIndex,
    directed: bool,
    sigs: Vec<(usize, usize)>,
    mult: HashMap<(usize, usize), usize>,
}

impl Side {
    fn build(g: &Graph) -> Self {
        let index = VertexIndex::build(g);
        let directed = g.is_directed();
        let sigs: Vec<(usize, usize)> = index
            .vertices()
            .iter()
            .map(|&v| (g.out_degree(v), g.in_degree(v)))
            .collect();
        let mut mult: HashMap<(usize, usize), usize> = HashMap::new();
        for e in g.edges() {
            let (mut a, mut b) = (index.idx(e.source), index.idx(e.target));
            if !directed && a > b {
                std::mem::swap(&mut a, &mut b);
            }
            *mult.entry((a, b)).or_default() += 1;
        }
        Self { index, directed, sigs, mult }
    }

    fn mult(&self, a: usize, b: usize) -> usize {
        let key = if !self.directed && a > b { (b, a) } else { (a, b) };
        self.mult.get(&key).copied().unwrap_or(0)
    }
}

fn assign(
    s1: &Side,
    s2: &Side,
    order: &[usize],
    depth: usize,
    mapping: &mut [usize],
    used: &mut [bool],
) -> bool {
    if depth == order.len() {
        return true;
    }
    let v = order[depth];
    for cand in 0..used.len() {
        if used[cand] || s2.sigs[cand] != s1.sigs[v] {
            continue;
        }
        if consistent(s1, s2, mapping, v, cand) {
            mapping[v] = cand;
            used[cand] = true;
            if assign(s1, s2, order, depth + 1, mapping, used) {
                return true;
            }
            mapping[v] = usize::MAX;
            used[cand] = false;
        }
    }
    false
}

/// Every edge (in either direction, with multiplicity) between `v` and an
/// already-assigned vertex must exist identically between their images.
fn consistent(s1: &Side, s2: &Side, mapping: &[usize], v: usize, cand: usize) -> bool {
    for (u, &img) in mapping.iter().enumerate() {
        if img == usize::MAX {
            continue;
        }
        if s1.mult(v, u) != s2.mult(cand, img) {
            return false;
        }
        if s1.mult(u, v) != s2.mult(img, cand) {
            return false;
        }
    }
    s1.mult(v, v) == s2.mult(cand, cand)
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from(n: usize, directed: bool, edges: &[(u32, u32)]) -> Graph {
        let mut g = Graph::with_vertices(n, directed);
        for &(s, t) in edges {
            g.add_edge(s, t).unwrap();
        }
        g
    }

    #[test]
    fn relabelled_cycle_is_isomorphic() {
        let g1 = graph_from(4, false, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let g2 = graph_from(4, false, &[(2, 0), (0, 3), (3, 1), (1, 2)]);
        let (iso, map) = isomorphism(&g1, &g2).unwrap();
        assert!(iso);
        let map = map.unwrap();
        // The mapping must preserve adjacency.
        for e in g1.edges() {
            let a = map.get_i64(e.source) as u32;
            let b = map.get_i64(e.target) as u32;
            assert!(g2
                .edges()
                .any(|f| (f.source, f.target) == (a, b) || (f.source, f.target) == (b, a)));
        }
    }

    #[test]
    fn path_and_star_are_not_isomorphic() {
        // Same vertex and edge counts, different degree sequences.
        let path = graph_from(4, false, &[(0, 1), (1, 2), (2, 3)]);
        let star = graph_from(4, false, &[(0, 1), (0, 2), (0, 3)]);
        let (iso, map) = isomorphism(&path, &star).unwrap();
        assert!(!iso);
        assert!(map.is_none());
    }

    #[test]
    fn directed_orientation_matters() {
        let g1 = graph_from(3, true, &[(0, 1), (1, 2)]);
        let g2 = graph_from(3, true, &[(0, 1), (2, 1)]);
        let (iso, _) = isomorphism(&g1, &g2).unwrap();
        assert!(!iso);
    }

    #[test]
    fn different_sizes_fail_fast() {
        let g1 = graph_from(2, false, &[(0, 1)]);
        let g2 = graph_from(3, false, &[(0, 1)]);
        let (iso, _) = isomorphism(&g1, &g2).unwrap();
        assert!(!iso);
    }

    #[test]
    fn parallel_edge_multiplicity_must_match() {
        let g1 = graph_from(2, false, &[(0, 1), (0, 1)]);
        let g2 = graph_from(2, false, &[(0, 1), (1, 0)]);
        // Undirected: both have a double edge between the two vertices.
        let (iso, _) = isomorphism(&g1, &g2).unwrap();
        assert!(iso);

        let g3 = graph_from(2, false, &[(0, 1)]);
        let (iso2, _) = isomorphism(&g1, &g3).unwrap();
        assert!(!iso2); // edge counts differ
    }

    #[test]
    fn empty_graphs_are_isomorphic() {
        let g1 = Graph::new(true);
        let g2 = Graph::new(true);
        let (iso, map) = isomorphism(&g1, &g2).unwrap();
        assert!(iso);
        assert!(map.unwrap().is_empty());
    }

    #[test]
    fn self_loops_constrain_the_mapping() {
        let g1 = graph_from(2, true, &[(0, 0), (0, 1)]);
        let g2 = graph_from(2, true, &[(1, 1), (1, 0)]);
        let (iso, map) = isomorphism(&g1, &g2).unwrap();
        assert!(iso);
        assert_eq!(map.unwrap().get_i64(0), 1);
    }
}
