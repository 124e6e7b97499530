//! Hashimoto (non-backtracking) matrix construction.

use ariadne_graph::{EdgePropMap, Graph, GraphError};

use crate::coo::CooMatrix;
use crate::util::resolve_edge_index;

/// The Hashimoto matrix over edge directions:
///
/// ```text
/// h_{k→l, i→j} = 1   iff   l = i and k ≠ j
/// ```
///
/// i.e. the walk may continue from edge `k→l` along any edge leaving `l`
/// that does not immediately backtrack onto `k`. Shape is `2|E| × 2|E|` for
/// undirected graphs (each stored edge yields two directed slots, `e` and
/// `e + |E|` for the reverse orientation) and `|E| × |E|` for directed ones.
///
/// `index` optionally overrides the edge slot indices.
pub fn hashimoto(g: &Graph, index: Option<&EdgePropMap>) -> Result<CooMatrix, GraphError> {
    let (eidx, edim) = resolve_edge_index(g, index)?;

    // Directed arcs: (slot, from, to), grouped by origin vertex.
    let mut arcs_out: Vec<Vec<(usize, u32, u32)>> = vec![Vec::new(); g.vertex_bound()];
    let dim = if g.is_directed() {
        for edge in g.edges() {
            arcs_out[edge.source as usize].push((eidx[edge.id as usize], edge.source, edge.target));
        }
        edim
    } else {
        for edge in g.edges() {
            let slot = eidx[edge.id as usize];
            arcs_out[edge.source as usize].push((slot, edge.source, edge.target));
            arcs_out[edge.target as usize].push((slot + edim, edge.target, edge.source));
        }
        2 * edim
    };

    let mut m = CooMatrix::new((dim, dim));
    for arcs in &arcs_out {
        for &(slot_a, k, l) in arcs {
            for &(slot_b, _, j) in &arcs_out[l as usize] {
                if j != k {
                    m.push(slot_a, slot_b, 1.0);
                }
            }
        }
    }
    Ok(m)
}

/// Compact non-backtracking form, shape `2|V| × 2|V|`:
///
/// ```text
/// h = [[ A,   -I ],
///      [ D-I,  0 ]]
/// ```
///
/// built from the unweighted symmetric adjacency `A` and the degree
/// diagonal `D`.
pub fn hashimoto_compact(g: &Graph) -> Result<CooMatrix, GraphError> {
    let n = g.vertex_bound();
    let mut m = CooMatrix::new((2 * n, 2 * n));

    let mut degree = vec![0.0_f64; n];
    for edge in g.edges() {
        m.push(edge.source as usize, edge.target as usize, 1.0);
        m.push(edge.target as usize, edge.source as usize, 1.0);
        degree[edge.source as usize] += 1.0;
        degree[edge.target as usize] += 1.0;
    }

    for v in g.vertices() {
        let i = v as usize;
        m.push(i, n + i, -1.0);
        m.push(n + i, i, degree[i] - 1.0);
    }
    Ok(m)
}
