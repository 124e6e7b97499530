//! Adjacency matrix construction.

use ariadne_graph::{edge_weight, EdgePropMap, Graph, GraphError, VertexPropMap};

use crate::coo::CooMatrix;
use crate::util::resolve_vertex_index;

/// The (weighted) adjacency matrix as coordinate triples:
///
/// ```text
/// a_ij = w        for each edge j → i
/// a_ii = 2·w      for each self-loop on i
/// ```
///
/// Note the convention: for directed graphs entry `(i, j)` corresponds to the
/// directed edge `j → i`, transposed from the naive reading but the typical
/// network-literature definition. Parallel edges accumulate into the entry.
///
/// `index` optionally overrides the row/column index per vertex; the shape
/// grows to the maximum index encountered.
pub fn adjacency(
    g: &Graph,
    weight: Option<&EdgePropMap>,
    index: Option<&VertexPropMap>,
) -> Result<CooMatrix, GraphError> {
    let (idx, dim) = resolve_vertex_index(g, index)?;
    let nnz = if g.is_directed() { g.num_edges() } else { 2 * g.num_edges() };
    let mut m = CooMatrix::with_capacity((dim, dim), nnz);

    for edge in g.edges() {
        let w = edge_weight(weight, edge.id);
        let src = idx[edge.source as usize];
        let dst = idx[edge.target as usize];
        if g.is_directed() {
            if src == dst {
                m.push(src, src, 2.0 * w);
            } else {
                m.push(dst, src, w);
            }
        } else {
            // Both orientations; a self-loop pushes (i, i) twice, giving 2w.
            m.push(dst, src, w);
            m.push(src, dst, w);
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_graph::{PropMap, ValueType};

    #[test]
    fn directed_entry_is_transposed() {
        let mut g = Graph::with_vertices(3, true);
        g.add_edge(0, 1).unwrap();
        let a = adjacency(&g, None, None).unwrap().to_dense();
        // Edge 0 → 1 lands at a[1][0].
        assert_eq!(a[1][0], 1.0);
        assert_eq!(a[0][1], 0.0);
    }

    #[test]
    fn undirected_matrix_is_symmetric() {
        let mut g = Graph::with_vertices(3, false);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let a = adjacency(&g, None, None).unwrap().to_dense();
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(a[i][j], a[j][i]);
            }
        }
        assert_eq!(a[0][1], 1.0);
    }

    #[test]
    fn self_loop_counts_twice() {
        let mut g = Graph::with_vertices(2, true);
        g.add_edge(0, 0).unwrap();
        let a = adjacency(&g, None, None).unwrap().to_dense();
        assert_eq!(a[0][0], 2.0);

        let mut h = Graph::with_vertices(2, false);
        h.add_edge(0, 0).unwrap();
        let b = adjacency(&h, None, None).unwrap().to_dense();
        assert_eq!(b[0][0], 2.0);
    }

    #[test]
    fn parallel_edges_accumulate() {
        let mut g = Graph::with_vertices(2, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 1).unwrap();
        let a = adjacency(&g, None, None).unwrap().to_dense();
        assert_eq!(a[1][0], 2.0);
    }

    #[test]
    fn custom_index_grows_the_shape() {
        let mut g = Graph::with_vertices(2, true);
        g.add_edge(0, 1).unwrap();
        let mut index = PropMap::new(ValueType::Int32);
        index.set_i32(0, 5).unwrap();
        index.set_i32(1, 9).unwrap();
        let a = adjacency(&g, None, Some(&index)).unwrap();
        assert_eq!(a.shape(), (10, 10));
        assert_eq!(a.to_dense()[9][5], 1.0);
    }

    #[test]
    fn weights_scale_entries() {
        let mut g = Graph::with_vertices(2, true);
        let e = g.add_edge(0, 1).unwrap();
        let mut weight = PropMap::new(ValueType::Double);
        weight.set_f64(e, 2.5).unwrap();
        let a = adjacency(&g, Some(&weight), None).unwrap().to_dense();
        assert_eq!(a[1][0], 2.5);
    }
}
