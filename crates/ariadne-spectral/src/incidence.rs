//! Incidence matrix construction.

use ariadne_graph::{EdgePropMap, Graph, GraphError, VertexPropMap};

use crate::coo::CooMatrix;
use crate::util::{resolve_edge_index, resolve_vertex_index};

/// The incidence matrix: rows are vertices, columns are edges.
///
/// Undirected: `b_ij = 1` when vertex `i` and edge `j` are incident.
/// Directed: `+1` where edge `j` enters `i`, `-1` where it leaves `i`.
///
/// Fails with `InvalidArgument` on a graph with no edges; an edge-indexed
/// matrix with zero columns has no meaning here.
pub fn incidence(
    g: &Graph,
    vindex: Option<&VertexPropMap>,
    eindex: Option<&EdgePropMap>,
) -> Result<CooMatrix, GraphError> {
    if g.num_edges() == 0 {
        return Err(GraphError::InvalidArgument(
            "cannot construct incidence matrix for a graph with no edges".into(),
        ));
    }

    let (vidx, vdim) = resolve_vertex_index(g, vindex)?;
    let (eidx, edim) = resolve_edge_index(g, eindex)?;
    let mut m = CooMatrix::with_capacity((vdim, edim), 2 * g.num_edges());

    for edge in g.edges() {
        let src = vidx[edge.source as usize];
        let dst = vidx[edge.target as usize];
        let col = eidx[edge.id as usize];
        if g.is_directed() {
            m.push(src, col, -1.0);
            m.push(dst, col, 1.0);
        } else {
            m.push(src, col, 1.0);
            m.push(dst, col, 1.0);
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_edge_graph_is_rejected() {
        let g = Graph::with_vertices(3, true);
        assert!(matches!(incidence(&g, None, None), Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn directed_columns_sum_to_zero() {
        let mut g = Graph::with_vertices(3, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let b = incidence(&g, None, None).unwrap();
        assert_eq!(b.shape(), (3, 2));
        let dense = b.to_dense();
        assert_eq!(dense[0][0], -1.0);
        assert_eq!(dense[1][0], 1.0);
        for col in 0..2 {
            let sum: f64 = (0..3).map(|row| dense[row][col]).sum();
            assert_eq!(sum, 0.0);
        }
    }

    #[test]
    fn undirected_columns_sum_to_two() {
        let mut g = Graph::with_vertices(3, false);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        let dense = incidence(&g, None, None).unwrap().to_dense();
        for col in 0..2 {
            let sum: f64 = (0..3).map(|row| dense[row][col]).sum();
            assert_eq!(sum, 2.0);
        }
    }
}
