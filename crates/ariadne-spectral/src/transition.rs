//! Stochastic transition matrix construction.

use ariadne_graph::{EdgePropMap, Graph, GraphError, VertexPropMap};

use crate::adjacency::adjacency;
use crate::coo::CooMatrix;

/// The transition matrix `T_ij = A_ij / k_j`, where `k_j = Σ_i A_ij` is the
/// column sum of the adjacency matrix (the weighted out-degree of `j` under
/// the transposed `j → i` convention). Columns with nonzero degree sum to 1.
///
/// Built by rescaling the adjacency triples, so the round-trip property
/// `T_ij = A_ij / colsum_j(A)` holds exactly.
pub fn transition(
    g: &Graph,
    weight: Option<&EdgePropMap>,
    index: Option<&VertexPropMap>,
) -> Result<CooMatrix, GraphError> {
    let a = adjacency(g, weight, index)?;
    let k = a.col_sums();

    let mut m = CooMatrix::with_capacity(a.shape(), a.nnz());
    for (r, c, v) in a.triples() {
        // Zero-weight edges can leave a column sum of 0; those entries are
        // dropped rather than divided into NaN.
        if k[c] != 0.0 {
            m.push(r, c, v / k[c]);
        }
    }
    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ariadne_graph::{PropMap, ValueType};

    #[test]
    fn zero_weight_edges_produce_no_nan() {
        // A vertex whose out-edges all carry weight 0 has a zero column
        // sum; its entries must be dropped, not divided into NaN.
        let mut g = Graph::with_vertices(2, true);
        let e = g.add_edge(0, 1).unwrap();
        let mut weight = PropMap::new(ValueType::Double);
        weight.set_f64(e, 0.0).unwrap();
        let t = transition(&g, Some(&weight), None).unwrap();
        assert_eq!(t.nnz(), 0);
        assert!(t.vals.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn columns_sum_to_one() {
        let mut g = Graph::with_vertices(3, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        g.add_edge(1, 2).unwrap();
        let t = transition(&g, None, None).unwrap();
        let sums = t.col_sums();
        assert!((sums[0] - 1.0).abs() < 1e-12);
        assert!((sums[1] - 1.0).abs() < 1e-12);
        assert_eq!(sums[2], 0.0); // no outgoing edges
    }

    #[test]
    fn round_trips_against_adjacency() {
        let mut g = Graph::with_vertices(4, false);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(3, 0).unwrap();
        g.add_edge(0, 2).unwrap();

        let a = adjacency(&g, None, None).unwrap();
        let t = transition(&g, None, None).unwrap();
        let a_dense = a.to_dense();
        let t_dense = t.to_dense();
        let k = a.col_sums();

        for i in 0..4 {
            for j in 0..4 {
                if k[j] != 0.0 {
                    assert!(
                        (t_dense[i][j] - a_dense[i][j] / k[j]).abs() < 1e-12,
                        "T[{i}][{j}] mismatch"
                    );
                }
            }
        }
    }
}
