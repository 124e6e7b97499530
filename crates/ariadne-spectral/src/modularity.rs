//! Matrix-free modularity operator.

use ariadne_graph::{EdgePropMap, Graph, GraphError, VertexPropMap};

use crate::adjacency::adjacency;
use crate::coo::CooMatrix;
use crate::util::resolve_vertex_index;

/// The modularity matrix
///
/// ```text
/// B_ij = A_ij - k⁺_i k⁻_j / 2E
/// ```
///
/// represented as a linear operator rather than materialized triples: the
/// rank-one correction `k⁺ k⁻ᵀ / 2E` would be dense. The struct owns the
/// adjacency triples and both degree vectors, so applying it involves no
/// captured references.
pub struct ModularityOperator {
    adj: CooMatrix,
    k_in: Vec<f64>,
    k_out: Vec<f64>,
    two_e: f64,
}

impl ModularityOperator {
    pub fn shape(&self) -> (usize, usize) {
        self.adj.shape()
    }

    /// `y = B · x = A·x - k_out · (k_in · x) / 2E`.
    pub fn matvec(&self, x: &[f64]) -> Vec<f64> {
        let mut y = self.adj.matvec(x);
        let dot: f64 = self.k_in.iter().zip(x.iter()).map(|(a, b)| a * b).sum();
        for (yi, ko) in y.iter_mut().zip(self.k_out.iter()) {
            *yi -= ko * dot / self.two_e;
        }
        y
    }

    /// Adjoint apply, `y = Bᵀ · x`, using the adjacency transpose and the
    /// degree vectors swapped.
    pub fn rmatvec(&self, x: &[f64]) -> Vec<f64> {
        let mut y = self.adj.rmatvec(x);
        let dot: f64 = self.k_out.iter().zip(x.iter()).map(|(a, b)| a * b).sum();
        for (yi, ki) in y.iter_mut().zip(self.k_in.iter()) {
            *yi -= ki * dot / self.two_e;
        }
        y
    }
}

/// Build the modularity operator. `k_out` is the weighted out-degree vector;
/// `k_in` the weighted in-degree for directed graphs and the out-degree again
/// for undirected ones. `2E` is the total of `k_out`.
pub fn modularity_matrix(
    g: &Graph,
    weight: Option<&EdgePropMap>,
    index: Option<&VertexPropMap>,
) -> Result<ModularityOperator, GraphError> {
    let adj = adjacency(g, weight, index)?;
    let (idx, dim) = resolve_vertex_index(g, index)?;

    let mut k_in = vec![0.0_f64; dim];
    let mut k_out = vec![0.0_f64; dim];
    for v in g.vertices() {
        let i = idx[v as usize];
        k_out[i] = g.weighted_out_degree(v, weight);
        k_in[i] = if g.is_directed() { g.weighted_in_degree(v, weight) } else { k_out[i] };
    }
    let two_e: f64 = k_out.iter().sum();
    if two_e == 0.0 {
        return Err(GraphError::InvalidArgument(
            "modularity operator undefined for a graph with zero total degree".into(),
        ));
    }

    Ok(ModularityOperator { adj, k_in, k_out, two_e })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(directed: bool) -> Graph {
        let mut g = Graph::with_vertices(4, directed);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 3).unwrap();
        g.add_edge(3, 0).unwrap();
        g
    }

    #[test]
    fn rows_annihilate_the_all_ones_vector_undirected() {
        // For undirected graphs B·1 = A·1 - k·(k·1)/2E = k - k = 0.
        let g = square(false);
        let b = modularity_matrix(&g, None, None).unwrap();
        let y = b.matvec(&[1.0; 4]);
        for v in y {
            assert!(v.abs() < 1e-12, "B·1 component {v} should vanish");
        }
    }

    #[test]
    fn matvec_and_rmatvec_are_adjoint() {
        let g = square(true);
        let b = modularity_matrix(&g, None, None).unwrap();
        let x = [1.0, -1.0, 2.0, 0.5];
        let y = [0.3, 0.1, -0.7, 1.0];
        let lhs: f64 = b.matvec(&x).iter().zip(y.iter()).map(|(a, c)| a * c).sum();
        let rhs: f64 = x.iter().zip(b.rmatvec(&y).iter()).map(|(a, c)| a * c).sum();
        assert!((lhs - rhs).abs() < 1e-12);
    }

    #[test]
    fn edgeless_graph_is_rejected() {
        let g = Graph::with_vertices(3, true);
        assert!(matches!(modularity_matrix(&g, None, None), Err(GraphError::InvalidArgument(_))));
    }
}
