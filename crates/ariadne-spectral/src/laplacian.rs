//! Graph Laplacian construction, plain and normalized.

use ariadne_graph::{edge_weight, EdgePropMap, Graph, GraphError, VertexPropMap};

use crate::coo::CooMatrix;
use crate::util::resolve_vertex_index;

/// Which weighted degree `Γ(v)` enters the diagonal of a directed Laplacian.
/// Undirected graphs always use the full incident degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Deg {
    #[default]
    Total,
    In,
    Out,
}

/// The weighted Laplacian as coordinate triples:
///
/// ```text
/// ℓ_ii = Γ(v_i)
/// ℓ_ij = -w_ij    for each edge j → i, i ≠ j
/// ```
///
/// Self-loops contribute to neither the off-diagonals nor the degrees. The
/// normalized variant has diagonal 1 where `Γ(v_i) ≠ 0` (else 0) and
/// off-diagonals `-w/√(Γ(v_i)Γ(v_j))`.
pub fn laplacian(
    g: &Graph,
    deg: Deg,
    normalized: bool,
    weight: Option<&EdgePropMap>,
    index: Option<&VertexPropMap>,
) -> Result<CooMatrix, GraphError> {
    let (idx, dim) = resolve_vertex_index(g, index)?;

    // Γ per matrix slot, self-loops excluded.
    let mut gamma = vec![0.0_f64; dim];
    for edge in g.edges() {
        if edge.source == edge.target {
            continue;
        }
        let w = edge_weight(weight, edge.id);
        let src = idx[edge.source as usize];
        let dst = idx[edge.target as usize];
        if !g.is_directed() {
            gamma[src] += w;
            gamma[dst] += w;
        } else {
            // a_ij = edge j → i: "in" degree sums edges into the vertex,
            // "out" sums edges leaving it.
            match deg {
                Deg::Total => {
                    gamma[src] += w;
                    gamma[dst] += w;
                }
                Deg::In => gamma[dst] += w,
                Deg::Out => gamma[src] += w,
            }
        }
    }

    let mut m = CooMatrix::new((dim, dim));

    for edge in g.edges() {
        if edge.source == edge.target {
            continue;
        }
        let w = edge_weight(weight, edge.id);
        let src = idx[edge.source as usize];
        let dst = idx[edge.target as usize];
        if normalized {
            let denom = (gamma[src] * gamma[dst]).sqrt();
            let val = if denom != 0.0 { -w / denom } else { 0.0 };
            m.push(dst, src, val);
            if !g.is_directed() {
                m.push(src, dst, val);
            }
        } else {
            m.push(dst, src, -w);
            if !g.is_directed() {
                m.push(src, dst, -w);
            }
        }
    }

    for v in g.vertices() {
        let i = idx[v as usize];
        let diag = if normalized {
            if gamma[i] != 0.0 {
                1.0
            } else {
                0.0
            }
        } else {
            gamma[i]
        };
        m.push(i, i, diag);
    }

    Ok(m)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(directed: bool) -> Graph {
        let mut g = Graph::with_vertices(3, directed);
        g.add_edge(0, 1).unwrap();
        g.add_edge(1, 2).unwrap();
        g.add_edge(2, 0).unwrap();
        g
    }

    #[test]
    fn undirected_rows_sum_to_zero() {
        let g = triangle(false);
        let l = laplacian(&g, Deg::Total, false, None, None).unwrap().to_dense();
        for row in &l {
            let sum: f64 = row.iter().sum();
            assert!(sum.abs() < 1e-12, "row sum {sum} should be 0");
        }
        assert_eq!(l[0][0], 2.0);
    }

    #[test]
    fn directed_degree_modes_differ() {
        let mut g = Graph::with_vertices(3, true);
        g.add_edge(0, 1).unwrap();
        g.add_edge(0, 2).unwrap();
        let total = laplacian(&g, Deg::Total, false, None, None).unwrap().to_dense();
        let l_in = laplacian(&g, Deg::In, false, None, None).unwrap().to_dense();
        let l_out = laplacian(&g, Deg::Out, false, None, None).unwrap().to_dense();
        assert_eq!(total[0][0], 2.0);
        assert_eq!(l_in[0][0], 0.0);
        assert_eq!(l_out[0][0], 2.0);
        assert_eq!(l_in[1][1], 1.0);
        assert_eq!(l_out[1][1], 0.0);
    }

    #[test]
    fn normalized_diagonal_is_unit_or_zero() {
        let mut g = Graph::with_vertices(3, false);
        g.add_edge(0, 1).unwrap(); // vertex 2 is isolated
        let l = laplacian(&g, Deg::Total, true, None, None).unwrap().to_dense();
        assert_eq!(l[0][0], 1.0);
        assert_eq!(l[1][1], 1.0);
        assert_eq!(l[2][2], 0.0);
        assert!((l[0][1] + 1.0).abs() < 1e-12); // -1/√(1·1)
    }

    #[test]
    fn self_loops_are_ignored() {
        let mut g = triangle(false);
        g.add_edge(1, 1).unwrap();
        let plain = laplacian(&triangle(false), Deg::Total, false, None, None).unwrap();
        let looped = laplacian(&g, Deg::Total, false, None, None).unwrap();
        assert_eq!(plain.to_dense(), looped.to_dense());
    }
}
