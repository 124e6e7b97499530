//! Eigentrust centrality (Kamvar et al.) via power iteration.

use std::time::Instant;

use ariadne_graph::{
    edge_weight, EdgePropMap, Graph, GraphError, PropMap, ValueType, VertexIndex, VertexPropMap,
};

pub struct EigentrustConfig {
    /// Iteration stops once the L1 norm of the trust delta falls below this.
    pub epsilon: f64,
    /// `0` means unbounded.
    pub max_iterations: usize,
    /// Rescale the final scores so they sum to 1 (skipped when the sum is 0).
    pub normalize: bool,
}

impl Default for EigentrustConfig {
    fn default() -> Self {
        Self { epsilon: 1e-6, max_iterations: 0, normalize: false }
    }
}

pub struct EigentrustResult {
    pub scores: VertexPropMap,
    pub iterations: usize,
    pub converged: bool,
    pub duration_ms: u64,
}

/// Power iteration `t ← Cᵀ·t` on the row-normalized trust matrix
///
/// ```text
/// c_ij = max(s_ij, 0) / Σ_j max(s_ij, 0)
/// ```
///
/// starting from the uniform vector `t_i = 1/|V|`. Negative trust entries are
/// clamped to zero rather than rejected.
pub fn eigentrust(
    g: &Graph,
    trust: &EdgePropMap,
    config: &EigentrustConfig,
) -> Result<EigentrustResult, GraphError> {
    let start = Instant::now();
    let index = VertexIndex::build(g);
    let n = index.len();

    if n == 0 {
        return Ok(EigentrustResult {
            scores: PropMap::new(ValueType::Double),
            iterations: 0,
            converged: true,
            duration_ms: 0,
        });
    }

    // Row sums of the clamped trust matrix: Σ_j max(s_ij, 0) per source i.
    let mut row_sum = vec![0.0_f64; n];
    for (i, &v) in index.vertices().iter().enumerate() {
        for (e, _) in g.out_edges(v) {
            row_sum[i] += edge_weight(Some(trust), e).max(0.0);
        }
    }

    let mut t = vec![1.0 / n as f64; n];
    let mut next = vec![0.0_f64; n];
    let mut converged = false;
    let mut iterations = 0;

    loop {
        iterations += 1;

        for x in next.iter_mut() {
            *x = 0.0;
        }
        for (i, &v) in index.vertices().iter().enumerate() {
            if row_sum[i] == 0.0 {
                continue;
            }
            let share = t[i] / row_sum[i];
            for (e, w) in g.out_edges(v) {
                let c = edge_weight(Some(trust), e).max(0.0);
                if c > 0.0 {
                    next[index.idx(w)] += share * c;
                }
            }
        }

        let diff: f64 = t.iter().zip(next.iter()).map(|(a, b)| (a - b).abs()).sum();
        std::mem::swap(&mut t, &mut next);

        if diff < config.epsilon {
            converged = true;
            break;
        }
        if config.max_iterations > 0 && iterations >= config.max_iterations {
            break;
        }
    }

    tracing::debug!(iterations, converged, "eigentrust finished");

    if config.normalize {
        let total: f64 = t.iter().sum();
        if total != 0.0 {
            for x in t.iter_mut() {
                *x /= total;
            }
        }
    }

    let mut scores = PropMap::new(ValueType::Double);
    for (i, &v) in index.vertices().iter().enumerate() {
        scores.set_f64(v, t[i])?;
    }

    Ok(EigentrustResult {
        scores,
        iterations,
        converged,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring_with_trust(n: u32, trust_value: f64) -> (Graph, EdgePropMap) {
        let mut g = Graph::with_vertices(n as usize, true);
        let mut trust = PropMap::new(ValueType::Double);
        for v in 0..n {
            let e = g.add_edge(v, (v + 1) % n).unwrap();
            trust.set_f64(e, trust_value).unwrap();
        }
        (g, trust)
    }

    #[test]
    fn normalized_scores_sum_to_one() {
        let (g, trust) = ring_with_trust(6, 0.7);
        let config = EigentrustConfig { normalize: true, ..Default::default() };
        let result = eigentrust(&g, &trust, &config).unwrap();
        let total: f64 = result.scores.values_f64().unwrap().iter().map(|(_, s)| s).sum();
        assert!((total - 1.0).abs() < 1e-9, "expected sum 1, got {total}");
    }

    #[test]
    fn negative_trust_is_clamped() {
        let mut g = Graph::with_vertices(3, true);
        let mut trust = PropMap::new(ValueType::Double);
        let e01 = g.add_edge(0, 1).unwrap();
        let e02 = g.add_edge(0, 2).unwrap();
        let e12 = g.add_edge(1, 2).unwrap();
        let e20 = g.add_edge(2, 0).unwrap();
        trust.set_f64(e01, 1.0).unwrap();
        trust.set_f64(e02, -5.0).unwrap(); // clamped to 0
        trust.set_f64(e12, 1.0).unwrap();
        trust.set_f64(e20, 1.0).unwrap();
        let result = eigentrust(&g, &trust, &EigentrustConfig::default()).unwrap();
        // All of vertex 0's trust flows to 1, none to 2 directly.
        assert!(result.converged);
        assert!(result.scores.get_f64(1) > 0.0);
    }

    #[test]
    fn iteration_cap_is_honored() {
        let (g, trust) = ring_with_trust(5, 1.0);
        let config = EigentrustConfig { epsilon: 0.0, max_iterations: 4, ..Default::default() };
        let result = eigentrust(&g, &trust, &config).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 4);
    }

    #[test]
    fn zero_trust_graph_converges_to_zero() {
        let (g, trust) = ring_with_trust(4, 0.0);
        let config = EigentrustConfig { normalize: true, ..Default::default() };
        let result = eigentrust(&g, &trust, &config).unwrap();
        // Sum is 0; normalization is skipped rather than dividing by zero.
        for v in g.vertices() {
            assert_eq!(result.scores.get_f64(v), 0.0);
        }
    }
}
