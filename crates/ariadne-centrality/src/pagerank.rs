//! PageRank via power iteration.

use std::time::Instant;

use ariadne_graph::{Graph, GraphError, PropMap, ValueType, VertexIndex, VertexPropMap};

pub struct PageRankConfig {
    pub damping: f64,
    /// Iteration stops once the L1 norm of the score delta falls below this.
    pub epsilon: f64,
    /// `0` means unbounded: iterate until `epsilon` is met.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, epsilon: 1e-6, max_iterations: 100 }
    }
}

pub struct PageRankResult {
    pub scores: VertexPropMap,
    pub iterations: usize,
    pub converged: bool,
    pub duration_ms: u64,
}

/// PageRank via power iteration:
///
/// ```text
/// PR(v) = (1 - d) + d · Σ_{w → v} PR(w) / outdeg(w)
/// ```
///
/// Every score starts at 1.0 and the converged total stays of order `N`
/// (exactly `N` when every vertex has out-edges). Vertices with zero
/// out-degree contribute nothing to any successor; the dangling mass is
/// *not* redistributed, so sinks bleed some of the total but never collapse
/// the scale. A vertex with no in-flow converges to exactly `1 - d`.
///
/// Fails with `InvalidArgument` when `damping` lies outside `(0, 1)`.
/// Exhausting `max_iterations` is not an error; the partial result is
/// returned with `converged == false`.
pub fn pagerank(g: &Graph, config: &PageRankConfig) -> Result<PageRankResult, GraphError> {
    if config.damping <= 0.0 || config.damping >= 1.0 {
        return Err(GraphError::InvalidArgument(format!(
            "damping must lie in (0, 1), got {}",
            config.damping
        )));
    }

    let start = Instant::now();
    let index = VertexIndex::build(g);
    let n = index.len();

    if n == 0 {
        return Ok(PageRankResult {
            scores: PropMap::new(ValueType::Double),
            iterations: 0,
            converged: true,
            duration_ms: 0,
        });
    }

    let d = config.damping;
    let base = 1.0 - d;

    // Pre-compute out-degrees under the effective directedness.
    let out_deg: Vec<usize> = index.vertices().iter().map(|&v| g.out_degree(v)).collect();

    let mut scores = vec![1.0_f64; n];
    let mut new_scores = vec![0.0_f64; n];
    let mut converged = false;
    let mut iterations = 0;

    loop {
        iterations += 1;

        for (i, &v) in index.vertices().iter().enumerate() {
            let mut incoming = 0.0;
            for w in g.in_neighbors(v) {
                let j = index.idx(w);
                // An in-neighbor always has out-degree >= 1 from this edge.
                incoming += scores[j] / out_deg[j] as f64;
            }
            new_scores[i] = base + d * incoming;
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut new_scores);

        if diff < config.epsilon {
            converged = true;
            break;
        }
        if config.max_iterations > 0 && iterations >= config.max_iterations {
            break;
        }
    }

    tracing::debug!(iterations, converged, "pagerank finished");

    let mut map = PropMap::new(ValueType::Double);
    for (i, &v) in index.vertices().iter().enumerate() {
        map.set_f64(v, scores[i])?;
    }

    Ok(PageRankResult {
        scores: map,
        iterations,
        converged,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
