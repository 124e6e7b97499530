//! Centrality algorithms for the Ariadne toolkit.
//!
//! - **PageRank**: power iteration with the literal `(1-d)` base formula,
//!   no dangling-mass redistribution
//! - **Betweenness**: Brandes' accumulation over vertices *and* edges,
//!   unweighted (BFS) or weighted (Dijkstra), plus central point dominance
//! - **Eigentrust**: power iteration on the row-normalized trust matrix
//! - **Absolute trust**: Monte Carlo sampling of loop-free trust paths
//!
//! Iterative methods never fail on non-convergence: the partial result is
//! returned together with the iteration count and a `converged` flag.

pub mod betweenness;
pub mod eigentrust;
pub mod pagerank;
pub mod trust;

pub use betweenness::{betweenness, central_point_dominance, BetweennessResult};
pub use eigentrust::{eigentrust, EigentrustConfig, EigentrustResult};
pub use pagerank::{pagerank, PageRankConfig, PageRankResult};
pub use trust::{absolute_trust, AbsoluteTrustConfig, AbsoluteTrustResult};
