//! Spectral matrix constructions for the Ariadne toolkit.
//!
//! Every builder turns graph structure (plus optional edge weights and index
//! overrides) into coordinate-format sparse triples consumed by an external
//! linear-algebra facility:
//!
//! - [`adjacency`]: weighted adjacency, transposed `j → i` convention
//! - [`laplacian`]: plain or normalized, degree mode per [`Deg`]
//! - [`incidence`]: vertex × edge, signed when directed
//! - [`transition`]: column-stochastic `T_ij = A_ij / k_j`
//! - [`modularity_matrix`]: matrix-free [`ModularityOperator`]
//! - [`hashimoto`] / [`hashimoto_compact`]: non-backtracking matrix

pub mod adjacency;
pub mod coo;
pub mod hashimoto;
pub mod incidence;
pub mod laplacian;
pub mod modularity;
pub mod transition;
mod util;

pub use adjacency::adjacency;
pub use coo::CooMatrix;
pub use hashimoto::{hashimoto, hashimoto_compact};
pub use incidence::incidence;
pub use laplacian::{laplacian, Deg};
pub use modularity::{modularity_matrix, ModularityOperator};
pub use transition::transition;
