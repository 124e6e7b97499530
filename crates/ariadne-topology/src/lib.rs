//! Structural graph algorithms: components, spanning trees, dominators,
//! ordering, closure and isomorphism testing.
//!
//! Every entry point takes an [`ariadne_graph::Graph`] plus property maps and
//! returns property maps, so results compose with the rest of the toolkit.
//! Algorithms that require a fixed directedness reinterpret the graph through
//! a scoped guard rather than copying it.

pub mod closure;
pub mod components;
pub mod dominators;
pub mod isomorphism;
pub mod mst;
pub mod sort;

pub use closure::transitive_closure;
pub use components::{
    label_biconnected_components, label_components, BiconnectedResult, ComponentResult,
};
pub use dominators::dominator_tree;
pub use isomorphism::isomorphism;
pub use mst::min_spanning_tree;
pub use sort::topological_sort;
