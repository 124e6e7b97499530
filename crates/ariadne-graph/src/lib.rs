//! # ariadne-graph
//!
//! Graph data model for the Ariadne network-analysis toolkit.
//!
//! Provides the pieces every engine crate consumes:
//! - [`graph::Graph`]: directed/undirected multigraph with stable `u32`
//!   vertex/edge ids, parallel edges and self-loops permitted
//! - [`graph::DirectednessGuard`]: scoped directedness override
//! - [`property::PropMap`]: typed vertex/edge property maps
//! - [`error::GraphError`]: shared error taxonomy

pub mod error;
pub mod graph;
pub mod index;
pub mod property;

pub use error::GraphError;
pub use graph::{edge_weight, DirectednessGuard, Edge, EdgeId, Graph, VertexId};
pub use index::VertexIndex;
pub use property::{EdgePropMap, PropMap, PropValue, ValueType, VertexPropMap};
