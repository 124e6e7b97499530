//! Index resolution shared by the matrix builders.
//!
//! An explicit integer index property may override the default dense
//! row/column indexing. The output shape is then sized to the maximum index
//! encountered, supporting sparse or custom index spaces.

use ariadne_graph::{Graph, GraphError, PropMap, ValueType};

/// Row/column index per vertex id, plus the implied dimension. Without an
/// override the vertex id itself is the index and the dimension is
/// `vertex_bound()`.
pub(crate) fn resolve_vertex_index(
    g: &Graph,
    index: Option<&PropMap>,
) -> Result<(Vec<usize>, usize), GraphError> {
    resolve(g.vertex_bound(), g.vertices(), index)
}

/// Column index per edge id, plus the implied dimension.
pub(crate) fn resolve_edge_index(
    g: &Graph,
    index: Option<&PropMap>,
) -> Result<(Vec<usize>, usize), GraphError> {
    resolve(g.edge_bound(), g.edges().map(|e| e.id), index)
}

fn resolve(
    bound: usize,
    ids: impl Iterator<Item = u32>,
    index: Option<&PropMap>,
) -> Result<(Vec<usize>, usize), GraphError> {
    let mut idx = vec![usize::MAX; bound];
    let mut dim = bound;
    match index {
        None => {
            for id in ids {
                idx[id as usize] = id as usize;
            }
        }
        Some(map) => {
            if !matches!(map.value_type(), ValueType::Int32 | ValueType::Int64) {
                return Err(GraphError::TypeMismatch {
                    expected: ValueType::Int64,
                    got: map.value_type(),
                });
            }
            for id in ids {
                let i = map.get_i64(id);
                if i < 0 {
                    return Err(GraphError::InvalidArgument(format!(
                        "negative index {i} for id {id}"
                    )));
                }
                idx[id as usize] = i as usize;
                dim = dim.max(i as usize + 1);
            }
        }
    }
    Ok((idx, dim))
}
