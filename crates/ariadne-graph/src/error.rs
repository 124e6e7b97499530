use thiserror::Error;

use crate::property::ValueType;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("type mismatch: expected {expected:?}, got {got:?}")]
    TypeMismatch { expected: ValueType, got: ValueType },

    #[error("vertex not found: {0}")]
    VertexNotFound(u32),

    #[error("edge not found: {0}")]
    EdgeNotFound(u32),
}
