//! Typed property maps keyed by vertex or edge identifier.
//!
//! Algorithms consume property maps for their inputs (edge weights, trust
//! values) and write their outputs into them (centrality scores, component
//! labels). A map carries a declared [`ValueType`]; a value of any other type
//! is rejected at the boundary with [`GraphError::TypeMismatch`], never at
//! point of use.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

// ─────────────────────────────────────────────
// ValueType / PropValue
// ─────────────────────────────────────────────

/// The closed set of value types a property map can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Bool,
    Int32,
    Int64,
    Double,
    DoubleVector,
}

/// A single property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropValue {
    Bool(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    DoubleVector(Vec<f64>),
}

impl PropValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            PropValue::Bool(_) => ValueType::Bool,
            PropValue::Int32(_) => ValueType::Int32,
            PropValue::Int64(_) => ValueType::Int64,
            PropValue::Double(_) => ValueType::Double,
            PropValue::DoubleVector(_) => ValueType::DoubleVector,
        }
    }

    /// The zero value for a given type.
    pub fn default_of(ty: ValueType) -> Self {
        match ty {
            ValueType::Bool => PropValue::Bool(false),
            ValueType::Int32 => PropValue::Int32(0),
            ValueType::Int64 => PropValue::Int64(0),
            ValueType::Double => PropValue::Double(0.0),
            ValueType::DoubleVector => PropValue::DoubleVector(Vec::new()),
        }
    }

    /// Numeric view of a scalar value. `None` for vectors.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            PropValue::Int32(v) => Some(*v as f64),
            PropValue::Int64(v) => Some(*v as f64),
            PropValue::Double(v) => Some(*v),
            PropValue::DoubleVector(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            PropValue::Bool(b) => Some(*b as i64),
            PropValue::Int32(v) => Some(*v as i64),
            PropValue::Int64(v) => Some(*v),
            PropValue::Double(_) | PropValue::DoubleVector(_) => None,
        }
    }
}

// ─────────────────────────────────────────────
// PropMap
// ─────────────────────────────────────────────

/// A typed mapping from vertex or edge id to a [`PropValue`].
///
/// Keys are the graph's stable `u32` identifiers; insertion order is
/// irrelevant. Reading an unset key yields the zero value for the map's type.
#[derive(Debug, Clone)]
pub struct PropMap {
    ty: ValueType,
    values: HashMap<u32, PropValue>,
}

/// Property map keyed by vertex id.
pub type VertexPropMap = PropMap;
/// Property map keyed by edge id.
pub type EdgePropMap = PropMap;

impl PropMap {
    pub fn new(ty: ValueType) -> Self {
        Self { ty, values: HashMap::new() }
    }

    pub fn value_type(&self) -> ValueType {
        self.ty
    }

    /// Fail with `TypeMismatch` unless this map holds `expected` values.
    pub fn expect_type(&self, expected: ValueType) -> Result<(), GraphError> {
        if self.ty == expected {
            Ok(())
        } else {
            Err(GraphError::TypeMismatch { expected, got: self.ty })
        }
    }

    pub fn set(&mut self, id: u32, value: PropValue) -> Result<(), GraphError> {
        if value.value_type() != self.ty {
            return Err(GraphError::TypeMismatch { expected: self.ty, got: value.value_type() });
        }
        self.values.insert(id, value);
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&PropValue> {
        self.values.get(&id)
    }

    /// Scalar read with the type's zero value for unset keys.
    pub fn get_f64(&self, id: u32) -> f64 {
        self.values.get(&id).and_then(PropValue::as_f64).unwrap_or(0.0)
    }

    pub fn get_i64(&self, id: u32) -> i64 {
        self.values.get(&id).and_then(PropValue::as_i64).unwrap_or(0)
    }

    pub fn get_bool(&self, id: u32) -> bool {
        matches!(self.values.get(&id), Some(PropValue::Bool(true)))
    }

    /// Convenience setter for `Double` maps.
    pub fn set_f64(&mut self, id: u32, value: f64) -> Result<(), GraphError> {
        self.set(id, PropValue::Double(value))
    }

    /// Convenience setter for `Int32` maps.
    pub fn set_i32(&mut self, id: u32, value: i32) -> Result<(), GraphError> {
        self.set(id, PropValue::Int32(value))
    }

    pub fn set_bool(&mut self, id: u32, value: bool) -> Result<(), GraphError> {
        self.set(id, PropValue::Bool(value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.values.keys().copied()
    }

    /// Bulk numeric view `(id, value)` for scalar maps, used for
    /// post-processing such as dividing by a sum. Fails on vector maps.
    pub fn values_f64(&self) -> Result<Vec<(u32, f64)>, GraphError> {
        if self.ty == ValueType::DoubleVector {
            return Err(GraphError::TypeMismatch { expected: ValueType::Double, got: self.ty });
        }
        Ok(self
            .values
            .iter()
            .map(|(&id, v)| (id, v.as_f64().unwrap_or(0.0)))
            .collect())
    }

    /// Rescale every scalar entry in place. Fails on non-`Double` maps.
    pub fn scale(&mut self, factor: f64) -> Result<(), GraphError> {
        self.expect_type(ValueType::Double)?;
        for v in self.values.values_mut() {
            if let PropValue::Double(x) = v {
                *x *= factor;
            }
        }
        Ok(())
    }

    /// Copy-coerce a scalar map into a `Double` map (weight maps supplied as
    /// integers are converted before use, not rejected).
    pub fn to_double(&self) -> Result<PropMap, GraphError> {
        if self.ty == ValueType::DoubleVector {
            return Err(GraphError::TypeMismatch { expected: ValueType::Double, got: self.ty });
        }
        let mut out = PropMap::new(ValueType::Double);
        for (&id, v) in &self.values {
            out.values.insert(id, PropValue::Double(v.as_f64().unwrap_or(0.0)));
        }
        Ok(out)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_rejects_wrong_type() {
        let mut map = PropMap::new(ValueType::Double);
        let err = map.set(0, PropValue::Int32(1)).unwrap_err();
        assert!(matches!(err, GraphError::TypeMismatch { .. }));
    }

    #[test]
    fn unset_key_reads_as_zero() {
        let map = PropMap::new(ValueType::Double);
        assert_eq!(map.get_f64(42), 0.0);
        assert!(map.get(42).is_none());
    }

    #[test]
    fn scale_rescales_all_entries() {
        let mut map = PropMap::new(ValueType::Double);
        map.set_f64(0, 2.0).unwrap();
        map.set_f64(1, 4.0).unwrap();
        map.scale(0.5).unwrap();
        assert_eq!(map.get_f64(0), 1.0);
        assert_eq!(map.get_f64(1), 2.0);
    }

    #[test]
    fn to_double_coerces_int_map() {
        let mut map = PropMap::new(ValueType::Int32);
        map.set_i32(3, 7).unwrap();
        let doubled = map.to_double().unwrap();
        assert_eq!(doubled.value_type(), ValueType::Double);
        assert_eq!(doubled.get_f64(3), 7.0);
    }

    #[test]
    fn vector_map_has_no_bulk_scalar_view() {
        let map = PropMap::new(ValueType::DoubleVector);
        assert!(map.values_f64().is_err());
    }
}
