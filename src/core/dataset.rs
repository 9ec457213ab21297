// src/core/dataset.rs

use crate::core::value::ValueType;
use serde::{Deserialize, Serialize};

/// Shape of a stored dataset.
/// [3]       -> vector of 3 (rank 1)
/// [2, 3]    -> 2x3 matrix stored row-major (rank 2)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub dims: Vec<usize>,
}

impl Shape {
    pub fn new<D: Into<Vec<usize>>>(dims: D) -> Self {
        Self { dims: dims.into() }
    }

    /// Number of dimensions (rank)
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    /// Number of logical elements
    pub fn num_elements(&self) -> usize {
        self.dims.iter().product()
    }
}

/// A typed run of raw values, as handed over by a container backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValues {
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
}

impl ElementValues {
    pub fn value_type(&self) -> ValueType {
        match self {
            ElementValues::Int32(_) => ValueType::Int32,
            ElementValues::Int64(_) => ValueType::Int64,
            ElementValues::Float32(_) => ValueType::Float32,
            ElementValues::Float64(_) => ValueType::Float64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ElementValues::Int32(v) => v.len(),
            ElementValues::Int64(v) => v.len(),
            ElementValues::Float32(v) => v.len(),
            ElementValues::Float64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Raw value storage of a dataset.
///
/// `Flat` is the normal case: one contiguous row-major buffer whose length
/// matches the shape. `Ragged` covers object-backed storage where each outer
/// row arrives as its own typed run; rectangularity is only established later
/// by the matrix materializer.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Flat(ElementValues),
    Ragged(Vec<ElementValues>),
}

impl Payload {
    /// Element type of the payload, if it holds any values at all
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Payload::Flat(values) => Some(values.value_type()),
            Payload::Ragged(rows) => rows.first().map(|r| r.value_type()),
        }
    }
}

/// A dataset as read from a container: path, dimension vector and raw values.
/// Read-only to the extractor.
#[derive(Debug, Clone)]
pub struct RawDataset {
    pub path: String,
    pub shape: Shape,
    pub payload: Payload,
}

impl RawDataset {
    /// Validates that the payload agrees with the dimension vector.
    pub fn new(path: impl Into<String>, shape: Shape, payload: Payload) -> Result<Self, String> {
        if shape.rank() == 0 {
            return Err("dataset shape must have at least one dimension".to_string());
        }

        match &payload {
            Payload::Flat(values) => {
                let expected = shape.num_elements();
                if values.len() != expected {
                    return Err(format!(
                        "payload length {} does not match shape {:?} (expected {})",
                        values.len(),
                        shape.dims,
                        expected
                    ));
                }
            }
            Payload::Ragged(rows) => {
                if rows.len() != shape.dims[0] {
                    return Err(format!(
                        "ragged payload has {} rows, shape {:?} expects {}",
                        rows.len(),
                        shape.dims,
                        shape.dims[0]
                    ));
                }
            }
        }

        Ok(Self {
            path: path.into(),
            shape,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_basics() {
        let shape = Shape::new(vec![3, 4]);
        assert_eq!(shape.rank(), 2);
        assert_eq!(shape.num_elements(), 12);
    }

    #[test]
    fn test_raw_dataset_validation() {
        let ok = RawDataset::new(
            "/a/b",
            Shape::new(vec![2, 2]),
            Payload::Flat(ElementValues::Int32(vec![1, 2, 3, 4])),
        );
        assert!(ok.is_ok());

        let short = RawDataset::new(
            "/a/b",
            Shape::new(vec![2, 2]),
            Payload::Flat(ElementValues::Int32(vec![1, 2, 3])),
        );
        assert!(short.is_err());

        let no_dims = RawDataset::new(
            "/a/b",
            Shape::new(Vec::new()),
            Payload::Flat(ElementValues::Int32(vec![])),
        );
        assert!(no_dims.is_err());
    }

    #[test]
    fn test_ragged_row_count_validation() {
        let ok = RawDataset::new(
            "/m",
            Shape::new(vec![2, 3]),
            Payload::Ragged(vec![
                ElementValues::Int32(vec![1, 2, 3]),
                ElementValues::Int32(vec![4, 5, 6]),
            ]),
        );
        assert!(ok.is_ok());

        let wrong_rows = RawDataset::new(
            "/m",
            Shape::new(vec![3, 3]),
            Payload::Ragged(vec![ElementValues::Int32(vec![1, 2, 3])]),
        );
        assert!(wrong_rows.is_err());
    }

    #[test]
    fn test_payload_value_type() {
        let flat = Payload::Flat(ElementValues::Float32(vec![1.0]));
        assert_eq!(flat.value_type(), Some(ValueType::Float32));

        let empty_ragged = Payload::Ragged(Vec::new());
        assert_eq!(empty_ragged.value_type(), None);
    }

    #[test]
    fn test_element_values_len_and_emptiness() {
        let values = ElementValues::Int64(vec![1, 2, 3]);
        assert_eq!(values.len(), 3);
        assert!(!values.is_empty());
        assert!(ElementValues::Float64(Vec::new()).is_empty());
    }
}
