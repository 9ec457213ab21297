// src/core/value.rs

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Element type of a stored dataset.
///
/// The extractor family generalizes uniformly over these primitives; anything
/// else a container stores is rejected at read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Int32,
    Int64,
    Float32,
    Float64,
}

impl ValueType {
    /// Arrow data type used for columns of this element type
    pub fn arrow_type(&self) -> DataType {
        match self {
            ValueType::Int32 => DataType::Int32,
            ValueType::Int64 => DataType::Int64,
            ValueType::Float32 => DataType::Float32,
            ValueType::Float64 => DataType::Float64,
        }
    }

    /// Byte width of one element
    pub fn byte_width(&self) -> usize {
        match self {
            ValueType::Int32 | ValueType::Float32 => 4,
            ValueType::Int64 | ValueType::Float64 => 8,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Int32 => write!(f, "INT32"),
            ValueType::Int64 => write!(f, "INT64"),
            ValueType::Float32 => write!(f, "FLOAT32"),
            ValueType::Float64 => write!(f, "FLOAT64"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_mapping() {
        assert_eq!(ValueType::Int32.arrow_type(), DataType::Int32);
        assert_eq!(ValueType::Int64.arrow_type(), DataType::Int64);
        assert_eq!(ValueType::Float32.arrow_type(), DataType::Float32);
        assert_eq!(ValueType::Float64.arrow_type(), DataType::Float64);
    }

    #[test]
    fn test_display() {
        assert_eq!(ValueType::Int32.to_string(), "INT32");
        assert_eq!(ValueType::Float64.to_string(), "FLOAT64");
    }

    #[test]
    fn test_byte_width() {
        assert_eq!(ValueType::Int32.byte_width(), 4);
        assert_eq!(ValueType::Int64.byte_width(), 8);
    }
}
