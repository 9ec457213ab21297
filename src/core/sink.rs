// src/core/sink.rs

use crate::core::element::Element;
use arrow::array::{ArrayBuilder, ArrayRef};
use arrow::datatypes::Field;
use serde::{Deserialize, Serialize};

/// Whether a column admits absent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Nullability {
    Required,
    Nullable,
}

/// Capability that accepts one decoded scalar per logical row, in row order.
pub trait ColumnSink<T: Element> {
    fn append(&mut self, value: T);

    fn append_null(&mut self);
}

/// Sink over an Arrow builder, bound to a field name and a nullability mode
/// at construction time.
pub struct ArrowColumnSink<T: Element> {
    field: Field,
    builder: T::Builder,
}

impl<T: Element> ArrowColumnSink<T> {
    pub fn new(field_name: &str, mode: Nullability, capacity: usize) -> Self {
        let field = Field::new(
            field_name,
            T::VALUE_TYPE.arrow_type(),
            mode == Nullability::Nullable,
        );
        Self {
            field,
            builder: T::builder_with_capacity(capacity),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    /// Finishes the builder into an Arrow column.
    pub fn finish(mut self) -> (Field, ArrayRef) {
        let array = self.builder.finish();
        (self.field, array)
    }
}

impl<T: Element> ColumnSink<T> for ArrowColumnSink<T> {
    fn append(&mut self, value: T) {
        T::append_value(&mut self.builder, value);
    }

    fn append_null(&mut self) {
        T::append_null(&mut self.builder);
    }
}

/// Factory for column sinks: given a field name, element type and nullability
/// mode, returns a sink capable of accepting one typed scalar per call.
#[derive(Debug, Clone, Default)]
pub struct WriterSpec;

impl WriterSpec {
    pub fn new() -> Self {
        Self
    }

    pub fn make_sink<T: Element>(
        &self,
        field_name: &str,
        mode: Nullability,
        capacity: usize,
    ) -> ArrowColumnSink<T> {
        ArrowColumnSink::new(field_name, mode, capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{Array, Int64Array};

    #[test]
    fn test_arrow_sink_appends_in_order() {
        let spec = WriterSpec::new();
        let mut sink = spec.make_sink::<i64>("counts", Nullability::Nullable, 3);
        sink.append(10);
        sink.append_null();
        sink.append(30);

        let (field, array) = sink.finish();
        assert_eq!(field.name(), "counts");
        assert!(field.is_nullable());

        let array = array.as_any().downcast_ref::<Int64Array>().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array.value(0), 10);
        assert!(array.is_null(1));
        assert_eq!(array.value(2), 30);
    }

    #[test]
    fn test_required_mode_produces_non_nullable_field() {
        let sink = ArrowColumnSink::<f32>::new("x", Nullability::Required, 0);
        assert!(!sink.field().is_nullable());
    }
}
