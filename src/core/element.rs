// src/core/element.rs

use crate::core::dataset::ElementValues;
use crate::core::value::ValueType;
use arrow::array::{ArrayBuilder, Float32Builder, Float64Builder, Int32Builder, Int64Builder};

/// The per-element-type seam of the extractor family.
///
/// One generic extractor parametrized over `Element` replaces a parallel
/// hierarchy of per-type writers. Each implementation knows its type
/// descriptor, its Arrow builder and how to downcast the untyped payload
/// representation into a typed buffer.
pub trait Element: Copy + Send + Sync + 'static {
    const VALUE_TYPE: ValueType;

    type Builder: ArrayBuilder;

    fn builder_with_capacity(capacity: usize) -> Self::Builder;

    fn append_value(builder: &mut Self::Builder, value: Self);

    fn append_null(builder: &mut Self::Builder);

    /// Type-checked copy out of a raw value run. `None` on element type
    /// mismatch; the caller turns that into a descriptive error.
    fn from_values(values: &ElementValues) -> Option<Vec<Self>>;
}

macro_rules! impl_element {
    ($ty:ty, $variant:ident, $builder:ty, $value_type:expr) => {
        impl Element for $ty {
            const VALUE_TYPE: ValueType = $value_type;

            type Builder = $builder;

            fn builder_with_capacity(capacity: usize) -> Self::Builder {
                <$builder>::with_capacity(capacity)
            }

            fn append_value(builder: &mut Self::Builder, value: Self) {
                builder.append_value(value);
            }

            fn append_null(builder: &mut Self::Builder) {
                builder.append_null();
            }

            fn from_values(values: &ElementValues) -> Option<Vec<Self>> {
                match values {
                    ElementValues::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_element!(i32, Int32, Int32Builder, ValueType::Int32);
impl_element!(i64, Int64, Int64Builder, ValueType::Int64);
impl_element!(f32, Float32, Float32Builder, ValueType::Float32);
impl_element!(f64, Float64, Float64Builder, ValueType::Float64);

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    #[test]
    fn test_from_values_type_check() {
        let ints = ElementValues::Int32(vec![1, 2, 3]);
        assert_eq!(<i32 as Element>::from_values(&ints), Some(vec![1, 2, 3]));
        assert_eq!(<i64 as Element>::from_values(&ints), None);
        assert_eq!(<f32 as Element>::from_values(&ints), None);
    }

    #[test]
    fn test_builder_round_trip() {
        let mut builder = <i32 as Element>::builder_with_capacity(2);
        i32::append_value(&mut builder, 7);
        i32::append_null(&mut builder);
        let array = builder.finish();
        assert_eq!(array.len(), 2);
        assert!(array.is_null(1));
    }
}
