// src/core/extractor.rs

use crate::core::container::{field_name_from_path, ContainerError, DatasetContainer};
use crate::core::dataset::Payload;
use crate::core::element::Element;
use crate::core::matrix::{self, MatrixError};
use crate::core::sink::{ArrowColumnSink, ColumnSink, Nullability, WriterSpec};
use crate::core::value::ValueType;
use arrow::array::ArrayRef;
use arrow::datatypes::Field;
use std::fmt;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("dataset '{path}' stores {found} values, expected {expected}")]
    TypeMismatch {
        path: String,
        expected: ValueType,
        found: ValueType,
    },

    #[error("dataset '{path}' has shape {dims:?}, expected rank {expected_rank}")]
    RankMismatch {
        path: String,
        dims: Vec<usize>,
        expected_rank: usize,
    },

    #[error("dataset '{path}' is not stored as a primitive one-dimensional array")]
    NotFlat { path: String },

    #[error("column {column} out of bounds for dataset '{path}' ({width} columns)")]
    ColumnOutOfBounds {
        path: String,
        column: usize,
        width: usize,
    },

    #[error("malformed matrix in dataset '{path}': {source}")]
    Matrix {
        path: String,
        #[source]
        source: MatrixError,
    },

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// How a column's one-dimensional buffer is obtained.
#[derive(Debug, Clone)]
pub enum ColumnSource<T: Element> {
    /// A rank-1 dataset used directly; the field name is the trailing path
    /// segment.
    WholeDataset { path: String },
    /// Column `column` of a rank >= 2 dataset, read in original row order via
    /// transposition.
    MatrixColumn {
        path: String,
        field_name: String,
        column: usize,
    },
    /// A buffer already flattened out of compound/record elements by the
    /// caller. No container access.
    CompoundField { field_name: String, values: Vec<T> },
}

/// Resolves a column source into a field name and a one-dimensional buffer.
/// The full buffer is materialized here, before any row is emitted.
fn resolve<T: Element>(
    container: &dyn DatasetContainer,
    source: ColumnSource<T>,
) -> Result<(String, Vec<T>), ExtractError> {
    match source {
        ColumnSource::WholeDataset { path } => {
            let dataset = container.dataset_by_path(&path)?;
            if dataset.shape.rank() != 1 {
                return Err(ExtractError::RankMismatch {
                    path,
                    dims: dataset.shape.dims,
                    expected_rank: 1,
                });
            }
            let buffer = match &dataset.payload {
                Payload::Flat(values) => {
                    T::from_values(values).ok_or_else(|| ExtractError::TypeMismatch {
                        path: path.clone(),
                        expected: T::VALUE_TYPE,
                        found: values.value_type(),
                    })?
                }
                Payload::Ragged(_) => return Err(ExtractError::NotFlat { path }),
            };
            let field_name = field_name_from_path(&path).to_string();
            debug!(path = %path, rows = buffer.len(), "materialized whole-dataset buffer");
            Ok((field_name, buffer))
        }
        ColumnSource::MatrixColumn {
            path,
            field_name,
            column,
        } => {
            let dataset = container.dataset_by_path(&path)?;
            if dataset.shape.rank() < 2 {
                return Err(ExtractError::RankMismatch {
                    path,
                    dims: dataset.shape.dims,
                    expected_rank: 2,
                });
            }

            let rows = match &dataset.payload {
                Payload::Flat(values) => {
                    let flat = T::from_values(values).ok_or_else(|| ExtractError::TypeMismatch {
                        path: path.clone(),
                        expected: T::VALUE_TYPE,
                        found: values.value_type(),
                    })?;
                    // Rank > 2 collapses the trailing dimensions into the
                    // column axis.
                    let row_count = dataset.shape.dims[0];
                    let col_count: usize = dataset.shape.dims[1..].iter().product();
                    matrix::from_flat(&flat, row_count, col_count)
                        .map_err(|source| ExtractError::Matrix {
                            path: path.clone(),
                            source,
                        })?
                }
                Payload::Ragged(raw_rows) => matrix::from_ragged::<T>(raw_rows).map_err(
                    |source| ExtractError::Matrix {
                        path: path.clone(),
                        source,
                    },
                )?,
            };

            let transposed = matrix::transpose(&rows);
            let buffer = transposed
                .get(column)
                .cloned()
                .ok_or(ExtractError::ColumnOutOfBounds {
                    path: path.clone(),
                    column,
                    width: transposed.len(),
                })?;
            debug!(path = %path, column, rows = buffer.len(), "materialized matrix column buffer");
            Ok((field_name, buffer))
        }
        ColumnSource::CompoundField { field_name, values } => Ok((field_name, values)),
    }
}

/// Pulls one column's values out of a dataset and pushes them, one scalar per
/// logical row, into a bound sink.
///
/// The buffer is materialized once at construction and never mutated; after
/// that, `size`/`has_next`/`write` never fail and never touch the container.
/// Columns of one batch must be driven in lockstep by the caller -- the
/// extractor cannot see its siblings, so uneven driving desynchronizes rows
/// across columns.
pub struct ColumnExtractor<T: Element, S: ColumnSink<T> = ArrowColumnSink<T>> {
    field_name: String,
    buffer: Vec<T>,
    cursor: usize,
    sink: S,
}

impl<T: Element> ColumnExtractor<T> {
    /// Resolves the source and binds an Arrow sink. The sink is always
    /// created nullable, whether or not the source holds absent values.
    pub fn new(
        container: &dyn DatasetContainer,
        source: ColumnSource<T>,
        spec: &WriterSpec,
    ) -> Result<Self, ExtractError> {
        let (field_name, buffer) = resolve(container, source)?;
        let sink = spec.make_sink::<T>(&field_name, Nullability::Nullable, buffer.len());
        Ok(Self {
            field_name,
            buffer,
            cursor: 0,
            sink,
        })
    }

    /// Extractor over a pre-flattened compound field; no container involved.
    pub fn compound(
        field_name: impl Into<String>,
        values: Vec<T>,
        spec: &WriterSpec,
    ) -> Self {
        let field_name = field_name.into();
        let sink = spec.make_sink::<T>(&field_name, Nullability::Nullable, values.len());
        Self {
            field_name,
            buffer: values,
            cursor: 0,
            sink,
        }
    }
}

impl<T: Element, S: ColumnSink<T>> ColumnExtractor<T, S> {
    /// Resolves the source and binds a caller-supplied sink.
    pub fn with_sink(
        container: &dyn DatasetContainer,
        source: ColumnSource<T>,
        sink: S,
    ) -> Result<Self, ExtractError> {
        let (field_name, buffer) = resolve(container, source)?;
        Ok(Self {
            field_name,
            buffer,
            cursor: 0,
            sink,
        })
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    /// Row count of this column, without consuming the sequence.
    pub fn size(&self) -> usize {
        self.buffer.len()
    }

    pub fn has_next(&self) -> bool {
        self.cursor < self.buffer.len()
    }

    /// Pushes the value under the cursor to the sink and advances. Refuses
    /// once the cursor reaches the buffer length -- the same bound `has_next`
    /// checks -- so calling past exhaustion is a no-op, not a fault.
    pub fn write(&mut self) -> bool {
        if self.cursor >= self.buffer.len() {
            return false;
        }
        self.sink.append(self.buffer[self.cursor]);
        self.cursor += 1;
        true
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

// The sink and buffer element need not be Debug; report progress only.
impl<T: Element, S: ColumnSink<T>> fmt::Debug for ColumnExtractor<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnExtractor")
            .field("field_name", &self.field_name)
            .field("rows", &self.buffer.len())
            .field("cursor", &self.cursor)
            .finish()
    }
}

/// Object-safe surface of a column extractor, so a batch driver can advance
/// heterogeneous columns in lockstep.
pub trait DataWriter {
    fn field_name(&self) -> &str;

    fn size(&self) -> usize;

    fn has_next(&self) -> bool;

    fn write(&mut self) -> bool;

    fn into_column(self: Box<Self>) -> (Field, ArrayRef);
}

impl<T: Element> DataWriter for ColumnExtractor<T, ArrowColumnSink<T>> {
    fn field_name(&self) -> &str {
        ColumnExtractor::field_name(self)
    }

    fn size(&self) -> usize {
        ColumnExtractor::size(self)
    }

    fn has_next(&self) -> bool {
        ColumnExtractor::has_next(self)
    }

    fn write(&mut self) -> bool {
        ColumnExtractor::write(self)
    }

    fn into_column(self: Box<Self>) -> (Field, ArrayRef) {
        (*self).into_sink().finish()
    }
}
