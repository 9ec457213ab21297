// src/core/scan.rs

use crate::core::container::{field_name_from_path, DatasetContainer};
use crate::core::dataset::{Payload, RawDataset};
use crate::core::element::Element;
use crate::core::extractor::{ColumnExtractor, ColumnSource, DataWriter, ExtractError};
use crate::core::matrix::MatrixError;
use crate::core::sink::WriterSpec;
use crate::core::value::ValueType;
use arrow::datatypes::Schema;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Provenance record attached to every completed scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanInfo {
    pub id: Uuid,
    pub path: String,
    pub rows: usize,
    pub created_at: DateTime<Utc>,
}

/// Builds one writer per output column of the dataset at `path`.
///
/// A rank-1 dataset yields a single whole-dataset writer named after the
/// trailing path segment. A rank >= 2 dataset yields one matrix-column writer
/// per column, named `{segment}_{index}`.
pub fn writers_for_dataset(
    container: &dyn DatasetContainer,
    path: &str,
    spec: &WriterSpec,
) -> Result<Vec<Box<dyn DataWriter>>, ExtractError> {
    let dataset = container.dataset_by_path(path)?;
    let value_type = dataset
        .payload
        .value_type()
        .ok_or_else(|| ExtractError::Matrix {
            path: path.to_string(),
            source: MatrixError::Empty,
        })?;

    match value_type {
        ValueType::Int32 => typed_writers::<i32>(container, &dataset, path, spec),
        ValueType::Int64 => typed_writers::<i64>(container, &dataset, path, spec),
        ValueType::Float32 => typed_writers::<f32>(container, &dataset, path, spec),
        ValueType::Float64 => typed_writers::<f64>(container, &dataset, path, spec),
    }
}

fn typed_writers<T: Element>(
    container: &dyn DatasetContainer,
    dataset: &RawDataset,
    path: &str,
    spec: &WriterSpec,
) -> Result<Vec<Box<dyn DataWriter>>, ExtractError> {
    if dataset.shape.rank() == 1 {
        let source = ColumnSource::<T>::WholeDataset {
            path: path.to_string(),
        };
        let extractor = ColumnExtractor::<T>::new(container, source, spec)?;
        return Ok(vec![Box::new(extractor)]);
    }

    let name = field_name_from_path(path);
    let columns = match &dataset.payload {
        Payload::Flat(_) => dataset.shape.dims[1..].iter().product(),
        Payload::Ragged(rows) => rows.first().map(|r| r.len()).unwrap_or(0),
    };
    if columns == 0 {
        return Err(ExtractError::Matrix {
            path: path.to_string(),
            source: MatrixError::Empty,
        });
    }

    let mut writers: Vec<Box<dyn DataWriter>> = Vec::with_capacity(columns);
    for column in 0..columns {
        let source = ColumnSource::<T>::MatrixColumn {
            path: path.to_string(),
            field_name: format!("{}_{}", name, column),
            column,
        };
        // Each column re-reads the dataset; the container owns caching.
        writers.push(Box::new(ColumnExtractor::<T>::new(container, source, spec)?));
    }
    Ok(writers)
}

/// Reads the dataset at `path` into one Arrow record batch, driving every
/// column writer in lockstep so rows stay aligned across columns.
pub fn scan_dataset(
    container: &dyn DatasetContainer,
    path: &str,
    spec: &WriterSpec,
) -> Result<(RecordBatch, ScanInfo), ExtractError> {
    let mut writers = writers_for_dataset(container, path, spec)?;

    let mut rows = 0;
    while writers.iter().all(|w| w.has_next()) {
        for writer in writers.iter_mut() {
            writer.write();
        }
        rows += 1;
    }

    let mut fields = Vec::with_capacity(writers.len());
    let mut columns = Vec::with_capacity(writers.len());
    for writer in writers {
        let (field, array) = writer.into_column();
        fields.push(field);
        columns.push(array);
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema, columns)?;

    info!(path = %path, columns = batch.num_columns(), rows, "dataset scan complete");

    Ok((
        batch,
        ScanInfo {
            id: Uuid::new_v4(),
            path: path.to_string(),
            rows,
            created_at: Utc::now(),
        },
    ))
}
