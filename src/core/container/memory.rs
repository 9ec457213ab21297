// src/core/container/memory.rs

use crate::core::container::{ContainerError, DatasetContainer};
use crate::core::dataset::{ElementValues, Payload, RawDataset, Shape};
use std::collections::HashMap;

/// In-memory container keyed by path. Used for bounded batches that are
/// already resident, and as the backing store in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryContainer {
    datasets: HashMap<String, RawDataset>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a dataset, validating payload against shape.
    pub fn insert(
        &mut self,
        path: &str,
        shape: Shape,
        payload: Payload,
    ) -> Result<(), ContainerError> {
        let dataset =
            RawDataset::new(path, shape, payload).map_err(|reason| ContainerError::Malformed {
                path: path.to_string(),
                reason,
            })?;
        self.datasets.insert(path.to_string(), dataset);
        Ok(())
    }

    /// Registers a flat row-major dataset.
    pub fn insert_flat(
        &mut self,
        path: &str,
        dims: Vec<usize>,
        values: ElementValues,
    ) -> Result<(), ContainerError> {
        self.insert(path, Shape::new(dims), Payload::Flat(values))
    }

    /// Registers an object-backed dataset, one typed run per outer row.
    pub fn insert_ragged(
        &mut self,
        path: &str,
        dims: Vec<usize>,
        rows: Vec<ElementValues>,
    ) -> Result<(), ContainerError> {
        self.insert(path, Shape::new(dims), Payload::Ragged(rows))
    }
}

impl DatasetContainer for MemoryContainer {
    fn dataset_by_path(&self, path: &str) -> Result<RawDataset, ContainerError> {
        self.datasets
            .get(path)
            .cloned()
            .ok_or_else(|| ContainerError::NotFound(path.to_string()))
    }
}
