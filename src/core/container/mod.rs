pub mod memory;
pub mod zarr;

use crate::core::dataset::RawDataset;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContainerError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed dataset '{path}': {reason}")]
    Malformed { path: String, reason: String },

    #[error("store error: {0}")]
    Store(String),
}

/// A self-describing container exposing datasets by path.
///
/// Reading happens entirely during extractor construction; implementations
/// return the full dimension vector and raw payload in one call.
pub trait DatasetContainer {
    fn dataset_by_path(&self, path: &str) -> Result<RawDataset, ContainerError>;
}

/// Trailing segment of a dataset path, used as the default field name.
pub fn field_name_from_path(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => trimmed,
    }
}
