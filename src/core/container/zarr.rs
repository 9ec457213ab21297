// src/core/container/zarr.rs

use crate::core::container::{ContainerError, DatasetContainer};
use crate::core::dataset::{ElementValues, Payload, RawDataset, Shape};
use std::path::Path;
use std::sync::Arc;
use zarrs::array::{Array, ArrayCreateError, DataType};
use zarrs::filesystem::FilesystemStore;

/// Container backend over a Zarr filesystem store. Arrays are addressed by
/// their node path inside the store and read whole, as one flat row-major
/// payload.
pub struct ZarrContainer {
    store: Arc<FilesystemStore>,
}

impl ZarrContainer {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self, ContainerError> {
        let store = FilesystemStore::new(root.as_ref())
            .map_err(|e| ContainerError::Store(e.to_string()))?;
        Ok(Self {
            store: Arc::new(store),
        })
    }
}

impl DatasetContainer for ZarrContainer {
    fn dataset_by_path(&self, path: &str) -> Result<RawDataset, ContainerError> {
        // Only an absent node is a missing path; anything else (corrupt
        // metadata, storage faults) must not masquerade as NotFound.
        let array = Array::open(self.store.clone(), path).map_err(|e| match e {
            ArrayCreateError::MissingMetadata => ContainerError::NotFound(path.to_string()),
            other => ContainerError::Store(other.to_string()),
        })?;

        let dims: Vec<usize> = array.shape().iter().map(|&d| d as usize).collect();
        let subset = array.subset_all();

        // zarrs 0.19 uses retrieve_array_subset_elements for sync reading.
        let values = match array.data_type() {
            DataType::Int32 => ElementValues::Int32(
                array
                    .retrieve_array_subset_elements::<i32>(&subset)
                    .map_err(|e| ContainerError::Store(e.to_string()))?,
            ),
            DataType::Int64 => ElementValues::Int64(
                array
                    .retrieve_array_subset_elements::<i64>(&subset)
                    .map_err(|e| ContainerError::Store(e.to_string()))?,
            ),
            DataType::Float32 => ElementValues::Float32(
                array
                    .retrieve_array_subset_elements::<f32>(&subset)
                    .map_err(|e| ContainerError::Store(e.to_string()))?,
            ),
            DataType::Float64 => ElementValues::Float64(
                array
                    .retrieve_array_subset_elements::<f64>(&subset)
                    .map_err(|e| ContainerError::Store(e.to_string()))?,
            ),
            other => {
                return Err(ContainerError::Malformed {
                    path: path.to_string(),
                    reason: format!("unsupported element type {other:?}"),
                })
            }
        };

        RawDataset::new(path, Shape::new(dims), Payload::Flat(values)).map_err(|reason| {
            ContainerError::Malformed {
                path: path.to_string(),
                reason,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zarrs::array::{ArrayBuilder, FillValue};
    use zarrs::array_subset::ArraySubset;

    fn store_int32_matrix(dir: &Path, path: &str, dims: Vec<u64>, data: &[i32]) {
        let store = Arc::new(FilesystemStore::new(dir).unwrap());
        let array = ArrayBuilder::new(
            dims.clone(),
            DataType::Int32,
            dims.clone().try_into().unwrap(),
            FillValue::from(0i32),
        )
        .build(store, path)
        .unwrap();
        array.store_metadata().unwrap();

        let subset = ArraySubset::new_with_shape(dims);
        array.store_array_subset_elements(&subset, data).unwrap();
    }

    #[test]
    fn test_round_trip_reads_shape_and_payload() {
        let dir = tempfile::tempdir().unwrap();
        store_int32_matrix(dir.path(), "/m", vec![3, 2], &[1, 2, 3, 4, 5, 6]);

        let container = ZarrContainer::open(dir.path()).unwrap();
        let dataset = container.dataset_by_path("/m").unwrap();

        assert_eq!(dataset.path, "/m");
        assert_eq!(dataset.shape.dims, vec![3, 2]);
        assert_eq!(
            dataset.payload,
            Payload::Flat(ElementValues::Int32(vec![1, 2, 3, 4, 5, 6]))
        );
    }

    #[test]
    fn test_missing_array_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let container = ZarrContainer::open(dir.path()).unwrap();
        let result = container.dataset_by_path("/no/such/array");
        assert!(matches!(result, Err(ContainerError::NotFound(_))));
    }

    #[test]
    fn test_corrupt_metadata_is_not_reported_as_missing() {
        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("bad");
        std::fs::create_dir_all(&node).unwrap();
        std::fs::write(node.join("zarr.json"), b"not json").unwrap();

        let container = ZarrContainer::open(dir.path()).unwrap();
        let result = container.dataset_by_path("/bad");
        assert!(matches!(result, Err(ContainerError::Store(_))));
    }
}
