// src/lib.rs

pub mod core;

// Re-exports para tener una API limpia desde fuera del crate
pub use crate::core::container::memory::MemoryContainer;
pub use crate::core::container::zarr::ZarrContainer;
pub use crate::core::container::{field_name_from_path, ContainerError, DatasetContainer};
pub use crate::core::dataset::{ElementValues, Payload, RawDataset, Shape};
pub use crate::core::element::Element;
pub use crate::core::extractor::{ColumnExtractor, ColumnSource, DataWriter, ExtractError};
pub use crate::core::matrix::{from_flat, from_ragged, transpose, MatrixError};
pub use crate::core::scan::{scan_dataset, writers_for_dataset, ScanInfo};
pub use crate::core::sink::{ArrowColumnSink, ColumnSink, Nullability, WriterSpec};
pub use crate::core::value::ValueType;
