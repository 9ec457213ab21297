pub mod container;
pub mod dataset;
pub mod element;
pub mod extractor;
pub mod matrix;
pub mod scan;
pub mod sink;
pub mod value;
