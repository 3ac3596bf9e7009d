//! IO utilities for loading diagnostic datasets.

pub mod dataset_csv;

pub use dataset_csv::{read_dataset, read_headered, read_wdbc};
