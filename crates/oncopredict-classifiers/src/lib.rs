//! oncopredict-classifiers: train, select, persist and serve a binary tumour
//! classifier on the 30-feature diagnostic dataset.
//!
//! The pipeline drops z-score outliers, splits the rows into seeded
//! train/validation/test partitions, standardizes on the training rows, fits
//! every candidate model and keeps the one with the best validation F1.
//! [`predictor::Predictor`] then answers single-row predictions from the
//! persisted scaler and model.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod io;
pub mod model_selection;
pub mod models;
pub mod persistence;
pub mod predictor;
pub mod preprocessing;
pub mod report;
pub mod stats;

pub use error::{ClassifierError, Result};
