//! Error types for the medscreen pipeline

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, MedscreenError>;

#[derive(Error, Debug)]
pub enum MedscreenError {
    #[error("unknown disease identifier: {0}")]
    UnknownDisease(String),

    #[error("dataset file missing for {disease}: expected {}", path.display())]
    DatasetMissing { disease: String, path: PathBuf },

    #[error("weight artifact has {actual} coefficients but the dataset has {expected} feature columns")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("data error: {0}")]
    DataError(String),

    #[error("model training failed: {0}")]
    TrainingError(String),

    #[error("model is not fitted")]
    ModelNotFitted,

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeError { expected: String, actual: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("data processing error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("invalid JSON input: {0}")]
    Json(#[from] serde_json::Error),
}
