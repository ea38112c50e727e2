//! Classifier training
//!
//! Deterministic train/test partitioning and logistic regression fitting
//! with iteration diagnostics.

mod logistic;
mod split;
mod trainer;

pub use logistic::LogisticRegression;
pub use split::{split, DEFAULT_TEST_FRACTION, SPLIT_SEED};
pub use trainer::{fit, FitDiagnostics, TrainerConfig};
