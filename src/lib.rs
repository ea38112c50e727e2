//! Medscreen - disease screening model pipeline
//!
//! Trains lightweight binary classifiers (one per disease category) from
//! tabular medical data and re-evaluates them in a later process from a
//! serialized weight artifact alone.
//!
//! # Modules
//!
//! - [`catalog`] - Disease dataset catalog and CSV loading
//! - [`preprocessing`] - Scaling, width reconciliation, synthetic labels
//! - [`training`] - Deterministic splitting and classifier fitting
//! - [`weights`] - Portable weight artifact encode/decode
//! - [`evaluation`] - Hold-out classification metrics
//! - [`pipeline`] - Training and evaluation orchestration
//! - [`cli`] - Command-line entrypoints

// Core error handling
pub mod error;

// Runtime settings
pub mod config;

// Data loading and preparation
pub mod catalog;
pub mod preprocessing;

// Model fitting and scoring
pub mod training;
pub mod weights;
pub mod evaluation;

// Orchestration
pub mod pipeline;

// Services
pub mod cli;
