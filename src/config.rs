//! Runtime settings

use std::path::PathBuf;

/// Environment variable overriding the dataset directory.
pub const DATASETS_ENV: &str = "MEDSCREEN_DATASETS";

/// Default dataset directory, relative to the working directory.
pub const DEFAULT_DATASETS_DIR: &str = "datasets";

/// Resolved runtime settings for one invocation.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory holding the per-disease CSV files (read-only).
    pub datasets_dir: PathBuf,
}

impl Settings {
    /// Resolve settings with precedence: explicit value, environment, default.
    pub fn resolve(datasets_dir: Option<PathBuf>) -> Self {
        let datasets_dir = datasets_dir
            .or_else(|| std::env::var_os(DATASETS_ENV).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASETS_DIR));
        Self { datasets_dir }
    }

    /// Settings rooted at a specific dataset directory.
    pub fn with_datasets_dir<P: Into<PathBuf>>(dir: P) -> Self {
        Self {
            datasets_dir: dir.into(),
        }
    }
}
