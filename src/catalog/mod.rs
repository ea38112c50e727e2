//! Disease dataset catalog
//!
//! Maps a disease identifier to its canonical CSV file, target-column rule
//! and (for categorical targets) an explicit category mapping, then loads a
//! scaled feature matrix and binary label vector from disk.

use crate::error::{MedscreenError, Result};
use crate::preprocessing::StandardScaler;
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// A loaded, standardized dataset.
///
/// Invariant: `labels.len() == features.nrows()` and every label is 0.0 or
/// 1.0. Scaling parameters are refit on every load and never persisted, so
/// two loads only agree when the backing file is row-identical.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub features: Array2<f64>,
    pub labels: Array1<f64>,
    pub schema_id: String,
}

impl Dataset {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.features.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feature width.
    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// New dataset holding the given rows, in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select(ndarray::Axis(0), rows),
            labels: self.labels.select(ndarray::Axis(0), rows),
            schema_id: self.schema_id.clone(),
        }
    }
}

/// Catalog entry binding a disease identifier to its load rules.
#[derive(Debug, Clone, Copy)]
pub struct DiseaseSpec {
    pub id: &'static str,
    pub file_name: &'static str,
    pub target_column: &'static str,
    /// Columns excluded from the feature matrix (always includes the target).
    pub drop_columns: &'static [&'static str],
    /// Category mapping for string targets; empty means the target is numeric.
    pub target_mapping: &'static [(&'static str, f64)],
}

/// Closed set of supported diseases.
pub const CATALOG: &[DiseaseSpec] = &[
    DiseaseSpec {
        id: "diabetes",
        file_name: "diabetes.csv",
        target_column: "Outcome",
        drop_columns: &["Outcome"],
        target_mapping: &[],
    },
    DiseaseSpec {
        id: "cvd",
        file_name: "heart_disease_data.csv",
        target_column: "target",
        drop_columns: &["target"],
        target_mapping: &[],
    },
    DiseaseSpec {
        id: "cancer",
        file_name: "breast_cancer.csv",
        target_column: "diagnosis",
        drop_columns: &["id", "diagnosis"],
        target_mapping: &[("M", 1.0), ("B", 0.0)],
    },
];

/// Look up the catalog entry for a disease identifier.
pub fn lookup(disease: &str) -> Option<&'static DiseaseSpec> {
    CATALOG.iter().find(|spec| spec.id == disease)
}

/// Load and standardize the canonical dataset for a disease.
///
/// When `sample_limit` is smaller than the row count only the leading rows
/// are read (never a random subsample), and the scaler is fit on those rows
/// alone.
pub fn load(disease: &str, datasets_dir: &Path, sample_limit: Option<usize>) -> Result<Dataset> {
    let spec =
        lookup(disease).ok_or_else(|| MedscreenError::UnknownDisease(disease.to_string()))?;

    let path = datasets_dir.join(spec.file_name);
    if !path.is_file() {
        return Err(MedscreenError::DatasetMissing {
            disease: disease.to_string(),
            path,
        });
    }

    let df = read_csv(&path, sample_limit)?;
    if df.height() == 0 {
        return Err(MedscreenError::DataError(format!(
            "dataset for {disease} has no rows"
        )));
    }

    let labels = extract_labels(&df, spec)?;

    let feature_cols: Vec<String> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !spec.drop_columns.contains(&name.as_str()))
        .map(|s| s.to_string())
        .collect();
    if feature_cols.is_empty() {
        return Err(MedscreenError::DataError(format!(
            "dataset for {disease} has no feature columns"
        )));
    }

    let raw = columns_to_array2(&df, &feature_cols)?;
    let features = StandardScaler::new().fit_transform(&raw)?;

    tracing::debug!(
        disease,
        rows = features.nrows(),
        cols = features.ncols(),
        "dataset loaded"
    );

    Ok(Dataset {
        features,
        labels,
        schema_id: disease.to_string(),
    })
}

fn read_csv(path: &Path, n_rows: Option<usize>) -> Result<DataFrame> {
    let file = File::open(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_n_rows(n_rows)
        .with_infer_schema_length(Some(100))
        .into_reader_with_file_handle(file)
        .finish()?;

    Ok(df)
}

fn extract_labels(df: &DataFrame, spec: &DiseaseSpec) -> Result<Array1<f64>> {
    let column = df
        .column(spec.target_column)
        .map_err(|_| {
            MedscreenError::DataError(format!(
                "target column {} not found in dataset for {}",
                spec.target_column, spec.id
            ))
        })?
        .as_materialized_series()
        .clone();

    let values: Vec<f64> = if spec.target_mapping.is_empty() {
        let casted = column.cast(&DataType::Float64)?;
        casted
            .f64()?
            .into_iter()
            .map(|opt| {
                let v = opt.ok_or_else(|| {
                    MedscreenError::DataError(format!(
                        "target column {} contains a missing value",
                        spec.target_column
                    ))
                })?;
                if v != 0.0 && v != 1.0 {
                    return Err(MedscreenError::DataError(format!(
                        "target column {} contains non-binary value {v}",
                        spec.target_column
                    )));
                }
                Ok(v)
            })
            .collect::<Result<Vec<f64>>>()?
    } else {
        column
            .str()?
            .into_iter()
            .map(|opt| {
                let raw = opt.ok_or_else(|| {
                    MedscreenError::DataError(format!(
                        "target column {} contains a missing value",
                        spec.target_column
                    ))
                })?;
                spec.target_mapping
                    .iter()
                    .find(|(cat, _)| *cat == raw)
                    .map(|(_, v)| *v)
                    .ok_or_else(|| {
                        MedscreenError::DataError(format!(
                            "target column {} contains unmapped category {raw:?}",
                            spec.target_column
                        ))
                    })
            })
            .collect::<Result<Vec<f64>>>()?
    };

    Ok(Array1::from_vec(values))
}

/// Extract named columns from a DataFrame into a row-major `Array2<f64>`.
/// Missing feature values become 0.0.
fn columns_to_array2(df: &DataFrame, col_names: &[String]) -> Result<Array2<f64>> {
    let n_rows = df.height();
    let n_cols = col_names.len();

    let col_data: Vec<Vec<f64>> = col_names
        .iter()
        .map(|col_name| {
            let series = df
                .column(col_name)
                .map_err(|_| {
                    MedscreenError::DataError(format!("feature column {col_name} not found"))
                })?
                .as_materialized_series()
                .clone();
            let casted = series.cast(&DataType::Float64).map_err(|_| {
                MedscreenError::DataError(format!("feature column {col_name} is not numeric"))
            })?;
            let values: Vec<f64> = casted
                .f64()?
                .into_iter()
                .map(|v| v.unwrap_or(0.0))
                .collect();
            Ok(values)
        })
        .collect::<Result<Vec<Vec<f64>>>>()?;

    let col_refs: Vec<&[f64]> = col_data.iter().map(|c| c.as_slice()).collect();
    Ok(Array2::from_shape_fn((n_rows, n_cols), |(r, c)| {
        col_refs[c][r]
    }))
}
