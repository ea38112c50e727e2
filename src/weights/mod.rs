//! Portable weight artifact
//!
//! The only entity that crosses the process boundary: a flat
//! coefficients-plus-intercept representation of a fitted classifier,
//! serialized as JSON. No feature names or scaling metadata are embedded,
//! so an artifact is only meaningful against data produced by the same
//! catalog entry it was trained on.

use crate::error::{MedscreenError, Result};
use crate::training::LogisticRegression;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Serialized classifier parameters.
///
/// `coef` holds one row per class pair; binary classification always has
/// exactly one row of `d` coefficients. Class order is fixed `{0, 1}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightArtifact {
    pub coef: Vec<Vec<f64>>,
    pub intercept: Vec<f64>,
    #[serde(default)]
    pub feature_names: Vec<String>,
}

impl WeightArtifact {
    /// Encode a fitted model's parameters.
    pub fn encode(model: &LogisticRegression) -> Result<Self> {
        let coefficients = model
            .coefficients
            .as_ref()
            .ok_or(MedscreenError::ModelNotFitted)?;
        let intercept = model.intercept.ok_or(MedscreenError::ModelNotFitted)?;

        Ok(Self {
            coef: vec![coefficients.to_vec()],
            intercept: vec![intercept],
            feature_names: Vec::new(),
        })
    }

    /// Reconstruct a scoring-only model, checking the artifact's width
    /// against the feature dimension of the data it will score.
    pub fn decode(&self, feature_dimension: usize) -> Result<ScoringModel> {
        let row = self.coef.first().ok_or_else(|| {
            MedscreenError::InvalidInput("weight artifact has no coefficient rows".to_string())
        })?;

        if row.len() != feature_dimension {
            return Err(MedscreenError::DimensionMismatch {
                expected: feature_dimension,
                actual: row.len(),
            });
        }

        let intercept = *self.intercept.first().ok_or_else(|| {
            MedscreenError::InvalidInput("weight artifact has an empty intercept".to_string())
        })?;

        if row.iter().any(|v| !v.is_finite()) || !intercept.is_finite() {
            return Err(MedscreenError::InvalidInput(
                "weight artifact contains non-finite values".to_string(),
            ));
        }

        Ok(ScoringModel {
            coefficients: Array1::from_vec(row.clone()),
            intercept,
        })
    }
}

/// Scoring-only linear classifier rehydrated from a weight artifact.
/// Supports prediction only; no further fitting.
#[derive(Debug, Clone)]
pub struct ScoringModel {
    coefficients: Array1<f64>,
    intercept: f64,
}

impl ScoringModel {
    /// P(y = 1) per row via the linear decision function.
    pub fn predict_proba(&self, x: &Array2<f64>) -> Array1<f64> {
        let linear = x.dot(&self.coefficients) + self.intercept;
        linear.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    /// Class labels (0.0 or 1.0), thresholded at 0.5.
    pub fn predict(&self, x: &Array2<f64>) -> Array1<f64> {
        self.predict_proba(x)
            .mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 })
    }
}
