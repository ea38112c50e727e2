//! Column-wise feature standardization

use crate::error::{MedscreenError, Result};
use ndarray::{Array1, Array2, Axis};

/// Standard (z-score) scaler over a feature matrix: (x - mean) / std per
/// column. Zero-variance columns scale by 1.0 so constant features pass
/// through centered instead of producing NaNs.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Option<Array1<f64>>,
    scales: Option<Array1<f64>>,
    is_fitted: bool,
}

impl Default for StandardScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardScaler {
    pub fn new() -> Self {
        Self {
            means: None,
            scales: None,
            is_fitted: false,
        }
    }

    /// Fit means and scales on the given rows.
    pub fn fit(&mut self, x: &Array2<f64>) -> Result<&mut Self> {
        if x.nrows() == 0 {
            return Err(MedscreenError::DataError(
                "cannot fit scaler on an empty matrix".to_string(),
            ));
        }

        let means = x
            .mean_axis(Axis(0))
            .ok_or_else(|| MedscreenError::DataError("empty feature matrix".to_string()))?;
        let stds = x.std_axis(Axis(0), 1.0);
        // Single-row fits and constant columns both degenerate to scale 1.0
        let scales = stds.mapv(|s| if s.is_finite() && s > 0.0 { s } else { 1.0 });

        self.means = Some(means);
        self.scales = Some(scales);
        self.is_fitted = true;
        Ok(self)
    }

    /// Transform rows with the fitted parameters.
    pub fn transform(&self, x: &Array2<f64>) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(MedscreenError::ModelNotFitted);
        }
        let means = self.means.as_ref().ok_or(MedscreenError::ModelNotFitted)?;
        let scales = self.scales.as_ref().ok_or(MedscreenError::ModelNotFitted)?;

        if x.ncols() != means.len() {
            return Err(MedscreenError::ShapeError {
                expected: format!("{} columns", means.len()),
                actual: format!("{} columns", x.ncols()),
            });
        }

        let mut out = x.clone();
        for (j, mut col) in out.axis_iter_mut(Axis(1)).enumerate() {
            let mean = means[j];
            let scale = scales[j];
            col.mapv_inplace(|v| (v - mean) / scale);
        }
        Ok(out)
    }

    /// Fit and transform in one step.
    pub fn fit_transform(&mut self, x: &Array2<f64>) -> Result<Array2<f64>> {
        self.fit(x)?;
        self.transform(x)
    }
}
