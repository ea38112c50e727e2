//! Trainer orchestration around the logistic solver

use crate::catalog::Dataset;
use crate::error::{MedscreenError, Result};
use crate::training::LogisticRegression;
use std::time::Instant;

/// Caller-facing hyperparameters: iteration budget and inverse
/// regularization strength `C` (larger `C` = weaker regularization,
/// mapped to L2 strength `alpha = 1 / C`).
#[derive(Debug, Clone, Copy)]
pub struct TrainerConfig {
    pub max_iter: usize,
    pub c: f64,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            c: 1.0,
        }
    }
}

impl TrainerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_iter == 0 {
            return Err(MedscreenError::InvalidInput(
                "max_iter must be at least 1".to_string(),
            ));
        }
        if !self.c.is_finite() || self.c <= 0.0 {
            return Err(MedscreenError::InvalidInput(format!(
                "C must be a positive number, got {}",
                self.c
            )));
        }
        Ok(())
    }
}

/// Diagnostics from one fit.
#[derive(Debug, Clone, Copy)]
pub struct FitDiagnostics {
    /// Iterations the solver actually performed
    pub iterations: usize,
    /// Whether the gradient norm reached tolerance within the budget
    pub converged: bool,
    /// Wall-clock fit duration in seconds
    pub duration_secs: f64,
}

/// Fit a binary classifier on the training subset.
///
/// Solver non-convergence is non-fatal: a warning event fires and the
/// best-effort parameters are returned with `converged == false`.
pub fn fit(train: &Dataset, config: &TrainerConfig) -> Result<(LogisticRegression, FitDiagnostics)> {
    config.validate()?;

    if train.is_empty() {
        return Err(MedscreenError::TrainingError(
            "training subset is empty".to_string(),
        ));
    }

    let start = Instant::now();

    let mut model = LogisticRegression::new()
        .with_max_iter(config.max_iter)
        .with_alpha(1.0 / config.c);
    model.fit(&train.features, &train.labels)?;

    let diagnostics = FitDiagnostics {
        iterations: model.n_iter,
        converged: model.converged,
        duration_secs: start.elapsed().as_secs_f64(),
    };

    if !diagnostics.converged {
        tracing::warn!(
            iterations = diagnostics.iterations,
            max_iter = config.max_iter,
            "solver did not converge within the iteration budget; returning best-effort parameters"
        );
    }

    Ok((model, diagnostics))
}
