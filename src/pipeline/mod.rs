//! Training and evaluation orchestration
//!
//! Wire types mirror the external JSON contract exactly (camelCase request
//! fields, mixed-case metrics keys) and the two entry
//! operations drive the full flow: source selection, combined-mode merge,
//! row limit, deterministic split, fit, scoring and weight encoding.

use crate::catalog::{self, Dataset};
use crate::config::Settings;
use crate::error::{MedscreenError, Result};
use crate::evaluation;
use crate::preprocessing;
use crate::training;
use crate::weights::WeightArtifact;
use ndarray::{concatenate, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Where training rows come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Canonical catalog dataset only
    Kaggle,
    /// Caller-supplied records only (labels synthesized)
    MedicalRecords,
    /// Catalog dataset merged with caller-supplied records
    Combined,
}

impl Default for DataSource {
    fn default() -> Self {
        DataSource::Kaggle
    }
}

/// Solver hyperparameters as they appear on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SolverConfig {
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
    #[serde(rename = "C", default = "default_c")]
    pub c: f64,
}

fn default_max_iter() -> usize {
    1000
}

fn default_c() -> f64 {
    1.0
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iter: default_max_iter(),
            c: default_c(),
        }
    }
}

/// Caller-supplied records without ground-truth outcomes.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomData {
    #[serde(default)]
    pub features: Vec<Vec<f64>>,
}

/// One training request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingRequest {
    #[serde(default)]
    pub disease: String,
    #[serde(default)]
    pub config: SolverConfig,
    #[serde(default)]
    pub data_source: DataSource,
    #[serde(default)]
    pub sample_count: Option<usize>,
    #[serde(default)]
    pub custom_data: Option<CustomData>,
}

/// Training counters reported back to the caller. Key casing is part of the
/// wire contract and is deliberately inconsistent.
#[derive(Debug, Clone, Serialize)]
pub struct TrainingStats {
    pub samples: usize,
    pub test_samples: usize,
    pub iterations: usize,
    #[serde(rename = "dataSource")]
    pub data_source: DataSource,
    #[serde(rename = "totalAvailable")]
    pub total_available: usize,
    #[serde(rename = "syntheticLabels")]
    pub synthetic_labels: bool,
}

/// One training response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingResponse {
    pub weights: WeightArtifact,
    pub accuracy: f64,
    pub loss: f64,
    pub training_time: f64,
    pub metrics: TrainingStats,
}

/// One evaluation request: a weight artifact plus the disease whose
/// canonical dataset it should be scored against.
#[derive(Debug, Clone, Deserialize)]
pub struct EvaluationRequest {
    pub model: ModelRef,
    #[serde(default)]
    pub disease: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModelRef {
    #[serde(rename = "modelWeights")]
    pub model_weights: WeightArtifact,
}

/// One evaluation response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: [[u64; 2]; 2],
    pub samples: usize,
}

/// Run one full training: assemble the dataset from the requested sources,
/// split deterministically, fit, score the hold-out rows and encode the
/// weights.
pub fn train(request: &TrainingRequest, settings: &Settings) -> Result<TrainingResponse> {
    if request.disease.is_empty() {
        return Err(MedscreenError::InvalidInput(
            "missing disease type in request".to_string(),
        ));
    }

    let trainer_config = training::TrainerConfig {
        max_iter: request.config.max_iter,
        c: request.config.c,
    };
    trainer_config.validate()?;

    tracing::info!(
        disease = %request.disease,
        source = ?request.data_source,
        "starting training"
    );

    let (dataset, synthetic_labels) = assemble_dataset(request, settings)?;
    let dataset = preprocessing::limit_rows(dataset, request.sample_count);
    let total_available = dataset.len();

    let (train_set, test_set) =
        training::split(&dataset, training::DEFAULT_TEST_FRACTION)?;
    tracing::info!(
        train = train_set.len(),
        test = test_set.len(),
        "dataset ready"
    );

    let start = Instant::now();
    let (model, diagnostics) = training::fit(&train_set, &trainer_config)?;

    let y_pred = model.predict(&test_set.features)?;
    let accuracy = evaluation::classification_report(&test_set.labels, &y_pred).accuracy;
    let probs = model.predict_proba(&test_set.features)?;
    let loss = evaluation::log_loss(&test_set.labels, &probs);
    let training_time = start.elapsed().as_secs_f64();

    let weights = WeightArtifact::encode(&model)?;

    tracing::info!(accuracy, loss, iterations = diagnostics.iterations, "training complete");

    Ok(TrainingResponse {
        weights,
        accuracy,
        loss,
        training_time,
        metrics: TrainingStats {
            samples: train_set.len(),
            test_samples: test_set.len(),
            iterations: diagnostics.iterations,
            data_source: request.data_source,
            total_available,
            synthetic_labels,
        },
    })
}

/// Run one full evaluation: reload the canonical dataset, reproduce the
/// training-time split, rehydrate the classifier from the artifact and
/// score the held-out rows.
pub fn evaluate(request: &EvaluationRequest, settings: &Settings) -> Result<EvaluationResponse> {
    if request.disease.is_empty() {
        return Err(MedscreenError::InvalidInput(
            "missing disease type for evaluation".to_string(),
        ));
    }

    let dataset = catalog::load(&request.disease, &settings.datasets_dir, None)?;
    let (_train, test_set) = training::split(&dataset, training::DEFAULT_TEST_FRACTION)?;

    let scorer = request.model.model_weights.decode(test_set.n_features())?;
    let y_pred = scorer.predict(&test_set.features);
    let report = evaluation::classification_report(&test_set.labels, &y_pred);

    tracing::info!(
        disease = %request.disease,
        accuracy = report.accuracy,
        samples = report.samples,
        "evaluation complete"
    );

    Ok(EvaluationResponse {
        accuracy: report.accuracy,
        precision: report.precision,
        recall: report.recall,
        f1_score: report.f1,
        confusion_matrix: report.confusion,
        samples: report.samples,
    })
}

/// Build the training dataset from the requested sources.
///
/// Returns the dataset together with a flag telling whether any labels
/// were synthesized (callers must surface this to consumers).
fn assemble_dataset(request: &TrainingRequest, settings: &Settings) -> Result<(Dataset, bool)> {
    let mut current: Option<Dataset> = None;

    if matches!(request.data_source, DataSource::Kaggle | DataSource::Combined) {
        match catalog::load(&request.disease, &settings.datasets_dir, request.sample_count) {
            Ok(dataset) => {
                tracing::info!(samples = dataset.len(), "catalog dataset loaded");
                current = Some(dataset);
            }
            // In combined mode a missing file only narrows the sources;
            // caller-supplied records may still carry the training
            Err(err @ MedscreenError::DatasetMissing { .. })
                if request.data_source == DataSource::Combined =>
            {
                tracing::warn!(%err, "catalog dataset unavailable, using caller records only");
            }
            Err(err) => return Err(err),
        }
    }

    let mut synthetic_labels = false;

    if matches!(
        request.data_source,
        DataSource::MedicalRecords | DataSource::Combined
    ) {
        if let Some(custom) = &request.custom_data {
            if !custom.features.is_empty() {
                let records = rows_to_matrix(&custom.features)?;
                let labels = preprocessing::synthesize_labels(&records);
                synthetic_labels = true;
                tracing::warn!(
                    rows = records.nrows(),
                    "caller records carry no outcomes; labels were synthesized heuristically"
                );

                current = Some(match current {
                    Some(base) => {
                        let aligned = preprocessing::reconcile_width(&base.features, &records);
                        let features = concatenate(
                            Axis(0),
                            &[base.features.view(), aligned.view()],
                        )
                        .map_err(|e| MedscreenError::DataError(e.to_string()))?;
                        let merged_labels =
                            concatenate(Axis(0), &[base.labels.view(), labels.view()])
                                .map_err(|e| MedscreenError::DataError(e.to_string()))?;
                        tracing::info!(
                            catalog = base.labels.len(),
                            records = records.nrows(),
                            total = features.nrows(),
                            "combined catalog and caller records"
                        );
                        Dataset {
                            features,
                            labels: merged_labels,
                            schema_id: base.schema_id,
                        }
                    }
                    None => Dataset {
                        features: records,
                        labels,
                        schema_id: request.disease.clone(),
                    },
                });
            }
        }
    }

    match current {
        Some(dataset) if !dataset.is_empty() => Ok((dataset, synthetic_labels)),
        _ => Err(MedscreenError::InvalidInput(format!(
            "no training data available for {}; check dataset files or caller records",
            request.disease
        ))),
    }
}

fn rows_to_matrix(rows: &[Vec<f64>]) -> Result<Array2<f64>> {
    let width = rows.first().map(|r| r.len()).unwrap_or(0);
    if width == 0 {
        return Err(MedscreenError::InvalidInput(
            "caller-supplied records have no feature columns".to_string(),
        ));
    }
    if rows.iter().any(|r| r.len() != width) {
        return Err(MedscreenError::InvalidInput(
            "caller-supplied records have inconsistent row widths".to_string(),
        ));
    }

    let mut out = Array2::zeros((rows.len(), width));
    for (i, row) in rows.iter().enumerate() {
        for (j, v) in row.iter().enumerate() {
            out[[i, j]] = *v;
        }
    }
    Ok(out)
}
