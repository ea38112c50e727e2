//! Integration test: training and evaluation end-to-end

use medscreen::cli;
use medscreen::config::Settings;
use medscreen::pipeline::{self, EvaluationRequest, TrainingRequest};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;

/// Separable two-cluster diabetes fixture: low-feature rows with outcome 0,
/// high-feature rows with outcome 1.
fn write_diabetes_csv(dir: &Path, rows: usize) {
    let mut f = File::create(dir.join("diabetes.csv")).unwrap();
    writeln!(f, "Glucose,BMI,Age,Outcome").unwrap();
    for i in 0..rows {
        if i % 2 == 0 {
            writeln!(f, "{},{},{},0", 80 + i, 20.0 + (i as f64) * 0.1, 25 + i % 10).unwrap();
        } else {
            writeln!(f, "{},{},{},1", 160 + i, 35.0 + (i as f64) * 0.1, 50 + i % 10).unwrap();
        }
    }
}

fn fixture(rows: usize) -> (TempDir, Settings) {
    let dir = tempfile::tempdir().unwrap();
    write_diabetes_csv(dir.path(), rows);
    let settings = Settings::with_datasets_dir(dir.path());
    (dir, settings)
}

fn train_request(json: &str) -> TrainingRequest {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_train_then_evaluate_reproduces_test_accuracy() {
    let (_dir, settings) = fixture(40);

    let request = train_request(
        r#"{"disease": "diabetes", "config": {"max_iter": 1000, "C": 1.0}}"#,
    );
    let trained = pipeline::train(&request, &settings).unwrap();

    assert!((0.0..=1.0).contains(&trained.accuracy));
    assert!(trained.loss.is_finite() && trained.loss >= 0.0);
    assert!(trained.loss < 1.0, "loss = {}", trained.loss);
    assert!(trained.metrics.iterations <= 1000);
    assert_eq!(trained.metrics.samples + trained.metrics.test_samples, 40);
    assert_eq!(trained.metrics.total_available, 40);
    assert!(!trained.metrics.synthetic_labels);

    // A separate process evaluating the returned artifact must land on the
    // exact same held-out rows and therefore the same accuracy
    let eval_payload = serde_json::json!({
        "model": { "modelWeights": trained.weights },
        "disease": "diabetes",
    });
    let eval_request: EvaluationRequest =
        serde_json::from_value(eval_payload).unwrap();
    let evaluated = pipeline::evaluate(&eval_request, &settings).unwrap();

    assert_eq!(evaluated.samples, trained.metrics.test_samples);
    assert!(
        (evaluated.accuracy - trained.accuracy).abs() < 1e-12,
        "evaluation accuracy {} != training-time accuracy {}",
        evaluated.accuracy,
        trained.accuracy
    );

    // Confusion matrix is [[TN, FP], [FN, TP]]: cells sum to the sample count
    let total: u64 = evaluated.confusion_matrix.iter().flatten().sum();
    assert_eq!(total as usize, evaluated.samples);
}

#[test]
fn test_training_is_deterministic_across_invocations() {
    let (_dir, settings) = fixture(30);
    let request = train_request(r#"{"disease": "diabetes"}"#);

    let first = pipeline::train(&request, &settings).unwrap();
    let second = pipeline::train(&request, &settings).unwrap();

    assert_eq!(first.weights.coef, second.weights.coef);
    assert_eq!(first.weights.intercept, second.weights.intercept);
    assert_eq!(first.accuracy, second.accuracy);
}

#[test]
fn test_sample_count_limits_rows() {
    let (_dir, settings) = fixture(40);
    let request = train_request(r#"{"disease": "diabetes", "sampleCount": 20}"#);

    let trained = pipeline::train(&request, &settings).unwrap();
    assert_eq!(trained.metrics.total_available, 20);
    assert_eq!(trained.metrics.samples + trained.metrics.test_samples, 20);
}

#[test]
fn test_missing_dataset_names_disease() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::with_datasets_dir(dir.path());

    let request = train_request(r#"{"disease": "diabetes"}"#);
    let err = pipeline::train(&request, &settings).unwrap_err();
    assert!(err.to_string().contains("diabetes"));

    let eval_request: EvaluationRequest = serde_json::from_str(
        r#"{"model": {"modelWeights": {"coef": [[0.1, 0.2, 0.3]], "intercept": [0.0]}}, "disease": "diabetes"}"#,
    )
    .unwrap();
    let err = pipeline::evaluate(&eval_request, &settings).unwrap_err();
    assert!(err.to_string().contains("diabetes"));
}

#[test]
fn test_weight_width_mismatch_is_reported() {
    let (_dir, settings) = fixture(30);

    // Fixture has 3 feature columns; this artifact carries 5 coefficients
    let eval_request: EvaluationRequest = serde_json::from_str(
        r#"{"model": {"modelWeights": {"coef": [[0.1, 0.2, 0.3, 0.4, 0.5]], "intercept": [0.0]}}, "disease": "diabetes"}"#,
    )
    .unwrap();
    let err = pipeline::evaluate(&eval_request, &settings).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("5") && msg.contains("3"), "message: {msg}");
}

#[test]
fn test_medical_records_source_needs_no_dataset_file() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::with_datasets_dir(dir.path());

    let features: Vec<Vec<f64>> = (0..20)
        .map(|i| {
            if i % 2 == 0 {
                vec![0.0, 0.0, 100.0] // mean > median: synthesized 1
            } else {
                vec![1.0, 2.0, 3.0] // tie: synthesized 0
            }
        })
        .collect();
    let payload = serde_json::json!({
        "disease": "diabetes",
        "dataSource": "medical_records",
        "customData": { "features": features },
    });

    let request: TrainingRequest = serde_json::from_value(payload).unwrap();
    let trained = pipeline::train(&request, &settings).unwrap();

    assert!(trained.metrics.synthetic_labels);
    assert_eq!(trained.metrics.total_available, 20);
}

#[test]
fn test_combined_mode_merges_and_reconciles_width() {
    let (_dir, settings) = fixture(20);

    // Caller records are narrower (2 columns) than the catalog's 3; they
    // are zero-padded, labels synthesized, rows appended after the catalog
    let payload = serde_json::json!({
        "disease": "diabetes",
        "dataSource": "combined",
        "customData": { "features": [[0.0, 9.0], [5.0, 5.0], [0.0, 12.0], [1.0, 1.0]] },
    });

    let request: TrainingRequest = serde_json::from_value(payload).unwrap();
    let trained = pipeline::train(&request, &settings).unwrap();

    assert!(trained.metrics.synthetic_labels);
    assert_eq!(trained.metrics.total_available, 24);
    assert_eq!(trained.weights.coef[0].len(), 3);
}

#[test]
fn test_combined_mode_falls_back_when_catalog_missing() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::with_datasets_dir(dir.path());

    let features: Vec<Vec<f64>> = (0..12)
        .map(|i| vec![i as f64, (i * 2) as f64, if i % 2 == 0 { 50.0 } else { 0.0 }])
        .collect();
    let payload = serde_json::json!({
        "disease": "diabetes",
        "dataSource": "combined",
        "customData": { "features": features },
    });

    let request: TrainingRequest = serde_json::from_value(payload).unwrap();
    let trained = pipeline::train(&request, &settings).unwrap();
    assert_eq!(trained.metrics.total_available, 12);
    assert!(trained.metrics.synthetic_labels);
}

#[test]
fn test_no_data_at_all_is_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::with_datasets_dir(dir.path());

    let request = train_request(r#"{"disease": "diabetes", "dataSource": "medical_records"}"#);
    let err = pipeline::train(&request, &settings).unwrap_err();
    assert!(err.to_string().contains("diabetes"));
}

#[test]
fn test_unknown_disease_is_reported() {
    let (_dir, settings) = fixture(20);
    let request = train_request(r#"{"disease": "flu"}"#);
    let err = pipeline::train(&request, &settings).unwrap_err();
    assert!(err.to_string().contains("flu"));
}

#[test]
fn test_invalid_hyperparameters_are_input_errors() {
    let (_dir, settings) = fixture(20);

    let request = train_request(r#"{"disease": "diabetes", "config": {"max_iter": 0, "C": 1.0}}"#);
    assert!(pipeline::train(&request, &settings).is_err());

    let request = train_request(r#"{"disease": "diabetes", "config": {"max_iter": 100, "C": -1.0}}"#);
    assert!(pipeline::train(&request, &settings).is_err());
}

// Command-layer contract: every failure renders as a single `{"error": ...}`
// object, never a usage error or panic.

#[test]
fn test_cli_empty_input_renders_error_payload() {
    let (_dir, settings) = fixture(20);

    for output in [
        cli::train_output("", &settings),
        cli::train_output("   \n", &settings),
        cli::evaluate_output("", &settings),
    ] {
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["error"], "no input data provided");
    }
}

#[test]
fn test_cli_malformed_json_renders_error_payload() {
    let (_dir, settings) = fixture(20);

    for output in [
        cli::train_output("{not json", &settings),
        cli::evaluate_output("[1, 2", &settings),
    ] {
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        let message = value["error"].as_str().unwrap();
        assert!(message.starts_with("invalid JSON input:"), "message = {message}");
    }
}

#[test]
fn test_cli_missing_dataset_renders_error_payload() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::with_datasets_dir(dir.path());

    let output = cli::evaluate_output(
        r#"{"model": {"modelWeights": {"coef": [[0.1, 0.2, 0.3]], "intercept": [0.0]}}, "disease": "diabetes"}"#,
        &settings,
    );
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value["error"].as_str().unwrap().contains("diabetes"));
}

#[test]
fn test_cli_successful_run_renders_response_object() {
    let (_dir, settings) = fixture(40);

    let output = cli::train_output(
        r#"{"disease": "diabetes", "config": {"max_iter": 500, "C": 1.0}}"#,
        &settings,
    );
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert!(value.get("error").is_none(), "output = {output}");
    assert!(value["weights"]["coef"].is_array());
    assert!(value["trainingTime"].is_number());
}
