//! Hold-out classification metrics

use ndarray::Array1;

/// Metrics for a scored hold-out set.
///
/// `confusion` is row-major `[[TN, FP], [FN, TP]]`: rows are the true
/// class (0 then 1), columns the predicted class (0 then 1), matching the
/// sklearn convention.
#[derive(Debug, Clone)]
pub struct ClassificationReport {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub confusion: [[u64; 2]; 2],
    pub samples: usize,
}

/// Compute accuracy, precision, recall and F1 with zero-division treated
/// as 0, plus the confusion matrix. Labels and predictions are thresholded
/// at 0.5 (class order fixed `{0, 1}`).
pub fn classification_report(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> ClassificationReport {
    let mut tn = 0u64;
    let mut fp = 0u64;
    let mut fn_ = 0u64;
    let mut tp = 0u64;

    for (t, p) in y_true.iter().zip(y_pred.iter()) {
        match (*t > 0.5, *p > 0.5) {
            (false, false) => tn += 1,
            (false, true) => fp += 1,
            (true, false) => fn_ += 1,
            (true, true) => tp += 1,
        }
    }

    let samples = y_true.len();
    let accuracy = if samples > 0 {
        (tn + tp) as f64 / samples as f64
    } else {
        0.0
    };
    let precision = if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    };
    let recall = if tp + fn_ > 0 {
        tp as f64 / (tp + fn_) as f64
    } else {
        0.0
    };
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    ClassificationReport {
        accuracy,
        precision,
        recall,
        f1,
        confusion: [[tn, fp], [fn_, tp]],
        samples,
    }
}

/// Binary cross-entropy against predicted P(y = 1), probabilities clamped
/// to `[1e-15, 1 - 1e-15]` before taking logs.
pub fn log_loss(y_true: &Array1<f64>, probs: &Array1<f64>) -> f64 {
    let n = y_true.len();
    if n == 0 {
        return 0.0;
    }

    const EPS: f64 = 1e-15;
    let total: f64 = y_true
        .iter()
        .zip(probs.iter())
        .map(|(t, p)| {
            let p = p.clamp(EPS, 1.0 - EPS);
            -(t * p.ln() + (1.0 - t) * (1.0 - p).ln())
        })
        .sum();
    total / n as f64
}
