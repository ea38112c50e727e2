//! Synthetic labels for caller-supplied records without ground truth

use ndarray::{Array1, Array2, ArrayView1};

/// Heuristic binary labels for unlabeled rows: 1.0 when a row's mean
/// strictly exceeds its median, else 0.0. Each row is labeled independently
/// with no cross-row state, so the output is reproducible per row.
///
/// A tie (mean == median) labels 0.0. This heuristic carries no clinical
/// meaning; callers are told when it ran so downstream consumers never
/// mistake these for confirmed diagnoses.
pub fn synthesize_labels(rows: &Array2<f64>) -> Array1<f64> {
    Array1::from_iter(rows.rows().into_iter().map(|row| {
        let mean = row.mean().unwrap_or(0.0);
        if mean > median(row) {
            1.0
        } else {
            0.0
        }
    }))
}

fn median(row: ArrayView1<f64>) -> f64 {
    let mut values: Vec<f64> = row.to_vec();
    if values.is_empty() {
        return 0.0;
    }
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
