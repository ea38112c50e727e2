//! Data preparation: scaling, width reconciliation, synthetic labels and
//! the row budget applied to a combined training set.

mod labels;
mod reconcile;
mod scaler;

pub use labels::synthesize_labels;
pub use reconcile::reconcile_width;
pub use scaler::StandardScaler;

use crate::catalog::Dataset;
use ndarray::s;

/// Truncate a dataset to a caller-requested row budget.
///
/// Keeps only the leading `limit` rows of both features and labels; a limit
/// of `None` or one at least as large as the dataset is a no-op. Leading
/// slice, never a random subsample, so repeated invocations agree.
pub fn limit_rows(dataset: Dataset, limit: Option<usize>) -> Dataset {
    match limit {
        Some(n) if n < dataset.len() => Dataset {
            features: dataset.features.slice(s![..n, ..]).to_owned(),
            labels: dataset.labels.slice(s![..n]).to_owned(),
            schema_id: dataset.schema_id,
        },
        _ => dataset,
    }
}
