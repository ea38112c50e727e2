//! Deterministic train/test partitioning

use crate::catalog::Dataset;
use crate::error::{MedscreenError, Result};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed baked into the splitter. Not caller-configurable: training and
/// evaluation must derive the identical partition in separate processes
/// with nothing persisted between them.
pub const SPLIT_SEED: u64 = 42;

/// Fraction of rows held out for testing.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Partition a dataset into train and test subsets.
///
/// Given the same dataset (same row order and count) and fraction, the
/// partition is bit-for-bit identical across invocations and across process
/// boundaries. This is what lets evaluation reconstruct the exact held-out
/// rows training used, purely by reloading the same file and re-splitting;
/// the guarantee holds only while the on-disk dataset keeps its row order.
pub fn split(dataset: &Dataset, test_fraction: f64) -> Result<(Dataset, Dataset)> {
    if test_fraction <= 0.0 || test_fraction >= 1.0 {
        return Err(MedscreenError::InvalidInput(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let n = dataset.len();
    let n_test = ((n as f64) * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= n {
        return Err(MedscreenError::DataError(format!(
            "dataset with {n} rows cannot be split with test fraction {test_fraction}"
        )));
    }

    let mut indices: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(SPLIT_SEED);
    indices.shuffle(&mut rng);

    let test = dataset.select_rows(&indices[..n_test]);
    let train = dataset.select_rows(&indices[n_test..]);
    Ok((train, test))
}
