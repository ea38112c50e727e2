//! Feature-width reconciliation for combining two data sources

use ndarray::{s, Array2};

/// Align `secondary`'s column count to `primary`'s.
///
/// Zero-pads on the right when `secondary` is narrower and truncates
/// trailing columns when it is wider. Alignment is purely positional:
/// column semantics are not matched by name, which is only acceptable when
/// combining same-domain sources with similar schemas. Row count is never
/// changed.
pub fn reconcile_width(primary: &Array2<f64>, secondary: &Array2<f64>) -> Array2<f64> {
    let target = primary.ncols();
    let width = secondary.ncols();

    if width == target {
        return secondary.clone();
    }

    if width > target {
        secondary.slice(s![.., ..target]).to_owned()
    } else {
        let mut out = Array2::zeros((secondary.nrows(), target));
        out.slice_mut(s![.., ..width]).assign(secondary);
        out
    }
}
