//! Scalar special functions backed by numr.

use numr::algorithm::special::scalar as numr_special;

/// Regularized incomplete beta function: I_x(a, b)
pub fn betainc(a: f64, b: f64, x: f64) -> f64 {
    numr_special::betainc_scalar(a, b, x)
}
