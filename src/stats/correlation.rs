//! Pearson correlation with a two-sided significance test.
//!
//! ```text
//! r = Σ(xᵢ - x̄)(yᵢ - ȳ) / √(Σ(xᵢ - x̄)² · Σ(yᵢ - ȳ)²)
//! t = r √((n - 2) / (1 - r²)),   p = 2 · sf_t(|t|; df = n - 2)
//! ```
//!
//! Means are removed before accumulating the cross products (two-pass), so
//! large common offsets in the distances do not cancel catastrophically.

use super::student_t::StudentT;
use crate::error::{EvalError, EvalResult};

/// Result of a correlation test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    /// Pearson correlation coefficient in `[-1, 1]`.
    pub statistic: f64,
    /// Two-sided p-value under H₀: no linear relationship.
    pub pvalue: f64,
}

/// Pearson correlation of two equal-length samples.
///
/// # Errors
///
/// `DegenerateInput` when the samples differ in length, have fewer than 3
/// observations, or either sample is constant (r undefined).
pub fn pearson(x: &[f64], y: &[f64]) -> EvalResult<Correlation> {
    if x.len() != y.len() {
        return Err(EvalError::degenerate_input(
            "pearson",
            format!("samples differ in length: {} vs {}", x.len(), y.len()),
        ));
    }
    let n = x.len();
    if n < 3 {
        return Err(EvalError::degenerate_input(
            "pearson",
            format!("correlation requires at least 3 paired observations, got {n}"),
        ));
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(EvalError::NonFinite { context: "pearson" });
    }

    let n_f = n as f64;
    let mean_x = x.iter().sum::<f64>() / n_f;
    let mean_y = y.iter().sum::<f64>() / n_f;

    let (mut ss_xy, mut ss_xx, mut ss_yy) = (0.0, 0.0, 0.0);
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        ss_xy += dx * dy;
        ss_xx += dx * dx;
        ss_yy += dy * dy;
    }

    if ss_xx == 0.0 || ss_yy == 0.0 {
        return Err(EvalError::degenerate_input(
            "pearson",
            "one of the samples is constant, correlation is undefined",
        ));
    }

    let r = (ss_xy / (ss_xx * ss_yy).sqrt()).clamp(-1.0, 1.0);

    let df = n_f - 2.0;
    let pvalue = if (1.0 - r.abs()) <= f64::EPSILON {
        0.0
    } else {
        let t_stat = r * (df / (1.0 - r * r)).sqrt();
        let t_dist = StudentT::new(df)?;
        (2.0 * t_dist.sf(t_stat.abs())).min(1.0)
    };

    Ok(Correlation {
        statistic: r,
        pvalue,
    })
}
