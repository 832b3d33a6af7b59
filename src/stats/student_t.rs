//! Student's t distribution.

use super::special;
use crate::error::{EvalError, EvalResult};

/// Student's t distribution with ν degrees of freedom.
///
/// Only the tail functions are provided; they are what correlation p-values
/// need.
///
/// ```ignore
/// use condeval::stats::StudentT;
///
/// let t = StudentT::new(8.0)?;
/// let two_sided = 2.0 * t.sf(2.31);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StudentT {
    /// Degrees of freedom (ν)
    nu: f64,
}

impl StudentT {
    /// Create a new Student's t distribution.
    ///
    /// # Errors
    ///
    /// Returns a validation error if ν is not positive and finite.
    pub fn new(nu: f64) -> EvalResult<Self> {
        if nu <= 0.0 || !nu.is_finite() {
            return Err(EvalError::validation(
                "degrees of freedom",
                format!("must be positive and finite, got {nu}"),
            ));
        }
        Ok(Self { nu })
    }

    /// Get the degrees of freedom.
    pub fn df(&self) -> f64 {
        self.nu
    }

    /// Cumulative distribution function.
    pub fn cdf(&self, x: f64) -> f64 {
        if x == 0.0 {
            return 0.5;
        }
        if x == f64::INFINITY {
            return 1.0;
        }
        if x == f64::NEG_INFINITY {
            return 0.0;
        }

        // CDF(x) = 1 - 0.5 * I_{ν/(ν+x²)}(ν/2, 1/2) for x > 0
        // CDF(x) = 0.5 * I_{ν/(ν+x²)}(ν/2, 1/2) for x < 0
        let t = self.nu / (self.nu + x * x);
        let beta_inc = special::betainc(self.nu / 2.0, 0.5, t);

        if x > 0.0 {
            1.0 - 0.5 * beta_inc
        } else {
            0.5 * beta_inc
        }
    }

    /// Survival function: 1 - CDF(x).
    pub fn sf(&self, x: f64) -> f64 {
        self.cdf(-x)
    }
}
