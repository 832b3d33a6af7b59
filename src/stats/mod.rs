//! Statistical helpers for relational scoring.
//!
//! - [`pearson`] - Pearson correlation with a two-sided p-value
//! - [`StudentT`] - Student's t distribution used for the p-value
//!
//! Condition matrices are small (`N × N`), so these routines operate on host
//! slices after a single transfer from the device.

mod correlation;
pub(crate) mod helpers;
mod special;
mod student_t;

pub use correlation::{Correlation, pearson};
pub use helpers::{extract_scalar, to_host_f64};
pub use student_t::StudentT;
