//! Sample tensor canonicalization.
//!
//! Every evaluation works on the canonical `(N, I, F)` layout: `N` conditions,
//! `I` instances per condition and `F` flattened features. Inputs may arrive
//! in any of the shapes below and are reshaped (never copied out of order):
//!
//! | Rank | Input shape | Canonical shape |
//! |------|-------------|-----------------|
//! | 2 | `(N, F)` | `(N, 1, F)` |
//! | 3 | `(N, I, F)` | `(N, I, F)` |
//! | 4 | `(N, H, W, C)` | `(N, 1, H*W*C)` |
//! | 5 | `(N, I, H, W, C)` | `(N, I, H*W*C)` |
//!
//! Image axes are flattened row-major: `H` outermost, `C` innermost, so the
//! feature index of pixel `(h, w, c)` is `(h * W + w) * C + c`.

mod canonical;
mod validation;

pub use canonical::{SampleShape, align, canonicalize, pool, select_conditions};
pub use validation::{validate_sample_dtype, validate_sample_rank};
