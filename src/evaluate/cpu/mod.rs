//! CPU implementation of conditional evaluation.
//!
//! Delegates to the generic implementations in `impl_generic/`.

mod evaluate;
