//! CPU implementation of the distance engine.
//!
//! Delegates to the generic implementations in `impl_generic/`.

mod set_distance;
