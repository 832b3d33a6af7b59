//! Generic evaluation implementations.
//!
//! Evaluators pull condition matrices to the host once and do ranking,
//! correlation and delta arithmetic there; everything upstream of the
//! matrices runs on the numr backend.

mod control;
mod evaluate;
mod inter;
mod intra;

pub use control::{
    ResolvedControl, control_deltas_impl, control_scores_impl, exclude_condition,
    resolve_control_impl,
};
pub use evaluate::evaluate_impl;
pub use inter::{inter_class_impl, inter_scores_from_matrices, select_entries};
pub use intra::{intra_class_impl, intra_scores_from_matrix, true_match_ranks};
