//! Up-front checks run by the orchestrator before any distance work.

use super::traits::{EvalConfig, InterEntries};
use crate::distance::DistanceMethod;
use crate::error::{EvalError, EvalResult};

/// Validate `k_range` against the evaluated class count and return it
/// sorted and de-duplicated.
pub fn validate_k_range(k_range: &[usize], n_eval: usize) -> EvalResult<Vec<usize>> {
    if k_range.is_empty() {
        return Err(EvalError::validation("k_range", "at least one k is required"));
    }
    let mut ks = k_range.to_vec();
    ks.sort_unstable();
    ks.dedup();

    if ks[0] == 0 {
        return Err(EvalError::validation("k_range", "k must be at least 1"));
    }
    if let Some(&max) = ks.last() {
        if max > n_eval {
            return Err(EvalError::validation(
                "k_range",
                format!("k={max} exceeds the number of evaluated classes N={n_eval}"),
            ));
        }
    }
    Ok(ks)
}

/// Method scoring intra-class and control metrics in the configured mode.
pub fn resolve_mode_method(config: &EvalConfig) -> EvalResult<DistanceMethod> {
    if config.aggregated {
        return Ok(DistanceMethod::Pointwise(config.metric));
    }
    config
        .distributed_method
        .map(DistanceMethod::Distributional)
        .ok_or_else(|| {
            EvalError::validation(
                "distributed_method",
                "distributed mode (aggregated = false) requires a distributional method",
            )
        })
}

/// Inter-class correlation needs at least two classes and three entry pairs.
pub fn validate_inter(n_eval: usize, entries: InterEntries) -> EvalResult<()> {
    if n_eval < 2 {
        return Err(EvalError::degenerate_input(
            "inter_class",
            format!("correlation requires at least 2 classes, got N={n_eval}"),
        ));
    }
    let count = entries.count(n_eval);
    if count < 3 {
        return Err(EvalError::degenerate_input(
            "inter_class",
            format!("{entries:?} selection of N={n_eval} classes yields {count} entries, need at least 3"),
        ));
    }
    Ok(())
}
