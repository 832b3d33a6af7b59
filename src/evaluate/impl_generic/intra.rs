//! Intra-class top-k retrieval.
//!
//! Row `i` of the real-vs-generated matrix ranks every generated condition
//! against real condition `i`. The true match ranks
//!
//! ```text
//! 1 + #{j : D[i,j] < D[i,i]} + #{j < i : D[i,j] == D[i,i]}
//! ```
//!
//! so ties go to the lower condition index.

use crate::distance::impl_generic::condition_distances_impl;
use crate::distance::{ConditionMatrix, DistanceClient, DistanceMethod, DistanceOptions};
use crate::error::{EvalError, EvalResult};
use crate::evaluate::traits::IntraClassScores;
use crate::evaluate::validation::validate_k_range;
use crate::samples::{SampleShape, align};
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use std::collections::BTreeMap;

/// 1-based rank of the true match in every row of a square matrix.
pub fn true_match_ranks(matrix: &ConditionMatrix) -> EvalResult<Vec<usize>> {
    if !matrix.is_square() {
        return Err(EvalError::shape(
            "intra_class",
            format!(
                "ranking needs a square matrix, got {}x{}",
                matrix.rows(),
                matrix.cols()
            ),
        ));
    }
    let ranks = (0..matrix.rows())
        .map(|i| {
            let row = matrix.row(i);
            let own = row[i];
            let closer = row.iter().filter(|&&d| d < own).count();
            let tied_before = row[..i].iter().filter(|&&d| d == own).count();
            1 + closer + tied_before
        })
        .collect();
    Ok(ranks)
}

/// Scores from a precomputed matrix and an already validated k-range.
pub fn intra_scores_from_matrix(matrix: ConditionMatrix, ks: &[usize]) -> EvalResult<IntraClassScores> {
    let ranks = true_match_ranks(&matrix)?;
    let n = ranks.len() as f64;
    let hit_rate = |k: usize| ranks.iter().filter(|&&r| r <= k).count() as f64 / n;

    let top_k: BTreeMap<usize, f64> = ks.iter().map(|&k| (k, hit_rate(k))).collect();
    let mean_ranks = ranks.iter().sum::<usize>() as f64 / n;
    let exact_matching = hit_rate(1);

    Ok(IntraClassScores {
        top_k,
        ranks,
        mean_ranks,
        exact_matching,
        diagonal: matrix.diagonal(),
        matrix,
    })
}

/// Intra-class scores for raw real/generated tensors.
pub fn intra_class_impl<R, C>(
    client: &C,
    real: &Tensor<R>,
    generated: &Tensor<R>,
    method: DistanceMethod,
    options: &DistanceOptions,
    k_range: &[usize],
) -> EvalResult<IntraClassScores>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let (real, generated) = align(real, generated)?;
    let shape = SampleShape::of(&real)?;
    let ks = validate_k_range(k_range, shape.conditions)?;

    let matrix = condition_distances_impl(client, &real, &generated, method, options)?;
    intra_scores_from_matrix(matrix, &ks)
}
