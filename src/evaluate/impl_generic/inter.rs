//! Inter-class structure correlation.

use crate::distance::impl_generic::condition_distances_impl;
use crate::distance::{ConditionMatrix, DistanceClient, DistanceOptions, PointwiseMetric};
use crate::error::{EvalError, EvalResult};
use crate::evaluate::traits::{InterClassScores, InterEntries, InterOptions, InterReference};
use crate::evaluate::validation::validate_inter;
use crate::samples::{SampleShape, align};
use crate::stats::pearson;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Row-major entries of a square matrix selected by `entries`.
pub fn select_entries(matrix: &ConditionMatrix, entries: InterEntries) -> Vec<f64> {
    let n = matrix.rows();
    let mut out = Vec::with_capacity(entries.count(n));
    for i in 0..n {
        for j in 0..matrix.cols() {
            if entries.includes(i, j) {
                out.push(matrix.get(i, j));
            }
        }
    }
    out
}

/// Correlate matching entries of the reference and generated matrices.
pub fn inter_scores_from_matrices(
    reference: &ConditionMatrix,
    generated: &ConditionMatrix,
    entries: InterEntries,
) -> EvalResult<InterClassScores> {
    if reference.rows() != generated.rows() || reference.cols() != generated.cols() {
        return Err(EvalError::shape(
            "inter_class",
            format!(
                "class matrices differ: {}x{} vs {}x{}",
                reference.rows(),
                reference.cols(),
                generated.rows(),
                generated.cols()
            ),
        ));
    }
    let r = select_entries(reference, entries);
    let g = select_entries(generated, entries);
    let corr = pearson(&r, &g)?;
    Ok(InterClassScores {
        inter_corr: corr.statistic,
        inter_p: corr.pvalue,
        entries: r.len(),
    })
}

/// Class matrices `(R, G)` for canonical, aligned inputs.
pub(crate) fn class_matrices<R, C>(
    client: &C,
    real: &Tensor<R>,
    generated: &Tensor<R>,
    metric: PointwiseMetric,
    options: &DistanceOptions,
    reference: InterReference,
) -> EvalResult<(ConditionMatrix, ConditionMatrix)>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let method = metric.into();
    let r = condition_distances_impl(client, real, real, method, options)?;
    let g = match reference {
        InterReference::Generated => {
            condition_distances_impl(client, generated, generated, method, options)?
        }
        InterReference::Real => condition_distances_impl(client, generated, real, method, options)?,
    };
    Ok((r, g))
}

/// Inter-class scores for raw real/generated tensors.
pub fn inter_class_impl<R, C>(
    client: &C,
    real: &Tensor<R>,
    generated: &Tensor<R>,
    metric: PointwiseMetric,
    options: &DistanceOptions,
    inter: &InterOptions,
) -> EvalResult<InterClassScores>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let (real, generated) = align(real, generated)?;
    let shape = SampleShape::of(&real)?;
    validate_inter(shape.conditions, inter.entries)?;

    let (r, g) = class_matrices(client, &real, &generated, metric, options, inter.reference)?;
    inter_scores_from_matrices(&r, &g, inter.entries)
}
