//! Method dispatch for set-level and condition-level distances.

use super::DistanceClient;
use super::frechet::{frechet_distance_impl, frechet_from_stats_impl, gaussian_stats_impl};
use super::kernel::{
    kernel_inception_distance_impl, maximum_mean_discrepancy_impl, resolve_mmd_kernel_impl,
};
use super::pointwise::{condition_pointwise_impl, instance_distances_impl, set_pointwise_impl};
use crate::distance::traits::{
    ConditionMatrix, DistanceMethod, DistanceOptions, DistributionalMethod, SetDistance,
};
use crate::distance::validation::{
    validate_conditions_3d, validate_instance_count, validate_matching_features,
};
use crate::error::EvalResult;
use crate::stats::to_host_f64;
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use tracing::{debug, trace};

/// Compare two `(n, F)` instance sets.
pub fn distance_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    method: DistanceMethod,
    options: &DistanceOptions,
) -> EvalResult<SetDistance<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    match method {
        DistanceMethod::Pointwise(metric) => Ok(SetDistance::Matrix(instance_distances_impl(
            client, a, b, metric,
        )?)),
        DistanceMethod::Distributional(_) => Ok(SetDistance::Scalar(set_distance_impl(
            client, a, b, method, options,
        )?)),
    }
}

/// Compare two `(n, F)` instance sets and reduce to one scalar.
pub fn set_distance_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    method: DistanceMethod,
    options: &DistanceOptions,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    match method {
        DistanceMethod::Pointwise(metric) => {
            set_pointwise_impl(client, a, b, metric, options.aggregate)
        }
        DistanceMethod::Distributional(DistributionalMethod::Fid) => {
            frechet_distance_impl(client, a, b, options.covariance)
        }
        DistanceMethod::Distributional(DistributionalMethod::Kid) => {
            kernel_inception_distance_impl(client, a, b, &options.kid)
        }
        DistanceMethod::Distributional(DistributionalMethod::Mmd) => {
            maximum_mean_discrepancy_impl(client, a, b, &options.mmd_kernel)
        }
    }
}

/// Condition `i` of a canonical `(N, I, F)` tensor as an `(I, F)` set.
fn condition_slice<R: Runtime>(samples: &Tensor<R>, i: usize) -> EvalResult<Tensor<R>> {
    let (inst, f) = (samples.shape()[1], samples.shape()[2]);
    Ok(samples.narrow(0, i, 1)?.contiguous().reshape(&[inst, f])?)
}

/// All-pairs condition distances `(Na, Ia, F) × (Nb, Ib, F) → Na × Nb`.
pub fn condition_distances_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    method: DistanceMethod,
    options: &DistanceOptions,
) -> EvalResult<ConditionMatrix>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_conditions_3d(a.shape(), "condition_distances")?;
    validate_conditions_3d(b.shape(), "condition_distances")?;
    validate_matching_features(a.shape(), b.shape(), "condition_distances")?;

    let (na, nb, f) = (a.shape()[0], b.shape()[0], a.shape()[2]);
    debug!(%method, na, nb, features = f, "computing condition distances");

    let values = match method {
        DistanceMethod::Pointwise(metric) => {
            let d = condition_pointwise_impl(client, a, b, metric, options.aggregate)?;
            to_host_f64(&d)?
        }
        DistanceMethod::Distributional(dm) => {
            // Fail before any heavy work if a set is too small.
            validate_instance_count(dm, a.shape()[1], f, options.covariance)?;
            validate_instance_count(dm, b.shape()[1], f, options.covariance)?;
            let options = shared_kernel_options(client, &[a, b], method, options)?;
            distributional_pairs(client, a, b, dm, &options)?
        }
    };

    ConditionMatrix::new(na, nb, values, "condition_distances")
}

/// Options whose MMD kernel bandwidth is fixed over the pooled `sets`.
///
/// Non-MMD methods get the options back unchanged.
pub fn shared_kernel_options<R, C>(
    client: &C,
    sets: &[&Tensor<R>],
    method: DistanceMethod,
    options: &DistanceOptions,
) -> EvalResult<DistanceOptions>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    if method != DistanceMethod::MMD {
        return Ok(*options);
    }
    Ok(DistanceOptions {
        mmd_kernel: resolve_mmd_kernel_impl(client, sets, &options.mmd_kernel)?,
        ..*options
    })
}

fn distributional_pairs<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    method: DistributionalMethod,
    options: &DistanceOptions,
) -> EvalResult<Vec<f64>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let (na, nb) = (a.shape()[0], b.shape()[0]);
    let mut values = Vec::with_capacity(na * nb);

    if method == DistributionalMethod::Fid {
        let stats_a = (0..na)
            .map(|i| gaussian_stats_impl(client, &condition_slice(a, i)?, options.covariance))
            .collect::<EvalResult<Vec<_>>>()?;
        let stats_b = (0..nb)
            .map(|j| gaussian_stats_impl(client, &condition_slice(b, j)?, options.covariance))
            .collect::<EvalResult<Vec<_>>>()?;
        for sa in &stats_a {
            for sb in &stats_b {
                values.push(frechet_from_stats_impl(client, sa, sb)?);
            }
        }
        return Ok(values);
    }

    let slices_b = (0..nb)
        .map(|j| condition_slice(b, j))
        .collect::<EvalResult<Vec<_>>>()?;
    for i in 0..na {
        let sa = condition_slice(a, i)?;
        for (j, sb) in slices_b.iter().enumerate() {
            let v = set_distance_impl(client, &sa, sb, method.into(), options)?;
            trace!(i, j, value = v, method = method.name(), "condition pair");
            values.push(v);
        }
    }
    Ok(values)
}
