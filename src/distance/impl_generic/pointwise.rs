//! Pointwise metrics lifted to condition level.
//!
//! Centroid-style aggregates reduce each condition to one feature vector and
//! run a single `cdist` between the reduced sets. `PairMean` runs one `cdist`
//! over all instances and averages the instance blocks on-device.

use super::DistanceClient;
use crate::distance::traits::{InstanceAggregate, PointwiseMetric};
use crate::distance::validation::{
    validate_conditions_3d, validate_instances_2d, validate_matching_features,
    validate_pointwise_metric,
};
use crate::error::{EvalError, EvalResult};
use crate::stats::extract_scalar;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Offset keeping `log` finite for zero-valued features in `RobustMean`.
const ROBUST_MEAN_EPS: f64 = 1e-8;

/// Pairwise instance distances `(n, F) × (m, F) → (n, m)`.
pub fn instance_distances_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    metric: PointwiseMetric,
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_instances_2d(a.shape(), "instance_distances")?;
    validate_instances_2d(b.shape(), "instance_distances")?;
    validate_matching_features(a.shape(), b.shape(), "instance_distances")?;
    validate_pointwise_metric(metric)?;

    Ok(client.cdist(a, b, metric.numr_metric())?)
}

/// Fail unless every feature of `samples` is non-negative, as `RobustMean`
/// takes logarithms.
pub fn validate_robust_mean_input_impl<R, C>(
    client: &C,
    samples: &Tensor<R>,
    arg: &'static str,
) -> EvalResult<()>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let all_dims: Vec<usize> = (0..samples.ndim()).collect();
    let min = extract_scalar(&client.min(samples, &all_dims, false)?)?;
    if min < 0.0 {
        return Err(EvalError::validation(
            arg,
            format!("robust_mean requires non-negative features, found {min}"),
        ));
    }
    Ok(())
}

/// Reduce every condition of `(N, I, F)` samples to one `(N, F)` vector.
pub fn aggregate_instances_impl<R, C>(
    client: &C,
    samples: &Tensor<R>,
    aggregate: InstanceAggregate,
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_conditions_3d(samples.shape(), "aggregate_instances")?;
    let (n, i, f) = (samples.shape()[0], samples.shape()[1], samples.shape()[2]);

    match aggregate {
        InstanceAggregate::Mean => Ok(client.mean(samples, &[1], false)?),
        InstanceAggregate::Median => {
            // Lower median: index (I - 1) / 2 of the sorted instances.
            let sorted = client.sort(samples, 1, false)?;
            let middle = sorted.narrow(1, (i - 1) / 2, 1)?;
            Ok(middle.contiguous().reshape(&[n, f])?)
        }
        InstanceAggregate::RobustMean => {
            validate_robust_mean_input_impl(client, samples, "aggregate")?;
            let logs = client.log(&client.add_scalar(samples, ROBUST_MEAN_EPS)?)?;
            Ok(client.exp(&client.mean(&logs, &[1], false)?)?)
        }
        InstanceAggregate::PairMean => Err(EvalError::validation(
            "aggregate",
            "pair_mean does not reduce a condition to a single vector",
        )),
    }
}

/// Condition-level distances `(Na, Ia, F) × (Nb, Ib, F) → (Na, Nb)`.
pub fn condition_pointwise_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    metric: PointwiseMetric,
    aggregate: InstanceAggregate,
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_conditions_3d(a.shape(), "condition_distances")?;
    validate_conditions_3d(b.shape(), "condition_distances")?;
    validate_matching_features(a.shape(), b.shape(), "condition_distances")?;
    validate_pointwise_metric(metric)?;

    let (na, ia, f) = (a.shape()[0], a.shape()[1], a.shape()[2]);
    let (nb, ib) = (b.shape()[0], b.shape()[1]);

    if aggregate == InstanceAggregate::PairMean {
        let flat_a = a.contiguous().reshape(&[na * ia, f])?;
        let flat_b = b.contiguous().reshape(&[nb * ib, f])?;
        let pairs = client.cdist(&flat_a, &flat_b, metric.numr_metric())?;
        let blocks = pairs.reshape(&[na, ia, nb, ib])?;
        return Ok(client.mean(&blocks, &[1, 3], false)?);
    }

    let centers_a = aggregate_instances_impl(client, a, aggregate)?;
    let centers_b = aggregate_instances_impl(client, b, aggregate)?;
    Ok(client.cdist(&centers_a, &centers_b, metric.numr_metric())?)
}

/// One scalar between two instance sets `(n, F)` and `(m, F)`.
pub fn set_pointwise_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    metric: PointwiseMetric,
    aggregate: InstanceAggregate,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_instances_2d(a.shape(), "set_distance")?;
    validate_instances_2d(b.shape(), "set_distance")?;
    let d = condition_pointwise_impl(
        client,
        &a.unsqueeze(0)?,
        &b.unsqueeze(0)?,
        metric,
        aggregate,
    )?;
    extract_scalar(&d)
}
