//! Control resolution and control-relative distance deltas.

use crate::distance::impl_generic::{condition_distances_impl, shared_kernel_options};
use crate::distance::validation::validate_instance_count;
use crate::distance::{DistanceClient, DistanceMethod, DistanceOptions};
use crate::error::{EvalError, EvalResult};
use crate::evaluate::traits::{ControlDelta, ControlSamples, ControlScores};
use crate::samples::{SampleShape, align, pool, select_conditions};
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use tracing::debug;

/// Control sets as `(I_c, F)` instance sets, plus the excluded condition.
#[derive(Debug, Clone)]
pub struct ResolvedControl<R: Runtime> {
    pub real: Tensor<R>,
    pub generated: Tensor<R>,
    /// Condition removed from the class set, for `ControlSamples::Condition`.
    pub excluded: Option<usize>,
}

impl<R: Runtime> ResolvedControl<R> {
    /// Fail if a control set is too small for a distributional method.
    pub fn validate_for(&self, method: DistanceMethod, options: &DistanceOptions) -> EvalResult<()> {
        if let DistanceMethod::Distributional(dm) = method {
            for set in [&self.real, &self.generated] {
                let (count, features) = (set.shape()[0], set.shape()[1]);
                validate_instance_count(dm, count, features, options.covariance)?;
            }
        }
        Ok(())
    }
}

fn condition_as_set<R, C>(client: &C, samples: &Tensor<R>, c: usize) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let shape = SampleShape::of(samples)?;
    Ok(select_conditions(client, samples, &[c])?.reshape(&[shape.instances, shape.features])?)
}

fn pooled_control<R: Runtime>(
    samples: &Tensor<R>,
    arg: &'static str,
    features: usize,
    dtype_of: &Tensor<R>,
) -> EvalResult<Tensor<R>> {
    let set = pool(samples, arg)?;
    if set.shape()[1] != features {
        return Err(EvalError::shape(
            arg,
            format!(
                "control has F={} features, samples have F={features}",
                set.shape()[1]
            ),
        ));
    }
    if set.dtype() != dtype_of.dtype() {
        return Err(EvalError::validation(
            arg,
            format!(
                "dtype {:?} does not match sample dtype {:?}",
                set.dtype(),
                dtype_of.dtype()
            ),
        ));
    }
    Ok(set)
}

/// Resolve a control against canonical, aligned real/generated tensors.
pub fn resolve_control_impl<R, C>(
    client: &C,
    real: &Tensor<R>,
    generated: &Tensor<R>,
    control: &ControlSamples<R>,
) -> EvalResult<ResolvedControl<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let shape = SampleShape::of(real)?;
    match control {
        ControlSamples::Condition(c) => {
            let c = *c;
            if c >= shape.conditions {
                return Err(EvalError::validation(
                    "control",
                    format!("control condition {c} out of range for N={}", shape.conditions),
                ));
            }
            if shape.conditions < 2 {
                return Err(EvalError::validation(
                    "control",
                    "excluding the control condition leaves no class to evaluate",
                ));
            }
            Ok(ResolvedControl {
                real: condition_as_set(client, real, c)?,
                generated: condition_as_set(client, generated, c)?,
                excluded: Some(c),
            })
        }
        ControlSamples::Samples {
            real: control_real,
            generated: control_gen,
        } => {
            let real_set = pooled_control(control_real, "control", shape.features, real)?;
            let gen_set = match control_gen {
                Some(g) => pooled_control(g, "generated_control", shape.features, real)?,
                None => real_set.clone(),
            };
            Ok(ResolvedControl {
                real: real_set,
                generated: gen_set,
                excluded: None,
            })
        }
    }
}

/// Drop the excluded control condition from a canonical tensor.
pub fn exclude_condition<R, C>(
    client: &C,
    samples: &Tensor<R>,
    excluded: Option<usize>,
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    match excluded {
        None => Ok(samples.clone()),
        Some(c) => {
            let keep: Vec<usize> = (0..SampleShape::of(samples)?.conditions)
                .filter(|&i| i != c)
                .collect();
            select_conditions(client, samples, &keep)
        }
    }
}

/// Deltas for canonical class tensors against a resolved control.
pub fn control_deltas_impl<R, C>(
    client: &C,
    real_classes: &Tensor<R>,
    generated_classes: &Tensor<R>,
    control: &ResolvedControl<R>,
    method: DistanceMethod,
    options: &DistanceOptions,
    delta: ControlDelta,
) -> EvalResult<ControlScores>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    // Real and generated deltas must be measured on one kernel scale.
    let options = shared_kernel_options(
        client,
        &[real_classes, generated_classes, &control.real, &control.generated],
        method,
        options,
    )?;
    let d_real = condition_distances_impl(
        client,
        real_classes,
        &control.real.unsqueeze(0)?,
        method,
        &options,
    )?;
    let d_gen = condition_distances_impl(
        client,
        generated_classes,
        &control.generated.unsqueeze(0)?,
        method,
        &options,
    )?;

    let real = d_real.as_slice().to_vec();
    let generated = d_gen.as_slice().to_vec();
    let class_control_scores: Vec<f64> = real
        .iter()
        .zip(&generated)
        .map(|(&r, &g)| delta.apply(r, g))
        .collect();
    let control_score =
        class_control_scores.iter().sum::<f64>() / class_control_scores.len() as f64;
    debug!(%method, ?delta, control_score, "control scores computed");

    Ok(ControlScores {
        control_score,
        class_control_scores,
        real,
        generated,
    })
}

/// Control scores for raw real/generated tensors.
pub fn control_scores_impl<R, C>(
    client: &C,
    real: &Tensor<R>,
    generated: &Tensor<R>,
    control: Option<&ControlSamples<R>>,
    method: DistanceMethod,
    options: &DistanceOptions,
    delta: ControlDelta,
) -> EvalResult<ControlScores>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let control = control.ok_or(EvalError::MissingControl)?;
    let (real, generated) = align(real, generated)?;
    let resolved = resolve_control_impl(client, &real, &generated, control)?;
    resolved.validate_for(method, options)?;

    let real = exclude_condition(client, &real, resolved.excluded)?;
    let generated = exclude_condition(client, &generated, resolved.excluded)?;
    control_deltas_impl(client, &real, &generated, &resolved, method, options, delta)
}
