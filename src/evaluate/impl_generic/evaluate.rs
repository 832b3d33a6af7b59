//! Conditional evaluation orchestrator.
//!
//! Preconditions are checked in a fixed order before any distance work:
//! shapes and control, k-range, mode, inter-class class count, then
//! distributional instance counts. The first violation is returned.

use super::control::{ResolvedControl, control_deltas_impl, exclude_condition, resolve_control_impl};
use super::inter::{class_matrices, inter_scores_from_matrices};
use super::intra::intra_scores_from_matrix;
use crate::distance::impl_generic::{condition_distances_impl, validate_robust_mean_input_impl};
use crate::distance::validation::{
    validate_instance_count, validate_mmd_kernel, validate_pointwise_metric,
    validate_polynomial_kernel,
};
use crate::distance::{DistanceClient, DistanceMethod, DistributionalMethod, InstanceAggregate};
use crate::error::{EvalError, EvalResult};
use crate::evaluate::traits::{
    ControlSamples, ControlScores, EvalConfig, EvaluationReport, InterClassScores,
};
use crate::evaluate::validation::{resolve_mode_method, validate_inter, validate_k_range};
use crate::samples::{SampleShape, align};
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use tracing::{debug, info, instrument};

/// Run the configured evaluation.
#[instrument(
    skip_all,
    fields(
        aggregated = config.aggregated,
        detailed = config.detailed_output,
        control = control.is_some()
    )
)]
pub fn evaluate_impl<R, C>(
    client: &C,
    real: &Tensor<R>,
    generated: &Tensor<R>,
    control: Option<&ControlSamples<R>>,
    config: &EvalConfig,
) -> EvalResult<EvaluationReport>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    // 1. shapes and control
    let (real, generated) = align(real, generated)?;
    let resolved: Option<ResolvedControl<R>> = match control {
        Some(c) => Some(resolve_control_impl(client, &real, &generated, c)?),
        None if config.control.required => return Err(EvalError::MissingControl),
        None => None,
    };
    let excluded = resolved.as_ref().and_then(|c| c.excluded);
    let real = exclude_condition(client, &real, excluded)?;
    let generated = exclude_condition(client, &generated, excluded)?;
    let real_shape = SampleShape::of(&real)?;
    let gen_shape = SampleShape::of(&generated)?;
    let n_eval = real_shape.conditions;

    // 2. k-range
    let ks = validate_k_range(&config.k_range, n_eval)?;

    // 3. mode
    let method = resolve_mode_method(config)?;
    validate_pointwise_metric(config.metric)?;
    match method {
        DistanceMethod::Distributional(DistributionalMethod::Kid) => {
            validate_polynomial_kernel(&config.distance.kid)?
        }
        DistanceMethod::Distributional(DistributionalMethod::Mmd) => {
            validate_mmd_kernel(&config.distance.mmd_kernel)?
        }
        _ => {}
    }
    if config.distance.aggregate == InstanceAggregate::RobustMean {
        let pointwise_intra = !method.is_distributional();
        if config.inter.enabled || pointwise_intra {
            validate_robust_mean_input_impl(client, &real, "real")?;
            validate_robust_mean_input_impl(client, &generated, "generated")?;
        }
        // Control sets are scored pointwise only in aggregated mode.
        if let Some(rc) = resolved.as_ref().filter(|_| pointwise_intra) {
            validate_robust_mean_input_impl(client, &rc.real, "control")?;
            validate_robust_mean_input_impl(client, &rc.generated, "generated_control")?;
        }
    }

    // 4. inter-class
    if config.inter.enabled {
        validate_inter(n_eval, config.inter.entries)?;
    }

    // 5. distributional instance counts
    if let DistanceMethod::Distributional(dm) = method {
        let cov = config.distance.covariance;
        validate_instance_count(dm, real_shape.instances, real_shape.features, cov)?;
        validate_instance_count(dm, gen_shape.instances, gen_shape.features, cov)?;
        if let Some(rc) = &resolved {
            rc.validate_for(method, &config.distance)?;
        }
    }

    debug!(
        %method,
        n_eval,
        real_instances = real_shape.instances,
        generated_instances = gen_shape.instances,
        features = real_shape.features,
        excluded = ?excluded,
        "evaluation validated"
    );

    let matrix = condition_distances_impl(client, &real, &generated, method, &config.distance)?;
    let intra = intra_scores_from_matrix(matrix, &ks)?;
    debug!(exact_matching = intra.exact_matching, mean_ranks = intra.mean_ranks, "intra-class done");

    let inter: Option<InterClassScores> = if config.inter.enabled {
        let (r, g) = class_matrices(
            client,
            &real,
            &generated,
            config.metric,
            &config.distance,
            config.inter.reference,
        )?;
        let scores = inter_scores_from_matrices(&r, &g, config.inter.entries)?;
        debug!(inter_corr = scores.inter_corr, inter_p = scores.inter_p, "inter-class done");
        Some(scores)
    } else {
        None
    };

    let control: Option<ControlScores> = resolved
        .as_ref()
        .map(|rc| {
            control_deltas_impl(
                client,
                &real,
                &generated,
                rc,
                method,
                &config.distance,
                config.control.delta,
            )
        })
        .transpose()?;

    let control_score = control.as_ref().map(|c| c.control_score);
    let class_control_scores = control.map(|c| c.class_control_scores);
    let inter_corr = inter.as_ref().map(|s| s.inter_corr);
    let inter_p = inter.as_ref().map(|s| s.inter_p);

    let report = match (method, config.detailed_output) {
        (DistanceMethod::Pointwise(_), false) => EvaluationReport::AggregatedSummary {
            control_score,
            inter_corr,
            intra_top: intra.top_k,
        },
        (DistanceMethod::Pointwise(_), true) => EvaluationReport::AggregatedDetailed {
            control_score,
            class_control_scores,
            inter_corr,
            inter_p,
            intra_top: intra.top_k,
            matrix: intra.matrix,
            mean_ranks: intra.mean_ranks,
            exact_matching: intra.exact_matching,
        },
        (DistanceMethod::Distributional(dm), false) => EvaluationReport::DistributedSummary {
            method: dm,
            control_score,
            inter_corr,
            intra: intra.diagonal,
        },
        (DistanceMethod::Distributional(dm), true) => EvaluationReport::DistributedDetailed {
            method: dm,
            control_score,
            class_control_scores,
            inter_corr,
            inter_p,
            intra: intra.diagonal,
            matrix: intra.matrix,
            intra_top: intra.top_k,
            mean_ranks: intra.mean_ranks,
            exact_matching: intra.exact_matching,
        },
    };

    info!(mode = report.mode(), "evaluation complete");
    Ok(report)
}
