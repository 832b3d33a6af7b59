//! Conditional evaluation trait.

use super::config::{ControlDelta, EvalConfig, InterOptions};
use super::report::EvaluationReport;
use super::scores::{ControlSamples, ControlScores, InterClassScores, IntraClassScores};
use crate::distance::{DistanceMethod, DistanceOptions, PointwiseMetric};
use crate::error::EvalResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Algorithmic contract for conditional generative-model evaluation.
///
/// `real` and `generated` are sample tensors of rank 2 to 5 describing the
/// same `N` conditions over the same feature space; instance counts may
/// differ. All backends implementing evaluation MUST implement this trait.
pub trait ConditionalEvaluationAlgorithms<R: Runtime> {
    /// Run every configured evaluator and assemble the report for the
    /// configured mode.
    ///
    /// All preconditions are checked before any distance is computed; the
    /// first violated one is returned as the error.
    fn evaluate(
        &self,
        real: &Tensor<R>,
        generated: &Tensor<R>,
        control: Option<&ControlSamples<R>>,
        config: &EvalConfig,
    ) -> EvalResult<EvaluationReport>;

    /// Top-k retrieval of each real condition's generated counterpart.
    fn intra_class(
        &self,
        real: &Tensor<R>,
        generated: &Tensor<R>,
        method: DistanceMethod,
        options: &DistanceOptions,
        k_range: &[usize],
    ) -> EvalResult<IntraClassScores>;

    /// Pearson correlation between real and generated class-distance
    /// structure.
    fn inter_class(
        &self,
        real: &Tensor<R>,
        generated: &Tensor<R>,
        metric: PointwiseMetric,
        options: &DistanceOptions,
        inter: &InterOptions,
    ) -> EvalResult<InterClassScores>;

    /// Per-class change in distance to the control set.
    ///
    /// # Errors
    ///
    /// `MissingControl` when `control` is `None`.
    fn control_scores(
        &self,
        real: &Tensor<R>,
        generated: &Tensor<R>,
        control: Option<&ControlSamples<R>>,
        method: DistanceMethod,
        options: &DistanceOptions,
        delta: ControlDelta,
    ) -> EvalResult<ControlScores>;
}
