//! CUDA implementation of conditional evaluation.

use crate::distance::{DistanceMethod, DistanceOptions, PointwiseMetric};
use crate::error::EvalResult;
use crate::evaluate::impl_generic::{
    control_scores_impl, evaluate_impl, inter_class_impl, intra_class_impl,
};
use crate::evaluate::traits::{
    ConditionalEvaluationAlgorithms, ControlDelta, ControlSamples, ControlScores, EvalConfig,
    EvaluationReport, InterClassScores, InterOptions, IntraClassScores,
};
use numr::runtime::cuda::{CudaClient, CudaRuntime};
use numr::tensor::Tensor;

impl ConditionalEvaluationAlgorithms<CudaRuntime> for CudaClient {
    fn evaluate(
        &self,
        real: &Tensor<CudaRuntime>,
        generated: &Tensor<CudaRuntime>,
        control: Option<&ControlSamples<CudaRuntime>>,
        config: &EvalConfig,
    ) -> EvalResult<EvaluationReport> {
        evaluate_impl(self, real, generated, control, config)
    }

    fn intra_class(
        &self,
        real: &Tensor<CudaRuntime>,
        generated: &Tensor<CudaRuntime>,
        method: DistanceMethod,
        options: &DistanceOptions,
        k_range: &[usize],
    ) -> EvalResult<IntraClassScores> {
        intra_class_impl(self, real, generated, method, options, k_range)
    }

    fn inter_class(
        &self,
        real: &Tensor<CudaRuntime>,
        generated: &Tensor<CudaRuntime>,
        metric: PointwiseMetric,
        options: &DistanceOptions,
        inter: &InterOptions,
    ) -> EvalResult<InterClassScores> {
        inter_class_impl(self, real, generated, metric, options, inter)
    }

    fn control_scores(
        &self,
        real: &Tensor<CudaRuntime>,
        generated: &Tensor<CudaRuntime>,
        control: Option<&ControlSamples<CudaRuntime>>,
        method: DistanceMethod,
        options: &DistanceOptions,
        delta: ControlDelta,
    ) -> EvalResult<ControlScores> {
        control_scores_impl(self, real, generated, control, method, options, delta)
    }
}
