//! CPU implementation of set distances.

use crate::distance::impl_generic::{
    condition_distances_impl, distance_impl, frechet_distance_impl, instance_distances_impl,
    kernel_inception_distance_impl, maximum_mean_discrepancy_impl, set_distance_impl,
};
use crate::distance::traits::{
    ConditionMatrix, CovarianceCheck, DistanceMethod, DistanceOptions, MmdKernel,
    PointwiseMetric, PolynomialKernel, SetDistance, SetDistanceAlgorithms,
};
use crate::error::EvalResult;
use numr::runtime::cpu::{CpuClient, CpuRuntime};
use numr::tensor::Tensor;

impl SetDistanceAlgorithms<CpuRuntime> for CpuClient {
    fn instance_distances(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        metric: PointwiseMetric,
    ) -> EvalResult<Tensor<CpuRuntime>> {
        instance_distances_impl(self, a, b, metric)
    }

    fn distance(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        method: DistanceMethod,
        options: &DistanceOptions,
    ) -> EvalResult<SetDistance<CpuRuntime>> {
        distance_impl(self, a, b, method, options)
    }

    fn set_distance(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        method: DistanceMethod,
        options: &DistanceOptions,
    ) -> EvalResult<f64> {
        set_distance_impl(self, a, b, method, options)
    }

    fn condition_distances(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        method: DistanceMethod,
        options: &DistanceOptions,
    ) -> EvalResult<ConditionMatrix> {
        condition_distances_impl(self, a, b, method, options)
    }

    fn frechet_distance(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        covariance: CovarianceCheck,
    ) -> EvalResult<f64> {
        frechet_distance_impl(self, a, b, covariance)
    }

    fn kernel_inception_distance(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        kernel: &PolynomialKernel,
    ) -> EvalResult<f64> {
        kernel_inception_distance_impl(self, a, b, kernel)
    }

    fn maximum_mean_discrepancy(
        &self,
        a: &Tensor<CpuRuntime>,
        b: &Tensor<CpuRuntime>,
        kernel: &MmdKernel,
    ) -> EvalResult<f64> {
        maximum_mean_discrepancy_impl(self, a, b, kernel)
    }
}
