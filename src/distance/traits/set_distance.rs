//! Set-to-set distance trait.

use super::matrix::ConditionMatrix;
use super::method::{CovarianceCheck, DistanceMethod, MmdKernel, PointwiseMetric, PolynomialKernel};
use super::DistanceOptions;
use crate::error::EvalResult;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Outcome of comparing two instance sets.
#[derive(Debug, Clone)]
pub enum SetDistance<R: Runtime> {
    /// Pointwise metrics: `(n, m)` matrix of instance distances.
    Matrix(Tensor<R>),
    /// Distributional methods: a single non-negative scalar.
    Scalar(f64),
}

impl<R: Runtime> SetDistance<R> {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            Self::Matrix(_) => None,
        }
    }

    pub fn into_matrix(self) -> Option<Tensor<R>> {
        match self {
            Self::Matrix(m) => Some(m),
            Self::Scalar(_) => None,
        }
    }
}

/// Algorithmic contract for comparing sample sets.
///
/// Instance sets are `(n, F)` tensors; condition sets are canonical
/// `(N, I, F)` tensors. All backends implementing the distance engine
/// MUST implement this trait.
pub trait SetDistanceAlgorithms<R: Runtime> {
    /// Pairwise instance distances between `a: (n, F)` and `b: (m, F)`,
    /// shape `(n, m)`.
    fn instance_distances(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        metric: PointwiseMetric,
    ) -> EvalResult<Tensor<R>>;

    /// Compare two instance sets with any method.
    ///
    /// Pointwise metrics yield the instance matrix, distributional methods a
    /// scalar.
    fn distance(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        method: DistanceMethod,
        options: &DistanceOptions,
    ) -> EvalResult<SetDistance<R>>;

    /// Compare two instance sets and reduce to one scalar.
    ///
    /// Pointwise metrics are reduced with `options.aggregate`.
    fn set_distance(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        method: DistanceMethod,
        options: &DistanceOptions,
    ) -> EvalResult<f64>;

    /// Distances between every condition of `a: (Na, Ia, F)` and every
    /// condition of `b: (Nb, Ib, F)`, as an `Na × Nb` host matrix.
    ///
    /// # Errors
    ///
    /// `DegenerateDistribution` when a condition holds too few instances for
    /// the method, `NonFinite` when any entry is NaN or infinite.
    fn condition_distances(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        method: DistanceMethod,
        options: &DistanceOptions,
    ) -> EvalResult<ConditionMatrix>;

    /// Fréchet distance between Gaussian fits of two instance sets:
    ///
    /// ```text
    /// ‖μa − μb‖² + tr(Σa) + tr(Σb) − 2·tr((Σa^½ Σb Σa^½)^½)
    /// ```
    fn frechet_distance(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        covariance: CovarianceCheck,
    ) -> EvalResult<f64>;

    /// Kernel Inception Distance: unbiased MMD² under a polynomial kernel.
    fn kernel_inception_distance(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        kernel: &PolynomialKernel,
    ) -> EvalResult<f64>;

    /// Biased (V-statistic) MMD² under the given kernel.
    fn maximum_mean_discrepancy(
        &self,
        a: &Tensor<R>,
        b: &Tensor<R>,
        kernel: &MmdKernel,
    ) -> EvalResult<f64>;
}
