//! Fréchet distance between Gaussian fits.
//!
//! The cross term `tr((Σa Σb)^½)` is evaluated as `tr((Σa^½ Σb Σa^½)^½)`,
//! whose argument is symmetric PSD, so both square roots come from the
//! symmetric eigendecomposition with negative round-off clipped to zero.
//! Per-set statistics are computed once and reused across every pair.

use super::DistanceClient;
use crate::distance::traits::{CovarianceCheck, DistributionalMethod};
use crate::distance::validation::{
    validate_instance_count, validate_instances_2d, validate_matching_features,
};
use crate::error::{EvalError, EvalResult};
use crate::stats::{extract_scalar, to_host_f64};
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use tracing::trace;

/// Gaussian fit of one instance set.
#[derive(Debug, Clone)]
pub struct GaussianStats<R: Runtime> {
    /// Mean vector `[1, F]`.
    pub mean: Tensor<R>,
    /// Unbiased covariance `[F, F]`.
    pub covariance: Tensor<R>,
    /// Principal square root of the covariance `[F, F]`.
    pub sqrt_covariance: Tensor<R>,
    /// `tr(Σ)`.
    pub trace: f64,
    pub count: usize,
}

/// Fit mean and covariance of an `(n, F)` instance set.
pub fn gaussian_stats_impl<R, C>(
    client: &C,
    x: &Tensor<R>,
    covariance: CovarianceCheck,
) -> EvalResult<GaussianStats<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_instances_2d(x.shape(), "fid")?;
    let (n, f) = (x.shape()[0], x.shape()[1]);
    validate_instance_count(DistributionalMethod::Fid, n, f, covariance)?;

    let mean = client.mean(x, &[0], true)?;
    let centered = client.sub(x, &mean.broadcast_to(x.shape())?)?;

    let scale = 1.0 / (n as f64 - 1.0);
    let scatter = client.matmul(&centered.transpose(0, 1)?, &centered)?;
    let cov = client.mul_scalar(&scatter, scale)?;

    let trace = extract_scalar(&client.sum(&client.mul(&centered, &centered)?, &[0, 1], false)?)?
        * scale;
    let sqrt_covariance = psd_sqrt_impl(client, &cov)?;

    Ok(GaussianStats {
        mean,
        covariance: cov,
        sqrt_covariance,
        trace,
        count: n,
    })
}

/// Symmetrize `m` as `(m + mᵀ) / 2`.
fn symmetrize<R, C>(client: &C, m: &Tensor<R>) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let mt = m.transpose(0, 1)?.contiguous();
    Ok(client.mul_scalar(&client.add(m, &mt)?, 0.5)?)
}

/// Eigenvalues of a symmetric matrix with negative round-off clipped to zero.
fn clipped_eigen<R, C>(client: &C, m: &Tensor<R>) -> EvalResult<(Tensor<R>, Tensor<R>)>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let f = m.shape()[0];
    let eig = client.eig_decompose_symmetric(&symmetrize(client, m)?)?;
    let zero = Tensor::<R>::zeros(&[f], m.dtype(), m.device());
    let values = client.maximum(&eig.eigenvalues, &zero)?;
    Ok((values, eig.eigenvectors))
}

/// Principal square root `V·diag(√λ)·Vᵀ` of a symmetric PSD matrix.
pub fn psd_sqrt_impl<R, C>(client: &C, m: &Tensor<R>) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let f = m.shape()[0];
    let (values, vectors) = clipped_eigen(client, m)?;
    let roots = client.sqrt(&values)?;
    let scaled = client.mul(&vectors, &roots.unsqueeze(0)?.broadcast_to(&[f, f])?)?;
    Ok(client.matmul(&scaled, &vectors.transpose(0, 1)?)?)
}

/// Fréchet distance from two precomputed fits.
pub fn frechet_from_stats_impl<R, C>(
    client: &C,
    a: &GaussianStats<R>,
    b: &GaussianStats<R>,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_matching_features(a.mean.shape(), b.mean.shape(), "fid")?;

    let diff = client.sub(&a.mean, &b.mean)?;
    let mean_term = extract_scalar(&client.sum(&client.mul(&diff, &diff)?, &[0, 1], false)?)?;

    let inner = client.matmul(
        &client.matmul(&a.sqrt_covariance, &b.covariance)?,
        &a.sqrt_covariance,
    )?;
    let (values, _) = clipped_eigen(client, &inner)?;
    let trace_covmean: f64 = to_host_f64(&values)?.iter().map(|v| v.sqrt()).sum();

    let fid = mean_term + a.trace + b.trace - 2.0 * trace_covmean;
    if !fid.is_finite() {
        return Err(EvalError::degenerate_distribution(
            "fid",
            "covariance square root produced a non-finite value",
        ));
    }
    trace!(mean_term, trace_covmean, fid, "fid pair");
    Ok(fid.max(0.0))
}

/// Fréchet distance between two instance sets.
pub fn frechet_distance_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    covariance: CovarianceCheck,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_instances_2d(a.shape(), "fid")?;
    validate_instances_2d(b.shape(), "fid")?;
    validate_matching_features(a.shape(), b.shape(), "fid")?;

    let stats_a = gaussian_stats_impl(client, a, covariance)?;
    let stats_b = gaussian_stats_impl(client, b, covariance)?;
    frechet_from_stats_impl(client, &stats_a, &stats_b)
}
