//! Kernel two-sample estimators (KID and MMD).

use super::DistanceClient;
use crate::distance::traits::{CovarianceCheck, DistributionalMethod, MmdKernel, PolynomialKernel};
use crate::distance::validation::{
    validate_instance_count, validate_instances_2d, validate_matching_features,
    validate_mmd_kernel, validate_polynomial_kernel,
};
use crate::error::{EvalError, EvalResult};
use crate::stats::extract_scalar;
use numr::ops::DistanceMetric;
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use tracing::{debug, trace, warn};

/// Raise every element to a positive integer power by repeated products.
///
/// Keeps the sign of negative bases, which `pow` via `exp·log` would lose.
fn powi<R, C>(client: &C, base: &Tensor<R>, degree: u32) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let mut out = base.clone();
    for _ in 1..degree {
        out = client.mul(&out, base)?;
    }
    Ok(out)
}

/// `(γ·x yᵀ + c₀)^d` as an `(n, m)` Gram matrix.
fn polynomial_gram<R, C>(
    client: &C,
    x: &Tensor<R>,
    y: &Tensor<R>,
    kernel: &PolynomialKernel,
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let gamma = kernel.gamma.unwrap_or(1.0 / x.shape()[1] as f64);
    let dot = client.matmul(x, &y.transpose(0, 1)?.contiguous())?;
    let base = client.add_scalar(&client.mul_scalar(&dot, gamma)?, kernel.coef0)?;
    powi(client, &base, kernel.degree)
}

/// Diagonal `k(xᵢ, xᵢ)` of the polynomial Gram matrix, summed.
fn polynomial_self_trace<R, C>(
    client: &C,
    x: &Tensor<R>,
    kernel: &PolynomialKernel,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let gamma = kernel.gamma.unwrap_or(1.0 / x.shape()[1] as f64);
    let norms = client.sum(&client.mul(x, x)?, &[1], false)?;
    let base = client.add_scalar(&client.mul_scalar(&norms, gamma)?, kernel.coef0)?;
    let diag = powi(client, &base, kernel.degree)?;
    extract_scalar(&client.sum(&diag, &[0], false)?)
}

fn total<R, C>(client: &C, gram: &Tensor<R>) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    extract_scalar(&client.sum(gram, &[0, 1], false)?)
}

/// Median pairwise distance over the pooled instances of `sets`, used as
/// kernel bandwidth.
///
/// Each set is `(n, F)` or canonical `(N, I, F)`; all instances are pooled.
/// Falls back to 1.0 when the median is zero (e.g. heavily duplicated data).
pub fn median_bandwidth_impl<R, C>(
    client: &C,
    sets: &[&Tensor<R>],
    metric: DistanceMetric,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let flat = sets
        .iter()
        .map(|s| {
            let f = s.shape()[s.ndim() - 1];
            Ok(s.contiguous().reshape(&[s.numel() / f, f])?)
        })
        .collect::<EvalResult<Vec<Tensor<R>>>>()?;
    let refs: Vec<&Tensor<R>> = flat.iter().collect();
    let pooled = client.cat(&refs, 0)?;
    let n = pooled.shape()[0];
    let d = client.cdist(&pooled, &pooled, metric)?;
    let sorted = client.sort(&d.contiguous().reshape(&[n * n])?, 0, false)?;

    // Each self-distance is zero, so skip the leading n entries.
    let off = n * n - n;
    let median = if off == 0 {
        0.0
    } else {
        let start = n + off / 2;
        if off % 2 == 1 {
            extract_scalar(&sorted.narrow(0, start, 1)?)?
        } else {
            extract_scalar(&client.mean(&sorted.narrow(0, start - 1, 2)?, &[0], false)?)?
        }
    };

    if median > 0.0 && median.is_finite() {
        Ok(median)
    } else {
        warn!(median, "median heuristic bandwidth degenerate, using 1.0");
        Ok(1.0)
    }
}

/// Fix a median-heuristic MMD bandwidth over the pooled instances of `sets`.
///
/// Scores computed with the returned kernel share one length scale, so they
/// stay comparable across pairs. Kernels with an explicit bandwidth are
/// returned unchanged.
pub fn resolve_mmd_kernel_impl<R, C>(
    client: &C,
    sets: &[&Tensor<R>],
    kernel: &MmdKernel,
) -> EvalResult<MmdKernel>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let resolved = match *kernel {
        MmdKernel::Rbf { bandwidth: None } => MmdKernel::Rbf {
            bandwidth: Some(median_bandwidth_impl(client, sets, DistanceMetric::Euclidean)?),
        },
        MmdKernel::Laplacian { bandwidth: None } => MmdKernel::Laplacian {
            bandwidth: Some(median_bandwidth_impl(client, sets, DistanceMetric::Manhattan)?),
        },
        other => other,
    };
    debug!(?resolved, "shared mmd kernel");
    Ok(resolved)
}

/// Gram matrix for a distance-based kernel `exp(-scale · d(x, y))`.
fn exp_kernel_gram<R, C>(
    client: &C,
    x: &Tensor<R>,
    y: &Tensor<R>,
    metric: DistanceMetric,
    scale: f64,
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    let d = client.cdist(x, y, metric)?;
    Ok(client.exp(&client.mul_scalar(&d, -scale)?)?)
}

/// MMD kernel with its bandwidth resolved.
#[derive(Clone, Copy)]
enum GramKernel<'a> {
    /// `exp(-scale · d(x, y))`
    Exp { metric: DistanceMetric, scale: f64 },
    Polynomial(&'a PolynomialKernel),
}

/// Kernel Inception Distance: unbiased MMD² under a polynomial kernel.
///
/// ```text
/// KID = Σ_{i≠j} k(aᵢ,aⱼ) / n(n−1) + Σ_{i≠j} k(bᵢ,bⱼ) / m(m−1) − 2 Σ k(aᵢ,bⱼ) / nm
/// ```
///
/// The unbiased estimate can dip below zero for matching distributions; the
/// result is clamped at zero.
pub fn kernel_inception_distance_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    kernel: &PolynomialKernel,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_instances_2d(a.shape(), "kid")?;
    validate_instances_2d(b.shape(), "kid")?;
    validate_matching_features(a.shape(), b.shape(), "kid")?;
    validate_polynomial_kernel(kernel)?;

    let (n, m, f) = (a.shape()[0], b.shape()[0], a.shape()[1]);
    validate_instance_count(DistributionalMethod::Kid, n, f, CovarianceCheck::Minimal)?;
    validate_instance_count(DistributionalMethod::Kid, m, f, CovarianceCheck::Minimal)?;

    let kaa = total(client, &polynomial_gram(client, a, a, kernel)?)?
        - polynomial_self_trace(client, a, kernel)?;
    let kbb = total(client, &polynomial_gram(client, b, b, kernel)?)?
        - polynomial_self_trace(client, b, kernel)?;
    let kab = total(client, &polynomial_gram(client, a, b, kernel)?)?;

    let (n, m) = (n as f64, m as f64);
    let kid = kaa / (n * (n - 1.0)) + kbb / (m * (m - 1.0)) - 2.0 * kab / (n * m);
    if !kid.is_finite() {
        return Err(EvalError::NonFinite { context: "kid" });
    }
    trace!(kid, "kid pair");
    Ok(kid.max(0.0))
}

/// Biased MMD² `mean(Kaa) + mean(Kbb) − 2·mean(Kab)`, clamped at zero.
pub fn maximum_mean_discrepancy_impl<R, C>(
    client: &C,
    a: &Tensor<R>,
    b: &Tensor<R>,
    kernel: &MmdKernel,
) -> EvalResult<f64>
where
    R: Runtime,
    C: DistanceClient<R>,
{
    validate_instances_2d(a.shape(), "mmd")?;
    validate_instances_2d(b.shape(), "mmd")?;
    validate_matching_features(a.shape(), b.shape(), "mmd")?;
    validate_mmd_kernel(kernel)?;

    let gram_kernel = match *kernel {
        MmdKernel::Rbf { bandwidth } => {
            let sigma = match bandwidth {
                Some(s) => s,
                None => median_bandwidth_impl(client, &[a, b], DistanceMetric::Euclidean)?,
            };
            trace!(sigma, "rbf bandwidth");
            GramKernel::Exp {
                metric: DistanceMetric::SquaredEuclidean,
                scale: 1.0 / (2.0 * sigma * sigma),
            }
        }
        MmdKernel::Laplacian { bandwidth } => {
            let sigma = match bandwidth {
                Some(s) => s,
                None => median_bandwidth_impl(client, &[a, b], DistanceMetric::Manhattan)?,
            };
            trace!(sigma, "laplacian bandwidth");
            GramKernel::Exp {
                metric: DistanceMetric::Manhattan,
                scale: 1.0 / sigma,
            }
        }
        MmdKernel::Polynomial(ref poly) => GramKernel::Polynomial(poly),
    };
    let grams = |x: &Tensor<R>, y: &Tensor<R>| -> EvalResult<Tensor<R>> {
        match gram_kernel {
            GramKernel::Exp { metric, scale } => exp_kernel_gram(client, x, y, metric, scale),
            GramKernel::Polynomial(poly) => polynomial_gram(client, x, y, poly),
        }
    };

    let (n, m) = (a.shape()[0] as f64, b.shape()[0] as f64);
    let kaa = total(client, &grams(a, a)?)? / (n * n);
    let kbb = total(client, &grams(b, b)?)? / (m * m);
    let kab = total(client, &grams(a, b)?)? / (n * m);

    let mmd = kaa + kbb - 2.0 * kab;
    if !mmd.is_finite() {
        return Err(EvalError::NonFinite { context: "mmd" });
    }
    trace!(mmd, "mmd pair");
    Ok(mmd.max(0.0))
}
