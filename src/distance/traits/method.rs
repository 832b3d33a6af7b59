//! Distance method identifiers and their options.

use crate::error::EvalError;
use numr::ops::DistanceMetric;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Instance-to-instance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointwiseMetric {
    /// L2 norm of the feature difference.
    #[default]
    Euclidean,
    /// `1 - cosine_similarity`, in `[0, 2]`.
    Cosine,
    /// `1 - pearson(x, y)` across features.
    Correlation,
    /// L∞ norm of the feature difference.
    Chebyshev,
    /// L1 norm of the feature difference.
    Cityblock,
    /// Lp norm of the feature difference.
    Minkowski(f64),
}

impl PointwiseMetric {
    /// Exponent used when `minkowski` is parsed without one.
    pub const DEFAULT_MINKOWSKI_P: f64 = 3.0;

    const NAMES: &'static str = "euclidean, cosine, correlation, chebyshev, cityblock, minkowski";

    pub fn name(&self) -> &'static str {
        match self {
            Self::Euclidean => "euclidean",
            Self::Cosine => "cosine",
            Self::Correlation => "correlation",
            Self::Chebyshev => "chebyshev",
            Self::Cityblock => "cityblock",
            Self::Minkowski(_) => "minkowski",
        }
    }

    /// The numr `cdist` metric computing this distance.
    pub fn numr_metric(&self) -> DistanceMetric {
        match *self {
            Self::Euclidean => DistanceMetric::Euclidean,
            Self::Cosine => DistanceMetric::Cosine,
            Self::Correlation => DistanceMetric::Correlation,
            Self::Chebyshev => DistanceMetric::Chebyshev,
            Self::Cityblock => DistanceMetric::Manhattan,
            Self::Minkowski(p) => DistanceMetric::Minkowski(p),
        }
    }
}

impl FromStr for PointwiseMetric {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "euclidean" => Ok(Self::Euclidean),
            "cosine" => Ok(Self::Cosine),
            "correlation" => Ok(Self::Correlation),
            "chebyshev" => Ok(Self::Chebyshev),
            "cityblock" | "manhattan" => Ok(Self::Cityblock),
            "minkowski" => Ok(Self::Minkowski(Self::DEFAULT_MINKOWSKI_P)),
            _ => Err(EvalError::InvalidMethod {
                name: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Estimators comparing two sets as empirical distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistributionalMethod {
    /// Fréchet distance between Gaussian fits.
    Fid,
    /// Unbiased polynomial-kernel MMD².
    Kid,
    /// Kernel MMD² with a configurable kernel.
    Mmd,
}

impl DistributionalMethod {
    const NAMES: &'static str = "fid, kid, mmd";

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fid => "fid",
            Self::Kid => "kid",
            Self::Mmd => "mmd",
        }
    }
}

impl FromStr for DistributionalMethod {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fid" => Ok(Self::Fid),
            "kid" => Ok(Self::Kid),
            "mmd" => Ok(Self::Mmd),
            _ => Err(EvalError::InvalidMethod {
                name: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// Any supported way of comparing two sample sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DistanceMethod {
    Pointwise(PointwiseMetric),
    Distributional(DistributionalMethod),
}

impl DistanceMethod {
    pub const EUCLIDEAN: Self = Self::Pointwise(PointwiseMetric::Euclidean);
    pub const COSINE: Self = Self::Pointwise(PointwiseMetric::Cosine);
    pub const FID: Self = Self::Distributional(DistributionalMethod::Fid);
    pub const KID: Self = Self::Distributional(DistributionalMethod::Kid);
    pub const MMD: Self = Self::Distributional(DistributionalMethod::Mmd);

    pub fn name(&self) -> &'static str {
        match self {
            Self::Pointwise(m) => m.name(),
            Self::Distributional(m) => m.name(),
        }
    }

    pub fn is_distributional(&self) -> bool {
        matches!(self, Self::Distributional(_))
    }
}

impl From<PointwiseMetric> for DistanceMethod {
    fn from(metric: PointwiseMetric) -> Self {
        Self::Pointwise(metric)
    }
}

impl From<DistributionalMethod> for DistanceMethod {
    fn from(method: DistributionalMethod) -> Self {
        Self::Distributional(method)
    }
}

impl fmt::Display for DistanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pointwise(PointwiseMetric::Minkowski(p)) => write!(f, "minkowski(p={p})"),
            other => f.write_str(other.name()),
        }
    }
}

impl FromStr for DistanceMethod {
    type Err = EvalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(method) = s.parse::<DistributionalMethod>() {
            return Ok(Self::Distributional(method));
        }
        s.parse::<PointwiseMetric>()
            .map(Self::Pointwise)
            .map_err(|_| EvalError::InvalidMethod {
                name: s.to_string(),
                expected: "euclidean, cosine, correlation, chebyshev, cityblock, minkowski, fid, kid, mmd",
            })
    }
}

/// How a pointwise metric is reduced to one scalar per pair of conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceAggregate {
    /// Metric between per-condition centroids.
    #[default]
    Mean,
    /// Metric between per-feature medians. An even instance count takes the
    /// lower of the two middle values.
    Median,
    /// Metric between geometric means `exp(mean(log(x + 1e-8)))`.
    /// Requires non-negative features.
    RobustMean,
    /// Mean of the full instance-pair distance matrix.
    PairMean,
}

/// Requirement on the instance count for Fréchet covariance estimates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceCheck {
    /// More instances than features, so the sample covariance can be full rank.
    #[default]
    FullRank,
    /// At least two instances; rank-deficient covariances are accepted.
    Minimal,
}

/// Polynomial kernel `k(x, y) = (γ·⟨x, y⟩ + c₀)^degree`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolynomialKernel {
    pub degree: u32,
    /// Scale γ; `None` uses `1 / F`.
    pub gamma: Option<f64>,
    pub coef0: f64,
}

impl Default for PolynomialKernel {
    fn default() -> Self {
        Self {
            degree: 3,
            gamma: None,
            coef0: 1.0,
        }
    }
}

/// Kernel used by MMD.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MmdKernel {
    /// Gaussian `exp(-‖x - y‖² / (2σ²))`; `None` picks σ by the median heuristic.
    Rbf { bandwidth: Option<f64> },
    /// Laplacian `exp(-‖x - y‖₁ / σ)`; `None` picks σ by the median heuristic.
    Laplacian { bandwidth: Option<f64> },
    Polynomial(PolynomialKernel),
}

impl Default for MmdKernel {
    fn default() -> Self {
        Self::Rbf { bandwidth: None }
    }
}

/// Options shared by every distance computation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceOptions {
    /// Reduction of pointwise metrics to condition level.
    pub aggregate: InstanceAggregate,
    /// Instance-count policy for FID.
    pub covariance: CovarianceCheck,
    /// Kernel for KID.
    pub kid: PolynomialKernel,
    /// Kernel for MMD.
    pub mmd_kernel: MmdKernel,
}
