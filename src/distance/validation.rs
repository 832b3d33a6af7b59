//! Validation helpers for the distance engine.

use super::traits::{
    CovarianceCheck, DistributionalMethod, MmdKernel, PointwiseMetric, PolynomialKernel,
};
use crate::error::{EvalError, EvalResult};

/// Validate that an instance set is 2D `[n, F]` with at least one row.
pub fn validate_instances_2d(shape: &[usize], op: &'static str) -> EvalResult<()> {
    if shape.len() != 2 {
        return Err(EvalError::shape(
            op,
            format!("requires 2D instance set [n, F], got {}-D", shape.len()),
        ));
    }
    if shape[0] == 0 || shape[1] == 0 {
        return Err(EvalError::shape(
            op,
            format!("instance set must be non-empty, got {shape:?}"),
        ));
    }
    Ok(())
}

/// Validate that a condition set is canonical `[N, I, F]`.
pub fn validate_conditions_3d(shape: &[usize], op: &'static str) -> EvalResult<()> {
    if shape.len() != 3 {
        return Err(EvalError::shape(
            op,
            format!("requires canonical condition set [N, I, F], got {shape:?}"),
        ));
    }
    if shape.contains(&0) {
        return Err(EvalError::shape(
            op,
            format!("condition set must be non-empty, got {shape:?}"),
        ));
    }
    Ok(())
}

/// Validate that two sets share the trailing feature dimension.
pub fn validate_matching_features(
    a_shape: &[usize],
    b_shape: &[usize],
    op: &'static str,
) -> EvalResult<()> {
    let fa = a_shape.last().copied().unwrap_or(0);
    let fb = b_shape.last().copied().unwrap_or(0);
    if fa != fb {
        return Err(EvalError::shape(
            op,
            format!("feature dimensions differ: {fa} vs {fb}"),
        ));
    }
    Ok(())
}

/// Minimum instances per set a distributional method needs.
pub fn required_instances(
    method: DistributionalMethod,
    features: usize,
    covariance: CovarianceCheck,
) -> usize {
    match (method, covariance) {
        (DistributionalMethod::Fid, CovarianceCheck::FullRank) => features + 1,
        (DistributionalMethod::Fid, CovarianceCheck::Minimal) => 2,
        (DistributionalMethod::Kid, _) => 2,
        (DistributionalMethod::Mmd, _) => 1,
    }
}

/// Validate that a set holds enough instances for a distributional method.
pub fn validate_instance_count(
    method: DistributionalMethod,
    count: usize,
    features: usize,
    covariance: CovarianceCheck,
) -> EvalResult<()> {
    let needed = required_instances(method, features, covariance);
    if count < needed {
        let reason = match (method, covariance) {
            (DistributionalMethod::Fid, CovarianceCheck::FullRank) => format!(
                "covariance over F={features} features needs at least {needed} instances, got {count}"
            ),
            _ => format!("needs at least {needed} instances per set, got {count}"),
        };
        return Err(EvalError::degenerate_distribution(method.name(), reason));
    }
    Ok(())
}

/// Validate kernel and metric parameters before any tensor work.
pub fn validate_pointwise_metric(metric: PointwiseMetric) -> EvalResult<()> {
    if let PointwiseMetric::Minkowski(p) = metric {
        if !(p.is_finite() && p >= 1.0) {
            return Err(EvalError::validation(
                "metric",
                format!("minkowski exponent must be finite and >= 1, got {p}"),
            ));
        }
    }
    Ok(())
}

pub fn validate_polynomial_kernel(kernel: &PolynomialKernel) -> EvalResult<()> {
    if kernel.degree == 0 {
        return Err(EvalError::validation(
            "kernel",
            "polynomial degree must be at least 1",
        ));
    }
    if let Some(gamma) = kernel.gamma {
        if !(gamma.is_finite() && gamma > 0.0) {
            return Err(EvalError::validation(
                "kernel",
                format!("polynomial gamma must be finite and positive, got {gamma}"),
            ));
        }
    }
    if !kernel.coef0.is_finite() {
        return Err(EvalError::validation("kernel", "polynomial coef0 must be finite"));
    }
    Ok(())
}

pub fn validate_mmd_kernel(kernel: &MmdKernel) -> EvalResult<()> {
    match kernel {
        MmdKernel::Rbf { bandwidth } | MmdKernel::Laplacian { bandwidth } => match bandwidth {
            Some(sigma) if !(sigma.is_finite() && *sigma > 0.0) => Err(EvalError::validation(
                "kernel",
                format!("bandwidth must be finite and positive, got {sigma}"),
            )),
            _ => Ok(()),
        },
        MmdKernel::Polynomial(poly) => validate_polynomial_kernel(poly),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_shapes() {
        assert!(validate_instances_2d(&[5, 3], "test").is_ok());
        assert!(validate_instances_2d(&[5, 3, 1], "test").is_err());
        assert!(validate_instances_2d(&[0, 3], "test").is_err());
        assert!(validate_conditions_3d(&[2, 5, 3], "test").is_ok());
        assert!(validate_conditions_3d(&[5, 3], "test").is_err());
        assert!(validate_matching_features(&[5, 3], &[2, 4, 3], "test").is_ok());
        assert!(matches!(
            validate_matching_features(&[5, 3], &[5, 4], "test"),
            Err(EvalError::Shape { .. })
        ));
    }

    #[test]
    fn test_instance_requirements() {
        use DistributionalMethod::*;
        assert_eq!(required_instances(Fid, 8, CovarianceCheck::FullRank), 9);
        assert_eq!(required_instances(Fid, 8, CovarianceCheck::Minimal), 2);
        assert_eq!(required_instances(Kid, 8, CovarianceCheck::FullRank), 2);
        assert_eq!(required_instances(Mmd, 8, CovarianceCheck::FullRank), 1);

        let err = validate_instance_count(Fid, 8, 8, CovarianceCheck::FullRank).unwrap_err();
        assert!(matches!(err, EvalError::DegenerateDistribution { method: "fid", .. }));
        assert!(validate_instance_count(Kid, 1, 8, CovarianceCheck::FullRank).is_err());
        assert!(validate_instance_count(Mmd, 1, 8, CovarianceCheck::FullRank).is_ok());
    }

    #[test]
    fn test_kernel_parameters() {
        assert!(validate_polynomial_kernel(&PolynomialKernel::default()).is_ok());
        let zero_degree = PolynomialKernel {
            degree: 0,
            ..Default::default()
        };
        assert!(validate_polynomial_kernel(&zero_degree).is_err());
        assert!(validate_mmd_kernel(&MmdKernel::Rbf { bandwidth: Some(-1.0) }).is_err());
        assert!(validate_mmd_kernel(&MmdKernel::default()).is_ok());
        assert!(validate_pointwise_metric(PointwiseMetric::Minkowski(0.5)).is_err());
    }
}
