//! Configuration parsing and report serialization.

mod common;

use common::{centroids, clustered, setup, tensor};
use condeval::{
    ConditionalEvaluationAlgorithms, ControlDelta, CovarianceCheck, DistanceMethod,
    DistributionalMethod, EvalConfig, EvalError, InstanceAggregate, InterEntries, InterReference,
    MmdKernel, PointwiseMetric,
};

#[test]
fn test_empty_config_is_default() {
    let cfg: EvalConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, EvalConfig::default());
    assert_eq!(cfg.k_range, vec![1, 5, 10]);
    assert!(cfg.aggregated);
    assert!(cfg.inter.enabled);
    assert_eq!(cfg.control.delta, ControlDelta::Signed);
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "metric": {"minkowski": 4.0},
        "k_range": [1, 3],
        "aggregated": false,
        "detailed_output": true,
        "distributed_method": "mmd",
        "distance": {
            "aggregate": "pair_mean",
            "covariance": "minimal",
            "mmd_kernel": {"kind": "laplacian", "bandwidth": 2.0}
        },
        "inter": {"entries": "off_diagonal", "reference": "real"},
        "control": {"delta": "absolute", "required": true}
    }"#;
    let cfg: EvalConfig = serde_json::from_str(json).unwrap();

    assert_eq!(cfg.metric, PointwiseMetric::Minkowski(4.0));
    assert_eq!(cfg.k_range, vec![1, 3]);
    assert!(!cfg.aggregated);
    assert!(cfg.detailed_output);
    assert_eq!(cfg.distributed_method, Some(DistributionalMethod::Mmd));
    assert_eq!(cfg.distance.aggregate, InstanceAggregate::PairMean);
    assert_eq!(cfg.distance.covariance, CovarianceCheck::Minimal);
    assert_eq!(
        cfg.distance.mmd_kernel,
        MmdKernel::Laplacian {
            bandwidth: Some(2.0)
        }
    );
    assert!(cfg.inter.enabled);
    assert_eq!(cfg.inter.entries, InterEntries::OffDiagonal);
    assert_eq!(cfg.inter.reference, InterReference::Real);
    assert_eq!(cfg.control.delta, ControlDelta::Absolute);
    assert!(cfg.control.required);
}

#[test]
fn test_unknown_method_is_rejected() {
    assert!(serde_json::from_str::<EvalConfig>(r#"{"distributed_method": "emd"}"#).is_err());
    assert!(matches!(
        "emd".parse::<DistanceMethod>(),
        Err(EvalError::InvalidMethod { .. })
    ));
    assert_eq!(
        "kid".parse::<DistanceMethod>().unwrap(),
        DistanceMethod::Distributional(DistributionalMethod::Kid)
    );
}

#[test]
fn test_report_serializes_with_mode_tag() {
    let (client, device) = setup();
    let centers = centroids(3, 2, 40);
    let samples = tensor(&clustered(&centers, 2, 0.5, 41), &[3, 2, 2], &device);

    let cfg = EvalConfig::aggregated().with_k_range([1, 2]);
    let report = client.evaluate(&samples, &samples, None, &cfg).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["mode"], "aggregated_summary");
    assert_eq!(value["intra_top"]["1"], 1.0);
    assert_eq!(value["intra_top"]["2"], 1.0);
    assert!(value.get("control_score").is_none());
    assert!(value["inter_corr"].as_f64().unwrap() > 0.999);
}

#[test]
fn test_record_serializes_as_flat_map() {
    let (client, device) = setup();
    let centers = centroids(3, 2, 42);
    let samples = tensor(&clustered(&centers, 2, 0.5, 43), &[3, 2, 2], &device);

    let cfg = EvalConfig::aggregated()
        .with_k_range([1])
        .with_detailed_output(true)
        .without_inter();
    let report = client.evaluate(&samples, &samples, None, &cfg).unwrap();
    let value = serde_json::to_value(report.to_record()).unwrap();

    assert_eq!(value["intra_top1"], 1.0);
    assert_eq!(value["exact_matching"], 1.0);
    assert_eq!(value["matrix"].as_array().unwrap().len(), 3);
    assert!(value.get("inter_corr").is_none());
}
