//! End-to-end evaluation scenarios on the CPU backend.

mod common;

use common::{assert_close, centroids, clustered, setup, tensor, tensor_f32};
use condeval::{
    ConditionalEvaluationAlgorithms, ControlDelta, ControlSamples, DistributionalMethod,
    EvalConfig, EvalError, EvaluationReport, MetricValue,
};

// ---------------------------------------------------------------------------
// Scenario A: identical real and generated samples
// ---------------------------------------------------------------------------

#[test]
fn test_identical_samples_score_perfectly() {
    let (client, device) = setup();
    let centers = centroids(10, 8, 1);
    let data = clustered(&centers, 5, 0.5, 2);
    let samples = tensor(&data, &[10, 5, 8], &device);
    let control = tensor(&clustered(&centroids(1, 8, 3), 12, 0.5, 4), &[12, 8], &device);

    let cfg = EvalConfig::aggregated().with_detailed_output(true);
    let report = client
        .evaluate(&samples, &samples, Some(&ControlSamples::samples(control)), &cfg)
        .unwrap();

    assert_eq!(report.mode(), "aggregated_detailed");
    assert_eq!(report.intra_top(1), Some(1.0));
    assert_eq!(report.intra_top(5), Some(1.0));
    assert_eq!(report.intra_top(10), Some(1.0));
    assert_close(report.inter_corr().unwrap(), 1.0, 1e-9, "inter_corr");
    assert_close(report.control_score().unwrap(), 0.0, 1e-12, "control_score");

    let record = report.to_record();
    assert_eq!(record["exact_matching"].as_scalar(), Some(1.0));
    assert_eq!(record["mean_ranks"].as_scalar(), Some(1.0));
    let per_class = record["class_control_scores"].as_list().unwrap();
    assert_eq!(per_class.len(), 10);
    assert!(per_class.iter().all(|d| d.abs() < 1e-12));
    match &record["matrix"] {
        MetricValue::Matrix(rows) => {
            assert_eq!(rows.len(), 10);
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.len(), 10);
                assert_close(row[i], 0.0, 1e-9, "diagonal");
            }
        }
        other => panic!("expected matrix, got {other:?}"),
    }
}

#[test]
fn test_identical_samples_with_condition_control() {
    let (client, device) = setup();
    let data = clustered(&centroids(10, 8, 5), 5, 0.5, 6);
    let samples = tensor(&data, &[10, 5, 8], &device);

    // One condition becomes the control, leaving nine classes.
    let cfg = EvalConfig::aggregated()
        .with_k_range([1, 5, 9])
        .with_detailed_output(true);
    let report = client
        .evaluate(&samples, &samples, Some(&ControlSamples::condition(3)), &cfg)
        .unwrap();

    assert_eq!(report.intra_top(1), Some(1.0));
    assert_close(report.control_score().unwrap(), 0.0, 1e-12, "control_score");
    let record = report.to_record();
    assert_eq!(record["class_control_scores"].as_list().unwrap().len(), 9);
}

// ---------------------------------------------------------------------------
// Scenario B: k larger than the class count
// ---------------------------------------------------------------------------

#[test]
fn test_k_range_exceeding_class_count_is_rejected() {
    let (client, device) = setup();
    let data = clustered(&centroids(5, 4, 7), 3, 0.5, 8);
    let samples = tensor(&data, &[5, 3, 4], &device);

    let cfg = EvalConfig::aggregated().with_k_range([1, 5, 10]);
    let err = client.evaluate(&samples, &samples, None, &cfg).unwrap_err();
    assert!(
        matches!(err, EvalError::Validation { arg: "k_range", .. }),
        "got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Scenario C: mismatched feature spaces
// ---------------------------------------------------------------------------

#[test]
fn test_mismatched_feature_count_is_rejected() {
    let (client, device) = setup();
    let real = tensor(&vec![0.5; 100 * 10], &[100, 10], &device);
    let generated = tensor(&vec![0.5; 100 * 5 * 4], &[100, 5, 4], &device);

    let cfg = EvalConfig::aggregated();
    let err = client.evaluate(&real, &generated, None, &cfg).unwrap_err();
    assert!(matches!(err, EvalError::Shape { .. }), "got {err:?}");
}

#[test]
fn test_mismatched_condition_count_is_rejected() {
    let (client, device) = setup();
    let real = tensor(&vec![0.5; 6 * 2 * 3], &[6, 2, 3], &device);
    let generated = tensor(&vec![0.5; 5 * 2 * 3], &[5, 2, 3], &device);

    let err = client
        .evaluate(&real, &generated, None, &EvalConfig::aggregated())
        .unwrap_err();
    assert!(matches!(err, EvalError::Shape { .. }), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Scenario D: a single condition cannot carry inter-class structure
// ---------------------------------------------------------------------------

#[test]
fn test_single_condition_inter_is_degenerate() {
    let (client, device) = setup();
    let samples = tensor(&clustered(&centroids(1, 4, 9), 6, 0.5, 10), &[1, 6, 4], &device);

    let cfg = EvalConfig::aggregated().with_k_range([1]);
    let err = client.evaluate(&samples, &samples, None, &cfg).unwrap_err();
    assert!(matches!(err, EvalError::DegenerateInput { .. }), "got {err:?}");

    // Without inter-class structure a single condition evaluates fine.
    let report = client
        .evaluate(&samples, &samples, None, &cfg.without_inter())
        .unwrap();
    assert_eq!(report.intra_top(1), Some(1.0));
    assert_eq!(report.inter_corr(), None);
}

// ---------------------------------------------------------------------------
// Input layouts
// ---------------------------------------------------------------------------

#[test]
fn test_image_layouts_flatten_into_features() {
    let (client, device) = setup();
    // (N, I, H, W, C) = (4, 3, 2, 2, 3) real vs (N, H, W, C) = (4, 2, 2, 3) generated.
    let centers = centroids(4, 12, 11);
    let real = tensor(&clustered(&centers, 3, 0.5, 12), &[4, 3, 2, 2, 3], &device);
    let generated = tensor(&clustered(&centers, 1, 0.5, 13), &[4, 2, 2, 3], &device);

    let cfg = EvalConfig::aggregated().with_k_range([1, 2]);
    let report = client.evaluate(&real, &generated, None, &cfg).unwrap();
    assert_eq!(report.intra_top(1), Some(1.0));
    assert!(report.inter_corr().unwrap() > 0.99);
}

#[test]
fn test_f32_samples_are_supported() {
    let (client, device) = setup();
    let centers = centroids(5, 6, 14);
    let real = tensor_f32(&clustered(&centers, 4, 0.5, 15), &[5, 4, 6], &device);
    let generated = tensor_f32(&clustered(&centers, 4, 0.5, 16), &[5, 4, 6], &device);

    let cfg = EvalConfig::aggregated().with_k_range([1, 3]);
    let report = client.evaluate(&real, &generated, None, &cfg).unwrap();
    assert_eq!(report.intra_top(1), Some(1.0));
    assert!(report.inter_corr().unwrap() > 0.99);
}

#[test]
fn test_rank_one_input_is_rejected() {
    let (client, device) = setup();
    let flat = tensor(&[1.0, 2.0, 3.0], &[3], &device);
    let err = client
        .evaluate(&flat, &flat, None, &EvalConfig::aggregated())
        .unwrap_err();
    assert!(matches!(err, EvalError::Shape { .. }), "got {err:?}");
}

// ---------------------------------------------------------------------------
// Distributed mode
// ---------------------------------------------------------------------------

#[test]
fn test_distributed_fid_separates_classes() {
    let (client, device) = setup();
    let centers = centroids(4, 3, 17);
    let real = tensor(&clustered(&centers, 8, 0.5, 18), &[4, 8, 3], &device);
    let generated = tensor(&clustered(&centers, 6, 0.5, 19), &[4, 6, 3], &device);

    let cfg = EvalConfig::distributed(DistributionalMethod::Fid)
        .with_k_range([1, 2])
        .with_detailed_output(true);
    let report = client.evaluate(&real, &generated, None, &cfg).unwrap();

    assert_eq!(report.mode(), "distributed_detailed");
    assert_eq!(report.intra_top(1), Some(1.0));
    let record = report.to_record();
    let diagonal = record["intra_fid"].as_list().unwrap();
    assert_eq!(diagonal.len(), 4);
    assert!(diagonal.iter().all(|&d| (0.0..5.0).contains(&d)), "{diagonal:?}");
}

#[test]
fn test_distributed_kid_summary_with_control() {
    let (client, device) = setup();
    let centers = centroids(5, 3, 20);
    let real = tensor(&clustered(&centers, 6, 0.5, 21), &[5, 6, 3], &device);
    let generated = tensor(&clustered(&centers, 6, 0.5, 22), &[5, 6, 3], &device);

    let cfg = EvalConfig::distributed(DistributionalMethod::Kid)
        .with_k_range([1])
        .with_control_delta(ControlDelta::Absolute);
    let report = client
        .evaluate(&real, &generated, Some(&ControlSamples::condition(0)), &cfg)
        .unwrap();

    let EvaluationReport::DistributedSummary {
        method,
        control_score,
        intra,
        ..
    } = &report
    else {
        panic!("expected distributed summary, got {}", report.mode());
    };
    assert_eq!(*method, DistributionalMethod::Kid);
    assert_eq!(intra.len(), 4);
    assert!(intra.iter().all(|&d| d >= 0.0));
    assert!(control_score.unwrap() >= 0.0);

    let keys: Vec<String> = report.to_record().into_keys().collect();
    assert_eq!(keys, vec!["control_score", "inter_corr", "intra_kid"]);
}

#[test]
fn test_distributed_mode_requires_method() {
    let (client, device) = setup();
    let samples = tensor(&clustered(&centroids(3, 2, 23), 4, 0.5, 24), &[3, 4, 2], &device);

    let mut cfg = EvalConfig::aggregated().with_k_range([1]);
    cfg.aggregated = false;
    let err = client.evaluate(&samples, &samples, None, &cfg).unwrap_err();
    assert!(
        matches!(err, EvalError::Validation { arg: "distributed_method", .. }),
        "got {err:?}"
    );
}

#[test]
fn test_fid_with_single_instance_is_degenerate() {
    let (client, device) = setup();
    let samples = tensor(&clustered(&centroids(3, 2, 25), 1, 0.5, 26), &[3, 2], &device);

    let cfg = EvalConfig::distributed(DistributionalMethod::Fid).with_k_range([1]);
    let err = client.evaluate(&samples, &samples, None, &cfg).unwrap_err();
    assert!(
        matches!(err, EvalError::DegenerateDistribution { .. }),
        "got {err:?}"
    );
}

// ---------------------------------------------------------------------------
// Control metrics
// ---------------------------------------------------------------------------

#[test]
fn test_absolute_control_deltas_are_non_negative() {
    let (client, device) = setup();
    let centers = centroids(6, 4, 27);
    let real = tensor(&clustered(&centers, 5, 0.5, 28), &[6, 5, 4], &device);
    let generated = tensor(&clustered(&centers, 5, 3.0, 29), &[6, 5, 4], &device);
    let control = tensor(&clustered(&centroids(1, 4, 30), 10, 0.5, 31), &[10, 4], &device);

    let cfg = EvalConfig::aggregated()
        .with_k_range([1])
        .with_detailed_output(true)
        .with_control_delta(ControlDelta::Absolute);
    let report = client
        .evaluate(&real, &generated, Some(&ControlSamples::samples(control)), &cfg)
        .unwrap();

    let record = report.to_record();
    let per_class = record["class_control_scores"].as_list().unwrap();
    assert!(per_class.iter().all(|&d| d >= 0.0));
    let mean = per_class.iter().sum::<f64>() / per_class.len() as f64;
    assert_close(report.control_score().unwrap(), mean, 1e-12, "control_score");
}

#[test]
fn test_required_control_missing() {
    let (client, device) = setup();
    let samples = tensor(&clustered(&centroids(3, 2, 32), 2, 0.5, 33), &[3, 2, 2], &device);

    let mut cfg = EvalConfig::aggregated().with_k_range([1]);
    cfg.control.required = true;
    let err = client.evaluate(&samples, &samples, None, &cfg).unwrap_err();
    assert!(matches!(err, EvalError::MissingControl), "got {err:?}");
}
