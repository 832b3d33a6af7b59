//! Evaluation report: one variant per output mode.

use crate::distance::{ConditionMatrix, DistributionalMethod};
use serde::Serialize;
use std::collections::BTreeMap;

/// One value of a flattened report record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetricValue {
    Scalar(f64),
    List(Vec<f64>),
    Matrix(Vec<Vec<f64>>),
}

impl MetricValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[f64]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }
}

/// Result of a conditional evaluation.
///
/// `Option` fields are present iff a control was supplied (control keys) or
/// inter-class correlation is enabled (inter keys).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EvaluationReport {
    AggregatedSummary {
        #[serde(skip_serializing_if = "Option::is_none")]
        control_score: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        inter_corr: Option<f64>,
        intra_top: BTreeMap<usize, f64>,
    },
    AggregatedDetailed {
        #[serde(skip_serializing_if = "Option::is_none")]
        control_score: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        class_control_scores: Option<Vec<f64>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        inter_corr: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        inter_p: Option<f64>,
        intra_top: BTreeMap<usize, f64>,
        matrix: ConditionMatrix,
        mean_ranks: f64,
        exact_matching: f64,
    },
    DistributedSummary {
        method: DistributionalMethod,
        #[serde(skip_serializing_if = "Option::is_none")]
        control_score: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        inter_corr: Option<f64>,
        intra: Vec<f64>,
    },
    DistributedDetailed {
        method: DistributionalMethod,
        #[serde(skip_serializing_if = "Option::is_none")]
        control_score: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        class_control_scores: Option<Vec<f64>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        inter_corr: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        inter_p: Option<f64>,
        intra: Vec<f64>,
        matrix: ConditionMatrix,
        intra_top: BTreeMap<usize, f64>,
        mean_ranks: f64,
        exact_matching: f64,
    },
}

impl EvaluationReport {
    pub fn mode(&self) -> &'static str {
        match self {
            Self::AggregatedSummary { .. } => "aggregated_summary",
            Self::AggregatedDetailed { .. } => "aggregated_detailed",
            Self::DistributedSummary { .. } => "distributed_summary",
            Self::DistributedDetailed { .. } => "distributed_detailed",
        }
    }

    pub fn control_score(&self) -> Option<f64> {
        match self {
            Self::AggregatedSummary { control_score, .. }
            | Self::AggregatedDetailed { control_score, .. }
            | Self::DistributedSummary { control_score, .. }
            | Self::DistributedDetailed { control_score, .. } => *control_score,
        }
    }

    pub fn inter_corr(&self) -> Option<f64> {
        match self {
            Self::AggregatedSummary { inter_corr, .. }
            | Self::AggregatedDetailed { inter_corr, .. }
            | Self::DistributedSummary { inter_corr, .. }
            | Self::DistributedDetailed { inter_corr, .. } => *inter_corr,
        }
    }

    /// Top-k hit rate, if reported in this mode.
    pub fn intra_top(&self, k: usize) -> Option<f64> {
        match self {
            Self::AggregatedSummary { intra_top, .. }
            | Self::AggregatedDetailed { intra_top, .. }
            | Self::DistributedDetailed { intra_top, .. } => intra_top.get(&k).copied(),
            Self::DistributedSummary { .. } => None,
        }
    }

    /// Flatten into the named-key record.
    ///
    /// Keys: `control_score`, `class_control_scores`, `inter_corr`,
    /// `inter_p`, `intra_top{k}`, `intra_<method>`, `matrix`, `mean_ranks`,
    /// `exact_matching`, as available in the mode.
    pub fn to_record(&self) -> BTreeMap<String, MetricValue> {
        let mut record = BTreeMap::new();
        let mut scalar = |key: &str, v: Option<f64>| {
            if let Some(v) = v {
                record.insert(key.to_string(), MetricValue::Scalar(v));
            }
        };

        match self {
            Self::AggregatedSummary {
                control_score,
                inter_corr,
                ..
            } => {
                scalar("control_score", *control_score);
                scalar("inter_corr", *inter_corr);
            }
            Self::AggregatedDetailed {
                control_score,
                inter_corr,
                inter_p,
                mean_ranks,
                exact_matching,
                ..
            }
            | Self::DistributedDetailed {
                control_score,
                inter_corr,
                inter_p,
                mean_ranks,
                exact_matching,
                ..
            } => {
                scalar("control_score", *control_score);
                scalar("inter_corr", *inter_corr);
                scalar("inter_p", *inter_p);
                scalar("mean_ranks", Some(*mean_ranks));
                scalar("exact_matching", Some(*exact_matching));
            }
            Self::DistributedSummary {
                control_score,
                inter_corr,
                ..
            } => {
                scalar("control_score", *control_score);
                scalar("inter_corr", *inter_corr);
            }
        }

        match self {
            Self::AggregatedDetailed {
                class_control_scores,
                matrix,
                ..
            }
            | Self::DistributedDetailed {
                class_control_scores,
                matrix,
                ..
            } => {
                if let Some(scores) = class_control_scores {
                    record.insert(
                        "class_control_scores".to_string(),
                        MetricValue::List(scores.clone()),
                    );
                }
                record.insert("matrix".to_string(), MetricValue::Matrix(matrix.to_rows()));
            }
            _ => {}
        }

        match self {
            Self::AggregatedSummary { intra_top, .. }
            | Self::AggregatedDetailed { intra_top, .. }
            | Self::DistributedDetailed { intra_top, .. } => {
                for (k, v) in intra_top {
                    record.insert(format!("intra_top{k}"), MetricValue::Scalar(*v));
                }
            }
            Self::DistributedSummary { .. } => {}
        }

        match self {
            Self::DistributedSummary { method, intra, .. }
            | Self::DistributedDetailed { method, intra, .. } => {
                record.insert(
                    format!("intra_{}", method.name()),
                    MetricValue::List(intra.clone()),
                );
            }
            _ => {}
        }

        record
    }
}
