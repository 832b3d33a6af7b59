//! Conditional evaluation: intra-class retrieval, inter-class structure
//! correlation, control-relative deltas and the orchestrator tying them
//! together.
//!
//! # Output modes
//!
//! | `aggregated` | `detailed_output` | Report variant |
//! |---|---|---|
//! | `true` | `false` | `AggregatedSummary` |
//! | `true` | `true` | `AggregatedDetailed` |
//! | `false` | `false` | `DistributedSummary` |
//! | `false` | `true` | `DistributedDetailed` |
//!
//! Aggregated mode scores intra-class and control metrics with the pointwise
//! `metric`; distributed mode uses `distributed_method`. Inter-class
//! correlation always uses the pointwise metric.

mod cpu;
#[cfg(feature = "cuda")]
mod cuda;
#[cfg(feature = "wgpu")]
mod wgpu;

pub mod impl_generic;
pub mod traits;
pub mod validation;

pub use traits::{
    ConditionalEvaluationAlgorithms, ControlDelta, ControlOptions, ControlSamples, ControlScores,
    EvalConfig, EvaluationReport, InterClassScores, InterEntries, InterOptions, InterReference,
    IntraClassScores, MetricValue,
};
