//! Evaluation traits, configuration and result types.

pub mod config;
pub mod evaluate;
pub mod report;
pub mod scores;

pub use config::{
    ControlDelta, ControlOptions, EvalConfig, InterEntries, InterOptions, InterReference,
};
pub use evaluate::ConditionalEvaluationAlgorithms;
pub use report::{EvaluationReport, MetricValue};
pub use scores::{ControlSamples, ControlScores, InterClassScores, IntraClassScores};
