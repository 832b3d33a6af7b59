//! Evaluation configuration.

use crate::distance::{DistanceOptions, DistributionalMethod, PointwiseMetric};
use serde::{Deserialize, Serialize};

/// Which entries of the two class distance matrices enter the correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterEntries {
    /// Strict upper triangle `i < j`. Each symmetric pair counted once.
    #[default]
    UpperTriangle,
    /// Every `i != j` entry.
    OffDiagonal,
    /// Every entry, diagonal included.
    Full,
}

impl InterEntries {
    /// Number of entries selected from an `n × n` matrix.
    pub fn count(&self, n: usize) -> usize {
        match self {
            Self::UpperTriangle => n * n.saturating_sub(1) / 2,
            Self::OffDiagonal => n * n.saturating_sub(1),
            Self::Full => n * n,
        }
    }

    /// Whether entry `(i, j)` is selected.
    #[inline]
    pub fn includes(&self, i: usize, j: usize) -> bool {
        match self {
            Self::UpperTriangle => i < j,
            Self::OffDiagonal => i != j,
            Self::Full => true,
        }
    }
}

/// What the generated class structure is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterReference {
    /// Generated-vs-generated class distances.
    #[default]
    Generated,
    /// Generated-vs-real class distances.
    Real,
}

/// Inter-class correlation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterOptions {
    pub enabled: bool,
    pub entries: InterEntries,
    pub reference: InterReference,
}

impl Default for InterOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            entries: InterEntries::default(),
            reference: InterReference::default(),
        }
    }
}

/// Sign convention for per-class control deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlDelta {
    /// `d_gen - d_real`: positive when generated classes sit further from
    /// the control than the real ones.
    #[default]
    Signed,
    /// `|d_gen - d_real|`.
    Absolute,
}

impl ControlDelta {
    #[inline]
    pub fn apply(&self, d_real: f64, d_gen: f64) -> f64 {
        match self {
            Self::Signed => d_gen - d_real,
            Self::Absolute => (d_gen - d_real).abs(),
        }
    }
}

/// Control metric settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlOptions {
    pub delta: ControlDelta,
    /// Fail with `MissingControl` when no control is supplied.
    pub required: bool,
}

/// Immutable configuration of one evaluation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Pointwise metric for aggregated mode and inter-class structure.
    pub metric: PointwiseMetric,
    pub distance: DistanceOptions,
    /// Retrieval cut-offs reported as `intra_top{k}`.
    pub k_range: Vec<usize>,
    /// Aggregated mode (`true`) or distributed mode (`false`).
    pub aggregated: bool,
    /// Detailed (`true`) or summary (`false`) report.
    pub detailed_output: bool,
    /// Distributional method for distributed mode.
    pub distributed_method: Option<DistributionalMethod>,
    pub inter: InterOptions,
    pub control: ControlOptions,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            metric: PointwiseMetric::default(),
            distance: DistanceOptions::default(),
            k_range: vec![1, 5, 10],
            aggregated: true,
            detailed_output: false,
            distributed_method: None,
            inter: InterOptions::default(),
            control: ControlOptions::default(),
        }
    }
}

impl EvalConfig {
    /// Aggregated-mode defaults.
    pub fn aggregated() -> Self {
        Self::default()
    }

    /// Distributed mode scored with `method`.
    pub fn distributed(method: DistributionalMethod) -> Self {
        Self {
            aggregated: false,
            distributed_method: Some(method),
            ..Self::default()
        }
    }

    pub fn with_metric(mut self, metric: PointwiseMetric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_distance(mut self, distance: DistanceOptions) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_k_range(mut self, k_range: impl Into<Vec<usize>>) -> Self {
        self.k_range = k_range.into();
        self
    }

    pub fn with_detailed_output(mut self, detailed: bool) -> Self {
        self.detailed_output = detailed;
        self
    }

    pub fn with_inter(mut self, inter: InterOptions) -> Self {
        self.inter = inter;
        self
    }

    /// Disable inter-class correlation (allows a single class).
    pub fn without_inter(mut self) -> Self {
        self.inter.enabled = false;
        self
    }

    pub fn with_control(mut self, control: ControlOptions) -> Self {
        self.control = control;
        self
    }

    pub fn with_control_delta(mut self, delta: ControlDelta) -> Self {
        self.control.delta = delta;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = EvalConfig::default();
        assert_eq!(cfg.k_range, vec![1, 5, 10]);
        assert!(cfg.aggregated);
        assert!(!cfg.detailed_output);
        assert!(cfg.inter.enabled);
        assert_eq!(cfg.inter.entries, InterEntries::UpperTriangle);
        assert_eq!(cfg.control.delta, ControlDelta::Signed);

        let dist = EvalConfig::distributed(DistributionalMethod::Kid);
        assert!(!dist.aggregated);
        assert_eq!(dist.distributed_method, Some(DistributionalMethod::Kid));
    }

    #[test]
    fn test_entry_selection() {
        assert_eq!(InterEntries::UpperTriangle.count(4), 6);
        assert_eq!(InterEntries::OffDiagonal.count(4), 12);
        assert_eq!(InterEntries::Full.count(4), 16);
        assert_eq!(InterEntries::UpperTriangle.count(1), 0);
        assert!(InterEntries::UpperTriangle.includes(0, 1));
        assert!(!InterEntries::UpperTriangle.includes(1, 0));
        assert!(InterEntries::OffDiagonal.includes(1, 0));
        assert!(!InterEntries::OffDiagonal.includes(2, 2));
    }

    #[test]
    fn test_control_delta() {
        assert_eq!(ControlDelta::Signed.apply(3.0, 1.0), -2.0);
        assert_eq!(ControlDelta::Absolute.apply(3.0, 1.0), 2.0);
    }
}
