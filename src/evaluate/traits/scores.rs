//! Control inputs and per-evaluator score types.

use crate::distance::ConditionMatrix;
use numr::runtime::Runtime;
use numr::tensor::Tensor;
use std::collections::BTreeMap;

/// Where the negative-control set comes from.
#[derive(Debug, Clone)]
pub enum ControlSamples<R: Runtime> {
    /// Condition `c` of the real and generated tensors. Excluded from the
    /// evaluated class set.
    Condition(usize),
    /// External control tensor(s) of any valid rank, pooled into one
    /// instance set. A missing generated control reuses the real one.
    Samples {
        real: Tensor<R>,
        generated: Option<Tensor<R>>,
    },
}

impl<R: Runtime> ControlSamples<R> {
    pub fn condition(index: usize) -> Self {
        Self::Condition(index)
    }

    pub fn samples(real: Tensor<R>) -> Self {
        Self::Samples {
            real,
            generated: None,
        }
    }

    pub fn with_generated(real: Tensor<R>, generated: Tensor<R>) -> Self {
        Self::Samples {
            real,
            generated: Some(generated),
        }
    }
}

/// Intra-class retrieval scores over an `N × N` real-vs-generated matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct IntraClassScores {
    /// `k → fraction of classes whose true match ranks within the top k`.
    pub top_k: BTreeMap<usize, f64>,
    /// 1-based rank of the true match per class.
    pub ranks: Vec<usize>,
    /// Mean of `ranks`.
    pub mean_ranks: f64,
    /// Fraction of classes whose true match ranks first.
    pub exact_matching: f64,
    /// `D[i, i]` per class.
    pub diagonal: Vec<f64>,
    pub matrix: ConditionMatrix,
}

/// Correlation of real and generated class-distance structure.
#[derive(Debug, Clone, PartialEq)]
pub struct InterClassScores {
    pub inter_corr: f64,
    pub inter_p: f64,
    /// Number of entry pairs correlated.
    pub entries: usize,
}

/// Control-relative distance deltas.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlScores {
    /// Mean of `class_control_scores`.
    pub control_score: f64,
    pub class_control_scores: Vec<f64>,
    /// Distance of each real class to the real control.
    pub real: Vec<f64>,
    /// Distance of each generated class to the generated control.
    pub generated: Vec<f64>,
}
