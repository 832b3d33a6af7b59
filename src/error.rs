//! Error types for conditional evaluation.
//!
//! Every failure is reported as one named variant. Undefined statistics are
//! never replaced by NaN or zero; they surface here instead.

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;

/// Errors that can occur while evaluating generated samples.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// Invalid tensor rank, empty extent, or mismatched condition/feature counts.
    #[error("shape error in {context}: {reason}")]
    Shape {
        context: &'static str,
        reason: String,
    },

    /// Unrecognized distance or distributional method identifier.
    #[error("unknown method '{name}', expected one of: {expected}")]
    InvalidMethod { name: String, expected: &'static str },

    /// Too few instances for a stable distributional estimate.
    #[error("degenerate distribution for {method}: {reason}")]
    DegenerateDistribution {
        method: &'static str,
        reason: String,
    },

    /// Too few conditions (or constant inputs) for the requested statistic.
    #[error("degenerate input in {context}: {reason}")]
    DegenerateInput {
        context: &'static str,
        reason: String,
    },

    /// A control-relative metric was requested without a control set.
    #[error("control metrics requested but no control set was supplied")]
    MissingControl,

    /// A precondition of the evaluation was violated.
    #[error("invalid {arg}: {reason}")]
    Validation { arg: &'static str, reason: String },

    /// A distance or statistic came out NaN or infinite.
    #[error("non-finite value in {context}")]
    NonFinite { context: &'static str },

    /// Error from the underlying numr operation.
    #[error("numr backend error: {0}")]
    Backend(#[from] numr::error::Error),
}

impl EvalError {
    pub(crate) fn shape(context: &'static str, reason: impl Into<String>) -> Self {
        Self::Shape {
            context,
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            arg,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate_input(context: &'static str, reason: impl Into<String>) -> Self {
        Self::DegenerateInput {
            context,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate_distribution(method: &'static str, reason: impl Into<String>) -> Self {
        Self::DegenerateDistribution {
            method,
            reason: reason.into(),
        }
    }
}
