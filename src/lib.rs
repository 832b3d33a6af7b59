//! condeval - Evaluation metrics for conditional generative models
//!
//! condeval compares two collections of multi-condition samples (real vs.
//! generated) and reports how faithfully the generated samples reproduce each
//! condition, the relational structure between conditions, and the shift
//! relative to a negative-control condition. Built on numr's tensors and
//! distance kernels, it works across all backends (CPU, CUDA, WebGPU).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  evaluate   intra-class top-k · inter-class correlation  │
//! │             control deltas · report assembly             │
//! └───────────────┬──────────────────────────┬───────────────┘
//!                 │                          │
//! ┌───────────────▼──────────┐   ┌───────────▼──────────────┐
//! │  distance                │   │  stats                   │
//! │  pointwise · FID/KID/MMD │   │  Pearson · Student's t   │
//! └───────────────┬──────────┘   └──────────────────────────┘
//!                 │
//! ┌───────────────▼──────────────────────────────────────────┐
//! │  samples   canonical (N, I, F) layout                    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`samples`] - Shape normalization into `(N, I, F)`
//! - [`distance`] - Set distances: pointwise metrics, FID, KID, MMD
//! - [`stats`] - Pearson correlation and its p-value
//! - [`evaluate`] - Evaluators and the conditional evaluation orchestrator
//! - [`error`] - Error taxonomy
//!
//! # Feature Flags
//!
//! | Feature | Description | Dependencies |
//! |---------|-------------|--------------|
//! | `cuda`  | Enable CUDA GPU acceleration | CUDA 12.x, numr/cuda |
//! | `wgpu`  | Enable WebGPU cross-platform GPU | numr/wgpu |
//!
//! ## Backend Limitations
//!
//! - **WebGPU**: Only supports F32 precision (no F64)
//!
//! # Example
//!
//! ```ignore
//! use condeval::{ConditionalEvaluationAlgorithms, ControlSamples, EvalConfig};
//! use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
//! use numr::tensor::Tensor;
//!
//! let device = CpuDevice::new();
//! let client = CpuClient::new(device.clone());
//!
//! // 10 conditions, 5 instances each, 8 features
//! let real = Tensor::<CpuRuntime>::from_slice(&real_data, &[10, 5, 8], &device);
//! let generated = Tensor::<CpuRuntime>::from_slice(&gen_data, &[10, 5, 8], &device);
//!
//! let config = EvalConfig::aggregated().with_detailed_output(true);
//! let report = client.evaluate(&real, &generated, Some(&ControlSamples::condition(0)), &config)?;
//! for (key, value) in report.to_record() {
//!     println!("{key}: {value:?}");
//! }
//! ```

pub mod distance;
pub mod error;
pub mod evaluate;
pub mod samples;
pub mod stats;

// Re-export main types for convenience
pub use distance::{
    ConditionMatrix, CovarianceCheck, DistanceMethod, DistanceOptions, DistributionalMethod,
    InstanceAggregate, MmdKernel, PointwiseMetric, PolynomialKernel, SetDistance,
    SetDistanceAlgorithms,
};
pub use error::{EvalError, EvalResult};
pub use evaluate::{
    ConditionalEvaluationAlgorithms, ControlDelta, ControlOptions, ControlSamples, ControlScores,
    EvalConfig, EvaluationReport, InterClassScores, InterEntries, InterOptions, InterReference,
    IntraClassScores, MetricValue,
};
pub use samples::{SampleShape, align, canonicalize};
pub use stats::{Correlation, pearson};
