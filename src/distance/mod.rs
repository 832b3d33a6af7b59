//! Distance engine: comparing sample sets.
//!
//! Two families of methods share one entry point:
//!
//! - **Pointwise** metrics (euclidean, cosine, correlation, chebyshev,
//!   cityblock, minkowski) compare instances and are lifted to condition
//!   level through an [`InstanceAggregate`].
//! - **Distributional** estimators (FID, KID, MMD) treat each set as an
//!   empirical distribution and return a single non-negative scalar.
//!
//! # Runtime-Generic Architecture
//!
//! ```text
//! distance/
//! ├── mod.rs                # Exports only
//! ├── validation.rs         # Shape, instance-count and kernel checks
//! ├── traits/               # Method types and the SetDistanceAlgorithms trait
//! ├── impl_generic/         # Generic implementations (written once)
//! │   ├── pointwise.rs
//! │   ├── frechet.rs
//! │   ├── kernel.rs
//! │   └── condition.rs
//! ├── cpu/                  # CPU trait impl (pure delegation)
//! ├── cuda/                 # CUDA trait impl (pure delegation)
//! └── wgpu/                 # WebGPU trait impl (pure delegation)
//! ```

mod cpu;
#[cfg(feature = "cuda")]
mod cuda;
#[cfg(feature = "wgpu")]
mod wgpu;

pub mod impl_generic;
pub mod traits;
pub mod validation;

pub use impl_generic::DistanceClient;
pub use traits::{
    ConditionMatrix, CovarianceCheck, DistanceMethod, DistanceOptions, DistributionalMethod,
    InstanceAggregate, MmdKernel, PointwiseMetric, PolynomialKernel, SetDistance,
    SetDistanceAlgorithms,
};
pub use validation::required_instances;
