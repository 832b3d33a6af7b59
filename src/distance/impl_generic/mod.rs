//! Generic distance engine implementations.
//!
//! All functions work with any numr backend (CPU, CUDA, WebGPU). Gram and
//! distance matrices stay on device; only scalar reductions and the final
//! condition matrix are copied to the host.

mod condition;
mod frechet;
mod kernel;
mod pointwise;

use numr::algorithm::linalg::LinearAlgebraAlgorithms;
use numr::ops::{
    DistanceOps, IndexingOps, ReduceOps, ScalarOps, ShapeOps, SortingOps, TensorOps, UnaryOps,
};
use numr::runtime::{Runtime, RuntimeClient};

pub use condition::{
    condition_distances_impl, distance_impl, set_distance_impl, shared_kernel_options,
};
pub use frechet::{
    GaussianStats, frechet_distance_impl, frechet_from_stats_impl, gaussian_stats_impl,
    psd_sqrt_impl,
};
pub use kernel::{
    kernel_inception_distance_impl, maximum_mean_discrepancy_impl, median_bandwidth_impl,
    resolve_mmd_kernel_impl,
};
pub use pointwise::{
    aggregate_instances_impl, condition_pointwise_impl, instance_distances_impl,
    validate_robust_mean_input_impl,
};

/// Trait bounds needed by the distance engine.
pub trait DistanceClient<R: Runtime>:
    LinearAlgebraAlgorithms<R>
    + DistanceOps<R>
    + IndexingOps<R>
    + ReduceOps<R>
    + ScalarOps<R>
    + ShapeOps<R>
    + SortingOps<R>
    + TensorOps<R>
    + UnaryOps<R>
    + RuntimeClient<R>
{
}

impl<R, C> DistanceClient<R> for C
where
    R: Runtime,
    C: LinearAlgebraAlgorithms<R>
        + DistanceOps<R>
        + IndexingOps<R>
        + ReduceOps<R>
        + ScalarOps<R>
        + ShapeOps<R>
        + SortingOps<R>
        + TensorOps<R>
        + UnaryOps<R>
        + RuntimeClient<R>,
{
}
