//! Distance engine traits and method types.

pub mod matrix;
pub mod method;
pub mod set_distance;

pub use matrix::ConditionMatrix;
pub use method::{
    CovarianceCheck, DistanceMethod, DistanceOptions, DistributionalMethod, InstanceAggregate,
    MmdKernel, PointwiseMetric, PolynomialKernel,
};
pub use set_distance::{SetDistance, SetDistanceAlgorithms};
