//! WebGPU implementation of the distance engine.
//!
//! WebGPU supports F32 only; F64 inputs are rejected by the backend.

mod set_distance;
