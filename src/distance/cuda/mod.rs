//! CUDA implementation of the distance engine.

mod set_distance;
