//! WebGPU implementation of conditional evaluation.

mod evaluate;
