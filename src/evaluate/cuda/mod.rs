//! CUDA implementation of conditional evaluation.

mod evaluate;
