//! Shared helpers for the condeval integration tests.
//!
//! Deterministic sample generators built on a small LCG so every test run
//! sees the same data.

#![allow(dead_code)]

use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};
use numr::tensor::Tensor;

/// Minimal linear congruential generator for reproducible test data.
pub struct Lcg {
    state: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    /// Uniform f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform f64 in [lo, hi).
    pub fn next_f64_range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }
}

pub fn setup() -> (CpuClient, CpuDevice) {
    let device = CpuDevice::new();
    let client = CpuClient::new(device.clone());
    (client, device)
}

/// `n` class centroids in `[-100, 100)^f`.
pub fn centroids(n: usize, f: usize, seed: u64) -> Vec<Vec<f64>> {
    let mut rng = Lcg::new(seed);
    (0..n)
        .map(|_| (0..f).map(|_| rng.next_f64_range(-100.0, 100.0)).collect())
        .collect()
}

/// Row-major `(N, I, F)` samples: `inst` draws per centroid with uniform
/// jitter of half-width `jitter`.
pub fn clustered(centers: &[Vec<f64>], inst: usize, jitter: f64, seed: u64) -> Vec<f64> {
    let mut rng = Lcg::new(seed);
    let mut out = Vec::new();
    for center in centers {
        for _ in 0..inst {
            for &x in center {
                out.push(x + rng.next_f64_range(-jitter, jitter));
            }
        }
    }
    out
}

pub fn tensor(data: &[f64], shape: &[usize], device: &CpuDevice) -> Tensor<CpuRuntime> {
    Tensor::<CpuRuntime>::from_slice(data, shape, device)
}

pub fn tensor_f32(data: &[f64], shape: &[usize], device: &CpuDevice) -> Tensor<CpuRuntime> {
    let data: Vec<f32> = data.iter().map(|&x| x as f32).collect();
    Tensor::<CpuRuntime>::from_slice(&data, shape, device)
}

pub fn assert_close(actual: f64, expected: f64, tol: f64, context: &str) {
    assert!(
        (actual - expected).abs() <= tol,
        "{context}: expected {expected}, got {actual} (tol {tol})"
    );
}
