//! Reshaping sample tensors into the canonical `(N, I, F)` layout.

use super::validation::{validate_sample_dtype, validate_sample_rank};
use crate::error::{EvalError, EvalResult};
use numr::ops::IndexingOps;
use numr::runtime::{Runtime, RuntimeClient};
use numr::tensor::Tensor;

/// Extents of a canonical `(N, I, F)` sample tensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleShape {
    /// Number of conditions (N).
    pub conditions: usize,
    /// Instances per condition (I).
    pub instances: usize,
    /// Flattened feature dimension (F).
    pub features: usize,
}

impl SampleShape {
    /// Read the extents of a tensor already in canonical layout.
    pub fn of<R: Runtime>(samples: &Tensor<R>) -> EvalResult<Self> {
        match samples.shape() {
            &[conditions, instances, features] => Ok(Self {
                conditions,
                instances,
                features,
            }),
            other => Err(EvalError::shape(
                "samples",
                format!("expected canonical (N, I, F), got {other:?}"),
            )),
        }
    }

    /// Canonical extents implied by a raw input shape, without touching data.
    pub fn from_raw(shape: &[usize], arg: &'static str) -> EvalResult<Self> {
        validate_sample_rank(shape, arg)?;
        let (conditions, instances, features) = match *shape {
            [n, f] => (n, 1, f),
            [n, i, f] => (n, i, f),
            [n, h, w, c] => (n, 1, h * w * c),
            [n, i, h, w, c] => (n, i, h * w * c),
            _ => {
                return Err(EvalError::shape(
                    arg,
                    format!("unsupported rank {}", shape.len()),
                ));
            }
        };
        Ok(Self {
            conditions,
            instances,
            features,
        })
    }

    pub fn dims(&self) -> [usize; 3] {
        [self.conditions, self.instances, self.features]
    }
}

/// Reshape a rank 2-5 sample tensor into canonical `(N, I, F)`.
///
/// Rank-2 and rank-4 inputs get an implicit `I = 1`; image axes `(H, W, C)`
/// are flattened row-major into `F`. The input is left untouched.
pub fn canonicalize<R: Runtime>(samples: &Tensor<R>, arg: &'static str) -> EvalResult<Tensor<R>> {
    validate_sample_dtype(samples.dtype(), arg)?;
    let shape = SampleShape::from_raw(samples.shape(), arg)?;
    Ok(samples.contiguous().reshape(&shape.dims())?)
}

/// Canonicalize a real/generated pair and check that they describe the same
/// conditions over the same feature space. Instance counts may differ.
pub fn align<R: Runtime>(
    real: &Tensor<R>,
    generated: &Tensor<R>,
) -> EvalResult<(Tensor<R>, Tensor<R>)> {
    let real = canonicalize(real, "real")?;
    let generated = canonicalize(generated, "generated")?;

    let rs = SampleShape::of(&real)?;
    let gs = SampleShape::of(&generated)?;

    if rs.conditions != gs.conditions {
        return Err(EvalError::shape(
            "align",
            format!(
                "real has N={} conditions, generated has N={}",
                rs.conditions, gs.conditions
            ),
        ));
    }
    if rs.features != gs.features {
        return Err(EvalError::shape(
            "align",
            format!(
                "real has F={} features, generated has F={}",
                rs.features, gs.features
            ),
        ));
    }
    if real.dtype() != generated.dtype() {
        return Err(EvalError::validation(
            "generated",
            format!(
                "dtype {:?} does not match real dtype {:?}",
                generated.dtype(),
                real.dtype()
            ),
        ));
    }

    Ok((real, generated))
}

/// Canonicalize and merge all conditions and instances into one `(I_total, F)`
/// instance set. Used for control samples, which form a single condition.
pub fn pool<R: Runtime>(samples: &Tensor<R>, arg: &'static str) -> EvalResult<Tensor<R>> {
    let canonical = canonicalize(samples, arg)?;
    let shape = SampleShape::of(&canonical)?;
    Ok(canonical.reshape(&[shape.conditions * shape.instances, shape.features])?)
}

/// Keep only the listed conditions of a canonical tensor, in the given order.
pub fn select_conditions<R, C>(
    client: &C,
    samples: &Tensor<R>,
    conditions: &[usize],
) -> EvalResult<Tensor<R>>
where
    R: Runtime,
    C: IndexingOps<R> + RuntimeClient<R>,
{
    let shape = SampleShape::of(samples)?;
    if let Some(&bad) = conditions.iter().find(|&&c| c >= shape.conditions) {
        return Err(EvalError::validation(
            "conditions",
            format!("condition {bad} out of range for N={}", shape.conditions),
        ));
    }
    let indices: Vec<i64> = conditions.iter().map(|&c| c as i64).collect();
    let index = Tensor::<R>::from_slice(&indices, &[indices.len()], client.device());
    Ok(client.index_select(samples, 0, &index)?.contiguous())
}

#[cfg(test)]
mod tests {
    use super::*;
    use numr::runtime::cpu::{CpuClient, CpuDevice, CpuRuntime};

    fn setup() -> (CpuClient, CpuDevice) {
        let device = CpuDevice::new();
        let client = CpuClient::new(device.clone());
        (client, device)
    }

    fn iota(len: usize) -> Vec<f64> {
        (0..len).map(|v| v as f64).collect()
    }

    #[test]
    fn test_rank5_flattens_image_axes() {
        let (_client, device) = setup();
        let data = iota(2 * 3 * 4 * 5 * 3);
        let t = Tensor::<CpuRuntime>::from_slice(&data, &[2, 3, 4, 5, 3], &device);

        let c = canonicalize(&t, "real").unwrap();
        assert_eq!(c.shape(), &[2, 3, 60]);

        // Pixel (n=1, i=2, h=3, w=1, c=2) lands at feature (3 * 5 + 1) * 3 + 2.
        let flat: Vec<f64> = c.to_vec();
        let src = (((1 * 3 + 2) * 4 + 3) * 5 + 1) * 3 + 2;
        let dst = (1 * 3 + 2) * 60 + (3 * 5 + 1) * 3 + 2;
        assert_eq!(flat[dst], data[src]);
    }

    #[test]
    fn test_rank4_and_rank2_insert_single_instance() {
        let (_client, device) = setup();

        let img = Tensor::<CpuRuntime>::from_slice(&iota(4 * 2 * 2 * 3), &[4, 2, 2, 3], &device);
        assert_eq!(canonicalize(&img, "real").unwrap().shape(), &[4, 1, 12]);

        let flat = Tensor::<CpuRuntime>::from_slice(&iota(100 * 10), &[100, 10], &device);
        assert_eq!(canonicalize(&flat, "real").unwrap().shape(), &[100, 1, 10]);
    }

    #[test]
    fn test_flatten_unflatten_preserves_values() {
        let (_client, device) = setup();
        let data: Vec<f64> = (0..3 * 2 * 4 * 4 * 2).map(|v| (v as f64).sin()).collect();
        let t = Tensor::<CpuRuntime>::from_slice(&data, &[3, 2, 4, 4, 2], &device);

        let c = canonicalize(&t, "real").unwrap();
        let back = c.reshape(&[3, 2, 4, 4, 2]).unwrap();
        let restored: Vec<f64> = back.contiguous().to_vec();
        assert_eq!(restored, data);
    }

    #[test]
    fn test_invalid_rank() {
        let (_client, device) = setup();
        let t = Tensor::<CpuRuntime>::from_slice(&iota(6), &[6], &device);
        assert!(matches!(
            canonicalize(&t, "real"),
            Err(EvalError::Shape { .. })
        ));
    }

    #[test]
    fn test_align_rejects_feature_mismatch() {
        let (_client, device) = setup();
        let real = Tensor::<CpuRuntime>::from_slice(&iota(100 * 10), &[100, 10], &device);
        let generated =
            Tensor::<CpuRuntime>::from_slice(&iota(100 * 10 * 10), &[100, 10, 10], &device);
        // Generated implies F=10 with I=10; real implies F=10 with I=1: aligned.
        assert!(align(&real, &generated).is_ok());

        let generated =
            Tensor::<CpuRuntime>::from_slice(&iota(100 * 5 * 4), &[100, 5, 4], &device);
        assert!(matches!(
            align(&real, &generated),
            Err(EvalError::Shape { .. })
        ));
    }

    #[test]
    fn test_align_rejects_condition_mismatch() {
        let (_client, device) = setup();
        let real = Tensor::<CpuRuntime>::from_slice(&iota(5 * 3), &[5, 3], &device);
        let generated = Tensor::<CpuRuntime>::from_slice(&iota(4 * 3), &[4, 3], &device);
        assert!(matches!(
            align(&real, &generated),
            Err(EvalError::Shape { .. })
        ));
    }

    #[test]
    fn test_pool_merges_conditions() {
        let (_client, device) = setup();
        let t = Tensor::<CpuRuntime>::from_slice(&iota(2 * 3 * 4), &[2, 3, 4], &device);
        let pooled = pool(&t, "control").unwrap();
        assert_eq!(pooled.shape(), &[6, 4]);
    }

    #[test]
    fn test_select_conditions() {
        let (client, device) = setup();
        let t = Tensor::<CpuRuntime>::from_slice(&iota(3 * 2 * 2), &[3, 2, 2], &device);

        let kept = select_conditions(&client, &t, &[0, 2]).unwrap();
        assert_eq!(kept.shape(), &[2, 2, 2]);
        let values: Vec<f64> = kept.to_vec();
        assert_eq!(values, vec![0.0, 1.0, 2.0, 3.0, 8.0, 9.0, 10.0, 11.0]);

        assert!(select_conditions(&client, &t, &[3]).is_err());
    }
}
