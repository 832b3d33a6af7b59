//! Device-to-host transfer helpers.
//!
//! These work with any numr Runtime (CPU, CUDA, WebGPU).

use crate::error::{EvalError, EvalResult};
use numr::dtype::DType;
use numr::runtime::Runtime;
use numr::tensor::Tensor;

/// Copy a float tensor to the host as `f64`, in row-major order.
pub fn to_host_f64<R: Runtime>(t: &Tensor<R>) -> EvalResult<Vec<f64>> {
    let t = t.contiguous();
    match t.dtype() {
        DType::F32 => {
            let data: Vec<f32> = t.to_vec();
            Ok(data.into_iter().map(f64::from).collect())
        }
        DType::F64 => Ok(t.to_vec()),
        dtype => Err(EvalError::validation(
            "tensor",
            format!("expected F32 or F64, got {dtype:?}"),
        )),
    }
}

/// Extract a scalar f64 from a 0-D or 1-element tensor.
pub fn extract_scalar<R: Runtime>(t: &Tensor<R>) -> EvalResult<f64> {
    if t.numel() != 1 {
        return Err(EvalError::validation(
            "tensor",
            format!("expected scalar (1 element), got {} elements", t.numel()),
        ));
    }
    Ok(to_host_f64(t)?[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use numr::runtime::cpu::{CpuDevice, CpuRuntime};

    #[test]
    fn test_to_host_f32_widening() {
        let device = CpuDevice::new();
        let t = Tensor::<CpuRuntime>::from_slice(&[1.5f32, -2.0, 0.25], &[3], &device);
        assert_eq!(to_host_f64(&t).unwrap(), vec![1.5, -2.0, 0.25]);
    }

    #[test]
    fn test_extract_scalar() {
        let device = CpuDevice::new();
        let t = Tensor::<CpuRuntime>::from_slice(&[4.0f64], &[1], &device);
        assert_eq!(extract_scalar(&t).unwrap(), 4.0);

        let t = Tensor::<CpuRuntime>::from_slice(&[1.0f64, 2.0], &[2], &device);
        assert!(extract_scalar(&t).is_err());
    }
}
