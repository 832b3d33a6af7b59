//! Validation helpers for sample tensors.

use crate::error::{EvalError, EvalResult};
use numr::dtype::DType;

/// Validate sample dtype (must be F32 or F64).
pub fn validate_sample_dtype(dtype: DType, arg: &'static str) -> EvalResult<()> {
    match dtype {
        DType::F32 | DType::F64 => Ok(()),
        _ => Err(EvalError::validation(
            arg,
            format!("samples must be F32 or F64, got {dtype:?}"),
        )),
    }
}

/// Validate that a sample tensor has a supported rank and no empty axis.
pub fn validate_sample_rank(shape: &[usize], arg: &'static str) -> EvalResult<()> {
    if !(2..=5).contains(&shape.len()) {
        return Err(EvalError::shape(
            arg,
            format!(
                "expected rank 2 (N, F), 3 (N, I, F), 4 (N, H, W, C) or 5 (N, I, H, W, C), got rank {} {:?}",
                shape.len(),
                shape
            ),
        ));
    }
    if shape.contains(&0) {
        return Err(EvalError::shape(
            arg,
            format!("every axis must be non-empty, got {shape:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_sample_dtype() {
        assert!(validate_sample_dtype(DType::F32, "real").is_ok());
        assert!(validate_sample_dtype(DType::F64, "real").is_ok());
        assert!(validate_sample_dtype(DType::I64, "real").is_err());
    }

    #[test]
    fn test_validate_sample_rank() {
        assert!(validate_sample_rank(&[4, 3], "real").is_ok());
        assert!(validate_sample_rank(&[4, 2, 3], "real").is_ok());
        assert!(validate_sample_rank(&[4, 8, 8, 3], "real").is_ok());
        assert!(validate_sample_rank(&[4, 2, 8, 8, 3], "real").is_ok());

        assert!(matches!(
            validate_sample_rank(&[12], "real"),
            Err(EvalError::Shape { .. })
        ));
        assert!(matches!(
            validate_sample_rank(&[1, 2, 3, 4, 5, 6], "real"),
            Err(EvalError::Shape { .. })
        ));
        assert!(matches!(
            validate_sample_rank(&[4, 0, 3], "real"),
            Err(EvalError::Shape { .. })
        ));
    }
}
