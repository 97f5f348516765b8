//! Validating entry points over the unchecked kernels.
//!
//! The kernels in [`crate::linalg::kron`] trust their callers. The functions
//! here compare every slice with the shape it is declared to hold and return
//! a [`KronlyError::BufferError`](crate::KronlyError::BufferError) instead of
//! panicking halfway through a write. Shapes whose element count does not
//! fit in `usize` are refused with a
//! [`KronlyError::ValidationError`](crate::KronlyError::ValidationError).

use tracing::debug;

use crate::{
    error::{buffer_error, validation_error, KronlyError, Result},
    layout::{checked_kron_eye_shape, checked_kron_shape},
    linalg::{
        blas::omatcopy::ScaledBlockCopy,
        kron::{eye_kron_with, kron_eye, kron_with},
    },
    Scalar,
};

fn require<T>(operand: &'static str, slice: &[T], required: usize) -> Result<()> {
    if slice.len() < required {
        debug!(operand, required, actual = slice.len(), "rejecting undersized buffer");
        return Err(buffer_error(operand, required, slice.len()));
    }
    Ok(())
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or_else(overflow)
}

// `checked_kron_shape` has already verified that `rows * cols` fits.
fn product_len(shape: Option<(usize, usize)>) -> Result<usize> {
    shape.map(|(rows, cols)| rows * cols).ok_or_else(overflow)
}

fn overflow() -> KronlyError {
    debug!("rejecting shape whose element count overflows usize");
    validation_error("product shape overflows usize")
}

/// Checked [`kron_with`]: `dst = A ⊗ B`.
#[allow(clippy::too_many_arguments)]
pub fn try_kron<T: Scalar, C: ScaledBlockCopy>(
    copier: &C,
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    b: &[T],
    b_rows: usize,
    b_cols: usize,
    dst: &mut [T],
) -> Result<()> {
    require("a", a, element_count(a_rows, a_cols)?)?;
    require("b", b, element_count(b_rows, b_cols)?)?;
    let len = product_len(checked_kron_shape((a_rows, a_cols), (b_rows, b_cols)))?;
    require("dst", dst, len)?;
    kron_with(copier, a, a_rows, a_cols, b, b_rows, b_cols, dst);
    Ok(())
}

/// Checked [`kron_eye`]: `dst = A ⊗ Iₙ`.
pub fn try_kron_eye<T: Scalar>(
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    n: usize,
    dst: &mut [T],
) -> Result<()> {
    require("a", a, element_count(a_rows, a_cols)?)?;
    let len = product_len(checked_kron_eye_shape((a_rows, a_cols), n))?;
    require("dst", dst, len)?;
    kron_eye(a, a_rows, a_cols, n, dst);
    Ok(())
}

/// Checked [`eye_kron_with`]: `dst = Iₙ ⊗ A`.
pub fn try_eye_kron<T: Scalar, C: ScaledBlockCopy>(
    copier: &C,
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    n: usize,
    dst: &mut [T],
) -> Result<()> {
    require("a", a, element_count(a_rows, a_cols)?)?;
    let len = product_len(checked_kron_eye_shape((a_rows, a_cols), n))?;
    require("dst", dst, len)?;
    eye_kron_with(copier, a, a_rows, a_cols, n, dst);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PortableCopy;

    #[test]
    fn test_try_kron_rejects_short_destination() {
        let a = [1.0, 2.0];
        let b = [3.0, 4.0];
        let mut dst = [9.0; 3];
        let err = try_kron(&PortableCopy, &a, 2, 1, &b, 2, 1, &mut dst).unwrap_err();
        assert_eq!(
            err,
            KronlyError::BufferError {
                operand: "dst",
                required: 4,
                actual: 3
            }
        );
        // Nothing was written.
        assert_eq!(dst, [9.0; 3]);
    }

    #[test]
    fn test_try_kron_rejects_short_operand() {
        let a = [1.0, 2.0, 3.0];
        let b = [1.0];
        let mut dst = [0.0; 4];
        let err = try_kron(&PortableCopy, &a, 2, 2, &b, 1, 1, &mut dst).unwrap_err();
        assert_eq!(err, buffer_error("a", 4, 3));

        let a = [1.0];
        let err = try_kron(&PortableCopy, &a, 1, 1, &b, 2, 2, &mut dst).unwrap_err();
        assert_eq!(err, buffer_error("b", 4, 1));
    }

    #[test]
    fn test_try_kron_success() {
        let a = [1.0, 2.0];
        let b = [5.0, 6.0];
        let mut dst = [0.0; 4];
        try_kron(&PortableCopy, &a, 1, 2, &b, 2, 1, &mut dst).unwrap();
        assert_eq!(dst, [5.0, 6.0, 10.0, 12.0]);
    }

    #[test]
    fn test_try_identity_variants() {
        let a = [1.0, 3.0, 2.0, 4.0];
        let mut small = [0.0; 15];
        assert_eq!(
            try_kron_eye(&a, 2, 2, 2, &mut small),
            Err(buffer_error("dst", 16, 15))
        );
        assert_eq!(
            try_eye_kron(&PortableCopy, &a, 2, 2, 2, &mut small),
            Err(buffer_error("dst", 16, 15))
        );

        let mut dst = [0.0; 16];
        try_eye_kron(&PortableCopy, &a, 2, 2, 2, &mut dst).unwrap();
        assert_eq!(dst[10], 1.0);
        try_kron_eye(&a, 2, 2, 2, &mut dst).unwrap();
        assert_eq!(dst[5], 1.0);
        assert_eq!(dst[10], 4.0);
    }

    #[test]
    fn test_try_empty_shapes_accept_empty_buffers() {
        let empty: [f64; 0] = [];
        let mut dst: [f64; 0] = [];
        assert!(try_kron_eye(&empty, 0, 3, 4, &mut dst).is_ok());
        assert!(try_eye_kron(&PortableCopy, &[1.0], 1, 1, 0, &mut dst).is_ok());
        assert!(try_kron(&PortableCopy, &empty, 0, 0, &[1.0], 1, 1, &mut dst).is_ok());
    }

    #[test]
    fn test_try_rejects_overflowing_product_shape() {
        let overflow = validation_error("product shape overflows usize");
        let n = 1usize << (usize::BITS / 2);
        let mut dst: Vec<f64> = vec![];

        assert_eq!(try_kron_eye(&[1.0], 1, 1, n, &mut dst), Err(overflow.clone()));
        assert_eq!(
            try_eye_kron(&PortableCopy, &[1.0], 1, 1, n, &mut dst),
            Err(overflow.clone())
        );
        assert_eq!(
            try_kron(&PortableCopy, &[1.0], 1, 1, &[1.0], n, n, &mut dst),
            Err(overflow.clone())
        );
    }

    #[test]
    fn test_try_rejects_overflowing_operand_shape() {
        let big = usize::MAX / 2 + 1;
        let mut dst: Vec<f64> = vec![];
        assert_eq!(
            try_kron(&PortableCopy, &[1.0], big, 2, &[1.0], 1, 1, &mut dst),
            Err(validation_error("product shape overflows usize"))
        );
        // Zero in one factor keeps the count at zero even for huge sides.
        assert!(try_kron(&PortableCopy, &[], big, 0, &[1.0], 1, 1, &mut dst).is_ok());
    }
}
