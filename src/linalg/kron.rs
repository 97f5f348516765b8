//! Kronecker products built in place over column-major buffers.
//!
//! All three kernels walk their source in column-major order and move a
//! single write cursor through `dst`, so the destination is visited in the
//! order it is laid out in memory. None of them allocates.
//!
//! | kernel     | product  | destination shape                   | zero fill |
//! |------------|----------|-------------------------------------|-----------|
//! | [`kron`]     | `A ⊗ B`  | `(a_rows*b_rows) x (a_cols*b_cols)` | no        |
//! | [`kron_eye`] | `A ⊗ Iₙ` | `(a_rows*n) x (a_cols*n)`           | yes       |
//! | [`eye_kron`] | `Iₙ ⊗ A` | `(a_rows*n) x (a_cols*n)`           | yes       |
//!
//! The destination's leading dimension is always its row count. Sizing `dst`
//! is the caller's job; see [`crate::checked`] for the validating wrappers.

use crate::{
    layout::{Ordering, Transpose},
    linalg::blas::omatcopy::{PortableCopy, ScaledBlockCopy},
    Scalar,
};

/// Writes `A ⊗ B` into `dst` using `copier` for every scaled block.
///
/// `a` is `a_rows x a_cols` and `b` is `b_rows x b_cols`, both packed
/// column-major. Each scalar `A[r, c]` becomes one call
/// `dst[block(r, c)] = A[r, c] * B`, so every element of `dst` is written
/// exactly once and no zero fill is needed.
///
/// # Panics
///
/// Panics (through slice indexing or the copy primitive) if `a`, `b` or
/// `dst` is shorter than its shape requires.
#[allow(clippy::too_many_arguments)]
pub fn kron_with<T: Scalar, C: ScaledBlockCopy>(
    copier: &C,
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    b: &[T],
    b_rows: usize,
    b_cols: usize,
    dst: &mut [T],
) {
    debug_assert!(b.len() >= b_rows * b_cols);
    debug_assert!(dst.len() >= a_rows * b_rows * a_cols * b_cols);

    if a_rows == 0 || a_cols == 0 || b_rows == 0 || b_cols == 0 {
        return;
    }

    let ldc = b_rows * a_rows;
    let mut cursor = 0;
    for column in a[..a_rows * a_cols].chunks_exact(a_rows) {
        for &alpha in column {
            copier.omatcopy(
                Ordering::ColMajor,
                Transpose::NoTrans,
                b_rows,
                b_cols,
                alpha,
                b,
                b_rows,
                &mut dst[cursor..],
                ldc,
            );
            // Next block down the same column-block.
            cursor += b_rows;
        }
        // The cursor sits at the top of the second column of this
        // column-block; skip the remaining b_cols - 1 columns.
        cursor += (b_cols - 1) * ldc;
    }
}

/// Writes `A ⊗ B` into `dst` with the portable block copy.
///
/// See [`kron_with`].
pub fn kron<T: Scalar>(
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    b: &[T],
    b_rows: usize,
    b_cols: usize,
    dst: &mut [T],
) {
    kron_with(&PortableCopy, a, a_rows, a_cols, b, b_rows, b_cols, dst);
}

/// Writes `A ⊗ Iₙ` into `dst` without forming `Iₙ`.
///
/// `dst` does not need to be zeroed by the caller: the whole product region
/// is cleared first, then each scalar `A[r, c]` is written along the
/// diagonal of its `n x n` block (stride `ldb + 1`).
///
/// # Panics
///
/// Panics if `a` or `dst` is shorter than its shape requires.
pub fn kron_eye<T: Scalar>(a: &[T], a_rows: usize, a_cols: usize, n: usize, dst: &mut [T]) {
    let ldb = n * a_rows;
    let len = ldb * n * a_cols;
    debug_assert!(dst.len() >= len);

    let a = &a[..a_rows * a_cols];
    dst[..len].fill(T::zero());
    if len == 0 {
        return;
    }

    let mut cursor = 0;
    for column in a.chunks_exact(a_rows) {
        for &value in column {
            // Diagonal of the n x n block whose top-left corner is `cursor`.
            dst[cursor..]
                .iter_mut()
                .step_by(ldb + 1)
                .take(n)
                .for_each(|d| *d = value);

            // Move n rows down to the next block of this column-block.
            cursor += n;
        }
        // The cursor is at the top of the second column of this
        // column-block; move n - 1 columns to reach the next one.
        cursor += ldb * (n - 1);
    }
}

/// Writes `Iₙ ⊗ A` into `dst` with `copier`, without forming `Iₙ`.
///
/// After clearing the product region, `A` is copied verbatim `n` times along
/// the block diagonal. Copy `i` starts at row `i * a_rows`, column
/// `i * a_cols`, and uses the full destination height as its leading
/// dimension.
///
/// # Panics
///
/// Panics if `a` or `dst` is shorter than its shape requires.
pub fn eye_kron_with<T: Scalar, C: ScaledBlockCopy>(
    copier: &C,
    a: &[T],
    a_rows: usize,
    a_cols: usize,
    n: usize,
    dst: &mut [T],
) {
    let ldb = n * a_rows;
    let len = ldb * n * a_cols;
    debug_assert!(dst.len() >= len);

    let a = &a[..a_rows * a_cols];
    dst[..len].fill(T::zero());
    if len == 0 {
        return;
    }

    let stride = ldb * a_cols + a_rows;
    for i in 0..n {
        copier.omatcopy(
            Ordering::ColMajor,
            Transpose::NoTrans,
            a_rows,
            a_cols,
            T::one(),
            a,
            a_rows,
            &mut dst[i * stride..],
            ldb,
        );
    }
}

/// Writes `Iₙ ⊗ A` into `dst` with the portable block copy.
///
/// See [`eye_kron_with`].
pub fn eye_kron<T: Scalar>(a: &[T], a_rows: usize, a_cols: usize, n: usize, dst: &mut [T]) {
    eye_kron_with(&PortableCopy, a, a_rows, a_cols, n, dst);
}
