//! `ndarray` front-end for the product kernels.
//!
//! Inputs may be in any memory order (including transposed or sliced
//! views); they are gathered into packed column-major buffers first. Results
//! are column-major (`.f()`) arrays, so their raw storage is exactly what the
//! kernels wrote.

use ndarray::{Array2, ArrayView2, ShapeBuilder};

use crate::{
    error::{validation_error, Result},
    layout::{checked_kron_eye_shape, checked_kron_shape},
    linalg::{
        blas::omatcopy::ScaledBlockCopy,
        kron::{eye_kron_with, kron_eye, kron_with},
    },
    Scalar,
};

/// Copies `a` into a packed column-major `Vec`.
fn to_col_major<T: Scalar>(a: &ArrayView2<T>) -> Vec<T> {
    // Logical iteration of the transpose walks `a` column by column.
    a.t().iter().copied().collect()
}

fn product_shape(shape: Option<(usize, usize)>) -> Result<(usize, usize)> {
    shape.ok_or_else(|| validation_error("product shape overflows usize"))
}

fn into_array<T: Scalar>(shape: (usize, usize), data: Vec<T>) -> Result<Array2<T>> {
    Array2::from_shape_vec(shape.f(), data)
        .map_err(|e| validation_error(format!("cannot shape product as {:?}: {}", shape, e)))
}

/// Returns `A ⊗ B` as a column-major array.
#[tracing::instrument(level = "debug", skip_all, fields(a = ?a.dim(), b = ?b.dim()))]
pub fn kron_array<T: Scalar, C: ScaledBlockCopy>(
    copier: &C,
    a: ArrayView2<T>,
    b: ArrayView2<T>,
) -> Result<Array2<T>> {
    let shape = product_shape(checked_kron_shape(a.dim(), b.dim()))?;
    let (a_rows, a_cols) = a.dim();
    let (b_rows, b_cols) = b.dim();
    let a = to_col_major(&a);
    let b = to_col_major(&b);

    // Every element is overwritten by `kron_with`.
    let mut dst = vec![T::zero(); shape.0 * shape.1];
    kron_with(copier, &a, a_rows, a_cols, &b, b_rows, b_cols, &mut dst);
    into_array(shape, dst)
}

/// Returns `A ⊗ Iₙ` as a column-major array.
#[tracing::instrument(level = "debug", skip_all, fields(a = ?a.dim(), n = n))]
pub fn kron_eye_array<T: Scalar>(a: ArrayView2<T>, n: usize) -> Result<Array2<T>> {
    let shape = product_shape(checked_kron_eye_shape(a.dim(), n))?;
    let (rows, cols) = a.dim();
    let a = to_col_major(&a);

    let mut dst = vec![T::zero(); shape.0 * shape.1];
    kron_eye(&a, rows, cols, n, &mut dst);
    into_array(shape, dst)
}

/// Returns `Iₙ ⊗ A` as a column-major array.
#[tracing::instrument(level = "debug", skip_all, fields(a = ?a.dim(), n = n))]
pub fn eye_kron_array<T: Scalar, C: ScaledBlockCopy>(
    copier: &C,
    a: ArrayView2<T>,
    n: usize,
) -> Result<Array2<T>> {
    let shape = product_shape(checked_kron_eye_shape(a.dim(), n))?;
    let (rows, cols) = a.dim();
    let a = to_col_major(&a);

    let mut dst = vec![T::zero(); shape.0 * shape.1];
    eye_kron_with(copier, &a, rows, cols, n, &mut dst);
    into_array(shape, dst)
}
