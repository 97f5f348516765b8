use crate::Scalar;

/// Writes the `n x n` identity into `dst`.
///
/// The first `n * n` elements are cleared, then `1` is written at stride
/// `n + 1`. Storage order does not matter for a symmetric result.
///
/// # Panics
///
/// Panics if `dst.len() < n * n`.
pub fn eye<T: Scalar>(n: usize, dst: &mut [T]) {
    let dst = &mut dst[..n * n];
    dst.fill(T::zero());
    dst.iter_mut()
        .step_by(n + 1)
        .for_each(|d| *d = T::one());
}
