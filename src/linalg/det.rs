use crate::Scalar;

/// Determinant of a matrix from its packed LU factorization.
///
/// `lu` holds the `n x n` factors as returned by a `getrf`-style routine
/// (unit-diagonal `L` below the diagonal, `U` on and above it) and `ipiv` the
/// 1-based row interchanges. The determinant is the product of `U`'s
/// diagonal, with one sign flip for every row that was swapped.
///
/// `n == 0` gives `1`, the determinant of the empty matrix.
///
/// # Panics
///
/// Panics if `lu` has fewer than `n * n` elements or `ipiv` fewer than `n`.
///
/// # Examples
///
/// ```
/// use kronly::linalg::det::det_from_lu;
///
/// // [[0, 2], [3, 1]] factors (after swapping the rows) as L = [[1, 0], [0, 1]], U = [[3, 1], [0, 2]]
/// let lu = [3.0, 0.0, 1.0, 2.0];
/// let ipiv = [2, 2];
/// assert_eq!(det_from_lu(&lu, &ipiv, 2), -6.0);
/// ```
pub fn det_from_lu<T: Scalar>(lu: &[T], ipiv: &[i32], n: usize) -> T {
    assert!(
        lu.len() >= n * n,
        "det_from_lu: lu slice length {} is insufficient for n={}. Required: {}",
        lu.len(),
        n,
        n * n
    );
    assert!(
        ipiv.len() >= n,
        "det_from_lu: ipiv slice length {} is insufficient for n={}",
        ipiv.len(),
        n
    );

    lu.iter()
        .step_by(n + 1)
        .zip(ipiv)
        .take(n)
        .enumerate()
        .fold(T::one(), |det, (i, (&u_ii, &p))| {
            if p as usize != i + 1 {
                det * -u_ii
            } else {
                det * u_ii
            }
        })
}
