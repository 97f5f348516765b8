//! Memory layout descriptors for dense matrices.
//!
//! Every matrix handled by this crate is a flat slice plus a
//! `(rows, cols, ld)` triple. In column-major order element `(r, c)` lives at
//! `c * ld + r`; `ld >= rows` lets a matrix sit inside a larger buffer.

/// Storage order of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    /// Elements of a column are contiguous (Fortran style).
    #[default]
    ColMajor,
    /// Elements of a row are contiguous (C style).
    RowMajor,
}

/// Operation applied to the source block of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transpose {
    /// Copy as is.
    #[default]
    NoTrans,
    /// Copy the transpose.
    Trans,
}

/// Calculates the 1D index for a 2D array element in column-major order.
///
/// # Arguments
///
/// * `i` - Row index.
/// * `j` - Column index.
/// * `ld` - Leading dimension (distance between the starts of two consecutive columns).
#[inline(always)]
pub fn at(i: usize, j: usize, ld: usize) -> usize {
    j * ld + i
}

/// Shape and stride of a column-major matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    pub rows: usize,
    pub cols: usize,
    pub ld: usize,
}

impl MatrixLayout {
    /// Packed column-major layout (`ld == rows`).
    pub fn col_major(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ld: rows,
        }
    }

    /// Same shape with an explicit leading dimension.
    ///
    /// # Panics
    ///
    /// Panics if `ld < rows` while the matrix has at least one column.
    pub fn with_ld(rows: usize, cols: usize, ld: usize) -> Self {
        assert!(
            cols == 0 || ld >= rows,
            "leading dimension {} is smaller than row count {}",
            ld,
            rows
        );
        Self { rows, cols, ld }
    }

    #[inline(always)]
    pub fn offset(&self, r: usize, c: usize) -> usize {
        at(r, c, self.ld)
    }

    /// Number of logical elements (`rows * cols`).
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Shortest slice length that holds every element of the matrix.
    ///
    /// The last column does not need trailing padding, so this is
    /// `(cols - 1) * ld + rows` rather than `cols * ld`.
    pub fn span(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            (self.cols - 1) * self.ld + self.rows
        }
    }
}

/// Shape `(rows, cols)` of `A ⊗ B` for `A` of shape `a` and `B` of shape `b`.
pub fn kron_shape(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
    (a.0 * b.0, a.1 * b.1)
}

/// Shape `(rows, cols)` of `A ⊗ Iₙ` and `Iₙ ⊗ A` for `A` of shape `a`.
pub fn kron_eye_shape(a: (usize, usize), n: usize) -> (usize, usize) {
    kron_shape(a, (n, n))
}

/// [`kron_shape`] that returns `None` when a dimension or the element count
/// of the product does not fit in `usize`.
pub fn checked_kron_shape(a: (usize, usize), b: (usize, usize)) -> Option<(usize, usize)> {
    let rows = a.0.checked_mul(b.0)?;
    let cols = a.1.checked_mul(b.1)?;
    rows.checked_mul(cols)?;
    Some((rows, cols))
}

/// [`kron_eye_shape`] with the same overflow rules as [`checked_kron_shape`].
pub fn checked_kron_eye_shape(a: (usize, usize), n: usize) -> Option<(usize, usize)> {
    checked_kron_shape(a, (n, n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_column_major() {
        // 3x2 matrix: column 1 starts at offset 3
        assert_eq!(at(0, 0, 3), 0);
        assert_eq!(at(2, 0, 3), 2);
        assert_eq!(at(0, 1, 3), 3);
        assert_eq!(at(2, 1, 3), 5);
    }

    #[test]
    fn test_span_with_padding() {
        let layout = MatrixLayout::with_ld(2, 3, 5);
        assert_eq!(layout.span(), 12);
        assert_eq!(layout.len(), 6);
        assert_eq!(layout.offset(1, 2), 11);
    }

    #[test]
    fn test_span_empty() {
        assert_eq!(MatrixLayout::col_major(0, 4).span(), 0);
        assert_eq!(MatrixLayout::col_major(4, 0).span(), 0);
        assert!(MatrixLayout::col_major(4, 0).is_empty());
    }

    #[test]
    fn test_span_packed_equals_len() {
        let layout = MatrixLayout::col_major(4, 7);
        assert_eq!(layout.span(), layout.len());
    }

    #[test]
    #[should_panic(expected = "leading dimension 1 is smaller than row count 2")]
    fn test_with_ld_too_small_panics() {
        MatrixLayout::with_ld(2, 2, 1);
    }

    #[test]
    fn test_product_shapes() {
        assert_eq!(kron_shape((2, 3), (4, 5)), (8, 15));
        assert_eq!(kron_eye_shape((2, 3), 4), (8, 12));
        assert_eq!(kron_eye_shape((2, 3), 0), (0, 0));
    }

    #[test]
    fn test_checked_product_shapes() {
        assert_eq!(checked_kron_shape((2, 3), (4, 5)), Some((8, 15)));
        assert_eq!(checked_kron_eye_shape((2, 3), 0), Some((0, 0)));
        assert_eq!(checked_kron_shape((usize::MAX, 1), (2, 1)), None);
        // Each side fits, the element count does not.
        assert_eq!(checked_kron_eye_shape((1, 1), 1 << (usize::BITS / 2)), None);
    }
}
