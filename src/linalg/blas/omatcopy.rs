use rayon::{
    iter::{IndexedParallelIterator, ParallelIterator},
    slice::ParallelSliceMut,
};

use crate::{
    layout::{at, MatrixLayout, Ordering, Transpose},
    Scalar, DEFAULT_PARALLEL_THRESHOLD,
};

/// Scaled, strided matrix copy with optional transpose: `b = alpha * op(a)`.
///
/// The kernels in [`crate::linalg::kron`] only ever call this through the
/// trait, so a vendor routine or a portable loop can sit behind it without
/// touching the kernel code.
pub trait ScaledBlockCopy {
    /// Copies the `rows x cols` block `a` (stored in `ordering` with leading
    /// dimension `lda`) into `b` (leading dimension `ldb`), multiplying every
    /// element by `alpha`. With [`Transpose::Trans`], `b` receives the
    /// `cols x rows` transpose.
    #[allow(clippy::too_many_arguments)]
    fn omatcopy<T: Scalar>(
        &self,
        ordering: Ordering,
        trans: Transpose,
        rows: usize,
        cols: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    );
}

/// Single-threaded double loop. Always available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PortableCopy;

/// Splits the destination by column across the rayon pool once a block
/// reaches `threshold` elements; smaller blocks take the portable loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParallelCopy {
    pub threshold: usize,
}

impl Default for ParallelCopy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

/// Copy backend chosen at runtime, see [`crate::config::KernelConfig::copier`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockCopier {
    Portable(PortableCopy),
    Parallel(ParallelCopy),
}

impl Default for BlockCopier {
    fn default() -> Self {
        BlockCopier::Portable(PortableCopy)
    }
}

/// Column-major view of a copy request after argument checking.
#[derive(Debug, Clone, Copy)]
struct CopyPlan {
    trans: Transpose,
    rows: usize,
    cols: usize,
    lda: usize,
    ldb: usize,
}

/// Validates the arguments of a copy and rewrites a row-major request as the
/// equivalent column-major one. Returns `None` when there is nothing to copy.
///
/// A row-major `rows x cols` matrix with leading dimension `ld` is the same
/// memory as a column-major `cols x rows` matrix with the same `ld`, so only
/// the dimensions need swapping.
///
/// # Panics
///
/// Panics if a leading dimension is smaller than the column height it has to
/// step over, or if `a`/`b` is shorter than the span the copy touches.
#[allow(clippy::too_many_arguments)]
fn plan<T>(
    ordering: Ordering,
    trans: Transpose,
    rows: usize,
    cols: usize,
    a: &[T],
    lda: usize,
    b: &[T],
    ldb: usize,
) -> Option<CopyPlan> {
    if rows == 0 || cols == 0 {
        return None;
    }

    let (rows, cols) = match ordering {
        Ordering::ColMajor => (rows, cols),
        Ordering::RowMajor => (cols, rows),
    };

    if lda < rows {
        panic!(
            "omatcopy: lda {} is smaller than the {} elements of a source column",
            lda, rows
        );
    }

    let dst = match trans {
        Transpose::NoTrans => MatrixLayout::col_major(rows, cols),
        Transpose::Trans => MatrixLayout::col_major(cols, rows),
    };
    if ldb < dst.rows {
        panic!(
            "omatcopy: ldb {} is smaller than the {} elements of a destination column",
            ldb, dst.rows
        );
    }

    let required_a = MatrixLayout::with_ld(rows, cols, lda).span();
    if a.len() < required_a {
        panic!(
            "omatcopy: a slice length {} is insufficient for a {}x{} block with lda={}. Required: {}",
            a.len(),
            rows,
            cols,
            lda,
            required_a
        );
    }

    let required_b = MatrixLayout::with_ld(dst.rows, dst.cols, ldb).span();
    if b.len() < required_b {
        panic!(
            "omatcopy: b slice length {} is insufficient for a {}x{} block with ldb={}. Required: {}",
            b.len(),
            dst.rows,
            dst.cols,
            ldb,
            required_b
        );
    }

    Some(CopyPlan {
        trans,
        rows,
        cols,
        lda,
        ldb,
    })
}

#[inline]
fn scale_into<T: Scalar>(dst: &mut [T], src: &[T], alpha: T) {
    if alpha == T::one() {
        dst.copy_from_slice(src);
    } else {
        dst.iter_mut().zip(src).for_each(|(d, &s)| *d = alpha * s);
    }
}

fn copy_serial<T: Scalar>(p: &CopyPlan, alpha: T, a: &[T], b: &mut [T]) {
    match p.trans {
        Transpose::NoTrans => {
            for j in 0..p.cols {
                let src = &a[at(0, j, p.lda)..at(p.rows, j, p.lda)];
                let dst = &mut b[at(0, j, p.ldb)..at(p.rows, j, p.ldb)];
                scale_into(dst, src, alpha);
            }
        }
        Transpose::Trans => {
            // b is cols x rows: source column j becomes destination row j.
            for j in 0..p.cols {
                for i in 0..p.rows {
                    b[at(j, i, p.ldb)] = alpha * a[at(i, j, p.lda)];
                }
            }
        }
    }
}

fn copy_parallel<T: Scalar>(p: &CopyPlan, alpha: T, a: &[T], b: &mut [T]) {
    match p.trans {
        Transpose::NoTrans => {
            b.par_chunks_mut(p.ldb)
                .take(p.cols)
                .enumerate()
                .for_each(|(j, column)| {
                    let src = &a[at(0, j, p.lda)..at(p.rows, j, p.lda)];
                    scale_into(&mut column[..p.rows], src, alpha);
                });
        }
        Transpose::Trans => {
            // Destination column i gathers row i of the source.
            b.par_chunks_mut(p.ldb)
                .take(p.rows)
                .enumerate()
                .for_each(|(i, column)| {
                    for (j, d) in column[..p.cols].iter_mut().enumerate() {
                        *d = alpha * a[at(i, j, p.lda)];
                    }
                });
        }
    }
}

impl ScaledBlockCopy for PortableCopy {
    fn omatcopy<T: Scalar>(
        &self,
        ordering: Ordering,
        trans: Transpose,
        rows: usize,
        cols: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) {
        if let Some(p) = plan(ordering, trans, rows, cols, a, lda, b, ldb) {
            copy_serial(&p, alpha, a, b);
        }
    }
}

impl ScaledBlockCopy for ParallelCopy {
    fn omatcopy<T: Scalar>(
        &self,
        ordering: Ordering,
        trans: Transpose,
        rows: usize,
        cols: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) {
        if let Some(p) = plan(ordering, trans, rows, cols, a, lda, b, ldb) {
            if p.rows * p.cols >= self.threshold {
                copy_parallel(&p, alpha, a, b);
            } else {
                copy_serial(&p, alpha, a, b);
            }
        }
    }
}

impl ScaledBlockCopy for BlockCopier {
    fn omatcopy<T: Scalar>(
        &self,
        ordering: Ordering,
        trans: Transpose,
        rows: usize,
        cols: usize,
        alpha: T,
        a: &[T],
        lda: usize,
        b: &mut [T],
        ldb: usize,
    ) {
        match self {
            BlockCopier::Portable(c) => c.omatcopy(ordering, trans, rows, cols, alpha, a, lda, b, ldb),
            BlockCopier::Parallel(c) => c.omatcopy(ordering, trans, rows, cols, alpha, a, lda, b, ldb),
        }
    }
}

/// Computes `b = alpha * op(a)` for double-precision matrices.
///
/// This function mirrors the functionality of the `domatcopy` BLAS extension
/// shipped by vendor libraries, using the portable loop.
///
/// # Arguments
///
/// * `ordering`: Storage order of both `a` and `b`.
/// * `trans`: Whether `b` receives `a` or its transpose.
/// * `rows`, `cols`: Shape of `a`.
/// * `alpha`: The scalar multiplier.
/// * `a`: Source slice, leading dimension `lda`.
/// * `b`: Destination slice, leading dimension `ldb`. Only the elements of the
///   block are written; padding between columns is left untouched.
///
/// # Panics
///
/// This function will panic if a leading dimension is too small for the
/// block, or if either slice is shorter than the span the copy touches.
/// Nothing is checked when `rows` or `cols` is zero.
///
/// # Examples
///
/// ```
/// use kronly::{layout::{Ordering, Transpose}, linalg::blas::omatcopy::domatcopy};
///
/// let a = [1.0, 2.0, 3.0, 4.0]; // [[1, 3], [2, 4]]
/// let mut b = [0.0; 4];
/// domatcopy(Ordering::ColMajor, Transpose::Trans, 2, 2, 2.0, &a, 2, &mut b, 2);
/// assert_eq!(b, [2.0, 6.0, 4.0, 8.0]);
/// ```
#[allow(clippy::too_many_arguments)]
pub fn domatcopy(
    ordering: Ordering,
    trans: Transpose,
    rows: usize,
    cols: usize,
    alpha: f64,
    a: &[f64],
    lda: usize,
    b: &mut [f64],
    ldb: usize,
) {
    PortableCopy.omatcopy(ordering, trans, rows, cols, alpha, a, lda, b, ldb);
}
