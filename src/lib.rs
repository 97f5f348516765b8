//! Column-major Kronecker product kernels.
//!
//! The crate builds `A ⊗ B`, `A ⊗ Iₙ` and `Iₙ ⊗ A` directly into
//! caller-owned, column-major buffers. The identity is never materialized.
//! Strided block copies go through the [`linalg::blas::omatcopy`] primitive,
//! which has a portable and a rayon-backed implementation.

pub mod array;
pub mod checked;
pub mod config;
pub mod error;
pub mod layout;
pub mod leak;
pub mod linalg;

pub use error::{KronlyError, Result};
pub use layout::{Ordering, Transpose};
pub use linalg::blas::omatcopy::{BlockCopier, ParallelCopy, PortableCopy, ScaledBlockCopy};
pub use linalg::kron::{eye_kron, eye_kron_with, kron, kron_eye, kron_with};

/// Element type accepted by every kernel.
pub trait Scalar: num::Float + Send + Sync + std::fmt::Debug + 'static {}

impl<T> Scalar for T where T: num::Float + Send + Sync + std::fmt::Debug + 'static {}

/// Block size (in elements) at which [`ParallelCopy`] starts splitting work across threads.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 1 << 16;
