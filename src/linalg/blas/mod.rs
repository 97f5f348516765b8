//! BLAS-like building blocks used by the structured product kernels.

pub mod omatcopy;
