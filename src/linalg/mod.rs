pub mod blas;
pub mod det;
pub mod eye;
pub mod kron;
