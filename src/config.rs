//! Runtime selection of the block-copy backend.
//!
//! # Environment Variables
//!
//! - `KRONLY_COPY_BACKEND`: `portable` (default) or `parallel`
//! - `KRONLY_PAR_THRESHOLD`: block size in elements at which the parallel
//!   backend starts splitting work (default: [`DEFAULT_PARALLEL_THRESHOLD`])

use tracing::debug;

use crate::{
    error::{validation_error, Result},
    linalg::blas::omatcopy::{BlockCopier, ParallelCopy, PortableCopy},
    DEFAULT_PARALLEL_THRESHOLD,
};

pub const BACKEND_ENV: &str = "KRONLY_COPY_BACKEND";
pub const THRESHOLD_ENV: &str = "KRONLY_PAR_THRESHOLD";

/// Which [`ScaledBlockCopy`](crate::ScaledBlockCopy) implementation the kernels use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyBackend {
    /// Single-threaded loop.
    #[default]
    Portable,
    /// Rayon column split above the threshold.
    Parallel,
}

impl CopyBackend {
    /// Parse from string (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "portable" => Ok(CopyBackend::Portable),
            "parallel" => Ok(CopyBackend::Parallel),
            other => Err(validation_error(format!(
                "unknown copy backend `{}` (expected `portable` or `parallel`)",
                other
            ))),
        }
    }
}

/// Kernel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelConfig {
    pub backend: CopyBackend,
    pub parallel_threshold: usize,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            backend: CopyBackend::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl KernelConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Missing keys
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup(BACKEND_ENV) {
            config.backend = CopyBackend::parse(&value)?;
        }

        if let Some(value) = lookup(THRESHOLD_ENV) {
            config.parallel_threshold = match value.trim().parse::<usize>() {
                Ok(t) if t > 0 => t,
                _ => {
                    return Err(validation_error(format!(
                        "{} must be a positive integer, got `{}`",
                        THRESHOLD_ENV, value
                    )))
                }
            };
        }

        debug!(?config, "kernel configuration loaded");
        Ok(config)
    }

    /// The copy backend described by this configuration.
    pub fn copier(&self) -> BlockCopier {
        match self.backend {
            CopyBackend::Portable => BlockCopier::Portable(PortableCopy),
            CopyBackend::Parallel => BlockCopier::Parallel(ParallelCopy {
                threshold: self.parallel_threshold,
            }),
        }
    }
}
