//! Shared error type across rcpu crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, RcpuError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum RcpuError {
    /// The kernel accounting source could not be opened or read.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),
    /// A sampling read produced less data than the contract requires.
    #[error("malformed sample: {0}")]
    MalformedSample(String),
    /// A counter went backwards between reads (reboot or source rotation).
    #[error("counter regression on core {core}: {prev} -> {next}")]
    CounterRegression { core: usize, prev: u64, next: u64 },
    /// Invalid input at the HTTP edge.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Everything else (config loading, I/O outside sampling).
    #[error("internal: {0}")]
    Internal(String),
}

impl RcpuError {
    /// Whether the sampler loop should retry after this error.
    ///
    /// All sampling-side errors are transient by design: the loop skips the
    /// cycle, keeps the previous snapshot, and tries again next interval.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            RcpuError::SourceUnavailable(_)
                | RcpuError::MalformedSample(_)
                | RcpuError::CounterRegression { .. }
        )
    }
}
