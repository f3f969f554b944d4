//! rcpu core: tick-counter parsing, utilization math, and the snapshot type.
//!
//! This crate defines the accounting-data contracts and error surface shared
//! by the gateway and its tests. It intentionally carries no runtime or
//! transport dependencies so the delta arithmetic can be exercised in
//! isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `RcpuError`/`Result` so the sampler
//! loop never crashes on malformed accounting data.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod snapshot;
pub mod stat;

/// Shared result type.
pub use error::{RcpuError, Result};
pub use snapshot::Snapshot;
pub use stat::CpuTicks;
