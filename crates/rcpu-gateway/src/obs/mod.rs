//! Lightweight in-process metrics.
//!
//! Counters for HTTP traffic and sampler cycle outcomes, rendered in
//! Prometheus text format by the `/metrics` handler. Sampling trouble never
//! reaches API consumers (worst case is stale data), so these counters are
//! the only place skipped cycles become visible.

pub mod metrics;

pub use metrics::RcpuMetrics;
