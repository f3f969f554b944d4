//! Shared application state.
//!
//! One context object owns the discovered core count, the snapshot receiver,
//! the thermal source, and the metrics registry; handlers get a cheap clone.
//! Nothing here mutates after construction except the snapshot the engine
//! publishes through the `watch` channel.

use std::sync::Arc;

use tokio::sync::watch;

use rcpu_core::Snapshot;

use crate::config::RcpuConfig;
use crate::obs::RcpuMetrics;
use crate::thermal::ThermalSource;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: RcpuConfig,
    core_count: usize,
    snapshot_rx: watch::Receiver<Snapshot>,
    thermal: Arc<dyn ThermalSource>,
    metrics: Arc<RcpuMetrics>,
}

impl AppState {
    pub fn new(
        cfg: RcpuConfig,
        core_count: usize,
        snapshot_rx: watch::Receiver<Snapshot>,
        thermal: Arc<dyn ThermalSource>,
        metrics: Arc<RcpuMetrics>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                core_count,
                snapshot_rx,
                thermal,
                metrics,
            }),
        }
    }

    pub fn cfg(&self) -> &RcpuConfig {
        &self.inner.cfg
    }

    /// CPU rows discovered at startup, aggregate line included. Fixed for
    /// process lifetime.
    pub fn core_count(&self) -> usize {
        self.inner.core_count
    }

    /// The most recent fully-formed snapshot. Readers see either the
    /// previous or the newest array, never a mix, and never block the
    /// sampler.
    pub fn latest_snapshot(&self) -> Snapshot {
        self.inner.snapshot_rx.borrow().clone()
    }

    pub fn thermal(&self) -> Arc<dyn ThermalSource> {
        Arc::clone(&self.inner.thermal)
    }

    pub fn metrics(&self) -> Arc<RcpuMetrics> {
        Arc::clone(&self.inner.metrics)
    }
}
