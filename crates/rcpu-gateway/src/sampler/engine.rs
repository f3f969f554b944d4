//! The sampler engine: double-read delta sampling on a fixed cadence.
//!
//! One engine task runs for the lifetime of the process. Each cycle reads
//! every CPU row, sleeps one interval, reads again, computes per-core
//! utilization from the deltas, and publishes the whole array atomically
//! through a `watch` channel. Any failure inside a cycle skips the publish
//! and leaves the previous snapshot in place; the engine never terminates on
//! a transient error.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use rcpu_core::error::{RcpuError, Result};
use rcpu_core::stat::utilization_percent;
use rcpu_core::Snapshot;

use crate::obs::RcpuMetrics;
use crate::sampler::StatSource;

pub struct SamplerEngine {
    source: Box<dyn StatSource>,
    core_count: usize,
    interval: Duration,
    tx: watch::Sender<Snapshot>,
    metrics: Arc<RcpuMetrics>,
}

impl SamplerEngine {
    /// Build an engine sized to `core_count`. The returned receiver starts
    /// on an all-zero snapshot of the right length, so readers get neutral
    /// data before the first cycle completes.
    pub fn new(
        source: Box<dyn StatSource>,
        core_count: usize,
        interval: Duration,
        metrics: Arc<RcpuMetrics>,
    ) -> (Self, watch::Receiver<Snapshot>) {
        let (tx, rx) = watch::channel(Snapshot::zeroed(core_count));
        (
            Self {
                source,
                core_count,
                interval,
                tx,
                metrics,
            },
            rx,
        )
    }

    /// Another handle on the published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.tx.subscribe()
    }

    /// Run cycles until the token is cancelled. Shutdown is bounded by one
    /// interval: the token is checked at each cycle boundary and raced
    /// against the pacing sleep.
    pub async fn run(self, cancel: CancellationToken) {
        let mut source_down = false;

        loop {
            if cancel.is_cancelled() {
                break;
            }

            match self.cycle(&cancel).await {
                Ok(Some(snapshot)) => {
                    if source_down {
                        tracing::info!(source = %self.source.describe(), "sampling source recovered");
                        source_down = false;
                    }
                    self.metrics.sampler_cycles.inc(&[("outcome", "published")]);
                    // Send only fails when every receiver is gone, which
                    // means the process is shutting down anyway.
                    let _ = self.tx.send(snapshot);
                }
                Ok(None) => break, // cancelled mid-sleep
                Err(e) => {
                    self.metrics
                        .sampler_cycles
                        .inc(&[("outcome", skip_outcome(&e))]);

                    // Report source loss once, then stay quiet until it
                    // recovers; the previous snapshot keeps serving.
                    if matches!(e, RcpuError::SourceUnavailable(_)) && !source_down {
                        tracing::warn!(error = %e, "sampling source lost, keeping previous snapshot");
                        source_down = true;
                    } else if e.is_transient() {
                        tracing::debug!(error = %e, "sampling cycle skipped");
                    } else {
                        tracing::error!(error = %e, "sampling cycle failed");
                    }

                    if !self.pause(&cancel).await {
                        break;
                    }
                }
            }
        }

        tracing::info!("sampler engine stopped");
    }

    /// One sampling cycle: read, sleep, read, delta. Returns `None` when
    /// cancelled during the sleep. Errors abort the cycle as a whole; a
    /// regression on any core discards the entire array rather than
    /// publishing mixed-age values.
    pub async fn cycle(&self, cancel: &CancellationToken) -> Result<Option<Snapshot>> {
        let first = self.source.read_ticks(self.core_count).await?;

        if !self.pause(cancel).await {
            return Ok(None);
        }

        let second = self.source.read_ticks(self.core_count).await?;

        let mut percents = Vec::with_capacity(self.core_count);
        for (core, (prev, next)) in first.iter().zip(&second).enumerate() {
            percents.push(utilization_percent(core, prev, next)?);
        }

        Ok(Some(Snapshot::from_percents(percents)))
    }

    /// Sleep one interval, or return false if cancelled first.
    async fn pause(&self, cancel: &CancellationToken) -> bool {
        tokio::select! {
            _ = cancel.cancelled() => false,
            _ = tokio::time::sleep(self.interval) => true,
        }
    }
}

fn skip_outcome(e: &RcpuError) -> &'static str {
    match e {
        RcpuError::SourceUnavailable(_) => "skipped_unavailable",
        RcpuError::MalformedSample(_) => "skipped_malformed",
        RcpuError::CounterRegression { .. } => "skipped_regression",
        _ => "skipped_internal",
    }
}
