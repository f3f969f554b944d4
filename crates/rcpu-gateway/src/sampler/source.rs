//! Tick-counter sources.
//!
//! Two implementations behind one seam: `ProcStatSource` reads the kernel's
//! per-CPU accounting file, `SyntheticSource` fabricates plausible counters
//! so the dashboard stays demonstrable on hosts without one. Selection
//! happens once at startup in `detect_source`.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;

use rcpu_core::error::{RcpuError, Result};
use rcpu_core::stat::{count_cpu_lines, parse_cpu_block};
use rcpu_core::CpuTicks;

use crate::config::SourcesSection;

/// A source of per-core tick counters.
///
/// `core_count` runs exactly once at startup and fixes the row count for
/// process lifetime; `read_ticks` is called twice per sampling cycle.
#[async_trait]
pub trait StatSource: Send + Sync {
    /// Number of CPU rows this source exposes, aggregate line included.
    async fn core_count(&self) -> Result<usize>;

    /// One tick row per core, in discovery order. Must return exactly
    /// `expected` rows or fail the cycle.
    async fn read_ticks(&self, expected: usize) -> Result<Vec<CpuTicks>>;

    /// Human-readable source name for logs.
    fn describe(&self) -> String;
}

/// Real kernel counters from the per-CPU accounting file.
pub struct ProcStatSource {
    path: PathBuf,
}

impl ProcStatSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_all(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| RcpuError::SourceUnavailable(format!("{}: {e}", self.path.display())))
    }
}

#[async_trait]
impl StatSource for ProcStatSource {
    /// Counts the leading `c`-prefixed rows, which includes the aggregate
    /// `cpu` line: the result is one larger than the logical core count.
    /// The API array length inherits this on purpose.
    async fn core_count(&self) -> Result<usize> {
        let text = self.read_all().await?;
        let count = count_cpu_lines(&text);
        if count == 0 {
            return Err(RcpuError::SourceUnavailable(format!(
                "{}: no cpu rows",
                self.path.display()
            )));
        }
        Ok(count)
    }

    async fn read_ticks(&self, expected: usize) -> Result<Vec<CpuTicks>> {
        let text = self.read_all().await?;
        let mut rows = parse_cpu_block(&text)?;

        if rows.len() < expected {
            return Err(RcpuError::MalformedSample(format!(
                "expected {expected} cpu rows, got {}",
                rows.len()
            )));
        }
        // A row appearing mid-run (cpu hotplug) is ignored; the snapshot
        // length is fixed at discovery time.
        rows.truncate(expected);

        Ok(rows)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fabricated counters for hosts without the accounting file.
///
/// Each read advances every core by a fixed 100 total ticks with a
/// pseudo-random idle share, so consecutive reads delta to a uniform
/// utilization in [0, 100) through the exact same math as the real source.
/// Pseudo-random without an external crate: xorshift seeded from the clock.
pub struct SyntheticSource {
    cores: usize,
    state: Mutex<SynthState>,
}

struct SynthState {
    rng: u64,
    totals: Vec<(u64, u64)>, // cumulative (total, idle) per core
}

const TICKS_PER_READ: u64 = 100;

impl SyntheticSource {
    pub fn new(cores: usize) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .subsec_nanos() as u64
            | 1;
        Self {
            cores,
            state: Mutex::new(SynthState {
                rng: seed,
                totals: vec![(0, 0); cores],
            }),
        }
    }
}

impl SynthState {
    fn next_rand(&mut self) -> u64 {
        // xorshift64
        let mut x = self.rng;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.rng = x;
        x
    }
}

#[async_trait]
impl StatSource for SyntheticSource {
    async fn core_count(&self) -> Result<usize> {
        Ok(self.cores)
    }

    async fn read_ticks(&self, expected: usize) -> Result<Vec<CpuTicks>> {
        let mut st = self
            .state
            .lock()
            .map_err(|_| RcpuError::Internal("synthetic state poisoned".into()))?;

        let mut rows = Vec::with_capacity(expected);
        for i in 0..expected.min(self.cores) {
            let busy = st.next_rand() % TICKS_PER_READ;
            let (total, idle) = &mut st.totals[i];
            *total += TICKS_PER_READ;
            *idle += TICKS_PER_READ - busy;
            rows.push(CpuTicks::from_total_idle(*total, *idle));
        }

        if rows.len() < expected {
            return Err(RcpuError::MalformedSample(format!(
                "synthetic source has {} cores, asked for {expected}",
                self.cores
            )));
        }

        Ok(rows)
    }

    fn describe(&self) -> String {
        format!("synthetic ({} cores)", self.cores)
    }
}

/// Probe the accounting file once and pick the source for this process.
///
/// Returns the source together with its discovered core count, which sizes
/// every downstream array.
pub async fn detect_source(sources: &SourcesSection) -> (Box<dyn StatSource>, usize) {
    let real = ProcStatSource::new(&sources.proc_stat);
    match real.core_count().await {
        Ok(count) => {
            tracing::info!(source = %real.describe(), cores = count, "using kernel counters");
            (Box::new(real), count)
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                fallback_cores = sources.fallback_cores,
                "accounting source unavailable, using synthetic counters"
            );
            let synth = SyntheticSource::new(sources.fallback_cores);
            let count = sources.fallback_cores;
            (Box::new(synth), count)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn synthetic_reports_configured_cores() {
        let s = SyntheticSource::new(3);
        assert_eq!(s.core_count().await.unwrap(), 3);
        assert_eq!(s.read_ticks(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn synthetic_counters_are_monotonic() {
        let s = SyntheticSource::new(2);
        let a = s.read_ticks(2).await.unwrap();
        let b = s.read_ticks(2).await.unwrap();
        for (prev, next) in a.iter().zip(&b) {
            assert!(next.total() > prev.total());
            assert!(next.idle() >= prev.idle());
        }
    }

    #[tokio::test]
    async fn synthetic_deltas_stay_in_percent_range() {
        let s = SyntheticSource::new(4);
        let mut prev = s.read_ticks(4).await.unwrap();
        for _ in 0..20 {
            let next = s.read_ticks(4).await.unwrap();
            for (i, (p, n)) in prev.iter().zip(&next).enumerate() {
                let pct = rcpu_core::stat::utilization_percent(i, p, n).unwrap();
                assert!(pct < 100);
            }
            prev = next;
        }
    }

    #[tokio::test]
    async fn missing_file_is_source_unavailable() {
        let s = ProcStatSource::new("/definitely/not/a/proc/stat");
        let err = s.core_count().await.unwrap_err();
        assert!(matches!(err, RcpuError::SourceUnavailable(_)));
    }
}
