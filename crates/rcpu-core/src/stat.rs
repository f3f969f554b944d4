//! Kernel tick-counter parsing and utilization arithmetic.
//!
//! `/proc/stat` opens with one aggregate `cpu` line followed by one `cpu<N>`
//! line per logical core, then unrelated rows (`intr`, `ctxt`, ...). A CPU row
//! carries up to ten monotonically non-decreasing counters: user, nice,
//! system, idle, iowait, irq, softirq, steal, guest, guest_nice.
//!
//! Parsing stops at the first line that does not start with the `c` prefix,
//! which in practice is `intr`. The aggregate line is counted like any other
//! core on purpose; see `count_cpu_lines`.

use crate::error::{RcpuError, Result};

/// Counters per CPU row.
pub const TICK_FIELDS: usize = 10;

/// Index of the idle counter within a row.
pub const IDLE_FIELD: usize = 3;

/// Minimum counters a row must carry to be usable (user..idle).
pub const MIN_FIELDS: usize = 4;

/// One row of CPU tick counters, zero-filled past what the kernel reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTicks {
    fields: [u64; TICK_FIELDS],
}

impl CpuTicks {
    pub fn new(fields: [u64; TICK_FIELDS]) -> Self {
        Self { fields }
    }

    /// Build a row from cumulative totals, everything non-idle in `user`.
    /// Used by the synthetic source so fabricated counters flow through the
    /// same delta math as real ones.
    pub fn from_total_idle(total: u64, idle: u64) -> Self {
        let mut fields = [0u64; TICK_FIELDS];
        fields[0] = total.saturating_sub(idle);
        fields[IDLE_FIELD] = idle;
        Self { fields }
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.fields.iter().sum()
    }

    /// Idle ticks (field index 3).
    pub fn idle(&self) -> u64 {
        self.fields[IDLE_FIELD]
    }
}

/// Whether a line belongs to the leading CPU block.
///
/// Matches the original discovery rule: first character `c` followed by an
/// identifier, which accepts both `cpu` and `cpu<N>`. Scanning stops at the
/// first non-matching line (`intr` on a real system).
pub fn is_cpu_line(line: &str) -> bool {
    line.starts_with('c')
}

/// Parse one CPU row into tick counters.
///
/// The leading `cpu*` label is skipped; up to [`TICK_FIELDS`] counters are
/// read and missing trailing counters are zero. Fewer than [`MIN_FIELDS`]
/// parseable counters is a malformed row.
pub fn parse_cpu_line(line: &str) -> Result<CpuTicks> {
    let mut fields = [0u64; TICK_FIELDS];
    let mut parsed = 0;

    for tok in line.split_whitespace().skip(1).take(TICK_FIELDS) {
        match tok.parse::<u64>() {
            Ok(v) => {
                fields[parsed] = v;
                parsed += 1;
            }
            Err(_) => break,
        }
    }

    if parsed < MIN_FIELDS {
        return Err(RcpuError::MalformedSample(format!(
            "cpu row has {parsed} counters, need at least {MIN_FIELDS}"
        )));
    }

    Ok(CpuTicks::new(fields))
}

/// Count the leading CPU rows of an accounting dump.
///
/// Deliberately includes the aggregate `cpu` line, so the result is one
/// larger than the logical core count. The published array length inherits
/// this and it is part of the API contract; do not "fix" it here.
pub fn count_cpu_lines(text: &str) -> usize {
    text.lines().take_while(|l| is_cpu_line(l)).count()
}

/// Parse the leading CPU block of an accounting dump, in source order.
///
/// Stops at the first non-CPU line. A short row inside the block aborts the
/// whole parse; the caller keeps its previous snapshot.
pub fn parse_cpu_block(text: &str) -> Result<Vec<CpuTicks>> {
    text.lines()
        .take_while(|l| is_cpu_line(l))
        .map(parse_cpu_line)
        .collect()
}

/// Utilization percentage from two consecutive readings of one core.
///
/// `floor(((dtotal - didle) / dtotal) * 100)` with f64 division before
/// truncation. A zero total delta (no ticks elapsed at clock granularity)
/// clamps to 0% instead of dividing. A negative total delta means the
/// counters went backwards and the cycle must be discarded.
pub fn utilization_percent(core: usize, prev: &CpuTicks, next: &CpuTicks) -> Result<u8> {
    let (prev_total, next_total) = (prev.total(), next.total());
    let dtotal = next_total
        .checked_sub(prev_total)
        .ok_or(RcpuError::CounterRegression {
            core,
            prev: prev_total,
            next: next_total,
        })?;

    if dtotal == 0 {
        return Ok(0);
    }

    // Idle can outpace total only through rounding in fabricated data;
    // saturate so busy never underflows.
    let didle = next.idle().saturating_sub(prev.idle());
    let busy = dtotal.saturating_sub(didle);

    Ok(((busy as f64 / dtotal as f64) * 100.0) as u8)
}
