//! The published utilization snapshot.
//!
//! Serializes transparently as a JSON array of integers, which is exactly the
//! `cpu.api` response body.

use serde::Serialize;

/// Immutable per-core utilization percentages, one value in 0..=100 per
/// discovered CPU row. Replaced as a whole on publish; readers clone it and
/// never observe a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    cores: Vec<u8>,
}

impl Snapshot {
    /// Neutral all-zero snapshot served before the first cycle completes.
    pub fn zeroed(core_count: usize) -> Self {
        Self {
            cores: vec![0; core_count],
        }
    }

    pub fn from_percents(cores: Vec<u8>) -> Self {
        Self { cores }
    }

    pub fn percents(&self) -> &[u8] {
        &self.cores
    }

    pub fn len(&self) -> usize {
        self.cores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cores.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn zeroed_has_requested_length() {
        let s = Snapshot::zeroed(5);
        assert_eq!(s.len(), 5);
        assert!(s.percents().iter().all(|&p| p == 0));
    }

    #[test]
    fn serializes_as_plain_json_array() {
        let s = Snapshot::from_percents(vec![0, 42, 100]);
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(json, "[0,42,100]");
    }
}
