/*!
 * Lock-Free Weight Statistics
 * Atomic counters for the weight control hot path
 */

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic weight control counters
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - Relaxed ordering; snapshots are advisory
#[repr(C, align(64))]
#[derive(Default)]
pub struct AtomicWeightStats {
    reads: AtomicU64,
    writes: AtomicU64,
    rejected: AtomicU64,
    gated_skips: AtomicU64,
}

impl AtomicWeightStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline(always)]
    pub fn inc_reads(&self) {
        self.reads.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_writes(&self) {
        self.writes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn inc_gated_skips(&self) {
        self.gated_skips.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> WeightStats {
        WeightStats {
            reads: self.reads.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            gated_skips: self.gated_skips.load(Ordering::Relaxed),
        }
    }
}

/// Weight control statistics snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct WeightStats {
    /// Successful weight reads
    pub reads: u64,
    /// Successful weight writes (including resets and gated applies)
    pub writes: u64,
    /// Calls rejected with an error
    pub rejected: u64,
    /// Gated applies skipped because the angle was outside the window
    pub gated_skips: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let stats = AtomicWeightStats::new();
        stats.inc_reads();
        stats.inc_reads();
        stats.inc_writes();
        stats.inc_rejected();

        let snap = stats.snapshot();
        assert_eq!(snap.reads, 2);
        assert_eq!(snap.writes, 1);
        assert_eq!(snap.rejected, 1);
        assert_eq!(snap.gated_skips, 0);
    }
}
