/*!
 * Weight Store
 * Concurrent PID -> weight table with per-record atomic updates
 */

use crate::core::types::{Pid, Weight};
use crate::process::ExitListener;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI32, Ordering};
use tracing::debug;

/// Explicitly configured weights, keyed by PID
///
/// Only weights that were set are stored; every other PID reads as the
/// baseline. Each record is an `AtomicI32`, so a reader sees either the old
/// or the new value of a concurrent write, never a mix of both.
pub struct WeightStore {
    weights: DashMap<Pid, AtomicI32, RandomState>,
    baseline: Weight,
}

impl WeightStore {
    pub fn new(baseline: Weight) -> Self {
        Self {
            weights: DashMap::with_hasher(RandomState::new()),
            baseline,
        }
    }

    /// Weight reported for PIDs without a record
    #[inline]
    pub fn baseline(&self) -> Weight {
        self.baseline
    }

    /// Current weight of `pid`, or the baseline
    #[inline]
    pub fn load(&self, pid: Pid) -> Weight {
        self.weights
            .get(&pid)
            .map(|slot| slot.load(Ordering::Acquire))
            .unwrap_or(self.baseline)
    }

    /// Store `weight` for `pid`, returning the weight it replaced
    pub fn swap(&self, pid: Pid, weight: Weight) -> Weight {
        // Fast path: record exists, update under the shard read lock
        if let Some(slot) = self.weights.get(&pid) {
            return slot.swap(weight, Ordering::AcqRel);
        }

        let baseline = self.baseline;
        let slot = self
            .weights
            .entry(pid)
            .or_insert_with(|| AtomicI32::new(baseline));
        slot.swap(weight, Ordering::AcqRel)
    }

    /// Drop the record for `pid`, returning it if one was set
    pub fn remove(&self, pid: Pid) -> Option<Weight> {
        self.weights
            .remove(&pid)
            .map(|(_, slot)| slot.into_inner())
    }

    /// Explicitly set weights, sorted by PID
    pub fn snapshot(&self) -> Vec<(Pid, Weight)> {
        let mut entries: Vec<(Pid, Weight)> = self
            .weights
            .iter()
            .map(|entry| (*entry.key(), entry.value().load(Ordering::Acquire)))
            .collect();
        entries.sort_unstable_by_key(|(pid, _)| *pid);
        entries
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl ExitListener for WeightStore {
    fn on_exit(&self, pid: Pid) {
        if let Some(weight) = self.remove(pid) {
            debug!(pid, weight, "weight record dropped on exit");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_unset_reads_baseline() {
        let store = WeightStore::new(10);
        assert_eq!(store.load(42), 10);
        assert!(store.is_empty());
    }

    #[test]
    fn test_swap_returns_previous() {
        let store = WeightStore::new(10);
        assert_eq!(store.swap(1, 20), 10);
        assert_eq!(store.swap(1, 30), 20);
        assert_eq!(store.load(1), 30);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_restores_baseline() {
        let store = WeightStore::new(10);
        store.swap(3, 99);
        assert_eq!(store.remove(3), Some(99));
        assert_eq!(store.load(3), 10);
        assert_eq!(store.remove(3), None);
    }

    #[test]
    fn test_snapshot_sorted() {
        let store = WeightStore::new(10);
        store.swap(9, 1);
        store.swap(2, 5);
        store.swap(4, 7);
        assert_eq!(store.snapshot(), vec![(2, 5), (4, 7), (9, 1)]);
    }

    #[test]
    fn test_exit_listener_drops_record() {
        let store = WeightStore::new(10);
        store.swap(5, 50);
        store.on_exit(5);
        assert!(store.is_empty());
    }

    #[test]
    fn test_concurrent_writers_never_tear() {
        let store = Arc::new(WeightStore::new(10));
        let values = [0x0000_FFFF, 0x7FFF_0000];

        let handles: Vec<_> = values
            .iter()
            .map(|&value| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..10_000 {
                        store.swap(1, value);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let final_weight = store.load(1);
        assert!(values.contains(&final_weight), "torn write: {:#x}", final_weight);
    }
}
