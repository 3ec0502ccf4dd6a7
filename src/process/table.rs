/*!
 * Process Table
 * Minimal live-process registry backing PID resolution
 */

use super::traits::{ExitListener, ProcessResolver};
use super::types::{ProcessInfo, ProcessState};
use crate::core::types::Pid;
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Live process registry
///
/// PIDs are allocated monotonically starting at 1 and are never reused, so
/// PID 0 stays free for the "calling process" sentinel.
pub struct ProcessTable {
    processes: DashMap<Pid, ProcessInfo, RandomState>,
    next_pid: AtomicU32,
    listeners: RwLock<Vec<Arc<dyn ExitListener>>>,
}

impl ProcessTable {
    pub fn new() -> Self {
        Self {
            processes: DashMap::with_hasher(RandomState::new()),
            next_pid: AtomicU32::new(1),
            listeners: RwLock::new(Vec::new()),
        }
    }

    /// Register a process and return its PID
    pub fn spawn(&self, name: impl Into<String>) -> Pid {
        let pid = self.next_pid.fetch_add(1, Ordering::SeqCst);
        let name = name.into();
        debug!(pid, name = %name, "process registered");
        self.processes.insert(pid, ProcessInfo::new(pid, name));
        pid
    }

    /// Remove a process and notify exit listeners
    ///
    /// Returns the final process record, or `None` if the PID was not live.
    pub fn exit(&self, pid: Pid) -> Option<ProcessInfo> {
        let (_, mut info) = self.processes.remove(&pid)?;
        info.state = ProcessState::Terminated;

        let listeners = self.listeners.read();
        for listener in listeners.iter() {
            listener.on_exit(pid);
        }

        info!(pid, name = %info.name, listeners = listeners.len(), "process exited");
        Some(info)
    }

    /// Subscribe to process exit notifications
    pub fn subscribe(&self, listener: Arc<dyn ExitListener>) {
        self.listeners.write().push(listener);
    }

    pub fn get(&self, pid: Pid) -> Option<ProcessInfo> {
        self.processes.get(&pid).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl Default for ProcessTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessResolver for ProcessTable {
    #[inline]
    fn is_alive(&self, pid: Pid) -> bool {
        self.processes.contains_key(&pid)
    }
}
