/*!
 * Permission Audit Trail
 * Tracks weight access checks and denials for security monitoring
 */

use crate::core::limits::{MAX_AUDIT_EVENTS, MAX_AUDIT_EVENTS_PER_PID as MAX_PID_EVENTS};
use crate::core::types::Pid;
use crate::permissions::types::{Action, PermissionRequest, PermissionResponse};
use ahash::RandomState;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, TimestampSeconds};
use std::collections::VecDeque;
use std::time::SystemTime;

/// Audit event severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditSeverity {
    Info,
    Warning,
    Critical,
}

/// Permission audit event
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AuditEvent {
    pub request: PermissionRequest,
    pub response: PermissionResponse,
    pub severity: AuditSeverity,
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub logged_at: SystemTime,
}

impl AuditEvent {
    pub fn new(request: PermissionRequest, response: PermissionResponse) -> Self {
        let severity = match (response.is_allowed(), request.action) {
            (true, _) => AuditSeverity::Info,
            // Denied writes mean someone tried to steer another process
            (false, Action::Write) => AuditSeverity::Critical,
            (false, Action::Read) => AuditSeverity::Warning,
        };

        Self {
            request,
            response,
            severity,
            logged_at: SystemTime::now(),
        }
    }
}

/// Audit logger for permission checks
pub struct AuditLogger {
    /// Global event log (ring buffer)
    events: RwLock<VecDeque<AuditEvent>>,
    /// Per-PID event logs
    pid_events: DashMap<Pid, VecDeque<AuditEvent>, RandomState>,
    /// Denial counters for monitoring
    denial_counts: DashMap<Pid, u64, RandomState>,
}

impl AuditLogger {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(VecDeque::with_capacity(MAX_AUDIT_EVENTS)),
            pid_events: DashMap::with_hasher(RandomState::new()),
            denial_counts: DashMap::with_hasher(RandomState::new()),
        }
    }

    /// Log a permission check
    pub fn log(&self, event: AuditEvent) {
        let pid = event.request.pid;
        let is_denied = !event.response.is_allowed();

        {
            let mut events = self.events.write();
            if events.len() >= MAX_AUDIT_EVENTS {
                events.pop_front();
            }
            events.push_back(event.clone());
        }

        {
            let mut entry = self
                .pid_events
                .entry(pid)
                .or_insert_with(|| VecDeque::with_capacity(MAX_PID_EVENTS));
            if entry.len() >= MAX_PID_EVENTS {
                entry.pop_front();
            }
            entry.push_back(event);
        }

        if is_denied {
            *self.denial_counts.entry(pid).or_insert(0) += 1;
        }
    }

    /// Most recent events, newest first
    pub fn recent(&self, limit: usize) -> Vec<AuditEvent> {
        let events = self.events.read();
        events.iter().rev().take(limit).cloned().collect()
    }

    /// Most recent events for a PID, newest first
    pub fn for_pid(&self, pid: Pid, limit: usize) -> Vec<AuditEvent> {
        self.pid_events
            .get(&pid)
            .map(|entry| entry.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default()
    }

    pub fn denial_count(&self, pid: Pid) -> u64 {
        self.denial_counts.get(&pid).map(|e| *e).unwrap_or(0)
    }

    /// Drop per-PID logs (global ring buffer is kept)
    pub fn clear_pid(&self, pid: Pid) {
        self.pid_events.remove(&pid);
        self.denial_counts.remove(&pid);
    }

    pub fn stats(&self) -> AuditStats {
        AuditStats {
            total_events: self.events.read().len(),
            total_denials: self.denial_counts.iter().map(|e| *e.value()).sum(),
            pids_tracked: self.pid_events.len(),
        }
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new()
    }
}

/// Audit statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditStats {
    pub total_events: usize,
    pub total_denials: u64,
    pub pids_tracked: usize,
}
