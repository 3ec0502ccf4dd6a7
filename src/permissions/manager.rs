/*!
 * Permission Manager
 * Decides who may read or write a process's scheduling weight
 */

use super::audit::{AuditEvent, AuditLogger, AuditStats};
use super::types::{
    Action, Capability, PermissionChecker, PermissionRequest, PermissionResponse,
};
use crate::core::types::Pid;
use crate::process::ExitListener;
use ahash::RandomState;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Central permission manager
///
/// A process may always act on itself. Acting on another process needs a
/// capability covering the action, unless cross-process reads are opened up
/// by configuration.
#[derive(Clone)]
pub struct PermissionManager {
    grants: Arc<DashMap<Pid, Vec<Capability>, RandomState>>,
    audit: Arc<AuditLogger>,
    allow_cross_process_read: bool,
}

impl PermissionManager {
    pub fn new() -> Self {
        debug!("Initializing scheduler permission manager");
        Self {
            grants: Arc::new(DashMap::with_hasher(RandomState::new())),
            audit: Arc::new(AuditLogger::new()),
            allow_cross_process_read: false,
        }
    }

    /// Let any live process read any other process's weight
    pub fn with_cross_process_read(mut self, allow: bool) -> Self {
        self.allow_cross_process_read = allow;
        self
    }

    /// Grant a capability to a PID
    pub fn grant(&self, pid: Pid, capability: Capability) {
        let mut caps = self.grants.entry(pid).or_default();
        if !caps.contains(&capability) {
            caps.push(capability);
            info!(pid, ?capability, "capability granted");
        }
    }

    /// Revoke a capability from a PID
    pub fn revoke(&self, pid: Pid, capability: Capability) {
        if let Some(mut caps) = self.grants.get_mut(&pid) {
            caps.retain(|c| *c != capability);
            info!(pid, ?capability, "capability revoked");
        }
    }

    pub fn has_capability(&self, pid: Pid, capability: Capability) -> bool {
        self.grants
            .get(&pid)
            .map(|caps| caps.contains(&capability))
            .unwrap_or(false)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn audit_stats(&self) -> AuditStats {
        self.audit.stats()
    }

    fn holds_covering(&self, pid: Pid, action: Action) -> Option<Capability> {
        self.grants
            .get(&pid)
            .and_then(|caps| caps.iter().copied().find(|c| c.permits(action)))
    }
}

impl Default for PermissionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PermissionChecker for PermissionManager {
    fn check(&self, request: &PermissionRequest) -> PermissionResponse {
        if request.is_self() {
            return PermissionResponse::allow(request.clone(), "own process");
        }

        if request.action == Action::Read && self.allow_cross_process_read {
            return PermissionResponse::allow(request.clone(), "cross-process reads enabled");
        }

        match self.holds_covering(request.pid, request.action) {
            Some(capability) => {
                PermissionResponse::allow(request.clone(), format!("holds {:?}", capability))
            }
            None => {
                warn!(
                    pid = request.pid,
                    resource = ?request.resource,
                    action = ?request.action,
                    "permission denied"
                );
                PermissionResponse::deny(
                    request.clone(),
                    format!("PID {} lacks a scheduler capability", request.pid),
                )
            }
        }
    }

    fn check_and_audit(&self, request: &PermissionRequest) -> PermissionResponse {
        let response = self.check(request);
        self.audit.log(AuditEvent::new(request.clone(), response.clone()));
        response
    }
}

impl ExitListener for PermissionManager {
    fn on_exit(&self, pid: Pid) {
        if self.grants.remove(&pid).is_some() {
            debug!(pid, "capabilities dropped on exit");
        }
        self.audit.clear_pid(pid);
    }
}
