/*!
 * Permission Types
 * Core types for scheduler permission checking
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

/// Resource being accessed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "resource")]
pub enum Resource {
    /// Scheduling attributes of a process
    Process(Pid),
}

/// Action being performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Write,
}

/// Privilege held by a process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// Read any process's scheduling weight
    SchedulerInspect,
    /// Read and write any process's scheduling weight
    SchedulerAdmin,
}

impl Capability {
    /// Whether this capability covers `action` on another process
    #[inline]
    pub const fn permits(self, action: Action) -> bool {
        match (self, action) {
            (Self::SchedulerAdmin, _) => true,
            (Self::SchedulerInspect, Action::Read) => true,
            (Self::SchedulerInspect, Action::Write) => false,
        }
    }
}

/// Permission request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionRequest {
    /// Process making the request
    pub pid: Pid,
    /// Resource being accessed
    pub resource: Resource,
    /// Action being performed
    pub action: Action,
    /// When the request was made
    pub timestamp: SystemTime,
}

impl PermissionRequest {
    pub fn new(pid: Pid, resource: Resource, action: Action) -> Self {
        Self {
            pid,
            resource,
            action,
            timestamp: SystemTime::now(),
        }
    }

    /// Weight read request
    pub fn weight_read(pid: Pid, target: Pid) -> Self {
        Self::new(pid, Resource::Process(target), Action::Read)
    }

    /// Weight write request
    pub fn weight_write(pid: Pid, target: Pid) -> Self {
        Self::new(pid, Resource::Process(target), Action::Write)
    }

    /// Whether the request targets the requesting process itself
    #[inline]
    pub fn is_self(&self) -> bool {
        match self.resource {
            Resource::Process(target) => target == self.pid,
        }
    }
}

/// Permission response/decision
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionResponse {
    /// Request that was evaluated
    pub request: PermissionRequest,
    /// Whether permission is granted
    pub allowed: bool,
    /// Reason for decision
    pub reason: String,
    /// Decision time
    pub decided_at: SystemTime,
}

impl PermissionResponse {
    pub fn allow(request: PermissionRequest, reason: impl Into<String>) -> Self {
        Self {
            request,
            allowed: true,
            reason: reason.into(),
            decided_at: SystemTime::now(),
        }
    }

    pub fn deny(request: PermissionRequest, reason: impl Into<String>) -> Self {
        Self {
            request,
            allowed: false,
            reason: reason.into(),
            decided_at: SystemTime::now(),
        }
    }

    #[inline]
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Permission checking interface
pub trait PermissionChecker: Send + Sync {
    /// Evaluate a request
    fn check(&self, request: &PermissionRequest) -> PermissionResponse;

    /// Evaluate a request and record it in the audit trail
    fn check_and_audit(&self, request: &PermissionRequest) -> PermissionResponse;
}
