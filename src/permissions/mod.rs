/*!
 * Permissions Module
 * Permission checking and audit logging for cross-process weight access
 */

pub mod audit;
pub mod manager;
pub mod types;

pub use audit::{AuditEvent, AuditLogger, AuditSeverity, AuditStats};
pub use manager::PermissionManager;
pub use types::{
    Action, Capability, PermissionChecker, PermissionRequest, PermissionResponse, Resource,
};
