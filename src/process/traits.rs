/*!
 * Process Traits
 * Seams between the weight subsystem and whatever owns the process table
 */

use crate::core::types::Pid;

/// Resolves a PID to a live process
pub trait ProcessResolver: Send + Sync {
    /// Check if a process is live
    fn is_alive(&self, pid: Pid) -> bool;
}

/// Receives notification when a process terminates
///
/// Per-process state keyed by PID (weight records, capability grants) is
/// dropped from here so it never outlives the process.
pub trait ExitListener: Send + Sync {
    fn on_exit(&self, pid: Pid);
}
