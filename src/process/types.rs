/*!
 * Process Types
 * Common types for process identity
 */

use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// Process state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Process is live and addressable by PID
    Running,
    /// Process has terminated
    Terminated,
}

/// Process metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessInfo {
    pub pid: Pid,
    pub name: String,
    pub state: ProcessState,
}

impl ProcessInfo {
    pub fn new(pid: Pid, name: String) -> Self {
        Self {
            pid,
            name,
            state: ProcessState::Running,
        }
    }
}
