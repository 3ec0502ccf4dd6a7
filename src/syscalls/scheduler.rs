/*!
 * Scheduler Syscall Handler
 * Handles weight control syscalls
 */

use super::handler::SyscallHandler;
use super::types::{Syscall, SyscallResult};
use crate::core::types::Pid;
use crate::scheduler::{in_window, SchedulerSubsystem, WeightControl};
use tracing::error;

/// Handler for weight control syscalls
pub struct SchedulerHandler {
    subsystem: SchedulerSubsystem,
}

impl SchedulerHandler {
    #[inline]
    pub fn new(subsystem: SchedulerSubsystem) -> Self {
        Self { subsystem }
    }
}

impl SyscallHandler for SchedulerHandler {
    fn handle(&self, pid: Pid, syscall: &Syscall) -> Option<SyscallResult> {
        let result = match *syscall {
            Syscall::SetWeight { target_pid, weight } => {
                match self.subsystem.set_weight(pid, target_pid, weight) {
                    Ok(()) => SyscallResult::success(),
                    Err(e) => e.into(),
                }
            }
            Syscall::GetWeight { target_pid } => {
                match self.subsystem.get_weight(pid, target_pid) {
                    Ok(weight) => SyscallResult::success_with_weight(weight),
                    Err(e) => e.into(),
                }
            }
            Syscall::ResetWeight { target_pid } => {
                match self.subsystem.reset_weight(pid, target_pid) {
                    Ok(previous) => SyscallResult::success_with_weight(previous),
                    Err(e) => e.into(),
                }
            }
            Syscall::InWindow { now, degree, range } => {
                SyscallResult::success_with_flag(in_window(now, degree, range))
            }
            Syscall::GetWeightStats => match serde_json::to_vec(&self.subsystem.stats()) {
                Ok(data) => SyscallResult::success_with_data(data),
                Err(e) => {
                    error!(error = %e, "failed to serialize weight stats");
                    SyscallResult::error("Serialization failed")
                }
            },
        };
        Some(result)
    }

    #[inline]
    fn name(&self) -> &'static str {
        "scheduler_handler"
    }
}
