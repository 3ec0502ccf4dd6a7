/*!
 * Syscall Executor
 * Central entry point for structured and raw weight syscalls
 */

use super::abi;
use super::handler::SyscallHandlerRegistry;
use super::scheduler::SchedulerHandler;
use super::types::{Syscall, SyscallResult};
use crate::core::types::Pid;
use crate::monitoring::span_syscall;
use crate::scheduler::SchedulerSubsystem;
use std::sync::Arc;
use tracing::{info, warn};

/// System call executor
#[derive(Clone)]
pub struct SyscallExecutor {
    registry: SyscallHandlerRegistry,
    subsystem: SchedulerSubsystem,
}

impl SyscallExecutor {
    pub fn new(subsystem: SchedulerSubsystem) -> Self {
        let registry = SyscallHandlerRegistry::new()
            .register(Arc::new(SchedulerHandler::new(subsystem.clone())));
        info!(
            handlers = registry.handler_count(),
            "Syscall executor initialized"
        );
        Self {
            registry,
            subsystem,
        }
    }

    pub fn subsystem(&self) -> &SchedulerSubsystem {
        &self.subsystem
    }

    /// Execute a structured syscall on behalf of `pid`
    pub fn execute(&self, pid: Pid, syscall: Syscall) -> SyscallResult {
        let span = span_syscall(syscall.name(), pid);
        let _guard = span.enter();

        let result = self.registry.dispatch(pid, &syscall).unwrap_or_else(|| {
            warn!(pid, syscall = syscall.name(), "no handler for syscall");
            SyscallResult::error(format!("Unhandled syscall: {}", syscall.name()))
        });

        match &result {
            SyscallResult::Success { .. } => span.record_result(true),
            SyscallResult::Error { message } => span.record_error(message),
            SyscallResult::PermissionDenied { reason } => span.record_error(reason),
        }
        result
    }

    /// Execute a numbered syscall (380 set-weight, 381 get-weight)
    ///
    /// See [`abi::invoke`] for the return convention.
    pub fn execute_raw(&self, pid: Pid, nr: u64, args: &[i64]) -> i64 {
        let name = match nr {
            super::types::SYS_SET_WEIGHT => "set_weight",
            super::types::SYS_GET_WEIGHT => "get_weight",
            _ => "unknown",
        };
        let span = span_syscall(name, pid);
        let _guard = span.enter();

        let ret = abi::invoke(&self.subsystem, pid, nr, args);
        if ret == abi::SYSCALL_FAILED {
            if let Some(err) = abi::last_error() {
                span.record_error(&err.to_string());
            }
        } else {
            span.record_result(true);
        }
        ret
    }
}
