/*!
 * Syscall Handler Trait
 * Defines the interface for syscall handlers and handler registration
 */

use super::types::{Syscall, SyscallResult};
use crate::core::types::Pid;
use std::sync::Arc;

/// Trait for handling a category of syscalls
pub trait SyscallHandler: Send + Sync {
    /// Handle a syscall, or return `None` if it belongs to another handler
    fn handle(&self, pid: Pid, syscall: &Syscall) -> Option<SyscallResult>;

    /// Get the name of this handler (for logging/debugging)
    fn name(&self) -> &'static str;
}

/// Registry for syscall handlers
/// Dispatches syscalls to the first handler that accepts them
#[derive(Clone)]
pub struct SyscallHandlerRegistry {
    handlers: Arc<Vec<Arc<dyn SyscallHandler>>>,
}

impl SyscallHandlerRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a handler in the registry
    pub fn register(mut self, handler: Arc<dyn SyscallHandler>) -> Self {
        Arc::make_mut(&mut self.handlers).push(handler);
        self
    }

    /// Dispatch a syscall to the appropriate handler
    /// Returns None if no handler can handle this syscall
    pub fn dispatch(&self, pid: Pid, syscall: &Syscall) -> Option<SyscallResult> {
        self.handlers
            .iter()
            .find_map(|handler| handler.handle(pid, syscall))
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for SyscallHandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
