/*!
 * Syscalls Module
 * Structured and raw entry points for weight control
 */

pub mod abi;
pub mod executor;
pub mod handler;
pub mod scheduler;
pub mod types;

pub use executor::SyscallExecutor;
pub use handler::{SyscallHandler, SyscallHandlerRegistry};
pub use scheduler::SchedulerHandler;
pub use types::{Syscall, SyscallResult, SYS_GET_WEIGHT, SYS_SET_WEIGHT};
