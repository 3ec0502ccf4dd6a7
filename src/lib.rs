/*!
 * Scheduler Weight Library
 * Per-process weight control, the circular window predicate, and the
 * syscall surface exposing both
 */

pub mod core;
pub mod monitoring;
pub mod permissions;
pub mod process;
pub mod scheduler;
pub mod syscalls;

// Re-exports
pub use crate::core::errors::{ConfigError, KernelError, Result, WeightError, WeightResult};
pub use crate::core::types::{Degrees, Pid, Weight, SELF_PID};
pub use monitoring::init_tracing;
pub use permissions::{Capability, PermissionManager};
pub use process::ProcessTable;
pub use scheduler::{in_window, SchedulerConfig, SchedulerSubsystem, WeightControl, WindowGate};
pub use syscalls::{Syscall, SyscallExecutor, SyscallResult, SYS_GET_WEIGHT, SYS_SET_WEIGHT};
