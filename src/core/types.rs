/*!
 * Core Types
 * Common types used across the kernel
 */

/// Process ID type
pub type Pid = u32;

/// Scheduling weight (signed, validated against the configured range)
pub type Weight = i32;

/// Angle in degrees; periodic with period 360 but never stored normalized
pub type Degrees = i32;

/// PID sentinel meaning "the calling process"
pub const SELF_PID: Pid = 0;

/// Resolve the `SELF_PID` sentinel against the caller
#[inline(always)]
pub const fn resolve_target(caller: Pid, pid: Pid) -> Pid {
    if pid == SELF_PID {
        caller
    } else {
        pid
    }
}
