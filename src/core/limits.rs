/*!
 * System Limits and Constants
 *
 * Centralized location for scheduler-wide limits and thresholds.
 * Values are grouped by domain.
 */

use crate::core::types::Weight;
use std::time::Duration;

// =============================================================================
// SCHEDULING WEIGHT
// =============================================================================

/// Baseline weight of a process that never had its weight set
pub const DEFAULT_WEIGHT: Weight = 10;

/// Smallest accepted weight (weights are multiplicative shares, so > 0)
pub const MIN_WEIGHT: Weight = 1;

/// Largest accepted weight
pub const MAX_WEIGHT: Weight = 1000;

// =============================================================================
// ANGLES
// =============================================================================

/// Modulus of the circular degree scale
pub const DEGREES_PER_TURN: i64 = 360;

// =============================================================================
// AUDIT
// =============================================================================

/// Global audit ring buffer size
pub const MAX_AUDIT_EVENTS: usize = 1000;

/// Per-PID audit ring buffer size
pub const MAX_AUDIT_EVENTS_PER_PID: usize = 100;

// =============================================================================
// TRACING
// =============================================================================

/// Syscalls slower than this are logged at warn level
pub const SLOW_SYSCALL_THRESHOLD: Duration = Duration::from_millis(10);
