/*!
 * Scheduler Traits
 * Interface definitions for weight control
 */

use crate::core::errors::WeightResult;
use crate::core::types::{Pid, Weight};

/// Read/write access to per-process scheduling weights
///
/// `caller` is the process issuing the call; `pid` is the target, with
/// `SELF_PID` (0) meaning the caller.
pub trait WeightControl: Send + Sync {
    /// Get the current weight of `pid`
    fn get_weight(&self, caller: Pid, pid: Pid) -> WeightResult<Weight>;

    /// Set the weight of `pid`
    ///
    /// Takes an i64 so out-of-range values from the raw ABI are reported as
    /// `InvalidWeight` instead of being truncated.
    fn set_weight(&self, caller: Pid, pid: Pid, weight: i64) -> WeightResult<()>;
}
