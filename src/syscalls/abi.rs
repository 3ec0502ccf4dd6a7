/*!
 * Raw Syscall ABI
 * Numeric entry points returning integer status codes
 *
 * Calls return a non-negative value on success and -1 on failure. The cause
 * of the last failure on the current thread is kept in a last-error slot,
 * readable through [`last_error`] and [`last_errno`].
 */

use super::types::{Syscall, SYS_GET_WEIGHT, SYS_SET_WEIGHT};
use crate::core::errors::{WeightError, WeightResult};
use crate::core::types::{Pid, SELF_PID};
use crate::scheduler::WeightControl;
use std::cell::RefCell;

/// Return value signalling failure
pub const SYSCALL_FAILED: i64 = -1;

thread_local! {
    static LAST_ERROR: RefCell<Option<WeightError>> = const { RefCell::new(None) };
}

/// Cause of the most recent failed call on this thread
pub fn last_error() -> Option<WeightError> {
    LAST_ERROR.with(|slot| slot.borrow().clone())
}

/// Errno of the most recent failed call on this thread, or 0
pub fn last_errno() -> i32 {
    LAST_ERROR.with(|slot| slot.borrow().as_ref().map(WeightError::errno).unwrap_or(0))
}

pub fn clear_last_error() {
    LAST_ERROR.with(|slot| slot.borrow_mut().take());
}

fn set_last_error(err: WeightError) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(err));
}

fn pid_arg(raw: Option<i64>) -> WeightResult<Pid> {
    match raw {
        None => Ok(SELF_PID),
        Some(raw) => Pid::try_from(raw)
            .map_err(|_| WeightError::invalid_argument(format!("pid {} out of range", raw))),
    }
}

/// Decode a raw call into its structured form
///
/// Argument layout: `set-weight(pid, weight)`, `get-weight(pid)`. An omitted
/// pid means the caller.
pub fn decode(nr: u64, args: &[i64]) -> WeightResult<Syscall> {
    match nr {
        SYS_SET_WEIGHT => {
            let target_pid = pid_arg(args.first().copied())?;
            let weight = args
                .get(1)
                .copied()
                .ok_or_else(|| WeightError::invalid_argument("missing weight argument"))?;
            Ok(Syscall::SetWeight { target_pid, weight })
        }
        SYS_GET_WEIGHT => Ok(Syscall::GetWeight {
            target_pid: pid_arg(args.first().copied())?,
        }),
        other => Err(WeightError::Unsupported(other)),
    }
}

fn dispatch(control: &dyn WeightControl, caller: Pid, nr: u64, args: &[i64]) -> WeightResult<i64> {
    match decode(nr, args)? {
        Syscall::SetWeight { target_pid, weight } => {
            control.set_weight(caller, target_pid, weight).map(|()| 0)
        }
        Syscall::GetWeight { target_pid } => {
            control.get_weight(caller, target_pid).map(i64::from)
        }
        _ => Err(WeightError::Unsupported(nr)),
    }
}

/// Execute a raw call on behalf of `caller`
///
/// Returns the weight (get), 0 (set), or [`SYSCALL_FAILED`] with the cause in
/// the last-error slot. The slot is left untouched on success.
pub fn invoke(control: &dyn WeightControl, caller: Pid, nr: u64, args: &[i64]) -> i64 {
    match dispatch(control, caller, nr, args) {
        Ok(value) => value,
        Err(err) => {
            set_last_error(err);
            SYSCALL_FAILED
        }
    }
}
