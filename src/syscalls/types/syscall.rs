/*!
 * Syscall Enum
 * Structured system calls for weight control
 */

use crate::core::types::{Degrees, Pid};
use serde::{Deserialize, Serialize};

/// Raw number of the set-weight call
pub const SYS_SET_WEIGHT: u64 = 380;

/// Raw number of the get-weight call
pub const SYS_GET_WEIGHT: u64 = 381;

/// System call types
///
/// `target_pid` of 0 addresses the calling process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "syscall")]
#[non_exhaustive]
pub enum Syscall {
    /// Set the scheduling weight of a process
    SetWeight {
        #[serde(default)]
        target_pid: Pid,
        weight: i64,
    },

    /// Get the scheduling weight of a process
    GetWeight {
        #[serde(default)]
        target_pid: Pid,
    },

    /// Restore a process's baseline weight
    ResetWeight {
        #[serde(default)]
        target_pid: Pid,
    },

    /// Evaluate the circular window predicate
    InWindow {
        now: Degrees,
        degree: Degrees,
        range: Degrees,
    },

    /// Get weight control statistics
    GetWeightStats,
}

impl Syscall {
    /// Name used in tracing spans
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetWeight { .. } => "set_weight",
            Self::GetWeight { .. } => "get_weight",
            Self::ResetWeight { .. } => "reset_weight",
            Self::InWindow { .. } => "in_window",
            Self::GetWeightStats => "get_weight_stats",
        }
    }

    /// Raw syscall number, for calls exposed through the numeric ABI
    pub const fn number(&self) -> Option<u64> {
        match self {
            Self::SetWeight { .. } => Some(SYS_SET_WEIGHT),
            Self::GetWeight { .. } => Some(SYS_GET_WEIGHT),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_tagging() {
        let call = Syscall::SetWeight {
            target_pid: 4,
            weight: 20,
        };
        let json = serde_json::to_string(&call).unwrap();
        assert_eq!(json, r#"{"syscall":"set_weight","target_pid":4,"weight":20}"#);
    }

    #[test]
    fn test_target_defaults_to_self() {
        let call: Syscall = serde_json::from_str(r#"{"syscall":"get_weight"}"#).unwrap();
        assert_eq!(call, Syscall::GetWeight { target_pid: 0 });
    }

    #[test]
    fn test_numbers() {
        assert_eq!(Syscall::GetWeight { target_pid: 0 }.number(), Some(381));
        assert_eq!(
            Syscall::SetWeight {
                target_pid: 0,
                weight: 1
            }
            .number(),
            Some(380)
        );
        assert_eq!(Syscall::GetWeightStats.number(), None);
    }
}
