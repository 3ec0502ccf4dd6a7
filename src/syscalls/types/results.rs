/*!
 * Syscall Result Types
 * Defines result types for syscall operations
 */

use crate::core::errors::WeightError;
use crate::core::types::Weight;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// System call result
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum SyscallResult {
    /// Successful operation
    Success {
        /// Optional data payload (binary)
        data: Option<Vec<u8>>,
    },
    /// Operation failed with error message
    Error {
        /// Human-readable error message
        message: String,
    },
    /// Permission denied with reason
    PermissionDenied {
        /// Reason for permission denial
        reason: String,
    },
}

impl SyscallResult {
    #[inline]
    #[must_use]
    pub fn success() -> Self {
        Self::Success { data: None }
    }

    #[inline]
    #[must_use]
    pub fn success_with_data(data: Vec<u8>) -> Self {
        Self::Success { data: Some(data) }
    }

    /// Success carrying a weight as little-endian bytes
    #[inline]
    #[must_use]
    pub fn success_with_weight(weight: Weight) -> Self {
        Self::success_with_data(weight.to_le_bytes().to_vec())
    }

    /// Success carrying a boolean as a single byte
    #[inline]
    #[must_use]
    pub fn success_with_flag(flag: bool) -> Self {
        Self::success_with_data(vec![flag as u8])
    }

    #[inline]
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn permission_denied(reason: impl Into<String>) -> Self {
        Self::PermissionDenied {
            reason: reason.into(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_permission_denied(&self) -> bool {
        matches!(self, Self::PermissionDenied { .. })
    }

    #[inline]
    #[must_use]
    pub const fn data(&self) -> Option<&Vec<u8>> {
        match self {
            Self::Success { data } => data.as_ref(),
            _ => None,
        }
    }

    /// Decode a weight payload
    #[must_use]
    pub fn weight(&self) -> Option<Weight> {
        let bytes: [u8; 4] = self.data()?.as_slice().try_into().ok()?;
        Some(Weight::from_le_bytes(bytes))
    }

    /// Decode a boolean payload
    #[must_use]
    pub fn flag(&self) -> Option<bool> {
        match self.data()?.as_slice() {
            [byte] => Some(*byte != 0),
            _ => None,
        }
    }
}

impl From<WeightError> for SyscallResult {
    fn from(err: WeightError) -> Self {
        match err {
            WeightError::PermissionDenied { .. } => Self::permission_denied(err.to_string()),
            other => Self::Error {
                message: other.to_string(),
            },
        }
    }
}
