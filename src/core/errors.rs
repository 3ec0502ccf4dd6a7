/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use crate::core::data_structures::InlineString;
use crate::core::types::{Pid, Weight};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errno values reported through the raw syscall ABI
pub mod errno {
    pub const EPERM: i32 = 1;
    pub const ESRCH: i32 = 3;
    pub const EINVAL: i32 = 22;
    pub const ENOSYS: i32 = 38;
}

/// Weight control errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum WeightError {
    #[error("Invalid argument: {0}")]
    #[diagnostic(
        code(weight::invalid_argument),
        help("PIDs must be non-negative and fit in 32 bits.")
    )]
    InvalidArgument(InlineString),

    #[error("Process {0} not found")]
    #[diagnostic(
        code(weight::no_such_process),
        help("The process may have terminated or never existed. Check PID validity.")
    )]
    NoSuchProcess(Pid),

    #[error("Permission denied: PID {caller} may not access weight of PID {target}")]
    #[diagnostic(
        code(weight::permission_denied),
        help("Cross-process weight access requires a scheduler capability.")
    )]
    PermissionDenied { caller: Pid, target: Pid },

    #[error("Weight {weight} out of range [{min}, {max}]")]
    #[diagnostic(
        code(weight::invalid_weight),
        help("Pick a weight inside the configured range.")
    )]
    InvalidWeight { weight: i64, min: Weight, max: Weight },

    #[error("Unsupported syscall number {0}")]
    #[diagnostic(
        code(weight::unsupported),
        help("Only the set-weight (380) and get-weight (381) calls are provided.")
    )]
    Unsupported(u64),
}

impl WeightError {
    #[inline]
    pub fn invalid_argument(msg: impl Into<InlineString>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Errno equivalent for the raw syscall ABI
    #[inline]
    pub const fn errno(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::InvalidWeight { .. } => errno::EINVAL,
            Self::NoSuchProcess(_) => errno::ESRCH,
            Self::PermissionDenied { .. } => errno::EPERM,
            Self::Unsupported(_) => errno::ENOSYS,
        }
    }
}

/// Result type for weight control operations
pub type WeightResult<T> = std::result::Result<T, WeightError>;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid weight range: min {min} > max {max}")]
    #[diagnostic(code(config::invalid_range))]
    InvalidRange { min: Weight, max: Weight },

    #[error("Non-positive minimum weight: {0}")]
    #[diagnostic(
        code(config::non_positive_min),
        help("Weights are multiplicative shares; the minimum must be at least 1.")
    )]
    NonPositiveMin(Weight),

    #[error("Default weight {default} outside [{min}, {max}]")]
    #[diagnostic(code(config::default_out_of_range))]
    DefaultOutOfRange {
        default: Weight,
        min: Weight,
        max: Weight,
    },

    #[error("Invalid value for {var}: {value}")]
    #[diagnostic(code(config::invalid_env))]
    InvalidEnv { var: &'static str, value: InlineString },

    #[error("Failed to parse configuration: {0}")]
    #[diagnostic(code(config::parse))]
    Parse(InlineString),

    #[error("Failed to read configuration: {0}")]
    #[diagnostic(code(config::io))]
    Io(InlineString),
}

/// Unified kernel error type with miette diagnostics
#[derive(Error, Debug, Diagnostic)]
pub enum KernelError {
    #[error("Weight error: {0}")]
    #[diagnostic(transparent)]
    Weight(#[from] WeightError),

    #[error("Configuration error: {0}")]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    #[diagnostic(
        code(kernel::internal_error),
        help("An unexpected internal error occurred. Please report this issue.")
    )]
    Internal(InlineString),
}

impl From<String> for KernelError {
    fn from(msg: String) -> Self {
        KernelError::Internal(msg.into())
    }
}

impl From<&str> for KernelError {
    fn from(msg: &str) -> Self {
        KernelError::Internal(msg.into())
    }
}

/// Result type for kernel operations
pub type Result<T> = std::result::Result<T, KernelError>;
