/*!
 * Scheduler Configuration
 *
 * Weight bounds, baseline weight, and cross-process read policy.
 */

use crate::core::data_structures::InlineString;
use crate::core::errors::{ConfigError, WeightError, WeightResult};
use crate::core::limits::{DEFAULT_WEIGHT, MAX_WEIGHT, MIN_WEIGHT};
use crate::core::types::Weight;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

pub const ENV_DEFAULT_WEIGHT: &str = "KERNEL_SCHED_DEFAULT_WEIGHT";
pub const ENV_MIN_WEIGHT: &str = "KERNEL_SCHED_MIN_WEIGHT";
pub const ENV_MAX_WEIGHT: &str = "KERNEL_SCHED_MAX_WEIGHT";
pub const ENV_CROSS_READ: &str = "KERNEL_SCHED_CROSS_READ";

/// Weight subsystem configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Weight reported for processes that never had one set (default: 10)
    pub default_weight: Weight,

    /// Smallest accepted weight, inclusive (default: 1)
    pub min_weight: Weight,

    /// Largest accepted weight, inclusive (default: 1000)
    pub max_weight: Weight,

    /// Let any process read any other process's weight (default: false)
    pub allow_cross_process_read: bool,
}

impl SchedulerConfig {
    /// Create default configuration
    pub const fn new() -> Self {
        Self {
            default_weight: DEFAULT_WEIGHT,
            min_weight: MIN_WEIGHT,
            max_weight: MAX_WEIGHT,
            allow_cross_process_read: false,
        }
    }

    /// Default bounds with cross-process reads opened up
    pub const fn permissive() -> Self {
        Self {
            allow_cross_process_read: true,
            ..Self::new()
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_weight < 1 {
            return Err(ConfigError::NonPositiveMin(self.min_weight));
        }
        if self.min_weight > self.max_weight {
            return Err(ConfigError::InvalidRange {
                min: self.min_weight,
                max: self.max_weight,
            });
        }
        if !(self.min_weight..=self.max_weight).contains(&self.default_weight) {
            return Err(ConfigError::DefaultOutOfRange {
                default: self.default_weight,
                min: self.min_weight,
                max: self.max_weight,
            });
        }
        Ok(())
    }

    /// Defaults overridden by `KERNEL_SCHED_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::new();

        if let Some(value) = env_parse::<Weight>(ENV_DEFAULT_WEIGHT)? {
            config.default_weight = value;
        }
        if let Some(value) = env_parse::<Weight>(ENV_MIN_WEIGHT)? {
            config.min_weight = value;
        }
        if let Some(value) = env_parse::<Weight>(ENV_MAX_WEIGHT)? {
            config.max_weight = value;
        }
        if let Ok(raw) = std::env::var(ENV_CROSS_READ) {
            config.allow_cross_process_read = match raw.as_str() {
                "1" | "true" => true,
                "0" | "false" => false,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        var: ENV_CROSS_READ,
                        value: raw.into(),
                    })
                }
            };
        }

        config.validate()?;
        info!(
            default_weight = config.default_weight,
            min_weight = config.min_weight,
            max_weight = config.max_weight,
            cross_read = config.allow_cross_process_read,
            "scheduler configuration loaded from environment"
        );
        Ok(config)
    }

    /// Parse JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ConfigError::Parse(InlineString::from(e.to_string())))?;
        config.validate()?;
        Ok(config)
    }

    /// Load JSON configuration from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::Io(InlineString::from(format!("{}: {}", path.display(), e)))
        })?;
        Self::from_json_str(&raw)
    }

    /// Validate a requested weight against the configured bounds
    ///
    /// Accepts any i64 so values arriving from the raw ABI that do not even
    /// fit in a `Weight` are reported as out of range rather than truncated.
    #[inline]
    pub fn check_weight(&self, weight: i64) -> WeightResult<Weight> {
        if weight < self.min_weight as i64 || weight > self.max_weight as i64 {
            return Err(WeightError::InvalidWeight {
                weight,
                min: self.min_weight,
                max: self.max_weight,
            });
        }
        // In range, therefore fits
        Ok(weight as Weight)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn env_parse<T: std::str::FromStr>(var: &'static str) -> Result<Option<T>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv {
                var,
                value: raw.into(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SchedulerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_weight, 10);
        assert!(SchedulerConfig::permissive().allow_cross_process_read);
    }

    #[test]
    fn test_validation() {
        let mut config = SchedulerConfig::new();
        config.min_weight = 0;
        assert_eq!(config.validate(), Err(ConfigError::NonPositiveMin(0)));

        let mut config = SchedulerConfig::new();
        config.min_weight = 50;
        config.max_weight = 20;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));

        let mut config = SchedulerConfig::new();
        config.default_weight = 5000;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DefaultOutOfRange { .. })
        ));
    }

    #[test]
    fn test_check_weight() {
        let config = SchedulerConfig::new();
        assert_eq!(config.check_weight(1).unwrap(), 1);
        assert_eq!(config.check_weight(1000).unwrap(), 1000);
        assert!(config.check_weight(0).is_err());
        assert!(config.check_weight(-5).is_err());
        assert!(config.check_weight(1001).is_err());
        assert!(config.check_weight(i64::MAX).is_err());
    }

    #[test]
    fn test_from_json() {
        let config = SchedulerConfig::from_json_str(r#"{"max_weight": 64}"#).unwrap();
        assert_eq!(config.max_weight, 64);
        assert_eq!(config.min_weight, MIN_WEIGHT);

        assert!(matches!(
            SchedulerConfig::from_json_str(r#"{"max_wieght": 64}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            SchedulerConfig::from_json_str(r#"{"default_weight": 0}"#),
            Err(ConfigError::DefaultOutOfRange { .. })
        ));
    }
}
