/*!
 * Scheduler Configuration Tests
 * Environment and file loading
 */

use pretty_assertions::assert_eq;
use sched_weight::core::errors::ConfigError;
use sched_weight::scheduler::config::{
    ENV_CROSS_READ, ENV_DEFAULT_WEIGHT, ENV_MAX_WEIGHT, ENV_MIN_WEIGHT,
};
use sched_weight::scheduler::SchedulerConfig;
use serial_test::serial;
use std::io::Write;

fn clear_env() {
    for var in [ENV_DEFAULT_WEIGHT, ENV_MIN_WEIGHT, ENV_MAX_WEIGHT, ENV_CROSS_READ] {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_from_env_defaults() {
    clear_env();
    assert_eq!(SchedulerConfig::from_env().unwrap(), SchedulerConfig::default());
}

#[test]
#[serial]
fn test_from_env_overrides() {
    clear_env();
    std::env::set_var(ENV_DEFAULT_WEIGHT, "16");
    std::env::set_var(ENV_MAX_WEIGHT, "64");
    std::env::set_var(ENV_CROSS_READ, "true");

    let config = SchedulerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.default_weight, 16);
    assert_eq!(config.min_weight, 1);
    assert_eq!(config.max_weight, 64);
    assert!(config.allow_cross_process_read);
}

#[test]
#[serial]
fn test_from_env_rejects_garbage() {
    clear_env();
    std::env::set_var(ENV_MIN_WEIGHT, "low");
    let result = SchedulerConfig::from_env();
    clear_env();
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnv { var, .. }) if var == ENV_MIN_WEIGHT
    ));

    std::env::set_var(ENV_CROSS_READ, "maybe");
    let result = SchedulerConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(ConfigError::InvalidEnv { .. })));
}

#[test]
#[serial]
fn test_from_env_validates() {
    clear_env();
    std::env::set_var(ENV_MAX_WEIGHT, "5");
    let result = SchedulerConfig::from_env();
    clear_env();
    assert!(matches!(result, Err(ConfigError::DefaultOutOfRange { .. })));
}

#[test]
fn test_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"default_weight": 20, "max_weight": 200, "allow_cross_process_read": true}}"#
    )
    .unwrap();

    let config = SchedulerConfig::from_file(file.path()).unwrap();
    assert_eq!(
        config,
        SchedulerConfig {
            default_weight: 20,
            min_weight: 1,
            max_weight: 200,
            allow_cross_process_read: true,
        }
    );
}

#[test]
fn test_from_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = SchedulerConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ConfigError::Io(_))));
}
