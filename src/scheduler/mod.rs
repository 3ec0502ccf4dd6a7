/*!
 * Scheduler Module
 * Per-process weight control and the circular window predicate
 */

pub mod config;
pub mod stats;
pub mod store;
pub mod subsystem;
pub mod traits;
pub mod types;
pub mod window;

// Re-export public API
pub use config::SchedulerConfig;
pub use stats::{AtomicWeightStats, WeightStats};
pub use store::WeightStore;
pub use subsystem::{SchedulerSubsystem, SchedulerSubsystemBuilder};
pub use traits::WeightControl;
pub use types::WindowGate;
pub use window::{in_window, window_bounds, wrap_degrees};
