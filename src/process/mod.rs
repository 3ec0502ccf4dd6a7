/*!
 * Process Module
 * Process identity resolution and exit notification
 */

pub mod table;
pub mod traits;
pub mod types;

pub use table::ProcessTable;
pub use traits::{ExitListener, ProcessResolver};
pub use types::{ProcessInfo, ProcessState};
