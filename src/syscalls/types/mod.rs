/*!
 * Syscall Types Module
 * Defines the syscall enum and result type
 */

mod results;
mod syscall;

pub use results::SyscallResult;
pub use syscall::{Syscall, SYS_GET_WEIGHT, SYS_SET_WEIGHT};
