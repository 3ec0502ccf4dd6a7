/*!
 * Data Structures
 * Small value types shared across subsystems
 */

mod inline_string;

pub use inline_string::InlineString;
