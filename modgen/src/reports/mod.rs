//! Report data structures for commands.
//!
//! Commands build reports, then render them to an Output target.

mod generate;
mod output;

pub use generate::{Detail, GenerateReport};
pub use output::{Report, TerminalOutput};
