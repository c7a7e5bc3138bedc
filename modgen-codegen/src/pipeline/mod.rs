//! Configuration lints and their diagnostics.

mod diagnostic;
mod lint;

pub use diagnostic::{Diagnostic, Severity};
pub use lint::{EmptyModelLint, Lint, Linter, MissingInverseLint};
