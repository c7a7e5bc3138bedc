//! Core operations.
//!
//! Business logic for modgen, separated from CLI argument parsing and output
//! rendering.

pub mod generate;

pub use generate::{GenerateOptions, generate};
