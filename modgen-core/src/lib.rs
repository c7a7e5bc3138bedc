//! Core utilities and types for the modgen module generator.
//!
//! This crate provides fundamental types and utilities used across
//! the modgen crates.

mod file;
mod medusa;
mod type_mapper;
mod types;
mod utils;

// File operations
pub use file::{Action, FileChange, write_file};
// Medusa commerce models
pub use medusa::{CORE_MODELS, CoreModel, core_model};
// Fundamental types
pub use type_mapper::TypeMapper;
pub use types::{FieldType, RelationKind, UnknownType};
// String utilities
pub use utils::{
    pluralize, to_camel_case, to_kebab_case, to_pascal_case, to_screaming_snake_case,
    to_snake_case, to_title_case,
};
