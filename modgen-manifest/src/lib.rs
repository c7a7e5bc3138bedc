//! modgen.toml parsing and validation.
//!
//! The manifest declares the Medusa modules to scaffold: each module lists its
//! models, and each model its fields and relations, in the order they should
//! appear in generated code.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;
mod module;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    ExternalModel, GeneratorConfig, Manifest, ModgenToml, ParseContext, parse_manifest,
    validate_identifier,
};
pub use module::{FieldConfig, ModelConfig, ModuleConfig, ParentConfig, RelationConfig};
