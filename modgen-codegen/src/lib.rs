//! Code generation for Medusa v2 modules.
//!
//! Turns module configurations into the TypeScript files of a Medusa
//! project: data models, migrations, validators, admin API routes, admin
//! pages, module links and the shared middleware and SDK files.
//!
//! # Module Organization
//!
//! - [`builder`] - Indentation-aware code building blocks (CodeBuilder, CodeFragment)
//! - [`ast`] - TypeScript constructs (Import, JsObject)
//! - [`paths`] - Where every generated file lands, and the URLs they serve
//! - [`pipeline`] - Lints that report on configurations without blocking generation
//!
//! Generation itself is a single call:
//!
//! ```no_run
//! use modgen_codegen::{GenerateOptions, generate};
//! use modgen_manifest::{FieldConfig, ModelConfig, ModuleConfig};
//!
//! let wipers = ModuleConfig::new("wipers")
//!     .model(ModelConfig::new("wiper").field(FieldConfig::new("name", "string").required()));
//!
//! let generation = generate(&[wipers], &GenerateOptions::new(".").dry_run(true))?;
//! println!("{} files to create", generation.created());
//! # Ok::<(), modgen_codegen::Error>(())
//! ```

pub mod ast;
pub mod builder;
pub mod paths;
pub mod pipeline;

mod code_file;
mod error;
mod generator;
mod mappers;
mod planner;
mod schema;
mod templates;

pub use code_file::{CodeFile, RawCode};
pub use error::{Error, Result};
pub use generator::{
    DRY_RUN_ENV, GenerateOptions, Generation, Generator, apply, dry_run_from_env, dry_run_value,
    generate,
};
pub use mappers::{DmlMapper, PostgresMapper, TsMapper, ZodMapper};
pub use paths::FileCategory;
pub use pipeline::{Diagnostic, Linter, Severity};
pub use planner::{DesiredFiles, plan};
pub use schema::{
    Column, FieldSchema, ModelIndex, ModelSchema, ModuleSchema, Names, ParentSchema,
    RelationOwner, RelationSchema,
};
pub use templates::{RenderedFile, Renderer, Scope, TemplateId, render};
