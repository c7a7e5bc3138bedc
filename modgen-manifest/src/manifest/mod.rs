//! Manifest types and parsing for modgen.toml files.

mod file;
mod parse;
mod validate;

pub use file::ModgenToml;
pub use parse::parse_manifest;
use serde::{Deserialize, Serialize};
pub use validate::{ParseContext, validate_identifier};

use crate::ModuleConfig;

/// Root manifest for modgen.toml
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Manifest {
    /// Generator-wide settings
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Modules in declaration order
    #[serde(default)]
    pub modules: Vec<ModuleConfig>,
}

/// The `[generator]` table.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct GeneratorConfig {
    /// Models that exist outside this manifest and may be related to
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_models: Vec<ExternalModel>,
}

/// A model provided by a custom module that modgen does not generate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ExternalModel {
    pub name: String,
    /// Module under `src/modules/` that owns the model
    pub module: String,
}

impl ExternalModel {
    pub fn new(name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            module: module.into(),
        }
    }
}

impl Manifest {
    /// Find the module that declares a model.
    pub fn module_of(&self, model: &str) -> Option<&ModuleConfig> {
        self.modules.iter().find(|m| m.has_model(model))
    }

    /// Whether a relation may target `model`: declared by a module, owned by a
    /// Medusa commerce module, or listed as external.
    pub fn is_known_model(&self, model: &str) -> bool {
        self.module_of(model).is_some()
            || modgen_core::core_model(model).is_some()
            || self.generator.external_models.iter().any(|m| m.name == model)
    }
}
