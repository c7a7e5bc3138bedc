//! Lints over module configurations.
//!
//! Lints never block generation by themselves; they report likely mistakes the
//! configuration checks accept.

use modgen_core::RelationKind;
use modgen_manifest::{ModelConfig, ModuleConfig};

use super::Diagnostic;

/// A lint that checks module configurations for issues.
pub trait Lint: Send + Sync {
    /// The name of this lint.
    fn name(&self) -> &'static str;

    /// Check the modules and add any diagnostics.
    fn check(&self, modules: &[ModuleConfig], diagnostics: &mut Vec<Diagnostic>);
}

/// Runs a set of lints.
pub struct Linter {
    lints: Vec<Box<dyn Lint>>,
}

impl Linter {
    /// Create a linter with the built-in lints.
    pub fn new() -> Self {
        Self {
            lints: vec![Box::new(EmptyModelLint), Box::new(MissingInverseLint)],
        }
    }

    /// Create a linter with no lints.
    pub fn empty() -> Self {
        Self { lints: Vec::new() }
    }

    pub fn with_lint(mut self, lint: impl Lint + 'static) -> Self {
        self.lints.push(Box::new(lint));
        self
    }

    pub fn run(&self, modules: &[ModuleConfig]) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for lint in &self.lints {
            lint.check(modules, &mut diagnostics);
        }
        diagnostics
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Built-in lints
// ============================================================================

/// Warns about modules without models and models without fields.
pub struct EmptyModelLint;

impl Lint for EmptyModelLint {
    fn name(&self) -> &'static str {
        "empty-model"
    }

    fn check(&self, modules: &[ModuleConfig], diagnostics: &mut Vec<Diagnostic>) {
        for module in modules {
            if module.models.is_empty() {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!("module '{}' has no models", module.name),
                    )
                    .at(&module.name),
                );
            }
            for model in module.models.iter().filter(|m| m.fields.is_empty()) {
                diagnostics.push(
                    Diagnostic::warning(
                        self.name(),
                        format!("model '{}' has no fields", model.name),
                    )
                    .at(format!("{}.{}", module.name, model.name)),
                );
            }
        }
    }
}

/// Warns about in-module relations whose other side is missing.
///
/// A named inverse must exist on the target and point back; a `hasMany` needs
/// a `belongsTo` on the target.
pub struct MissingInverseLint;

impl MissingInverseLint {
    fn points_back(target: &ModelConfig, source: &str, kind: Option<RelationKind>) -> bool {
        target.fields.iter().any(|f| {
            f.relation.as_ref().is_some_and(|r| {
                r.model == source && kind.is_none_or(|k| r.parsed_kind() == Ok(k))
            })
        })
    }
}

impl Lint for MissingInverseLint {
    fn name(&self) -> &'static str {
        "missing-inverse"
    }

    fn check(&self, modules: &[ModuleConfig], diagnostics: &mut Vec<Diagnostic>) {
        for module in modules {
            for model in &module.models {
                for field in &model.fields {
                    let Some(relation) = &field.relation else {
                        continue;
                    };
                    let Some(target) = module.find_model(&relation.model) else {
                        continue;
                    };
                    let location = format!("{}.{}.{}", module.name, model.name, field.name);

                    if let Some(inverse) = &relation.inverse {
                        let found = target.find_field(inverse).is_some_and(|f| {
                            f.relation.as_ref().is_some_and(|r| r.model == model.name)
                        });
                        if !found {
                            let message = format!(
                                "inverse '{}' of '{}.{}' is not a relation on '{}' pointing back",
                                inverse, model.name, field.name, target.name
                            );
                            diagnostics.push(
                                Diagnostic::warning(self.name(), message).at(location),
                            );
                        }
                        continue;
                    }

                    if relation.parsed_kind() == Ok(RelationKind::HasMany)
                        && !Self::points_back(target, &model.name, Some(RelationKind::BelongsTo))
                    {
                        diagnostics.push(
                            Diagnostic::warning(
                                self.name(),
                                format!(
                                    "hasMany '{}.{}' has no matching belongsTo on '{}'",
                                    model.name, field.name, target.name
                                ),
                            )
                            .at(location),
                        );
                    }
                }
            }
        }
    }
}
