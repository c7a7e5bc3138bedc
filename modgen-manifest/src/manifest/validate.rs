//! Validation context and utilities for manifest parsing.

use std::{collections::HashSet, sync::Arc};

use miette::SourceSpan;
use modgen_core::RelationKind;

use super::Manifest;
use crate::{Error, ModelConfig, ModuleConfig, Result, error::SourceContext};

/// Parsing and validation context that carries source information.
///
/// Holds the source content, filename, and the current path through the
/// manifest hierarchy (module, model) so nested validation can name where a
/// problem is.
///
/// # Example
///
/// ```ignore
/// let ctx = ParseContext::new(src, "modgen.toml");
/// ctx.validate_name("wipers", "module")?;
///
/// let nested = ctx.push("wipers").push("wiper");
/// nested.validate_name("name", "field")?;
/// ```
#[derive(Debug, Clone)]
pub struct ParseContext<'a> {
    /// Source context for error reporting (shared across nested contexts)
    source: Arc<SourceContext>,
    /// Path segments for nested validation (e.g., ["vehicles", "vehicle-model"])
    path: Vec<&'a str>,
}

/// Field names the ORM defines on every model.
const RESERVED_FIELDS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

impl<'a> ParseContext<'a> {
    pub fn new(src: &str, filename: &str) -> Self {
        Self {
            source: Arc::new(SourceContext::new(src, filename)),
            path: Vec::new(),
        }
    }

    pub fn src(&self) -> &str {
        self.source.src()
    }

    pub fn filename(&self) -> &str {
        self.source.filename()
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: &'a str) -> Self {
        let mut new_path = self.path.clone();
        new_path.push(segment);
        Self {
            source: Arc::clone(&self.source),
            path: new_path,
        }
    }

    /// Get the current path as a dot-separated string.
    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    /// Get a context description for error messages.
    ///
    /// For example: "field in 'vehicles.vehicle-model'" or just "module" at the root.
    pub fn context_for(&self, kind: &str) -> String {
        if self.path.is_empty() {
            kind.to_string()
        } else {
            format!("{} in '{}'", kind, self.path_string())
        }
    }

    /// Validate that a name is a usable identifier.
    pub fn validate_name(&self, name: &str, kind: &str) -> Result<()> {
        self.validate_value("name", name, kind)
    }

    /// Validate that the value of `key` is a usable identifier.
    ///
    /// Display names and inverses end up in paths and string literals, so they
    /// follow the same rules as names.
    pub fn validate_value(&self, key: &str, name: &str, kind: &str) -> Result<()> {
        if let Some(reason) = validate_identifier(name) {
            let span = find_value_spans(self.src(), key, name).into_iter().next();
            return Err(self.source.invalid_identifier_error(
                name,
                self.context_for(kind),
                reason,
                span,
            ));
        }
        Ok(())
    }

    /// Create a duplicate-name error pointing at the second definition.
    pub fn duplicate(&self, name: &str, kind: &str) -> Box<Error> {
        let span = find_value_spans(self.src(), "name", name).get(1).copied();
        self.source
            .duplicate_name_error(name, self.context_for(kind), span)
    }

    /// Validate the models of a module.
    pub(crate) fn validate_module(&self, module: &ModuleConfig, manifest: &Manifest) -> Result<()> {
        let mut seen = HashSet::new();
        for model in &module.models {
            self.validate_name(&model.name, "model")?;
            if !seen.insert(model.name.as_str()) {
                return Err(self.duplicate(&model.name, "model"));
            }

            let model_ctx = self.push(&model.name);
            model_ctx.validate_display_names(model.singular.as_deref(), model.plural.as_deref())?;
            model_ctx.validate_model(model, module, manifest)?;
        }
        Ok(())
    }

    /// Validate optional `singular`/`plural` overrides.
    pub(crate) fn validate_display_names(
        &self,
        singular: Option<&str>,
        plural: Option<&str>,
    ) -> Result<()> {
        if let Some(singular) = singular {
            self.validate_value("singular", singular, "singular name")?;
        }
        if let Some(plural) = plural {
            self.validate_value("plural", plural, "plural name")?;
        }
        Ok(())
    }

    fn validate_model(
        &self,
        model: &ModelConfig,
        module: &ModuleConfig,
        manifest: &Manifest,
    ) -> Result<()> {
        let mut seen = HashSet::new();
        for field in &model.fields {
            self.validate_name(&field.name, "field")?;
            if !seen.insert(field.name.as_str()) {
                return Err(self.duplicate(&field.name, "field"));
            }
            if RESERVED_FIELDS.contains(&field.name.as_str()) {
                let span = find_value_spans(self.src(), "name", &field.name)
                    .into_iter()
                    .next();
                return Err(self.source.validation_error(
                    format!(
                        "field name '{}' of model '{}' is reserved",
                        field.name, model.name
                    ),
                    span,
                ));
            }

            if field.parsed_type().is_err() {
                let span = find_value_spans(self.src(), "type", &field.field_type)
                    .into_iter()
                    .next();
                return Err(self.source.invalid_field_type_error(
                    &model.name,
                    &field.name,
                    &field.field_type,
                    span,
                ));
            }

            if let Some(relation) = &field.relation {
                if let Some(inverse) = &relation.inverse {
                    self.validate_value("inverse", inverse, "relation inverse")?;
                }
                if relation.parsed_kind().is_err() {
                    let span = find_value_spans(self.src(), "type", &relation.kind)
                        .into_iter()
                        .next();
                    return Err(self.source.invalid_relation_type_error(
                        &model.name,
                        &field.name,
                        &relation.kind,
                        span,
                    ));
                }

                if !manifest.is_known_model(&relation.model) {
                    let span = find_value_spans(self.src(), "model", &relation.model)
                        .into_iter()
                        .next();
                    return Err(self.source.unknown_relation_target_error(
                        &model.name,
                        &field.name,
                        &relation.model,
                        span,
                    ));
                }
            }
        }

        if let Some(parent) = &model.parent {
            let span = find_value_spans(self.src(), "model", &parent.model)
                .into_iter()
                .next();
            let invalid = |reason: String| {
                self.source
                    .invalid_parent_error(&model.name, &parent.model, reason, span)
            };

            if parent.model == model.name {
                return Err(invalid("a model cannot be its own parent".to_string()));
            }
            if !module.has_model(&parent.model) {
                return Err(invalid(format!(
                    "the parent must be declared in module '{}'",
                    module.name
                )));
            }
            let has_link = model.fields.iter().any(|f| {
                f.relation.as_ref().is_some_and(|r| {
                    r.model == parent.model && r.parsed_kind() == Ok(RelationKind::BelongsTo)
                })
            });
            if !has_link {
                return Err(invalid(format!(
                    "add a belongsTo field targeting '{}' to '{}'",
                    parent.model, model.name
                )));
            }
            if let Some(prefix) = &parent.route_prefix {
                self.validate_value("route_prefix", prefix, "route prefix")?;
            }
        }

        Ok(())
    }
}

/// Find every span of `value` assigned to `key` in the TOML source.
///
/// Matches `key = "value"`, `key="value"` and the single-quoted forms, inside
/// tables or inline tables. Spans cover the value without its quotes and are
/// returned in source order.
pub(crate) fn find_value_spans(src: &str, key: &str, value: &str) -> Vec<SourceSpan> {
    let mut spans = Vec::new();

    for quote in ['"', '\''] {
        for sep in [" = ", "="] {
            let pattern = format!("{key}{sep}{quote}{value}{quote}");
            let skip = key.len() + sep.len() + 1;
            for (pos, _) in src.match_indices(&pattern) {
                // `key` must not be the tail of a longer key
                let preceded_by_key_char = src[..pos]
                    .chars()
                    .last()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '-');
                if !preceded_by_key_char {
                    spans.push(SourceSpan::from((pos + skip, value.len())));
                }
            }
        }
    }

    spans.sort_by_key(|s| s.offset());
    spans
}

/// Validate a module, model, or field name.
///
/// Names are lowercase letters, digits, `-` and `_`, starting with a letter,
/// so they can be turned into any case the templates need.
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some("name cannot be empty");
    };

    if !first.is_ascii_lowercase() {
        return Some("name must start with a lowercase letter");
    }

    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_') {
        return Some("name contains invalid characters");
    }

    None
}
