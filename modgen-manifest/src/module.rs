//! Module, model and field configuration.
//!
//! These are plain data: they are parsed from modgen.toml or built in code with
//! the builder methods, and never change during a generation run.

use modgen_core::{FieldType, RelationKind, UnknownType, pluralize};
use serde::{Deserialize, Serialize};

/// A Medusa module to generate (e.g. "wipers").
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModuleConfig {
    /// Module name, unique across a generation run
    pub name: String,

    /// Singular display name, defaults to the module name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,

    /// Plural display name, defaults to the module name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,

    /// Models in declaration order
    #[serde(default)]
    pub models: Vec<ModelConfig>,
}

impl ModuleConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            singular: None,
            plural: None,
            models: Vec::new(),
        }
    }

    pub fn with_singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    /// Add a model.
    pub fn model(mut self, model: ModelConfig) -> Self {
        self.models.push(model);
        self
    }

    pub fn singular(&self) -> &str {
        self.singular.as_deref().unwrap_or(&self.name)
    }

    pub fn plural(&self) -> &str {
        self.plural.as_deref().unwrap_or(&self.name)
    }

    /// Find a model declared in this module.
    pub fn find_model(&self, name: &str) -> Option<&ModelConfig> {
        self.models.iter().find(|m| m.name == name)
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.find_model(name).is_some()
    }
}

/// One entity of a module (e.g. "wiper").
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Model name, unique within its module
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singular: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,

    /// Fields in declaration order
    #[serde(default)]
    pub fields: Vec<FieldConfig>,

    /// Nest this model's routes below a parent model
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentConfig>,
}

impl ModelConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            singular: None,
            plural: None,
            fields: Vec::new(),
            parent: None,
        }
    }

    pub fn with_singular(mut self, singular: impl Into<String>) -> Self {
        self.singular = Some(singular.into());
        self
    }

    pub fn with_plural(mut self, plural: impl Into<String>) -> Self {
        self.plural = Some(plural.into());
        self
    }

    pub fn with_parent(mut self, parent: ParentConfig) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add a field.
    pub fn field(mut self, field: FieldConfig) -> Self {
        self.fields.push(field);
        self
    }

    pub fn singular(&self) -> &str {
        self.singular.as_deref().unwrap_or(&self.name)
    }

    pub fn plural(&self) -> String {
        self.plural
            .clone()
            .unwrap_or_else(|| pluralize(self.singular()))
    }

    pub fn find_field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A field of a model.
///
/// `field_type` and the relation kind are kept as written so that unsupported
/// values can be reported with the field and model they belong to.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<RelationConfig>,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>, field_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type: field_type.into(),
            required: false,
            relation: None,
        }
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_relation(mut self, relation: RelationConfig) -> Self {
        self.relation = Some(relation);
        self
    }

    /// Parse the configured type name.
    pub fn parsed_type(&self) -> Result<FieldType, UnknownType> {
        self.field_type.parse()
    }
}

/// Relation from a field to another model.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RelationConfig {
    #[serde(rename = "type")]
    pub kind: String,

    /// Target model name
    pub model: String,

    /// Name of the property on the target that points back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
}

impl RelationConfig {
    pub fn new(kind: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            model: model.into(),
            inverse: None,
        }
    }

    pub fn belongs_to(model: impl Into<String>) -> Self {
        Self::new(RelationKind::BelongsTo.as_str(), model)
    }

    pub fn has_many(model: impl Into<String>) -> Self {
        Self::new(RelationKind::HasMany.as_str(), model)
    }

    pub fn many_to_many(model: impl Into<String>) -> Self {
        Self::new(RelationKind::ManyToMany.as_str(), model)
    }

    pub fn with_inverse(mut self, inverse: impl Into<String>) -> Self {
        self.inverse = Some(inverse.into());
        self
    }

    pub fn parsed_kind(&self) -> Result<RelationKind, UnknownType> {
        self.kind.parse()
    }
}

/// Parent model whose routes enclose a child model's routes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParentConfig {
    pub model: String,

    /// URL segment of the parent collection, defaults to the parent's plural
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_prefix: Option<String>,
}

impl ParentConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            route_prefix: None,
        }
    }

    pub fn with_route_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.route_prefix = Some(prefix.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_default_from_model_name() {
        let model = ModelConfig::new("wiper-kit");
        assert_eq!(model.singular(), "wiper-kit");
        assert_eq!(model.plural(), "wiper-kits");

        let model = ModelConfig::new("series").with_plural("series-list");
        assert_eq!(model.plural(), "series-list");
    }

    #[test]
    fn test_builder_keeps_declaration_order() {
        let model = ModelConfig::new("wiper")
            .field(FieldConfig::new("name", "string").required())
            .field(FieldConfig::new("description", "string"))
            .field(FieldConfig::new("length", "number"));

        let names: Vec<_> = model.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "description", "length"]);
        assert!(model.fields[0].required);
        assert!(!model.fields[1].required);
    }

    #[test]
    fn test_parsed_types() {
        let field = FieldConfig::new("released", "date");
        assert_eq!(field.parsed_type(), Ok(FieldType::Date));

        let field = FieldConfig::new("id", "uuid");
        assert!(field.parsed_type().is_err());

        let relation = RelationConfig::belongs_to("vehicle-make");
        assert_eq!(relation.parsed_kind(), Ok(RelationKind::BelongsTo));
    }

    #[test]
    fn test_module_lookup() {
        let module = ModuleConfig::new("vehicles")
            .model(ModelConfig::new("vehicle-make"))
            .model(ModelConfig::new("vehicle-model"));

        assert!(module.has_model("vehicle-make"));
        assert!(!module.has_model("wiper"));
        assert_eq!(module.plural(), "vehicles");
    }
}
