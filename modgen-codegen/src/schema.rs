//! Typed view of module configurations.
//!
//! Templates never look at raw configuration: a [`ModuleConfig`] is first
//! lowered into a [`ModuleSchema`], which checks every name, type, relation and
//! parent and precomputes the identifiers the templates need. Lowering fails
//! with [`Error::Config`] on the first problem.

use std::collections::HashSet;

use indexmap::IndexMap;
use modgen_core::{
    FieldType, RelationKind, core_model, pluralize, to_camel_case, to_kebab_case, to_pascal_case,
    to_screaming_snake_case, to_snake_case, to_title_case,
};
use modgen_manifest::{ExternalModel, FieldConfig, ModelConfig, ModuleConfig, validate_identifier};

use crate::{Error, Result};

/// Field names the ORM defines on every model.
const RESERVED_FIELDS: &[&str] = &["id", "created_at", "updated_at", "deleted_at"];

/// A name rendered in every casing the templates use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    pub raw: String,
    pub pascal: String,
    pub camel: String,
    pub snake: String,
    pub kebab: String,
    pub screaming: String,
    pub title: String,
}

impl Names {
    pub fn new(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            pascal: to_pascal_case(raw),
            camel: to_camel_case(raw),
            snake: to_snake_case(raw),
            kebab: to_kebab_case(raw),
            screaming: to_screaming_snake_case(raw),
            title: to_title_case(raw),
        }
    }
}

/// Where a relation target lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelationOwner {
    /// Declared in the same module; related through the data model.
    Internal,
    /// Declared by another custom module (generated in this run or external).
    Module(Names),
    /// Owned by a Medusa commerce module, imported from `@medusajs/medusa/<module>`.
    Core(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationSchema {
    pub kind: RelationKind,
    pub target: Names,
    pub inverse: Option<String>,
    pub owner: RelationOwner,
}

impl RelationSchema {
    /// Relations across module boundaries are expressed as module links.
    pub fn is_link(&self) -> bool {
        self.owner != RelationOwner::Internal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: Names,
    pub field_type: FieldType,
    pub required: bool,
    pub relation: Option<RelationSchema>,
}

impl FieldSchema {
    pub fn is_scalar(&self) -> bool {
        self.relation.is_none()
    }

    pub fn is_link(&self) -> bool {
        self.relation.as_ref().is_some_and(RelationSchema::is_link)
    }

    /// Column holding the id of an in-module `belongsTo` target.
    pub fn foreign_key(&self) -> Option<String> {
        match &self.relation {
            Some(r) if r.kind == RelationKind::BelongsTo && !r.is_link() => {
                Some(format!("{}_id", self.name.snake))
            }
            _ => None,
        }
    }
}

/// A value stored on the model's own table: a scalar field or a foreign key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Property and column name (snake_case)
    pub name: String,
    pub label: String,
    pub field_type: FieldType,
    pub required: bool,
    pub foreign_key: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentSchema {
    pub model: Names,
    /// URL segment of the parent collection
    pub route_prefix: String,
    /// Route parameter and foreign key naming the parent
    pub param: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    pub name: Names,
    pub singular: Names,
    pub plural: Names,
    pub fields: Vec<FieldSchema>,
    pub parent: Option<ParentSchema>,
}

impl ModelSchema {
    /// Entity name passed to `model.define` and `query.graph`.
    pub fn entity(&self) -> &str {
        &self.name.snake
    }

    /// Plural used by the generated service methods (`listWipers`).
    pub fn service_plural(&self) -> String {
        pluralize(&self.name.pascal)
    }

    /// File stem under `models/`.
    pub fn file_stem(&self) -> &str {
        &self.name.kebab
    }

    /// Stored columns in declaration order.
    pub fn columns(&self) -> Vec<Column> {
        self.fields
            .iter()
            .filter_map(|f| match (&f.relation, f.foreign_key()) {
                (None, _) => Some(Column {
                    name: f.name.snake.clone(),
                    label: f.name.title.clone(),
                    field_type: f.field_type,
                    required: f.required,
                    foreign_key: false,
                }),
                (Some(_), Some(fk)) => Some(Column {
                    label: format!("{} ID", f.name.title),
                    name: fk,
                    field_type: FieldType::String,
                    required: f.required,
                    foreign_key: true,
                }),
                _ => None,
            })
            .collect()
    }

    /// Columns an admin user fills in; the parent key comes from the URL.
    pub fn editable_columns(&self) -> Vec<Column> {
        let parent_key = self.parent.as_ref().map(|p| p.param.as_str());
        self.columns()
            .into_iter()
            .filter(|c| Some(c.name.as_str()) != parent_key)
            .collect()
    }

    /// Fields that become module links.
    pub fn link_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| f.is_link())
    }

    /// Fields selected by default when querying the model.
    pub fn query_fields(&self) -> Vec<String> {
        let mut fields = vec!["id".to_string()];
        fields.extend(self.columns().into_iter().map(|c| c.name));
        fields.push("created_at".to_string());
        fields.push("updated_at".to_string());
        fields
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSchema {
    pub name: Names,
    pub singular: Names,
    pub plural: Names,
    pub models: Vec<ModelSchema>,
}

impl ModuleSchema {
    /// Exported constant holding the module key, e.g. `WIPERS_MODULE`.
    pub fn constant(&self) -> String {
        format!("{}_MODULE", self.name.screaming)
    }

    /// Key the module is registered under in the container.
    pub fn key(&self) -> &str {
        &self.name.camel
    }

    /// Service class name, e.g. `WipersModuleService`.
    pub fn service(&self) -> String {
        format!("{}ModuleService", self.name.pascal)
    }

    /// Default import name for the module definition, e.g. `WipersModule`.
    pub fn definition(&self) -> String {
        format!("{}Module", self.name.pascal)
    }

    pub fn find_model(&self, name: &str) -> Option<&ModelSchema> {
        self.models.iter().find(|m| m.name.raw == name)
    }

    /// Lower a module configuration, checking it against `index`.
    pub fn lower(config: &ModuleConfig, index: &ModelIndex) -> Result<Self> {
        let module = config.name.as_str();
        if let Some(reason) = validate_identifier(module) {
            return Err(Error::module_config(
                module,
                format!("invalid module name: {reason}"),
            ));
        }

        check_display_names(config.singular.as_deref(), config.plural.as_deref())
            .map_err(|message| Error::module_config(module, message))?;

        let mut seen = HashSet::new();
        for model in &config.models {
            if !seen.insert(model.name.as_str()) {
                return Err(Error::model_config(
                    module,
                    &model.name,
                    format!("model '{}' is declared twice", model.name),
                ));
            }
        }

        let models = config
            .models
            .iter()
            .map(|model| lower_model(config, model, index))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            name: Names::new(module),
            singular: Names::new(config.singular()),
            plural: Names::new(config.plural()),
            models,
        })
    }
}

fn lower_model(
    module: &ModuleConfig,
    model: &ModelConfig,
    index: &ModelIndex,
) -> Result<ModelSchema> {
    let module_name = module.name.as_str();
    if let Some(reason) = validate_identifier(&model.name) {
        return Err(Error::model_config(
            module_name,
            &model.name,
            format!("invalid model name: {reason}"),
        ));
    }

    check_display_names(model.singular.as_deref(), model.plural.as_deref())
        .map_err(|message| Error::model_config(module_name, &model.name, message))?;

    let mut fields = Vec::with_capacity(model.fields.len());
    let mut seen = HashSet::new();
    for field in &model.fields {
        let lowered = lower_field(module, model, field, index)?;
        if !seen.insert(lowered.name.snake.clone()) {
            return Err(Error::field_config(
                module_name,
                &model.name,
                &field.name,
                format!("field '{}' is declared twice", field.name),
            ));
        }
        fields.push(lowered);
    }

    // Foreign keys share the column namespace with scalar fields.
    for field in &fields {
        if let Some(fk) = field.foreign_key() {
            if !seen.insert(fk.clone()) {
                return Err(Error::field_config(
                    module_name,
                    &model.name,
                    &field.name.raw,
                    format!("foreign key '{fk}' collides with another field"),
                ));
            }
        }
    }

    let singular = Names::new(model.singular());
    let plural = Names::new(&model.plural());
    let parent = lower_parent(module, model, &fields)?;

    Ok(ModelSchema {
        name: Names::new(&model.name),
        singular,
        plural,
        fields,
        parent,
    })
}

/// `singular`/`plural` overrides end up in paths and string literals.
fn check_display_names(
    singular: Option<&str>,
    plural: Option<&str>,
) -> std::result::Result<(), String> {
    for (kind, value) in [("singular", singular), ("plural", plural)] {
        if let Some(value) = value {
            if let Some(reason) = validate_identifier(value) {
                return Err(format!("invalid {kind} name '{value}': {reason}"));
            }
        }
    }
    Ok(())
}

fn lower_field(
    module: &ModuleConfig,
    model: &ModelConfig,
    field: &FieldConfig,
    index: &ModelIndex,
) -> Result<FieldSchema> {
    let fail =
        |message: String| Error::field_config(&module.name, &model.name, &field.name, message);

    if let Some(reason) = validate_identifier(&field.name) {
        return Err(fail(format!("invalid field name: {reason}")));
    }
    if RESERVED_FIELDS.contains(&to_snake_case(&field.name).as_str()) {
        return Err(fail(format!(
            "field '{}' is reserved and defined on every model",
            field.name
        )));
    }

    let field_type = field.parsed_type().map_err(|e| {
        fail(format!(
            "unsupported field type '{}' (expected {})",
            e.0,
            FieldType::expected()
        ))
    })?;

    let relation = match &field.relation {
        None => None,
        Some(relation) => {
            let kind = relation.parsed_kind().map_err(|e| {
                fail(format!(
                    "unsupported relation type '{}' (expected {})",
                    e.0,
                    RelationKind::expected()
                ))
            })?;
            if let Some(inverse) = &relation.inverse {
                if let Some(reason) = validate_identifier(inverse) {
                    return Err(fail(format!("invalid inverse '{inverse}': {reason}")));
                }
            }
            let owner = index.resolve(&relation.model, module).map_err(fail)?;
            Some(RelationSchema {
                kind,
                target: Names::new(&relation.model),
                inverse: relation.inverse.clone(),
                owner,
            })
        }
    };

    Ok(FieldSchema {
        name: Names::new(&field.name),
        field_type,
        required: field.required,
        relation,
    })
}

fn lower_parent(
    module: &ModuleConfig,
    model: &ModelConfig,
    fields: &[FieldSchema],
) -> Result<Option<ParentSchema>> {
    let Some(parent) = &model.parent else {
        return Ok(None);
    };
    let fail = |message: String| Error::model_config(&module.name, &model.name, message);

    if parent.model == model.name {
        return Err(fail("a model cannot be its own parent".to_string()));
    }
    let Some(parent_model) = module.find_model(&parent.model) else {
        return Err(fail(format!(
            "parent '{}' must be declared in module '{}'",
            parent.model, module.name
        )));
    };

    let param = fields
        .iter()
        .find(|f| {
            f.relation.as_ref().is_some_and(|r| {
                r.kind == RelationKind::BelongsTo && !r.is_link() && r.target.raw == parent.model
            })
        })
        .and_then(FieldSchema::foreign_key)
        .ok_or_else(|| {
            fail(format!(
                "parent '{}' requires a belongsTo relation to it",
                parent.model
            ))
        })?;

    let route_prefix = match &parent.route_prefix {
        Some(prefix) => {
            if let Some(reason) = validate_identifier(prefix) {
                return Err(fail(format!("invalid route prefix '{prefix}': {reason}")));
            }
            to_kebab_case(prefix)
        }
        None => to_kebab_case(&parent_model.plural()),
    };

    Ok(Some(ParentSchema {
        model: Names::new(&parent.model),
        route_prefix,
        param,
    }))
}

/// Every model a relation may point at, and who owns it.
#[derive(Debug, Clone, Default)]
pub struct ModelIndex {
    /// Model name to the custom modules declaring it
    declared: IndexMap<String, Vec<String>>,
    external: Vec<ExternalModel>,
}

impl ModelIndex {
    pub fn new(modules: &[ModuleConfig], external: &[ExternalModel]) -> Self {
        let mut declared: IndexMap<String, Vec<String>> = IndexMap::new();
        for module in modules {
            for model in &module.models {
                declared
                    .entry(model.name.clone())
                    .or_default()
                    .push(module.name.clone());
            }
        }
        Self {
            declared,
            external: external.to_vec(),
        }
    }

    /// Resolve a relation target seen from `module`.
    pub fn resolve(
        &self,
        target: &str,
        module: &ModuleConfig,
    ) -> std::result::Result<RelationOwner, String> {
        if module.has_model(target) {
            return Ok(RelationOwner::Internal);
        }

        let others: Vec<&String> = self
            .declared
            .get(target)
            .into_iter()
            .flatten()
            .filter(|m| **m != module.name)
            .collect();
        match others.as_slice() {
            [owner] => return Ok(RelationOwner::Module(Names::new(owner))),
            [] => {}
            _ => {
                return Err(format!(
                    "relation target '{target}' is ambiguous (declared in {})",
                    others
                        .iter()
                        .map(|m| format!("'{m}'"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }

        if let Some(external) = self.external.iter().find(|m| m.name == target) {
            return Ok(RelationOwner::Module(Names::new(&external.module)));
        }

        if let Some(core) = core_model(target) {
            return Ok(RelationOwner::Core(core.module));
        }

        Err(format!("unknown relation target '{target}'"))
    }
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{ParentConfig, RelationConfig};

    use super::*;

    fn vehicles() -> ModuleConfig {
        ModuleConfig::new("vehicles")
            .model(
                ModelConfig::new("vehicle-make")
                    .field(FieldConfig::new("name", "string").required()),
            )
            .model(
                ModelConfig::new("vehicle-model")
                    .field(FieldConfig::new("name", "string").required())
                    .field(
                        FieldConfig::new("make", "string")
                            .required()
                            .with_relation(RelationConfig::belongs_to("vehicle-make")),
                    )
                    .with_parent(ParentConfig::new("vehicle-make")),
            )
    }

    fn lower(module: &ModuleConfig) -> Result<ModuleSchema> {
        ModuleSchema::lower(module, &ModelIndex::new(std::slice::from_ref(module), &[]))
    }

    #[test]
    fn test_names() {
        let names = Names::new("vehicle-make");
        assert_eq!(names.pascal, "VehicleMake");
        assert_eq!(names.camel, "vehicleMake");
        assert_eq!(names.snake, "vehicle_make");
        assert_eq!(names.kebab, "vehicle-make");
        assert_eq!(names.screaming, "VEHICLE_MAKE");
        assert_eq!(names.title, "Vehicle Make");
    }

    #[test]
    fn test_module_identifiers() {
        let schema = lower(&vehicles()).unwrap();
        assert_eq!(schema.constant(), "VEHICLES_MODULE");
        assert_eq!(schema.service(), "VehiclesModuleService");
        assert_eq!(schema.definition(), "VehiclesModule");
        assert_eq!(schema.key(), "vehicles");
    }

    #[test]
    fn test_parent_uses_foreign_key_and_plural() {
        let schema = lower(&vehicles()).unwrap();
        let model = schema.find_model("vehicle-model").unwrap();
        let parent = model.parent.as_ref().unwrap();
        assert_eq!(parent.param, "make_id");
        assert_eq!(parent.route_prefix, "vehicle-makes");
        assert_eq!(
            model.columns().iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
            ["name", "make_id"]
        );
        assert_eq!(
            model
                .editable_columns()
                .iter()
                .map(|c| c.name.as_str())
                .collect::<Vec<_>>(),
            ["name"]
        );
    }

    #[test]
    fn test_query_fields() {
        let schema = lower(&vehicles()).unwrap();
        let model = schema.find_model("vehicle-model").unwrap();
        assert_eq!(
            model.query_fields(),
            ["id", "name", "make_id", "created_at", "updated_at"]
        );
    }

    #[test]
    fn test_unsupported_type_names_field_and_model() {
        let module = ModuleConfig::new("wipers")
            .model(ModelConfig::new("wiper").field(FieldConfig::new("sku", "uuid")));
        let err = lower(&module).unwrap_err();
        match err {
            Error::Config { model, field, message, .. } => {
                assert_eq!(model.as_deref(), Some("wiper"));
                assert_eq!(field.as_deref(), Some("sku"));
                assert!(message.contains("'uuid'"));
            }
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_relation_kind() {
        let module = ModuleConfig::new("wipers").model(
            ModelConfig::new("wiper").field(
                FieldConfig::new("kit", "string")
                    .with_relation(RelationConfig::new("hasOne", "kit")),
            ),
        );
        let err = lower(&module).unwrap_err();
        assert!(err.to_string().contains("unsupported relation type 'hasOne'"));
    }

    #[test]
    fn test_reserved_field() {
        let module = ModuleConfig::new("wipers")
            .model(ModelConfig::new("wiper").field(FieldConfig::new("created_at", "date")));
        assert!(lower(&module).unwrap_err().to_string().contains("reserved"));
    }

    #[test]
    fn test_duplicate_model() {
        let module = ModuleConfig::new("wipers")
            .model(ModelConfig::new("wiper"))
            .model(ModelConfig::new("wiper"));
        assert!(lower(&module).unwrap_err().to_string().contains("declared twice"));
    }

    #[test]
    fn test_foreign_key_collision() {
        let module = ModuleConfig::new("vehicles")
            .model(ModelConfig::new("make"))
            .model(
                ModelConfig::new("car")
                    .field(FieldConfig::new("make_id", "string"))
                    .field(
                        FieldConfig::new("make", "string")
                            .with_relation(RelationConfig::belongs_to("make")),
                    ),
            );
        assert!(lower(&module).unwrap_err().to_string().contains("'make_id'"));
    }

    #[test]
    fn test_parent_without_belongs_to() {
        let module = ModuleConfig::new("vehicles")
            .model(ModelConfig::new("make"))
            .model(ModelConfig::new("car").with_parent(ParentConfig::new("make")));
        let err = lower(&module).unwrap_err();
        assert!(err.to_string().contains("requires a belongsTo relation"));
    }

    #[test]
    fn test_resolve_owners() {
        let fitments = ModuleConfig::new("fitments").model(ModelConfig::new("fitment"));
        let modules = [vehicles(), fitments.clone()];
        let index = ModelIndex::new(&modules, &[ExternalModel::new("brand", "brands")]);

        assert_eq!(index.resolve("fitment", &fitments), Ok(RelationOwner::Internal));
        assert_eq!(
            index.resolve("vehicle-model", &fitments),
            Ok(RelationOwner::Module(Names::new("vehicles")))
        );
        assert_eq!(
            index.resolve("brand", &fitments),
            Ok(RelationOwner::Module(Names::new("brands")))
        );
        assert_eq!(
            index.resolve("product", &fitments),
            Ok(RelationOwner::Core("product"))
        );
        assert!(index.resolve("gadget", &fitments).is_err());
    }

    #[test]
    fn test_resolve_ambiguous() {
        let a = ModuleConfig::new("a").model(ModelConfig::new("item"));
        let b = ModuleConfig::new("b").model(ModelConfig::new("item"));
        let c = ModuleConfig::new("c");
        let index = ModelIndex::new(&[a, b, c.clone()], &[]);
        let err = index.resolve("item", &c).unwrap_err();
        assert!(err.contains("ambiguous"));
    }

    #[test]
    fn test_link_fields() {
        let module = ModuleConfig::new("fitments").model(
            ModelConfig::new("fitment")
                .field(FieldConfig::new("notes", "string"))
                .field(
                    FieldConfig::new("product", "string")
                        .with_relation(RelationConfig::belongs_to("product")),
                ),
        );
        let schema = lower(&module).unwrap();
        let model = &schema.models[0];
        let links: Vec<_> = model.link_fields().map(|f| f.name.raw.as_str()).collect();
        assert_eq!(links, ["product"]);
        assert_eq!(model.columns().len(), 1);
    }

    #[test]
    fn test_model_plural_must_be_identifier() {
        let module = ModuleConfig::new("wipers")
            .model(ModelConfig::new("wiper").with_plural("../../../../escaped"));
        let err = lower(&module).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("invalid plural name '../../../../escaped'"));
        assert!(err.to_string().contains("model 'wiper'"));
    }

    #[test]
    fn test_model_singular_must_be_identifier() {
        let module =
            ModuleConfig::new("wipers").model(ModelConfig::new("wiper").with_singular("Wiper"));
        let err = lower(&module).unwrap_err();
        assert!(err.to_string().contains("invalid singular name 'Wiper'"));
    }

    #[test]
    fn test_module_display_names_must_be_identifiers() {
        let err = lower(&ModuleConfig::new("wipers").with_plural("wi\"pers")).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("invalid plural name"));

        let err = lower(&ModuleConfig::new("wipers").with_singular("a/b")).unwrap_err();
        assert!(err.to_string().contains("invalid singular name"));
    }

    #[test]
    fn test_inverse_must_be_identifier() {
        let module = ModuleConfig::new("vehicles")
            .model(ModelConfig::new("vehicle-make"))
            .model(
                ModelConfig::new("vehicle-model").field(
                    FieldConfig::new("make", "string").with_relation(
                        RelationConfig::belongs_to("vehicle-make").with_inverse("models\""),
                    ),
                ),
            );
        let err = lower(&module).unwrap_err();
        assert!(err.to_string().contains("invalid inverse"));
        assert!(err.to_string().contains("field 'make'"));
    }
}
