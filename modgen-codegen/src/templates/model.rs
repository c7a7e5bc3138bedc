//! Data model definition (`src/modules/<module>/models/<model>.ts`).

use modgen_core::{RelationKind, TypeMapper};

use super::Template;
use crate::{
    CodeFile, RawCode,
    ast::{Import, JsObject},
    mappers::DmlMapper,
    paths,
    schema::{FieldSchema, ModelSchema, ModuleSchema, RelationSchema},
};

pub(super) struct ModelDefinition<'a> {
    model: &'a ModelSchema,
    module: &'a ModuleSchema,
}

impl<'a> ModelDefinition<'a> {
    pub(super) fn new(model: &'a ModelSchema, module: &'a ModuleSchema) -> Self {
        Self { model, module }
    }

    /// Sibling models referenced by relations, once each.
    fn imports(&self) -> Vec<Import> {
        let mut imports: Vec<Import> = Vec::new();
        for relation in self.internal_relations().map(|(_, r)| r) {
            if relation.target.raw == self.model.name.raw {
                continue;
            }
            let import = Import::new(format!("./{}", relation.target.kebab))
                .default(relation.target.pascal.clone());
            if !imports.contains(&import) {
                imports.push(import);
            }
        }
        imports
    }

    fn internal_relations(&self) -> impl Iterator<Item = (&'a FieldSchema, &'a RelationSchema)> {
        self.model
            .fields
            .iter()
            .filter_map(|f| f.relation.as_ref().map(|r| (f, r)))
            .filter(|(_, r)| !r.is_link())
    }

    fn properties(&self) -> JsObject {
        let mut object = JsObject::new().raw("id", "model.id().primaryKey()");
        for field in &self.model.fields {
            object = match &field.relation {
                None => object.raw(
                    field.name.snake.clone(),
                    DmlMapper.map_field(field.field_type, field.required),
                ),
                Some(relation) if !relation.is_link() => {
                    object.raw(field.name.snake.clone(), relation_expr(field, relation))
                }
                // Cross-module relations are module links, not columns.
                Some(_) => object,
            };
        }
        object
    }
}

fn relation_expr(field: &FieldSchema, relation: &RelationSchema) -> String {
    let method = match relation.kind {
        RelationKind::BelongsTo => "belongsTo",
        RelationKind::HasMany => "hasMany",
        RelationKind::ManyToMany => "manyToMany",
    };
    let options = match &relation.inverse {
        Some(inverse) => format!(", {{ mappedBy: \"{inverse}\" }}"),
        None => String::new(),
    };
    let nullable = if relation.kind == RelationKind::BelongsTo && !field.required {
        ".nullable()"
    } else {
        ""
    };
    format!(
        "model.{method}(() => {}{options}){nullable}",
        relation.target.pascal
    )
}

impl Template for ModelDefinition<'_> {
    fn path(&self) -> String {
        paths::model_file(self.module, self.model)
    }

    fn render(&self) -> String {
        let ident = &self.model.name.pascal;
        CodeFile::new()
            .import(Import::new("@medusajs/framework/utils").named("model"))
            .imports(self.imports())
            .add(self.properties().wrap(
                &format!("const {ident} = model.define(\"{}\", ", self.model.entity()),
                ");",
            ))
            .add(RawCode::new(format!("export default {ident};")))
            .render()
    }
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{FieldConfig, ModelConfig, ModuleConfig, RelationConfig};

    use super::*;
    use crate::schema::ModelIndex;

    fn render(config: &ModuleConfig, model: &str) -> String {
        let index = ModelIndex::new(std::slice::from_ref(config), &[]);
        let module = ModuleSchema::lower(config, &index).unwrap();
        let model = module.find_model(model).unwrap();
        ModelDefinition::new(model, &module).render()
    }

    #[test]
    fn test_scalar_model() {
        let config = ModuleConfig::new("wipers").model(
            ModelConfig::new("wiper")
                .field(FieldConfig::new("name", "string").required())
                .field(FieldConfig::new("length_mm", "number"))
                .field(FieldConfig::new("installed-at", "date")),
        );
        assert_eq!(
            render(&config, "wiper"),
            r#"import { model } from "@medusajs/framework/utils";

const Wiper = model.define("wiper", {
  id: model.id().primaryKey(),
  name: model.text(),
  length_mm: model.number().nullable(),
  installed_at: model.dateTime().nullable(),
});

export default Wiper;
"#
        );
    }

    #[test]
    fn test_relations_import_siblings_once() {
        let config = ModuleConfig::new("vehicles")
            .model(
                ModelConfig::new("vehicle-make").field(
                    FieldConfig::new("models", "string").with_relation(
                        RelationConfig::has_many("vehicle-model").with_inverse("make"),
                    ),
                ),
            )
            .model(
                ModelConfig::new("vehicle-model")
                    .field(
                        FieldConfig::new("make", "string")
                            .required()
                            .with_relation(
                                RelationConfig::belongs_to("vehicle-make").with_inverse("models"),
                            ),
                    )
                    .field(
                        FieldConfig::new("previous_make", "string")
                            .with_relation(RelationConfig::belongs_to("vehicle-make")),
                    ),
            );
        let code = render(&config, "vehicle-model");
        assert_eq!(code.matches("import VehicleMake from \"./vehicle-make\";").count(), 1);
        assert!(code.contains(
            "  make: model.belongsTo(() => VehicleMake, { mappedBy: \"models\" }),\n"
        ));
        assert!(code.contains(
            "  previous_make: model.belongsTo(() => VehicleMake).nullable(),\n"
        ));

        let code = render(&config, "vehicle-make");
        assert!(code.contains(
            "  models: model.hasMany(() => VehicleModel, { mappedBy: \"make\" }),\n"
        ));
    }

    #[test]
    fn test_links_are_not_properties() {
        let config = ModuleConfig::new("fitments").model(
            ModelConfig::new("fitment").field(
                FieldConfig::new("product", "string")
                    .with_relation(RelationConfig::belongs_to("product")),
            ),
        );
        let code = render(&config, "fitment");
        assert!(!code.contains("product"));
    }
}
