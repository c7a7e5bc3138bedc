//! Initial migration for a model's table.
//!
//! Only the table and its indexes are created. Pivot tables of many-to-many
//! relations are left to `medusa db:generate`.

use modgen_core::TypeMapper;

use super::Template;
use crate::{
    builder::CodeBuilder,
    mappers::PostgresMapper,
    paths,
    schema::{ModelSchema, ModuleSchema},
};

pub(super) struct Migration<'a> {
    model: &'a ModelSchema,
    module: &'a ModuleSchema,
}

impl<'a> Migration<'a> {
    pub(super) fn new(model: &'a ModelSchema, module: &'a ModuleSchema) -> Self {
        Self { model, module }
    }

    fn create_table(&self) -> String {
        let table = self.model.entity();
        let mut columns = vec!["\"id\" text not null".to_string()];
        columns.extend(self.model.columns().iter().map(|c| {
            format!(
                "\"{}\" {}",
                c.name,
                PostgresMapper.map_field(c.field_type, c.required)
            )
        }));
        columns.push("\"created_at\" timestamptz not null default now()".to_string());
        columns.push("\"updated_at\" timestamptz not null default now()".to_string());
        columns.push("\"deleted_at\" timestamptz null".to_string());
        columns.push(format!("constraint \"{table}_pkey\" primary key (\"id\")"));

        format!(
            "create table if not exists \"{table}\" ({});",
            columns.join(", ")
        )
    }

    fn indexes(&self) -> Vec<String> {
        let table = self.model.entity();
        let mut indexed = vec!["deleted_at".to_string()];
        indexed.extend(
            self.model
                .columns()
                .into_iter()
                .filter(|c| c.foreign_key)
                .map(|c| c.name),
        );
        indexed
            .iter()
            .map(|column| {
                format!(
                    "create index if not exists \"IDX_{table}_{column}\" on \"{table}\" (\"{column}\") where deleted_at is null;"
                )
            })
            .collect()
    }
}

impl Template for Migration<'_> {
    fn path(&self) -> String {
        paths::migration_file(self.module, self.model)
    }

    fn render(&self) -> String {
        let mut b = CodeBuilder::typescript();
        b.push_line("import { Migration } from \"@mikro-orm/migrations\";")
            .push_blank();
        b.push_block(
            &format!(
                "export class MigrationCreate{} extends Migration {{",
                self.model.name.pascal
            ),
            "}",
            |b| {
                b.push_block("override async up(): Promise<void> {", "}", |b| {
                    b.push_line(&format!("this.addSql(`{}`);", self.create_table()));
                    for index in self.indexes() {
                        b.push_line(&format!("this.addSql(`{index}`);"));
                    }
                });
                b.push_blank();
                b.push_block("override async down(): Promise<void> {", "}", |b| {
                    b.push_line(&format!(
                        "this.addSql(`drop table if exists \"{}\" cascade;`);",
                        self.model.entity()
                    ));
                });
            },
        );
        b.build()
    }
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{FieldConfig, ModelConfig, ModuleConfig, RelationConfig};

    use super::*;
    use crate::schema::ModelIndex;

    #[test]
    fn test_migration_columns_and_indexes() {
        let config = ModuleConfig::new("vehicles")
            .model(ModelConfig::new("vehicle-make"))
            .model(
                ModelConfig::new("vehicle-model")
                    .field(FieldConfig::new("name", "string").required())
                    .field(FieldConfig::new("year_start", "number"))
                    .field(
                        FieldConfig::new("make", "string")
                            .required()
                            .with_relation(RelationConfig::belongs_to("vehicle-make")),
                    ),
            );
        let index = ModelIndex::new(std::slice::from_ref(&config), &[]);
        let module = ModuleSchema::lower(&config, &index).unwrap();
        let migration = Migration::new(&module.models[1], &module);

        assert_eq!(
            migration.path(),
            "src/modules/vehicles/migrations/MigrationCreateVehicleModel.ts"
        );
        let code = migration.render();
        assert!(code.starts_with("import { Migration } from \"@mikro-orm/migrations\";\n\nexport class MigrationCreateVehicleModel extends Migration {\n  override async up(): Promise<void> {\n"));
        assert!(code.contains("\"name\" text not null, \"year_start\" integer null, \"make_id\" text not null, \"created_at\""));
        assert!(code.contains("constraint \"vehicle_model_pkey\" primary key (\"id\"));`);"));
        assert!(code.contains("\"IDX_vehicle_model_make_id\" on \"vehicle_model\" (\"make_id\")"));
        assert!(code.contains("    this.addSql(`drop table if exists \"vehicle_model\" cascade;`);\n  }\n}\n"));
    }
}
