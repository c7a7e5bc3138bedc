//! Type mappers for every dialect the templates emit.

use modgen_core::{FieldType, TypeMapper};

/// Medusa data-model language (`model.text()` and friends).
#[derive(Debug, Clone, Copy, Default)]
pub struct DmlMapper;

impl TypeMapper for DmlMapper {
    fn dialect(&self) -> &'static str {
        "dml"
    }

    fn map_type(&self, field_type: FieldType) -> &'static str {
        match field_type {
            FieldType::String => "model.text()",
            FieldType::Number => "model.number()",
            FieldType::Boolean => "model.boolean()",
            FieldType::Date => "model.dateTime()",
        }
    }

    fn map_optional_type(&self, field_type: FieldType) -> String {
        format!("{}.nullable()", self.map_type(field_type))
    }
}

/// zod validator schemas.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZodMapper;

impl TypeMapper for ZodMapper {
    fn dialect(&self) -> &'static str {
        "zod"
    }

    fn map_type(&self, field_type: FieldType) -> &'static str {
        match field_type {
            FieldType::String => "z.string()",
            FieldType::Number => "z.number()",
            FieldType::Boolean => "z.boolean()",
            FieldType::Date => "z.coerce.date()",
        }
    }

    fn map_optional_type(&self, field_type: FieldType) -> String {
        format!("{}.nullish()", self.map_type(field_type))
    }
}

/// TypeScript types as seen by the admin UI (dates travel as ISO strings).
#[derive(Debug, Clone, Copy, Default)]
pub struct TsMapper;

impl TypeMapper for TsMapper {
    fn dialect(&self) -> &'static str {
        "typescript"
    }

    fn map_type(&self, field_type: FieldType) -> &'static str {
        match field_type {
            FieldType::String | FieldType::Date => "string",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
        }
    }
}

/// PostgreSQL column types used by migration stubs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostgresMapper;

impl TypeMapper for PostgresMapper {
    fn dialect(&self) -> &'static str {
        "postgres"
    }

    fn map_type(&self, field_type: FieldType) -> &'static str {
        match field_type {
            FieldType::String => "text",
            FieldType::Number => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Date => "timestamptz",
        }
    }

    fn map_optional_type(&self, field_type: FieldType) -> String {
        format!("{} null", self.map_type(field_type))
    }

    fn map_field(&self, field_type: FieldType, required: bool) -> String {
        if required {
            format!("{} not null", self.map_type(field_type))
        } else {
            self.map_optional_type(field_type)
        }
    }
}
