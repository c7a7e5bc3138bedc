//! Type mapping between field types and target syntax.

use crate::types::FieldType;

/// Trait for mapping field types to target-specific type expressions.
///
/// Implement this trait once per output dialect (ORM definition, validator
/// schema, TypeScript type, SQL column).
pub trait TypeMapper {
    /// The target dialect name
    fn dialect(&self) -> &'static str;

    /// Map a required field type
    fn map_type(&self, field_type: FieldType) -> &'static str;

    /// Map a field type that may be absent
    fn map_optional_type(&self, field_type: FieldType) -> String {
        format!("{} | null", self.map_type(field_type))
    }

    /// Map a field type, choosing the optional form when `required` is false
    fn map_field(&self, field_type: FieldType, required: bool) -> String {
        if required {
            self.map_type(field_type).to_string()
        } else {
            self.map_optional_type(field_type)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl TypeMapper for Upper {
        fn dialect(&self) -> &'static str {
            "upper"
        }

        fn map_type(&self, field_type: FieldType) -> &'static str {
            match field_type {
                FieldType::String => "STRING",
                FieldType::Number => "NUMBER",
                FieldType::Boolean => "BOOLEAN",
                FieldType::Date => "DATE",
            }
        }
    }

    #[test]
    fn test_default_optional_mapping() {
        assert_eq!(Upper.map_field(FieldType::String, true), "STRING");
        assert_eq!(Upper.map_field(FieldType::Date, false), "DATE | null");
    }
}
