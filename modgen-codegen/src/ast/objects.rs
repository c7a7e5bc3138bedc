//! TypeScript/JavaScript object literal builder.

use crate::builder::CodeFragment;

/// A property in a JavaScript object literal.
#[derive(Debug, Clone)]
pub struct Property {
    pub key: String,
    pub value: PropertyValue,
}

/// The value of an object property.
#[derive(Debug, Clone)]
pub enum PropertyValue {
    /// A literal string value (will be quoted).
    String(String),
    /// A raw expression (will not be quoted).
    Raw(String),
    /// A nested object.
    Object(JsObject),
    /// Shorthand property (`{ Wiper }`).
    Shorthand,
}

/// Builder for JavaScript/TypeScript object literals.
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    properties: Vec<Property>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property with a string value (will be quoted).
    pub fn string(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value: PropertyValue::String(value.into()),
        });
        self
    }

    /// Add a property with a raw expression value (will not be quoted).
    pub fn raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value: PropertyValue::Raw(value.into()),
        });
        self
    }

    /// Add a property with a nested object value.
    pub fn object(mut self, key: impl Into<String>, value: JsObject) -> Self {
        self.properties.push(Property {
            key: key.into(),
            value: PropertyValue::Object(value),
        });
        self
    }

    /// Add a shorthand property where key equals the variable name.
    pub fn shorthand(mut self, name: impl Into<String>) -> Self {
        self.properties.push(Property {
            key: name.into(),
            value: PropertyValue::Shorthand,
        });
        self
    }

    /// Render the literal as the argument of a call or declaration, e.g.
    /// `wrap("export default Module(WIPERS_MODULE, ", ");")`.
    pub fn wrap(&self, prefix: &str, suffix: &str) -> CodeFragment {
        if self.properties.is_empty() {
            return CodeFragment::Line(format!("{prefix}{{}}{suffix}"));
        }
        CodeFragment::Block {
            header: format!("{prefix}{{"),
            body: self.properties_to_fragments(),
            close: Some(format!("}}{suffix}")),
        }
    }

    fn properties_to_fragments(&self) -> Vec<CodeFragment> {
        self.properties
            .iter()
            .map(|prop| match &prop.value {
                PropertyValue::String(s) => CodeFragment::Line(format!("{}: \"{}\",", prop.key, s)),
                PropertyValue::Raw(s) => CodeFragment::Line(format!("{}: {},", prop.key, s)),
                PropertyValue::Object(obj) => obj.wrap(&format!("{}: ", prop.key), ","),
                PropertyValue::Shorthand => CodeFragment::Line(format!("{},", prop.key)),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::CodeBuilder;

    fn build(object: &JsObject) -> String {
        let mut builder = CodeBuilder::typescript();
        builder.apply_fragment(object.wrap("", ""));
        builder.build().trim_end().to_string()
    }

    #[test]
    fn test_empty_object() {
        assert_eq!(build(&JsObject::new()), "{}");
    }

    #[test]
    fn test_object_with_string_and_raw() {
        let obj = JsObject::new()
            .string("entity", "wiper")
            .raw("isList", "true");
        assert_eq!(build(&obj), "{\n  entity: \"wiper\",\n  isList: true,\n}");
    }

    #[test]
    fn test_object_with_shorthand() {
        let obj = JsObject::new().shorthand("Wiper");
        assert_eq!(build(&obj), "{\n  Wiper,\n}");
    }

    #[test]
    fn test_nested_object() {
        let inner = JsObject::new().string("type", "session");
        let outer = JsObject::new().raw("debug", "false").object("auth", inner);
        assert_eq!(
            build(&outer),
            "{\n  debug: false,\n  auth: {\n    type: \"session\",\n  },\n}"
        );
    }

    #[test]
    fn test_wrap_call() {
        let mut builder = CodeBuilder::typescript();
        builder.apply_fragment(
            JsObject::new()
                .shorthand("Wiper")
                .wrap("class WipersModuleService extends MedusaService(", ") {}"),
        );
        assert_eq!(
            builder.build(),
            "class WipersModuleService extends MedusaService({\n  Wiper,\n}) {}\n"
        );
    }
}
