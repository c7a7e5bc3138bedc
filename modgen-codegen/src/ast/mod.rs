//! TypeScript AST nodes used by the templates.

mod imports;
mod objects;

pub use imports::Import;
pub use objects::{JsObject, Property, PropertyValue};
