//! Error types for rendering, planning and applying generated files.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::templates::TemplateId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The module configuration cannot be generated.
    #[error("{message} (in {})", location(.module, .model, .field))]
    #[diagnostic(
        code(modgen::codegen::config),
        help("fix the module configuration; no files were written")
    )]
    Config {
        module: String,
        model: Option<String>,
        field: Option<String>,
        message: String,
    },

    /// Reading or writing a file failed.
    #[error("failed to {operation} '{}'", .path.display())]
    #[diagnostic(code(modgen::codegen::io))]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A template produced unusable output.
    #[error("template '{template}' failed for '{}': {message}", .path.display())]
    #[diagnostic(code(modgen::codegen::template))]
    Template {
        template: TemplateId,
        path: PathBuf,
        message: String,
    },
}

impl Error {
    pub(crate) fn module_config(module: &str, message: impl Into<String>) -> Self {
        Self::Config {
            module: module.to_string(),
            model: None,
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn model_config(module: &str, model: &str, message: impl Into<String>) -> Self {
        Self::Config {
            module: module.to_string(),
            model: Some(model.to_string()),
            field: None,
            message: message.into(),
        }
    }

    pub(crate) fn field_config(
        module: &str,
        model: &str,
        field: &str,
        message: impl Into<String>,
    ) -> Self {
        Self::Config {
            module: module.to_string(),
            model: Some(model.to_string()),
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub(crate) fn io(
        operation: &'static str,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the error was raised before any file was touched.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

fn location(module: &str, model: &Option<String>, field: &Option<String>) -> String {
    let mut out = format!("module '{module}'");
    if let Some(model) = model {
        out.push_str(&format!(", model '{model}'"));
    }
    if let Some(field) = field {
        out.push_str(&format!(", field '{field}'"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_message_names_location() {
        let err = Error::field_config("wipers", "wiper", "sku", "unsupported type 'uuid'");
        assert_eq!(
            err.to_string(),
            "unsupported type 'uuid' (in module 'wipers', model 'wiper', field 'sku')"
        );
        assert!(err.is_config());
    }

    #[test]
    fn test_module_config_message() {
        let err = Error::module_config("wipers", "module 'wipers' is declared twice");
        assert_eq!(
            err.to_string(),
            "module 'wipers' is declared twice (in module 'wipers')"
        );
    }

    #[test]
    fn test_io_message() {
        let err = Error::io(
            "read",
            "src/modules/wipers/index.ts",
            std::io::Error::other("denied"),
        );
        assert_eq!(err.to_string(), "failed to read 'src/modules/wipers/index.ts'");
        assert!(!err.is_config());
    }
}
