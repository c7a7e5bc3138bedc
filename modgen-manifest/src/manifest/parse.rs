//! Manifest parsing from files and strings.

use std::{collections::HashSet, path::Path, str::FromStr};

use super::{Manifest, validate::ParseContext};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "modgen.toml")
    }
}

impl Manifest {
    /// Parse a modgen.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a modgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, content, filename)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, src: &str, filename: &str) -> Result<()> {
    let ctx = ParseContext::new(src, filename);

    let mut seen = HashSet::new();
    for module in &manifest.modules {
        ctx.validate_name(&module.name, "module")?;
        if !seen.insert(module.name.as_str()) {
            return Err(ctx.duplicate(&module.name, "module"));
        }

        let module_ctx = ctx.push(&module.name);
        module_ctx.validate_display_names(module.singular.as_deref(), module.plural.as_deref())?;
        module_ctx.validate_module(module, manifest)?;
    }

    for external in &manifest.generator.external_models {
        ctx.validate_name(&external.name, "external model")?;
        ctx.validate_name(&external.module, "external module")?;
    }

    Ok(())
}
