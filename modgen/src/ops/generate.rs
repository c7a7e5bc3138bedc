//! Generate operation - Medusa files from the manifest.

use std::path::Path;

use modgen_codegen::{Generator, Result};
use modgen_manifest::Manifest;

use crate::reports::{Detail, GenerateReport};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Project root the generated paths are relative to.
    pub output_dir: &'a Path,
    /// Whether to plan without writing files.
    pub dry_run: bool,
    /// How much of the plan the report shows.
    pub detail: Detail,
}

/// Execute the generate operation.
///
/// Checks, renders and plans every module of the manifest, then writes the
/// changed files unless dry-running.
pub fn generate(manifest: &Manifest, opts: GenerateOptions) -> Result<GenerateReport> {
    let options = modgen_codegen::GenerateOptions::new(opts.output_dir).dry_run(opts.dry_run);
    let generation = Generator::from_manifest(manifest).generate(&options)?;

    Ok(GenerateReport::new(generation, opts.detail))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use tempfile::TempDir;

    use super::*;

    const MANIFEST: &str = r#"
        [[modules]]
        name = "wipers"

        [[modules.models]]
        name = "wiper"

        [[modules.models.fields]]
        name = "name"
        type = "string"
        required = true
    "#;

    fn options(root: &Path, dry_run: bool) -> GenerateOptions<'_> {
        GenerateOptions {
            output_dir: root,
            dry_run,
            detail: Detail::Plan,
        }
    }

    #[test]
    fn test_generate_writes_files() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();

        let report = generate(&manifest, options(temp.path(), false)).unwrap();
        assert_eq!(report.summary.created, 12);
        assert!(temp.path().join("src/modules/wipers/index.ts").exists());

        let report = generate(&manifest, options(temp.path(), false)).unwrap();
        assert_eq!(report.summary.created, 0);
        assert_eq!(report.summary.unchanged, 12);
    }

    #[test]
    fn test_dry_run_reports_without_writing() {
        let temp = TempDir::new().unwrap();
        let manifest = Manifest::from_str(MANIFEST).unwrap();

        let report = generate(&manifest, options(temp.path(), true)).unwrap();
        assert!(report.dry_run);
        assert_eq!(report.summary_line(), "Dry run: 12 created, 0 updated, 0 unchanged");
        assert!(!temp.path().join("src").exists());
    }
}
