//! Generation run: check, render, plan, apply.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
};

use modgen_core::{Action, FileChange};
use modgen_manifest::{ExternalModel, Manifest, ModuleConfig};

use crate::{
    Error, Result,
    pipeline::{Diagnostic, Linter},
    planner::{DesiredFiles, plan},
    templates::{RenderedFile, Renderer, TemplateId, render_model, render_module, render_project},
};

/// Environment variable that forces a dry run when set to `1`.
pub const DRY_RUN_ENV: &str = "DRY_RUN";

/// Whether [`DRY_RUN_ENV`] requests a dry run.
pub fn dry_run_from_env() -> bool {
    dry_run_value(std::env::var(DRY_RUN_ENV).ok().as_deref())
}

/// Only the exact value `1` enables a dry run.
pub fn dry_run_value(value: Option<&str>) -> bool {
    value == Some("1")
}

/// Options for a generation run.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Project root the generated paths are relative to.
    pub output_dir: PathBuf,
    /// Plan only; never touch the output tree.
    pub dry_run: bool,
    /// Models owned by modules outside this run.
    pub external_models: Vec<ExternalModel>,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            dry_run: false,
            external_models: Vec::new(),
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn external_models(mut self, models: Vec<ExternalModel>) -> Self {
        self.external_models = models;
        self
    }
}

/// Outcome of a generation run.
#[derive(Debug, Clone)]
pub struct Generation {
    /// Every desired file with its action, grouped by category.
    pub changes: Vec<FileChange>,
    /// Lint findings; these never block generation.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether the changes were only planned.
    pub dry_run: bool,
}

impl Generation {
    pub fn count(&self, action: Action) -> usize {
        self.changes.iter().filter(|c| c.action == action).count()
    }

    pub fn created(&self) -> usize {
        self.count(Action::Create)
    }

    pub fn updated(&self) -> usize {
        self.count(Action::Update)
    }

    pub fn unchanged(&self) -> usize {
        self.count(Action::Skip)
    }

    /// Whether the output tree already matched.
    pub fn is_up_to_date(&self) -> bool {
        self.changes.iter().all(|c| c.action == Action::Skip)
    }
}

/// Generates Medusa modules from configurations.
///
/// # Example
///
/// ```ignore
/// let generation = Generator::new(&manifest.modules)
///     .with_external_models(&manifest.generator.external_models)
///     .generate(&GenerateOptions::new(".").dry_run(true))?;
/// ```
pub struct Generator<'a> {
    modules: &'a [ModuleConfig],
    external_models: Vec<ExternalModel>,
    linter: Linter,
}

impl<'a> Generator<'a> {
    pub fn new(modules: &'a [ModuleConfig]) -> Self {
        Self {
            modules,
            external_models: Vec::new(),
            linter: Linter::new(),
        }
    }

    /// Generator for every module of a manifest, including its external models.
    pub fn from_manifest(manifest: &'a Manifest) -> Self {
        Self::new(&manifest.modules).with_external_models(&manifest.generator.external_models)
    }

    pub fn with_external_models(mut self, models: &[ExternalModel]) -> Self {
        self.external_models.extend_from_slice(models);
        self
    }

    pub fn with_linter(mut self, linter: Linter) -> Self {
        self.linter = linter;
        self
    }

    /// Check every module and render every file.
    ///
    /// Fails on the first configuration problem, before anything is rendered.
    pub fn render(&self) -> Result<Vec<RenderedFile>> {
        Ok(self.render_owned()?.into_iter().map(|(_, file)| file).collect())
    }

    /// Rendered files paired with the name of the module that produced them.
    /// Project files are attributed to the first module.
    fn render_owned(&self) -> Result<Vec<(&'a str, RenderedFile)>> {
        let mut seen = HashSet::new();
        for module in self.modules {
            if !seen.insert(module.name.as_str()) {
                return Err(Error::module_config(
                    &module.name,
                    format!("module '{}' is declared twice", module.name),
                ));
            }
        }

        let renderer = Renderer::new(self.modules, &self.external_models);
        let schemas = self
            .modules
            .iter()
            .map(|module| renderer.lower(module))
            .collect::<Result<Vec<_>>>()?;

        let mut files = Vec::new();
        for (config, module) in self.modules.iter().zip(&schemas) {
            let owner = config.name.as_str();
            for id in TemplateId::MODULE {
                files.extend(render_module(id, module)?.into_iter().map(|f| (owner, f)));
            }
            for model in &module.models {
                for id in TemplateId::MODEL {
                    files.extend(render_model(id, model, module)?.into_iter().map(|f| (owner, f)));
                }
            }
        }

        let owner = self.modules.first().map(|m| m.name.as_str()).unwrap_or_default();
        for id in TemplateId::PROJECT {
            files.extend(render_project(id, &schemas)?.into_iter().map(|f| (owner, f)));
        }
        Ok(files)
    }

    /// Rendered files keyed by path. Two templates claiming one path is a
    /// configuration error.
    pub fn desired(&self) -> Result<DesiredFiles> {
        let mut desired = DesiredFiles::new();
        let mut owners: HashMap<PathBuf, TemplateId> = HashMap::new();

        for (module, file) in self.render_owned()? {
            if let Some(previous) = owners.insert(file.path.clone(), file.template) {
                return Err(Error::module_config(
                    module,
                    format!(
                        "'{}' would be generated by both '{previous}' and '{}'",
                        file.path.display(),
                        file.template
                    ),
                ));
            }
            desired.insert(file.path, file.content);
        }
        Ok(desired)
    }

    /// Run the whole pipeline against `options.output_dir`.
    pub fn generate(&self, options: &GenerateOptions) -> Result<Generation> {
        let diagnostics = self.linter.run(self.modules);

        let generator = Self {
            modules: self.modules,
            external_models: [self.external_models.as_slice(), &options.external_models].concat(),
            linter: Linter::empty(),
        };
        let desired = generator.desired()?;
        let changes = plan(&desired, &options.output_dir)?;

        if !options.dry_run {
            apply(&changes, &options.output_dir)?;
        }

        Ok(Generation {
            changes,
            diagnostics,
            dry_run: options.dry_run,
        })
    }
}

/// Generate `modules` into `options.output_dir`.
///
/// Nothing is written when any module fails to check or render, or when
/// `options.dry_run` is set.
pub fn generate(modules: &[ModuleConfig], options: &GenerateOptions) -> Result<Generation> {
    Generator::new(modules).generate(options)
}

/// Write every non-skip change below `root`, in order.
///
/// Returns the number of files written. Stops at the first failure; files
/// written before it stay on disk.
pub fn apply(changes: &[FileChange], root: &Path) -> Result<usize> {
    let mut written = 0;
    for change in changes {
        if change
            .apply(root)
            .map_err(|source| Error::io("write", change.target(root), source))?
        {
            written += 1;
        }
    }
    Ok(written)
}
