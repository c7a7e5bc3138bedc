//! Template catalogue.
//!
//! Every generated file comes from one [`TemplateId`]. Templates are pure
//! functions of the lowered schema: the same configuration always renders the
//! same bytes.

mod admin;
mod link;
mod migration;
mod model;
mod module;
mod project;
mod routes;
mod validators;

use std::{fmt, path::PathBuf};

use modgen_manifest::{ExternalModel, ModelConfig, ModuleConfig};
use serde::Serialize;

use crate::{
    Error, Result,
    schema::{ModelIndex, ModelSchema, ModuleSchema},
};

/// What a template is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Once per model.
    Model,
    /// Once per module.
    Module,
    /// Once per generation run.
    Project,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    Model,
    Migration,
    Validators,
    CollectionRoute,
    ItemRoute,
    AdminList,
    AdminCreate,
    AdminEdit,
    Link,
    ModuleIndex,
    ModuleService,
    Middlewares,
    AdminSdk,
}

impl TemplateId {
    /// Model templates in generation order.
    pub const MODEL: [TemplateId; 9] = [
        TemplateId::Model,
        TemplateId::Migration,
        TemplateId::Validators,
        TemplateId::CollectionRoute,
        TemplateId::ItemRoute,
        TemplateId::AdminList,
        TemplateId::AdminCreate,
        TemplateId::AdminEdit,
        TemplateId::Link,
    ];

    pub const MODULE: [TemplateId; 2] = [TemplateId::ModuleIndex, TemplateId::ModuleService];

    pub const PROJECT: [TemplateId; 2] = [TemplateId::Middlewares, TemplateId::AdminSdk];

    pub fn scope(&self) -> Scope {
        match self {
            TemplateId::ModuleIndex | TemplateId::ModuleService => Scope::Module,
            TemplateId::Middlewares | TemplateId::AdminSdk => Scope::Project,
            _ => Scope::Model,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Model => "model",
            TemplateId::Migration => "migration",
            TemplateId::Validators => "validators",
            TemplateId::CollectionRoute => "collection-route",
            TemplateId::ItemRoute => "item-route",
            TemplateId::AdminList => "admin-list",
            TemplateId::AdminCreate => "admin-create",
            TemplateId::AdminEdit => "admin-edit",
            TemplateId::Link => "link",
            TemplateId::ModuleIndex => "module-index",
            TemplateId::ModuleService => "module-service",
            TemplateId::Middlewares => "middlewares",
            TemplateId::AdminSdk => "admin-sdk",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered file, its path relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    pub template: TemplateId,
    pub path: PathBuf,
    pub content: String,
}

/// A single output file of a template.
trait Template {
    /// Project-relative path with `/` separators.
    fn path(&self) -> String;

    fn render(&self) -> String;
}

/// Renders templates for module configurations.
///
/// Relation targets are resolved against every module the renderer was built
/// with, plus the external models.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    index: ModelIndex,
}

impl Renderer {
    pub fn new(modules: &[ModuleConfig], external: &[ExternalModel]) -> Self {
        Self {
            index: ModelIndex::new(modules, external),
        }
    }

    /// Check and lower one module.
    pub fn lower(&self, module: &ModuleConfig) -> Result<ModuleSchema> {
        ModuleSchema::lower(module, &self.index)
    }

    /// Render a template for one model of `module`.
    ///
    /// Module and project templates ignore `model` and render for `module`
    /// alone. A template may produce several files (one link per relation) or
    /// none.
    pub fn render(
        &self,
        id: TemplateId,
        model: &ModelConfig,
        module: &ModuleConfig,
    ) -> Result<Vec<RenderedFile>> {
        let schema = self.lower(module)?;
        match id.scope() {
            Scope::Model => {
                let model = schema.find_model(&model.name).ok_or_else(|| {
                    Error::model_config(
                        &module.name,
                        &model.name,
                        format!("model '{}' is not declared in this module", model.name),
                    )
                })?;
                render_model(id, model, &schema)
            }
            Scope::Module => render_module(id, &schema),
            Scope::Project => render_project(id, std::slice::from_ref(&schema)),
        }
    }

    /// Render a module or project template for `module`.
    pub fn render_module(
        &self,
        id: TemplateId,
        module: &ModuleConfig,
    ) -> Result<Vec<RenderedFile>> {
        let schema = self.lower(module)?;
        match id.scope() {
            Scope::Project => render_project(id, std::slice::from_ref(&schema)),
            _ => render_module(id, &schema),
        }
    }

    /// Render a project template for every module.
    pub fn render_project(
        &self,
        id: TemplateId,
        modules: &[ModuleConfig],
    ) -> Result<Vec<RenderedFile>> {
        let schemas = modules
            .iter()
            .map(|m| self.lower(m))
            .collect::<Result<Vec<_>>>()?;
        render_project(id, &schemas)
    }
}

/// Render a template for a model of a standalone module.
///
/// Relations may only target models of `module` or Medusa commerce models; use
/// a [`Renderer`] to resolve relations across modules.
pub fn render(
    id: TemplateId,
    model: &ModelConfig,
    module: &ModuleConfig,
) -> Result<Vec<RenderedFile>> {
    Renderer::new(std::slice::from_ref(module), &[]).render(id, model, module)
}

pub(crate) fn render_model(
    id: TemplateId,
    model: &ModelSchema,
    module: &ModuleSchema,
) -> Result<Vec<RenderedFile>> {
    let templates: Vec<Box<dyn Template + '_>> = match id {
        TemplateId::Model => vec![Box::new(model::ModelDefinition::new(model, module))],
        TemplateId::Migration => vec![Box::new(migration::Migration::new(model, module))],
        TemplateId::Validators => vec![Box::new(validators::Validators::new(model))],
        TemplateId::CollectionRoute => vec![Box::new(routes::CollectionRoute::new(model, module))],
        TemplateId::ItemRoute => vec![Box::new(routes::ItemRoute::new(model, module))],
        TemplateId::AdminList => vec![Box::new(admin::AdminList::new(model))],
        TemplateId::AdminCreate => vec![Box::new(admin::AdminCreate::new(model))],
        TemplateId::AdminEdit => vec![Box::new(admin::AdminEdit::new(model))],
        TemplateId::Link => model
            .link_fields()
            .map(|field| Box::new(link::Link::new(model, module, field)) as Box<dyn Template + '_>)
            .collect(),
        other => return Err(scope_mismatch(other, &module.name.raw)),
    };
    finish_all(id, &templates)
}

pub(crate) fn render_module(id: TemplateId, module: &ModuleSchema) -> Result<Vec<RenderedFile>> {
    let templates: Vec<Box<dyn Template + '_>> = match id {
        TemplateId::ModuleIndex => vec![Box::new(module::ModuleIndex::new(module))],
        TemplateId::ModuleService => vec![Box::new(module::ModuleService::new(module))],
        other => return Err(scope_mismatch(other, &module.name.raw)),
    };
    finish_all(id, &templates)
}

pub(crate) fn render_project(
    id: TemplateId,
    modules: &[ModuleSchema],
) -> Result<Vec<RenderedFile>> {
    let templates: Vec<Box<dyn Template + '_>> = match id {
        TemplateId::Middlewares => vec![Box::new(project::Middlewares::new(modules))],
        TemplateId::AdminSdk => vec![Box::new(project::AdminSdk)],
        other => {
            let module = modules.first().map(|m| m.name.raw.as_str()).unwrap_or_default();
            return Err(scope_mismatch(other, module));
        }
    };
    finish_all(id, &templates)
}

fn scope_mismatch(id: TemplateId, module: &str) -> Error {
    Error::module_config(
        module,
        format!("template '{id}' cannot be rendered at this scope"),
    )
}

fn finish_all(id: TemplateId, templates: &[Box<dyn Template + '_>]) -> Result<Vec<RenderedFile>> {
    templates.iter().map(|t| finish(id, t.as_ref())).collect()
}

/// Render a template and reject output that cannot be a real source file.
fn finish(id: TemplateId, template: &dyn Template) -> Result<RenderedFile> {
    let path = PathBuf::from(template.path());
    let content = template.render();

    if content.trim().is_empty() {
        return Err(Error::Template {
            template: id,
            path,
            message: "rendered empty output".to_string(),
        });
    }
    if let Some(marker) = find_placeholder(&content) {
        return Err(Error::Template {
            template: id,
            path,
            message: format!("unresolved placeholder '{marker}'"),
        });
    }

    Ok(RenderedFile {
        template: id,
        path,
        content,
    })
}

/// Find a `{{name}}` marker. JSX object literals (`{{ a: 1 }}`) do not match.
fn find_placeholder(content: &str) -> Option<&str> {
    let mut rest = content;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let name_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.'))
            .unwrap_or(after.len());
        if name_len > 0 && after[name_len..].starts_with("}}") {
            return Some(&rest[start..start + 2 + name_len + 2]);
        }
        rest = after;
    }
    None
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{FieldConfig, RelationConfig};

    use super::*;

    struct Fixed(&'static str);

    impl Template for Fixed {
        fn path(&self) -> String {
            "src/fixed.ts".to_string()
        }

        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    fn wipers() -> ModuleConfig {
        ModuleConfig::new("wipers").model(
            ModelConfig::new("wiper")
                .field(FieldConfig::new("name", "string").required())
                .field(FieldConfig::new("description", "string")),
        )
    }

    #[test]
    fn test_scopes() {
        assert!(TemplateId::MODEL.iter().all(|t| t.scope() == Scope::Model));
        assert!(TemplateId::MODULE.iter().all(|t| t.scope() == Scope::Module));
        assert!(TemplateId::PROJECT.iter().all(|t| t.scope() == Scope::Project));
    }

    #[test]
    fn test_find_placeholder() {
        assert_eq!(find_placeholder("const x = {{name}};"), Some("{{name}}"));
        assert_eq!(find_placeholder("<div style={{ color: \"red\" }} />"), None);
        assert_eq!(find_placeholder("no markers"), None);
    }

    #[test]
    fn test_empty_output_is_rejected() {
        let err = finish(TemplateId::Model, &Fixed("  \n")).unwrap_err();
        assert!(matches!(err, Error::Template { template: TemplateId::Model, .. }));
    }

    #[test]
    fn test_placeholder_output_is_rejected() {
        let err = finish(TemplateId::Model, &Fixed("export default {{model}};\n")).unwrap_err();
        assert!(err.to_string().contains("{{model}}"));
    }

    #[test]
    fn test_render_model_template() {
        let module = wipers();
        let files = render(TemplateId::Model, &module.models[0], &module).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, PathBuf::from("src/modules/wipers/models/wiper.ts"));
        assert_eq!(files[0].template, TemplateId::Model);
    }

    #[test]
    fn test_render_is_deterministic() {
        let module = wipers();
        for id in TemplateId::MODEL {
            let a = render(id, &module.models[0], &module).unwrap();
            let b = render(id, &module.models[0], &module).unwrap();
            assert_eq!(a, b, "{id}");
        }
    }

    #[test]
    fn test_link_renders_one_file_per_relation() {
        let module = ModuleConfig::new("fitments").model(
            ModelConfig::new("fitment")
                .field(
                    FieldConfig::new("product", "string")
                        .with_relation(RelationConfig::belongs_to("product")),
                )
                .field(
                    FieldConfig::new("channels", "string")
                        .with_relation(RelationConfig::many_to_many("sales_channel")),
                ),
        );
        let files = render(TemplateId::Link, &module.models[0], &module).unwrap();
        let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            paths,
            [
                PathBuf::from("src/links/fitment-product.ts"),
                PathBuf::from("src/links/fitment-channels.ts"),
            ]
        );

        let files = render(TemplateId::Link, &wipers().models[0], &wipers()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_render_module_scoped_template() {
        let module = wipers();
        let files = Renderer::new(std::slice::from_ref(&module), &[])
            .render_module(TemplateId::ModuleIndex, &module)
            .unwrap();
        assert_eq!(files[0].path, PathBuf::from("src/modules/wipers/index.ts"));
    }

    #[test]
    fn test_render_invalid_config_fails() {
        let module = ModuleConfig::new("wipers")
            .model(ModelConfig::new("wiper").field(FieldConfig::new("sku", "uuid")));
        let err = render(TemplateId::Model, &module.models[0], &module).unwrap_err();
        assert!(err.is_config());
    }
}
