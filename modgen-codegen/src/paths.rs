//! Where generated files live in a Medusa project, and how they refer to
//! each other.
//!
//! Paths are built with `/` separators so output is identical on every
//! platform; they are joined onto the project root only when written.

use std::path::Path;

use serde::Serialize;

use crate::schema::{ModelSchema, ModuleSchema};

/// Custom modules.
pub const MODULES_DIR: &str = "src/modules";

/// Admin API routes.
pub const ADMIN_API_DIR: &str = "src/api/admin";

/// Admin dashboard route pages.
pub const ADMIN_ROUTES_DIR: &str = "src/admin/routes";

/// Module link definitions.
pub const LINKS_DIR: &str = "src/links";

/// Request validation middlewares for every generated route.
pub const MIDDLEWARES_FILE: &str = "src/api/middlewares.ts";

/// JS SDK client shared by admin pages.
pub const ADMIN_SDK_FILE: &str = "src/admin/lib/sdk.ts";

pub fn module_dir(module: &ModuleSchema) -> String {
    format!("{MODULES_DIR}/{}", module.name.kebab)
}

pub fn model_file(module: &ModuleSchema, model: &ModelSchema) -> String {
    format!("{}/models/{}.ts", module_dir(module), model.file_stem())
}

pub fn migration_file(module: &ModuleSchema, model: &ModelSchema) -> String {
    format!(
        "{}/migrations/MigrationCreate{}.ts",
        module_dir(module),
        model.name.pascal
    )
}

/// URL path of a model's collection below `/admin`, with route parameters
/// rendered by `param`.
fn collection_path(model: &ModelSchema, param: impl Fn(&str) -> String) -> String {
    match &model.parent {
        Some(parent) => format!(
            "{}/{}/{}",
            parent.route_prefix,
            param(&parent.param),
            model.plural.kebab
        ),
        None => model.plural.kebab.clone(),
    }
}

/// Directory of a model's API routes, e.g. `src/api/admin/wipers`.
pub fn api_dir(model: &ModelSchema) -> String {
    format!("{ADMIN_API_DIR}/{}", collection_path(model, |p| format!("[{p}]")))
}

/// Directory of a model's admin pages, e.g. `src/admin/routes/wipers`.
pub fn admin_dir(model: &ModelSchema) -> String {
    format!("{ADMIN_ROUTES_DIR}/{}", collection_path(model, |p| format!("[{p}]")))
}

pub fn link_file(model: &ModelSchema, field: &str) -> String {
    format!("{LINKS_DIR}/{}-{}.ts", model.name.kebab, field)
}

/// Route matcher used by middlewares, e.g. `/admin/vehicle-makes/:make_id/vehicle-models`.
pub fn api_matcher(model: &ModelSchema) -> String {
    format!("/admin/{}", collection_path(model, |p| format!(":{p}")))
}

/// TS expression for the collection's API URL. Parent parameters are expected
/// in scope as variables of the same name.
pub fn api_url(model: &ModelSchema) -> String {
    url_expr(&format!(
        "/admin/{}",
        collection_path(model, |p| format!("${{{p}}}"))
    ))
}

/// TS expression for one item's API URL, `id` being a variable in scope.
pub fn api_item_url(model: &ModelSchema, id: &str) -> String {
    url_expr(&format!(
        "/admin/{}/${{{id}}}",
        collection_path(model, |p| format!("${{{p}}}"))
    ))
}

/// TS expression for the collection's admin page URL.
pub fn admin_url(model: &ModelSchema) -> String {
    url_expr(&format!("/{}", collection_path(model, |p| format!("${{{p}}}"))))
}

fn url_expr(path: &str) -> String {
    if path.contains("${") {
        format!("`{path}`")
    } else {
        format!("\"{path}\"")
    }
}

/// Module specifier for importing `to` from the file `from`. Both are
/// project-relative; a `.ts`/`.tsx` extension on `to` is dropped.
pub fn relative_import(from: &str, to: &str) -> String {
    let to = to
        .strip_suffix(".tsx")
        .or_else(|| to.strip_suffix(".ts"))
        .unwrap_or(to);

    let from_dir: Vec<&str> = match from.rsplit_once('/') {
        Some((dir, _)) => dir.split('/').collect(),
        None => Vec::new(),
    };
    let target: Vec<&str> = to.split('/').collect();

    let common = from_dir
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let ups = from_dir.len() - common;
    let rest = target[common..].join("/");
    if ups == 0 {
        format!("./{rest}")
    } else {
        format!("{}{rest}", "../".repeat(ups))
    }
}

/// Report grouping of a generated file, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Module,
    Model,
    Api,
    Admin,
    Link,
    Other,
}

impl FileCategory {
    pub const ALL: [FileCategory; 6] = [
        FileCategory::Module,
        FileCategory::Model,
        FileCategory::Api,
        FileCategory::Admin,
        FileCategory::Link,
        FileCategory::Other,
    ];

    /// Categorize a project-relative path.
    pub fn of(path: &Path) -> Self {
        let path = path.to_string_lossy().replace('\\', "/");
        if let Some(rest) = path.strip_prefix("src/modules/") {
            if rest.contains("/models/") || rest.contains("/migrations/") {
                FileCategory::Model
            } else {
                FileCategory::Module
            }
        } else if path.starts_with("src/api/") {
            FileCategory::Api
        } else if path.starts_with("src/admin/") {
            FileCategory::Admin
        } else if path.starts_with("src/links/") {
            FileCategory::Link
        } else {
            FileCategory::Other
        }
    }

    /// Heading used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Module => "Modules",
            FileCategory::Model => "Models",
            FileCategory::Api => "API",
            FileCategory::Admin => "Admin",
            FileCategory::Link => "Links",
            FileCategory::Other => "Other",
        }
    }
}
