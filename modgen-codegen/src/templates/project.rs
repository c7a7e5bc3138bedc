//! Files shared by every generated module.

use super::{
    Template,
    validators::{ValidatorNames, validators_file},
};
use crate::{
    CodeFile, RawCode,
    ast::{Import, JsObject},
    builder::CodeBuilder,
    paths,
    schema::{ModelSchema, ModuleSchema},
};

/// `src/api/middlewares.ts`: body and query validation for every route.
pub(super) struct Middlewares<'a> {
    modules: &'a [ModuleSchema],
}

impl<'a> Middlewares<'a> {
    pub(super) fn new(modules: &'a [ModuleSchema]) -> Self {
        Self { modules }
    }

    fn models(&self) -> impl Iterator<Item = &'a ModelSchema> {
        self.modules.iter().flat_map(|m| m.models.iter())
    }
}

fn route(
    b: &mut CodeBuilder,
    matcher: &str,
    method: &str,
    middleware: impl FnOnce(&mut CodeBuilder),
) {
    b.push_block("{", "},", |b| {
        b.push_line(&format!("matcher: \"{matcher}\","))
            .push_line(&format!("method: \"{method}\","));
        b.push_block("middlewares: [", "],", middleware);
    });
}

impl Template for Middlewares<'_> {
    fn path(&self) -> String {
        paths::MIDDLEWARES_FILE.to_string()
    }

    fn render(&self) -> String {
        let path = self.path();

        let mut b = CodeBuilder::typescript();
        b.push_block("export default defineMiddlewares({", "});", |b| {
            b.push_block("routes: [", "],", |b| {
                for model in self.models() {
                    let names = ValidatorNames::of(model);
                    let matcher = paths::api_matcher(model);
                    let defaults: Vec<String> =
                        model.query_fields().iter().map(|f| format!("\"{f}\"")).collect();

                    route(b, &matcher, "GET", |b| {
                        b.push_block(
                            &format!("validateAndTransformQuery({}, {{", names.list_params),
                            "}),",
                            |b| {
                                b.push_line(&format!("defaults: [{}],", defaults.join(", ")))
                                    .push_line("isList: true,");
                            },
                        );
                    });
                    route(b, &matcher, "POST", |b| {
                        b.push_line(&format!("validateAndTransformBody({}),", names.create));
                    });
                    route(b, &format!("{matcher}/:id"), "POST", |b| {
                        b.push_line(&format!("validateAndTransformBody({}),", names.update));
                    });
                }
            });
        });

        let validators = self.models().map(|model| {
            let names = ValidatorNames::of(model);
            Import::new(paths::relative_import(&path, &validators_file(model))).named_all([
                names.create,
                names.update,
                names.list_params,
            ])
        });

        CodeFile::new()
            .import(Import::new("@medusajs/framework/http").named_all([
                "defineMiddlewares",
                "validateAndTransformBody",
                "validateAndTransformQuery",
            ]))
            .imports(validators)
            .add(RawCode::new(b.build()))
            .render()
    }
}

/// `src/admin/lib/sdk.ts`: JS SDK client used by admin pages.
pub(super) struct AdminSdk;

impl Template for AdminSdk {
    fn path(&self) -> String {
        paths::ADMIN_SDK_FILE.to_string()
    }

    fn render(&self) -> String {
        let options = JsObject::new()
            .raw("baseUrl", "import.meta.env.VITE_BACKEND_URL || \"/\"")
            .raw("debug", "import.meta.env.DEV")
            .object("auth", JsObject::new().string("type", "session"));

        CodeFile::new()
            .import(Import::new("@medusajs/js-sdk").default("Medusa"))
            .add(options.wrap("export const sdk = new Medusa(", ");"))
            .render()
    }
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{FieldConfig, ModelConfig, ModuleConfig};

    use super::*;
    use crate::schema::ModelIndex;

    #[test]
    fn test_middlewares() {
        let config = ModuleConfig::new("wipers").model(
            ModelConfig::new("wiper").field(FieldConfig::new("name", "string").required()),
        );
        let index = ModelIndex::new(std::slice::from_ref(&config), &[]);
        let modules = [ModuleSchema::lower(&config, &index).unwrap()];

        assert_eq!(
            Middlewares::new(&modules).render(),
            r#"import { defineMiddlewares, validateAndTransformBody, validateAndTransformQuery } from "@medusajs/framework/http";
import { AdminCreateWiper, AdminUpdateWiper, GetAdminWipersParams } from "./admin/wipers/validators";

export default defineMiddlewares({
  routes: [
    {
      matcher: "/admin/wipers",
      method: "GET",
      middlewares: [
        validateAndTransformQuery(GetAdminWipersParams, {
          defaults: ["id", "name", "created_at", "updated_at"],
          isList: true,
        }),
      ],
    },
    {
      matcher: "/admin/wipers",
      method: "POST",
      middlewares: [
        validateAndTransformBody(AdminCreateWiper),
      ],
    },
    {
      matcher: "/admin/wipers/:id",
      method: "POST",
      middlewares: [
        validateAndTransformBody(AdminUpdateWiper),
      ],
    },
  ],
});
"#
        );
    }

    #[test]
    fn test_middlewares_without_models() {
        let code = Middlewares::new(&[]).render();
        assert!(code.contains("export default defineMiddlewares({\n  routes: [\n  ],\n});\n"));
    }

    #[test]
    fn test_admin_sdk() {
        assert_eq!(
            AdminSdk.render(),
            r#"import Medusa from "@medusajs/js-sdk";

export const sdk = new Medusa({
  baseUrl: import.meta.env.VITE_BACKEND_URL || "/",
  debug: import.meta.env.DEV,
  auth: {
    type: "session",
  },
});
"#
        );
    }
}
