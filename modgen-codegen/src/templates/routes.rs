//! Admin API route handlers.

use super::{Template, validators::{ValidatorNames, validators_file}};
use crate::{
    CodeFile, RawCode,
    ast::Import,
    builder::CodeBuilder,
    paths,
    schema::{ModelSchema, ModuleSchema},
};

/// `<api>/route.ts`: list and create.
pub(super) struct CollectionRoute<'a> {
    model: &'a ModelSchema,
    module: &'a ModuleSchema,
}

/// `<api>/[id]/route.ts`: retrieve, update and delete.
pub(super) struct ItemRoute<'a> {
    model: &'a ModelSchema,
    module: &'a ModuleSchema,
}

impl<'a> CollectionRoute<'a> {
    pub(super) fn new(model: &'a ModelSchema, module: &'a ModuleSchema) -> Self {
        Self { model, module }
    }
}

impl<'a> ItemRoute<'a> {
    pub(super) fn new(model: &'a ModelSchema, module: &'a ModuleSchema) -> Self {
        Self { model, module }
    }
}

/// Imports shared by both route files.
fn route_imports(
    path: &str,
    model: &ModelSchema,
    module: &ModuleSchema,
    body_type: String,
) -> Vec<Import> {
    let module_dir = paths::module_dir(module);
    vec![
        Import::new("@medusajs/framework/http")
            .named_all(["MedusaRequest", "MedusaResponse"])
            .type_only(),
        Import::new(paths::relative_import(path, &module_dir)).named(module.constant()),
        Import::new(paths::relative_import(path, &format!("{module_dir}/service.ts")))
            .default(module.service())
            .type_only(),
        Import::new(paths::relative_import(path, &validators_file(model)))
            .named(body_type)
            .type_only(),
    ]
}

fn resolve_service(b: &mut CodeBuilder, module: &ModuleSchema) {
    b.push_line(&format!(
        "const service: {} = req.scope.resolve({});",
        module.service(),
        module.constant()
    ));
}

/// Handler taking a validated body.
fn body_handler(method: &str, body_type: &str, f: impl FnOnce(&mut CodeBuilder)) -> String {
    let mut b = CodeBuilder::typescript();
    b.push_line(&format!("export const {method} = async ("));
    b.push_indent()
        .push_line(&format!("req: MedusaRequest<{body_type}>,"))
        .push_line("res: MedusaResponse,")
        .push_dedent();
    b.push_block(") => {", "};", f);
    b.build()
}

/// Handler without a body.
fn plain_handler(method: &str, f: impl FnOnce(&mut CodeBuilder)) -> String {
    let mut b = CodeBuilder::typescript();
    b.push_block(
        &format!("export const {method} = async (req: MedusaRequest, res: MedusaResponse) => {{"),
        "};",
        f,
    );
    b.build()
}

fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("\"{i}\"")).collect();
    format!("[{}]", quoted.join(", "))
}

impl Template for CollectionRoute<'_> {
    fn path(&self) -> String {
        format!("{}/route.ts", paths::api_dir(self.model))
    }

    fn render(&self) -> String {
        let path = self.path();
        let model = self.model;
        let names = ValidatorNames::of(model);
        let body_type = format!("{}Type", names.create);
        let collection = &model.plural.snake;
        let item = &model.name.snake;
        let parent = model.parent.as_ref().map(|p| p.param.as_str());

        let get = plain_handler("GET", |b| {
            b.push_line("const query = req.scope.resolve(ContainerRegistrationKeys.QUERY);")
                .push_blank();
            b.push_block(
                &format!(
                    "const {{ data: {}, metadata }} = await query.graph({{",
                    model.plural.camel
                ),
                "});",
                |b| {
                    b.push_line(&format!("entity: \"{}\",", model.entity()))
                        .push_line("...req.queryConfig,");
                    if let Some(param) = parent {
                        b.push_line(&format!("filters: {{ {param}: req.params.{param} }},"));
                    }
                },
            );
            b.push_blank();
            b.push_block("res.json({", "});", |b| {
                b.push_line(&format!("{collection}: {},", model.plural.camel))
                    .push_line("count: metadata?.count ?? 0,")
                    .push_line("offset: metadata?.skip ?? 0,")
                    .push_line("limit: metadata?.take ?? 0,");
            });
        });

        let post = body_handler("POST", &body_type, |b| {
            resolve_service(b, self.module);
            let input = match parent {
                Some(param) => format!("{{ ...req.validatedBody, {param}: req.params.{param} }}"),
                None => "req.validatedBody".to_string(),
            };
            b.push_line(&format!(
                "const {item} = await service.create{}({input});",
                model.service_plural()
            ))
            .push_blank()
            .push_line(&format!("res.status(201).json({{ {item} }});"));
        });

        CodeFile::new()
            .imports(route_imports(&path, model, self.module, body_type))
            .import(Import::new("@medusajs/framework/utils").named("ContainerRegistrationKeys"))
            .add(RawCode::new(get))
            .add(RawCode::new(post))
            .render()
    }
}

impl Template for ItemRoute<'_> {
    fn path(&self) -> String {
        format!("{}/[id]/route.ts", paths::api_dir(self.model))
    }

    fn render(&self) -> String {
        let path = self.path();
        let model = self.model;
        let names = ValidatorNames::of(model);
        let body_type = format!("{}Type", names.update);
        let item = &model.name.snake;
        let filters = match &model.parent {
            Some(parent) => format!(
                "{{ id: req.params.id, {0}: req.params.{0} }}",
                parent.param
            ),
            None => "{ id: req.params.id }".to_string(),
        };

        let get = plain_handler("GET", |b| {
            b.push_line("const query = req.scope.resolve(ContainerRegistrationKeys.QUERY);")
                .push_blank();
            b.push_block(
                &format!("const {{ data: [{item}] }} = await query.graph({{"),
                "});",
                |b| {
                    b.push_line(&format!("entity: \"{}\",", model.entity()))
                        .push_line(&format!("fields: {},", quoted_list(&model.query_fields())))
                        .push_line(&format!("filters: {filters},"));
                },
            );
            b.push_blank();
            b.push_block(&format!("if (!{item}) {{"), "}", |b| {
                b.push_block("throw new MedusaError(", ");", |b| {
                    b.push_line("MedusaError.Types.NOT_FOUND,").push_line(&format!(
                        "`{} with id ${{req.params.id}} was not found`,",
                        model.singular.title
                    ));
                });
            });
            b.push_blank()
                .push_line(&format!("res.json({{ {item} }});"));
        });

        let post = body_handler("POST", &body_type, |b| {
            resolve_service(b, self.module);
            b.push_line(&format!(
                "const {item} = await service.update{}({{ id: req.params.id, ...req.validatedBody }});",
                model.service_plural()
            ))
            .push_blank()
            .push_line(&format!("res.json({{ {item} }});"));
        });

        let delete = plain_handler("DELETE", |b| {
            resolve_service(b, self.module);
            b.push_line(&format!(
                "await service.delete{}(req.params.id);",
                model.service_plural()
            ))
            .push_blank()
            .push_line(&format!(
                "res.json({{ id: req.params.id, object: \"{}\", deleted: true }});",
                model.entity()
            ));
        });

        CodeFile::new()
            .imports(route_imports(&path, model, self.module, body_type))
            .import(
                Import::new("@medusajs/framework/utils")
                    .named_all(["ContainerRegistrationKeys", "MedusaError"]),
            )
            .add(RawCode::new(get))
            .add(RawCode::new(post))
            .add(RawCode::new(delete))
            .render()
    }
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{FieldConfig, ModelConfig, ModuleConfig, ParentConfig, RelationConfig};

    use super::*;
    use crate::schema::ModelIndex;

    fn vehicles() -> ModuleSchema {
        let config = ModuleConfig::new("vehicles")
            .model(
                ModelConfig::new("vehicle-make")
                    .field(FieldConfig::new("name", "string").required()),
            )
            .model(
                ModelConfig::new("vehicle-model")
                    .field(FieldConfig::new("name", "string").required())
                    .field(
                        FieldConfig::new("make", "string")
                            .required()
                            .with_relation(RelationConfig::belongs_to("vehicle-make")),
                    )
                    .with_parent(ParentConfig::new("vehicle-make")),
            );
        let index = ModelIndex::new(std::slice::from_ref(&config), &[]);
        ModuleSchema::lower(&config, &index).unwrap()
    }

    #[test]
    fn test_collection_route() {
        let module = vehicles();
        let route = CollectionRoute::new(&module.models[0], &module);
        assert_eq!(route.path(), "src/api/admin/vehicle-makes/route.ts");

        let code = route.render();
        assert!(code.starts_with(
            "import type { MedusaRequest, MedusaResponse } from \"@medusajs/framework/http\";\n\
             import { VEHICLES_MODULE } from \"../../../modules/vehicles\";\n\
             import type VehiclesModuleService from \"../../../modules/vehicles/service\";\n\
             import type { AdminCreateVehicleMakeType } from \"./validators\";\n\
             import { ContainerRegistrationKeys } from \"@medusajs/framework/utils\";\n"
        ));
        assert!(code.contains("export const GET = async (req: MedusaRequest, res: MedusaResponse) => {\n"));
        assert!(code.contains("  const { data: vehicleMakes, metadata } = await query.graph({\n    entity: \"vehicle_make\",\n    ...req.queryConfig,\n  });\n"));
        assert!(code.contains("    vehicle_makes: vehicleMakes,\n"));
        assert!(code.contains("export const POST = async (\n  req: MedusaRequest<AdminCreateVehicleMakeType>,\n  res: MedusaResponse,\n) => {\n"));
        assert!(code.contains("  const service: VehiclesModuleService = req.scope.resolve(VEHICLES_MODULE);\n"));
        assert!(code.contains("  const vehicle_make = await service.createVehicleMakes(req.validatedBody);\n"));
        assert!(code.contains("  res.status(201).json({ vehicle_make });\n};\n"));
    }

    #[test]
    fn test_nested_collection_route_uses_parent_param() {
        let module = vehicles();
        let route = CollectionRoute::new(&module.models[1], &module);
        assert_eq!(
            route.path(),
            "src/api/admin/vehicle-makes/[make_id]/vehicle-models/route.ts"
        );
        let code = route.render();
        assert!(code.contains("from \"../../../../../modules/vehicles\";"));
        assert!(code.contains("    filters: { make_id: req.params.make_id },\n"));
        assert!(code.contains(
            "service.createVehicleModels({ ...req.validatedBody, make_id: req.params.make_id });"
        ));
    }

    #[test]
    fn test_item_route() {
        let module = vehicles();
        let route = ItemRoute::new(&module.models[0], &module);
        assert_eq!(route.path(), "src/api/admin/vehicle-makes/[id]/route.ts");

        let code = route.render();
        assert!(code.contains("import type { AdminUpdateVehicleMakeType } from \"../validators\";"));
        assert!(code.contains("import { ContainerRegistrationKeys, MedusaError } from \"@medusajs/framework/utils\";"));
        assert!(code.contains("    fields: [\"id\", \"name\", \"created_at\", \"updated_at\"],\n    filters: { id: req.params.id },\n"));
        assert!(code.contains("      `Vehicle Make with id ${req.params.id} was not found`,\n"));
        assert!(code.contains("service.updateVehicleMakes({ id: req.params.id, ...req.validatedBody });"));
        assert!(code.contains("  await service.deleteVehicleMakes(req.params.id);\n"));
        assert!(code.contains("object: \"vehicle_make\", deleted: true"));
    }
}
