//! zod request validators (`<api>/validators.ts`).

use modgen_core::TypeMapper;

use super::Template;
use crate::{
    CodeFile, RawCode,
    ast::{Import, JsObject},
    mappers::ZodMapper,
    paths,
    schema::ModelSchema,
};

pub(super) struct Validators<'a> {
    model: &'a ModelSchema,
}

impl<'a> Validators<'a> {
    pub(super) fn new(model: &'a ModelSchema) -> Self {
        Self { model }
    }
}

/// Identifiers exported by a model's validators file.
pub(super) struct ValidatorNames {
    pub(super) list_params: String,
    pub(super) create: String,
    pub(super) update: String,
}

impl ValidatorNames {
    pub(super) fn of(model: &ModelSchema) -> Self {
        Self {
            list_params: format!("GetAdmin{}Params", model.service_plural()),
            create: format!("AdminCreate{}", model.name.pascal),
            update: format!("AdminUpdate{}", model.name.pascal),
        }
    }
}

pub(super) fn validators_file(model: &ModelSchema) -> String {
    format!("{}/validators.ts", paths::api_dir(model))
}

impl Template for Validators<'_> {
    fn path(&self) -> String {
        validators_file(self.model)
    }

    fn render(&self) -> String {
        let names = ValidatorNames::of(self.model);
        let body = self
            .model
            .editable_columns()
            .into_iter()
            .fold(JsObject::new(), |object, column| {
                object.raw(
                    column.name,
                    ZodMapper.map_field(column.field_type, column.required),
                )
            });

        CodeFile::new()
            .import(
                Import::new("@medusajs/medusa/api/utils/validators").named("createFindParams"),
            )
            .import(Import::new("zod").named("z"))
            .add(RawCode::new(format!(
                "export const {} = createFindParams();",
                names.list_params
            )))
            .add(body.wrap(&format!("export const {} = z.object(", names.create), ");"))
            .add(RawCode::new(format!(
                "export type {0}Type = z.infer<typeof {0}>;",
                names.create
            )))
            .add(RawCode::new(format!(
                "export const {} = {}.partial();",
                names.update, names.create
            )))
            .add(RawCode::new(format!(
                "export type {0}Type = z.infer<typeof {0}>;",
                names.update
            )))
            .render()
    }
}
