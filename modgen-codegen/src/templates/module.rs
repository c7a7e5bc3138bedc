//! Module definition and service.

use super::Template;
use crate::{
    CodeFile, RawCode,
    ast::{Import, JsObject},
    paths,
    schema::ModuleSchema,
};

/// `src/modules/<module>/index.ts`
pub(super) struct ModuleIndex<'a> {
    module: &'a ModuleSchema,
}

impl<'a> ModuleIndex<'a> {
    pub(super) fn new(module: &'a ModuleSchema) -> Self {
        Self { module }
    }
}

impl Template for ModuleIndex<'_> {
    fn path(&self) -> String {
        format!("{}/index.ts", paths::module_dir(self.module))
    }

    fn render(&self) -> String {
        let constant = self.module.constant();
        let service = self.module.service();
        CodeFile::new()
            .import(Import::new("@medusajs/framework/utils").named("Module"))
            .import(Import::new("./service").default(service.clone()))
            .add(RawCode::new(format!(
                "export const {constant} = \"{}\";",
                self.module.key()
            )))
            .add(
                JsObject::new()
                    .raw("service", service)
                    .wrap(&format!("export default Module({constant}, "), ");"),
            )
            .render()
    }
}

/// `src/modules/<module>/service.ts`
pub(super) struct ModuleService<'a> {
    module: &'a ModuleSchema,
}

impl<'a> ModuleService<'a> {
    pub(super) fn new(module: &'a ModuleSchema) -> Self {
        Self { module }
    }
}

impl Template for ModuleService<'_> {
    fn path(&self) -> String {
        format!("{}/service.ts", paths::module_dir(self.module))
    }

    fn render(&self) -> String {
        let service = self.module.service();
        let models = self
            .module
            .models
            .iter()
            .fold(JsObject::new(), |object, model| object.shorthand(model.name.pascal.clone()));

        CodeFile::new()
            .import(Import::new("@medusajs/framework/utils").named("MedusaService"))
            .imports(self.module.models.iter().map(|model| {
                Import::new(format!("./models/{}", model.file_stem()))
                    .default(model.name.pascal.clone())
            }))
            .add(models.wrap(
                &format!("class {service} extends MedusaService("),
                ") {}",
            ))
            .add(RawCode::new(format!("export default {service};")))
            .render()
    }
}
