//! Module links for relations that cross module boundaries.

use modgen_core::{RelationKind, to_pascal_case};

use super::Template;
use crate::{
    CodeFile, RawCode,
    ast::{Import, JsObject},
    builder::{CodeBuilder, CodeFragment},
    paths,
    schema::{FieldSchema, ModelSchema, ModuleSchema, RelationOwner},
};

/// `src/links/<model>-<field>.ts`
pub(super) struct Link<'a> {
    model: &'a ModelSchema,
    module: &'a ModuleSchema,
    field: &'a FieldSchema,
}

impl<'a> Link<'a> {
    pub(super) fn new(
        model: &'a ModelSchema,
        module: &'a ModuleSchema,
        field: &'a FieldSchema,
    ) -> Self {
        Self {
            model,
            module,
            field,
        }
    }

    /// Import name and specifier of the module owning the target.
    fn target_module(&self, path: &str) -> Option<(String, String)> {
        let relation = self.field.relation.as_ref()?;
        let source = self.module.definition();
        match &relation.owner {
            RelationOwner::Internal => None,
            RelationOwner::Module(module) => Some((
                format!("{}Module", module.pascal),
                paths::relative_import(path, &format!("{}/{}", paths::MODULES_DIR, module.kebab)),
            )),
            RelationOwner::Core(module) => {
                let mut ident = format!("{}Module", to_pascal_case(module));
                if ident == source {
                    ident = format!("Medusa{ident}");
                }
                Some((ident, format!("@medusajs/medusa/{module}")))
            }
        }
    }
}

/// One side of a link, as an argument of `defineLink`.
fn side(linkable: String, is_list: bool) -> CodeFragment {
    if is_list {
        JsObject::new()
            .raw("linkable", linkable)
            .raw("isList", "true")
            .wrap("", ",")
    } else {
        CodeFragment::Line(format!("{linkable},"))
    }
}

impl Template for Link<'_> {
    fn path(&self) -> String {
        paths::link_file(self.model, &self.field.name.kebab)
    }

    fn render(&self) -> String {
        let path = self.path();
        let (Some(relation), Some((target_ident, target_from))) =
            (self.field.relation.as_ref(), self.target_module(&path))
        else {
            return String::new();
        };

        let source = self.module.definition();
        let source_linkable = format!("{source}.linkable.{}", self.model.name.camel);
        let target_linkable = format!("{target_ident}.linkable.{}", relation.target.camel);

        let mut b = CodeBuilder::typescript();
        b.push_line("export default defineLink(");
        b.push_indent();
        b.apply_fragment(side(source_linkable, relation.kind == RelationKind::ManyToMany));
        b.apply_fragment(side(target_linkable, relation.kind.is_list()));
        b.push_dedent().push_line(");");

        CodeFile::new()
            .import(Import::new("@medusajs/framework/utils").named("defineLink"))
            .import(Import::new(target_from).default(target_ident))
            .import(
                Import::new(paths::relative_import(&path, &paths::module_dir(self.module)))
                    .default(source),
            )
            .add(RawCode::new(b.build()))
            .render()
    }
}

#[cfg(test)]
mod tests {
    use modgen_manifest::{ExternalModel, FieldConfig, ModelConfig, ModuleConfig, RelationConfig};

    use super::*;
    use crate::schema::ModelIndex;

    fn render(config: &ModuleConfig, external: &[ExternalModel]) -> Vec<(String, String)> {
        let index = ModelIndex::new(std::slice::from_ref(config), external);
        let module = ModuleSchema::lower(config, &index).unwrap();
        let model = &module.models[0];
        model
            .link_fields()
            .map(|field| {
                let link = Link::new(model, &module, field);
                (link.path(), link.render())
            })
            .collect()
    }

    #[test]
    fn test_belongs_to_core_model() {
        let config = ModuleConfig::new("fitments").model(
            ModelConfig::new("fitment").field(
                FieldConfig::new("product", "string")
                    .with_relation(RelationConfig::belongs_to("product")),
            ),
        );
        let links = render(&config, &[]);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].0, "src/links/fitment-product.ts");
        assert_eq!(
            links[0].1,
            r#"import { defineLink } from "@medusajs/framework/utils";
import ProductModule from "@medusajs/medusa/product";
import FitmentsModule from "../modules/fitments";

export default defineLink(
  FitmentsModule.linkable.fitment,
  ProductModule.linkable.product,
);
"#
        );
    }

    #[test]
    fn test_has_many_external_model() {
        let config = ModuleConfig::new("fitments").model(
            ModelConfig::new("fitment").field(
                FieldConfig::new("brands", "string")
                    .with_relation(RelationConfig::has_many("brand")),
            ),
        );
        let links = render(&config, &[ExternalModel::new("brand", "brands")]);
        assert_eq!(
            links[0].1,
            r#"import { defineLink } from "@medusajs/framework/utils";
import BrandsModule from "../modules/brands";
import FitmentsModule from "../modules/fitments";

export default defineLink(
  FitmentsModule.linkable.fitment,
  {
    linkable: BrandsModule.linkable.brand,
    isList: true,
  },
);
"#
        );
    }

    #[test]
    fn test_many_to_many_lists_both_sides() {
        let config = ModuleConfig::new("fitments").model(
            ModelConfig::new("fitment").field(
                FieldConfig::new("variants", "string")
                    .with_relation(RelationConfig::many_to_many("product_variant")),
            ),
        );
        let code = &render(&config, &[])[0].1;
        assert!(code.contains("  {\n    linkable: FitmentsModule.linkable.fitment,\n    isList: true,\n  },\n"));
        assert!(code.contains("    linkable: ProductModule.linkable.productVariant,\n"));
    }

    #[test]
    fn test_core_import_name_does_not_shadow_source() {
        let config = ModuleConfig::new("product").model(
            ModelConfig::new("data-sheet").field(
                FieldConfig::new("customer", "string")
                    .with_relation(RelationConfig::belongs_to("customer")),
            ),
        );
        // Core customer module is imported as CustomerModule; only a clash gets a prefix.
        let code = &render(&config, &[])[0].1;
        assert!(code.contains("import CustomerModule from \"@medusajs/medusa/customer\";"));
        assert!(code.contains("import ProductModule from \"../modules/product\";"));
    }
}
