//! Models owned by Medusa's commerce modules.
//!
//! Relations may target these without declaring them; the generator links to
//! them through the module that owns them.

/// A model provided by a Medusa commerce module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreModel {
    /// Model name as used in configuration (snake_case)
    pub name: &'static str,
    /// Commerce module that owns the model, as imported from `@medusajs/medusa/<module>`
    pub module: &'static str,
}

pub const CORE_MODELS: &[CoreModel] = &[
    CoreModel { name: "product", module: "product" },
    CoreModel { name: "product_variant", module: "product" },
    CoreModel { name: "product_category", module: "product" },
    CoreModel { name: "product_collection", module: "product" },
    CoreModel { name: "customer", module: "customer" },
    CoreModel { name: "customer_group", module: "customer" },
    CoreModel { name: "order", module: "order" },
    CoreModel { name: "sales_channel", module: "sales-channel" },
    CoreModel { name: "region", module: "region" },
    CoreModel { name: "inventory_item", module: "inventory" },
    CoreModel { name: "stock_location", module: "stock-location" },
];

/// Look up a core model by name. Dashed names match their snake_case form.
pub fn core_model(name: &str) -> Option<&'static CoreModel> {
    let name = crate::to_snake_case(name);
    CORE_MODELS.iter().find(|m| m.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_model_lookup() {
        assert_eq!(core_model("product").map(|m| m.module), Some("product"));
        assert_eq!(
            core_model("sales-channel").map(|m| m.module),
            Some("sales-channel")
        );
        assert!(core_model("wiper").is_none());
    }
}
