use serde::{Deserialize, Serialize};

use crate::schema::{Entity, EntitySchema, FieldSpec};

pub static PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    name: "Product",
    collection: "product",
    description: "Products collection schema",
    fields: &[
        FieldSpec::text("title", "Product title").required(),
        FieldSpec::text("description", "Product description"),
        FieldSpec::number("price", "Price in dollars").required().at_least(0.0),
        FieldSpec::text("category", "Product category").required(),
        FieldSpec::boolean("in_stock", "Whether product is in stock").default_bool(true),
    ],
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    #[serde(default = "in_stock_by_default")]
    pub in_stock: bool,
}

fn in_stock_by_default() -> bool {
    true
}

impl Entity for Product {
    fn schema() -> &'static EntitySchema {
        &PRODUCT_SCHEMA
    }
}
