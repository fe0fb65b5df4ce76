use serde::{Deserialize, Serialize};

use crate::schema::{Entity, EntitySchema, FieldSpec};

pub static COMPANY_SCHEMA: EntitySchema = EntitySchema {
    name: "Company",
    collection: "company",
    description: "An account the sales team is working",
    fields: &[
        FieldSpec::text("name", "Company name").required().min_length(1),
        FieldSpec::text("domain", "Company website domain"),
        FieldSpec::text("industry", "Industry vertical"),
        FieldSpec::text("size", "Company size e.g., 1-10, 11-50"),
        FieldSpec::text("country", "Headquarters country"),
    ],
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub domain: Option<String>,
    pub industry: Option<String>,
    pub size: Option<String>,
    pub country: Option<String>,
}

impl Entity for Company {
    fn schema() -> &'static EntitySchema {
        &COMPANY_SCHEMA
    }
}
