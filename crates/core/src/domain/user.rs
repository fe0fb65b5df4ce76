use serde::{Deserialize, Serialize};

use crate::schema::{Entity, EntitySchema, FieldSpec};

pub static USER_SCHEMA: EntitySchema = EntitySchema {
    name: "User",
    collection: "user",
    description: "Users collection schema",
    fields: &[
        FieldSpec::text("name", "Full name").required(),
        FieldSpec::email("email", "Email address").required(),
        FieldSpec::text("address", "Address").required(),
        FieldSpec::integer("age", "Age in years").int_range(0, 120),
        FieldSpec::boolean("is_active", "Whether user is active").default_bool(true),
    ],
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub email: String,
    pub address: String,
    pub age: Option<u8>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Entity for User {
    fn schema() -> &'static EntitySchema {
        &USER_SCHEMA
    }
}
