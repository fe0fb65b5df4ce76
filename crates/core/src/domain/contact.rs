use serde::{Deserialize, Serialize};

use crate::schema::{Entity, EntitySchema, FieldSpec};

pub static CONTACT_SCHEMA: EntitySchema = EntitySchema {
    name: "Contact",
    collection: "contact",
    description: "A person at a prospect or customer account",
    fields: &[
        FieldSpec::text("first_name", "First name").required(),
        FieldSpec::text("last_name", "Last name").required(),
        FieldSpec::email("email", "Email address"),
        FieldSpec::text("phone", "Phone number"),
        FieldSpec::text("company", "Associated company name"),
        FieldSpec::text("title", "Job title"),
        FieldSpec::choice("status", "Lifecycle stage", ContactStatus::CHOICES)
            .default_text("lead"),
        FieldSpec::text("owner", "Account owner or rep"),
    ],
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    #[default]
    Lead,
    Prospect,
    Customer,
    Churned,
}

impl ContactStatus {
    pub const CHOICES: &'static [&'static str] = &["lead", "prospect", "customer", "churned"];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub title: Option<String>,
    #[serde(default)]
    pub status: ContactStatus,
    pub owner: Option<String>,
}

impl Entity for Contact {
    fn schema() -> &'static EntitySchema {
        &CONTACT_SCHEMA
    }
}
