//! Entity descriptors shared by payload validation and schema export.
//!
//! Each CRM entity declares one [`EntitySchema`]: an ordered list of
//! [`FieldSpec`]s carrying the field type, required flag, constraints and
//! default. [`validate`] interprets the descriptor to check untyped payloads
//! and [`export`] renders the same descriptor for form builders.

pub mod export;
pub mod validate;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    activity::ACTIVITY_SCHEMA, company::COMPANY_SCHEMA, contact::CONTACT_SCHEMA,
    deal::DEAL_SCHEMA, product::PRODUCT_SCHEMA, user::USER_SCHEMA,
};

pub use export::{describe, export_all};
pub use validate::{validate, validate_document, FieldViolation, ValidationError, ViolationKind};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FieldKind {
    Text { min_length: Option<usize> },
    Email,
    Number { minimum: Option<f64>, maximum: Option<f64> },
    Integer { minimum: Option<i64>, maximum: Option<i64> },
    Boolean,
    Date,
    Choice(&'static [&'static str]),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DefaultValue {
    Text(&'static str),
    Boolean(bool),
}

impl DefaultValue {
    pub fn to_json(self) -> serde_json::Value {
        match self {
            Self::Text(value) => serde_json::Value::String(value.to_string()),
            Self::Boolean(value) => serde_json::Value::Bool(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub default: Option<DefaultValue>,
}

impl FieldSpec {
    const fn new(name: &'static str, description: &'static str, kind: FieldKind) -> Self {
        Self { name, description, kind, required: false, default: None }
    }

    pub const fn text(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Text { min_length: None })
    }

    pub const fn email(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Email)
    }

    pub const fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Number { minimum: None, maximum: None })
    }

    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Integer { minimum: None, maximum: None })
    }

    pub const fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Boolean)
    }

    pub const fn date(name: &'static str, description: &'static str) -> Self {
        Self::new(name, description, FieldKind::Date)
    }

    pub const fn choice(
        name: &'static str,
        description: &'static str,
        choices: &'static [&'static str],
    ) -> Self {
        Self::new(name, description, FieldKind::Choice(choices))
    }

    pub const fn required(self) -> Self {
        Self { required: true, ..self }
    }

    pub const fn default_text(self, value: &'static str) -> Self {
        Self { default: Some(DefaultValue::Text(value)), ..self }
    }

    pub const fn default_bool(self, value: bool) -> Self {
        Self { default: Some(DefaultValue::Boolean(value)), ..self }
    }

    pub const fn min_length(self, min_length: usize) -> Self {
        Self { kind: FieldKind::Text { min_length: Some(min_length) }, ..self }
    }

    /// Inclusive integer bounds.
    pub const fn int_range(self, minimum: i64, maximum: i64) -> Self {
        Self { kind: FieldKind::Integer { minimum: Some(minimum), maximum: Some(maximum) }, ..self }
    }

    /// Inclusive lower bound for a number field.
    pub const fn at_least(self, minimum: f64) -> Self {
        Self { kind: FieldKind::Number { minimum: Some(minimum), maximum: None }, ..self }
    }
}

#[derive(Debug)]
pub struct EntitySchema {
    /// Display name, e.g. `Contact`.
    pub name: &'static str,
    /// Lowercase name used as collection name and export key.
    pub collection: &'static str,
    pub description: &'static str,
    pub fields: &'static [FieldSpec],
}

impl EntitySchema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn required_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|field| field.required).map(|field| field.name)
    }
}

/// A typed CRM record backed by a descriptor.
pub trait Entity: Serialize + DeserializeOwned + Send + Sync + 'static {
    fn schema() -> &'static EntitySchema;
}

/// Every registered entity, in export order.
pub fn registry() -> [&'static EntitySchema; 6] {
    [
        &COMPANY_SCHEMA,
        &CONTACT_SCHEMA,
        &DEAL_SCHEMA,
        &ACTIVITY_SCHEMA,
        &USER_SCHEMA,
        &PRODUCT_SCHEMA,
    ]
}

pub fn lookup(collection: &str) -> Option<&'static EntitySchema> {
    registry().into_iter().find(|schema| schema.collection == collection)
}
