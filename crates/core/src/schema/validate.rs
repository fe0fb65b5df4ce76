use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Number, Value};
use thiserror::Error;

use super::{Entity, EntitySchema, FieldKind, FieldSpec};

/// Pseudo-field used when the payload as a whole is unusable.
pub const BODY_FIELD: &str = "body";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Missing,
    WrongType,
    TooShort,
    OutOfRange,
    NotInChoices,
    InvalidEmail,
    InvalidDate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &str, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), kind, message: message.into() }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{entity} payload failed validation with {count} violation(s)", count = .violations.len())]
pub struct ValidationError {
    pub entity: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|violation| violation.field.as_str()).collect()
    }
}

/// Check `payload` against `schema` and return the normalized document.
///
/// Every field is checked and every violation is reported, in descriptor
/// order. Undeclared keys are dropped, `null` counts as absent and defaults
/// are filled in for absent optional fields.
pub fn validate_document(
    schema: &EntitySchema,
    payload: &Value,
) -> Result<Map<String, Value>, ValidationError> {
    let Some(object) = payload.as_object() else {
        return Err(ValidationError {
            entity: schema.name,
            violations: vec![FieldViolation::new(
                BODY_FIELD,
                ViolationKind::WrongType,
                format!("expected a JSON object, got {}", json_type_name(payload)),
            )],
        });
    };

    let mut document = Map::new();
    let mut violations = Vec::new();

    for field in schema.fields {
        match object.get(field.name).filter(|value| !value.is_null()) {
            Some(value) => match check_field(field, value) {
                Ok(normalized) => {
                    document.insert(field.name.to_string(), normalized);
                }
                Err(violation) => violations.push(violation),
            },
            None if field.required => violations.push(FieldViolation::new(
                field.name,
                ViolationKind::Missing,
                "field required",
            )),
            None => {
                if let Some(default) = field.default {
                    document.insert(field.name.to_string(), default.to_json());
                }
            }
        }
    }

    if violations.is_empty() {
        Ok(document)
    } else {
        Err(ValidationError { entity: schema.name, violations })
    }
}

/// Validate `payload` and materialize the typed entity.
pub fn validate<E: Entity>(payload: &Value) -> Result<E, ValidationError> {
    let schema = E::schema();
    let document = validate_document(schema, payload)?;

    serde_json::from_value(Value::Object(document)).map_err(|error| ValidationError {
        entity: schema.name,
        violations: vec![FieldViolation::new(
            BODY_FIELD,
            ViolationKind::WrongType,
            format!("payload does not match {}: {error}", schema.name),
        )],
    })
}

fn check_field(field: &FieldSpec, value: &Value) -> Result<Value, FieldViolation> {
    let name = field.name;
    match field.kind {
        FieldKind::Text { min_length } => {
            let text = expect_str(name, value, "a string")?;
            if let Some(min_length) = min_length {
                if text.chars().count() < min_length {
                    return Err(FieldViolation::new(
                        name,
                        ViolationKind::TooShort,
                        format!("must contain at least {min_length} character(s)"),
                    ));
                }
            }
            Ok(value.clone())
        }
        FieldKind::Email => {
            let text = expect_str(name, value, "an email address string")?;
            if !is_valid_email(text) {
                return Err(FieldViolation::new(
                    name,
                    ViolationKind::InvalidEmail,
                    format!("`{text}` is not a valid email address"),
                ));
            }
            Ok(value.clone())
        }
        FieldKind::Number { minimum, maximum } => {
            let number = value.as_f64().filter(|number| number.is_finite()).ok_or_else(|| {
                wrong_type(name, "a number", value)
            })?;
            check_bounds(name, number, minimum, maximum)?;
            Ok(value.clone())
        }
        FieldKind::Integer { minimum, maximum } => {
            let integer = as_integer(value).ok_or_else(|| wrong_type(name, "an integer", value))?;
            check_bounds(
                name,
                integer as f64,
                minimum.map(|bound| bound as f64),
                maximum.map(|bound| bound as f64),
            )?;
            Ok(Value::Number(Number::from(integer)))
        }
        FieldKind::Boolean => {
            if value.is_boolean() {
                Ok(value.clone())
            } else {
                Err(wrong_type(name, "a boolean", value))
            }
        }
        FieldKind::Date => {
            let text = expect_str(name, value, "a date string")?;
            NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| {
                FieldViolation::new(
                    name,
                    ViolationKind::InvalidDate,
                    format!("`{text}` is not a valid calendar date (expected YYYY-MM-DD)"),
                )
            })?;
            Ok(value.clone())
        }
        FieldKind::Choice(choices) => {
            let text = expect_str(name, value, "a string")?;
            if choices.contains(&text) {
                Ok(value.clone())
            } else {
                Err(FieldViolation::new(
                    name,
                    ViolationKind::NotInChoices,
                    format!("`{text}` is not one of: {}", choices.join(", ")),
                ))
            }
        }
    }
}

fn expect_str<'a>(
    field: &str,
    value: &'a Value,
    expected: &str,
) -> Result<&'a str, FieldViolation> {
    value.as_str().ok_or_else(|| wrong_type(field, expected, value))
}

fn wrong_type(field: &str, expected: &str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        field,
        ViolationKind::WrongType,
        format!("expected {expected}, got {}", json_type_name(value)),
    )
}

fn check_bounds(
    field: &str,
    value: f64,
    minimum: Option<f64>,
    maximum: Option<f64>,
) -> Result<(), FieldViolation> {
    if let Some(minimum) = minimum {
        if value < minimum {
            return Err(FieldViolation::new(
                field,
                ViolationKind::OutOfRange,
                format!("must be greater than or equal to {minimum}"),
            ));
        }
    }
    if let Some(maximum) = maximum {
        if value > maximum {
            return Err(FieldViolation::new(
                field,
                ViolationKind::OutOfRange,
                format!("must be less than or equal to {maximum}"),
            ));
        }
    }
    Ok(())
}

/// Integers, or floats with no fractional part that fit in an `i64`.
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(integer) = value.as_i64() {
        return Some(integer);
    }
    let float = value.as_f64()?;
    let in_range = float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15;
    in_range.then_some(float as i64)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Syntactic address check: one `@`, a dot-atom local part and a domain of
/// at least two hostname labels ending in an alphabetic TLD.
pub fn is_valid_email(candidate: &str) -> bool {
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if domain.contains('@') {
        return false;
    }

    let local_ok = !local.is_empty()
        && local.len() <= 64
        && !local.starts_with('.')
        && !local.ends_with('.')
        && !local.contains("..")
        && local.chars().all(|ch| ch.is_ascii_alphanumeric() || "!#$%&'*+/=?^_`{|}~.-".contains(ch));
    if !local_ok || domain.len() > 253 {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '-')
    });
    let tld_ok = labels
        .last()
        .map(|tld| tld.len() >= 2 && tld.chars().all(|ch| ch.is_ascii_alphabetic()))
        .unwrap_or(false);

    labels_ok && tld_ok
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use crate::domain::activity::{Activity, ActivityType};
    use crate::domain::company::{Company, COMPANY_SCHEMA};
    use crate::domain::contact::{Contact, ContactStatus, CONTACT_SCHEMA};
    use crate::domain::deal::{Deal, DealStage};
    use crate::domain::product::Product;
    use crate::domain::user::User;

    use super::{is_valid_email, validate, validate_document, ViolationKind};

    #[test]
    fn contact_without_status_defaults_to_lead() {
        let contact: Contact =
            validate(&json!({"first_name": "Ada", "last_name": "Lovelace"})).expect("valid");

        assert_eq!(contact.status, ContactStatus::Lead);
        assert_eq!(contact.email, None);
    }

    #[test]
    fn contact_with_unknown_status_is_rejected() {
        let error = validate::<Contact>(&json!({
            "first_name": "Ada",
            "last_name": "Lovelace",
            "status": "archived"
        }))
        .expect_err("archived is not a lifecycle stage");

        assert_eq!(error.fields(), vec!["status"]);
        assert_eq!(error.violations[0].kind, ViolationKind::NotInChoices);
        assert!(error.violations[0].message.contains("lead, prospect, customer, churned"));
    }

    #[test]
    fn every_violation_is_reported_in_descriptor_order() {
        let error = validate_document(
            &CONTACT_SCHEMA,
            &json!({
                "status": "archived",
                "email": "not-an-email",
                "last_name": 42
            }),
        )
        .expect_err("payload has several problems");

        assert_eq!(error.entity, "Contact");
        assert_eq!(error.fields(), vec!["first_name", "last_name", "email", "status"]);
        let kinds: Vec<ViolationKind> =
            error.violations.iter().map(|violation| violation.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ViolationKind::Missing,
                ViolationKind::WrongType,
                ViolationKind::InvalidEmail,
                ViolationKind::NotInChoices,
            ]
        );
        assert_eq!(error.to_string(), "Contact payload failed validation with 4 violation(s)");
    }

    #[test]
    fn non_object_payload_is_a_single_body_violation() {
        let error = validate_document(&CONTACT_SCHEMA, &json!(["first_name"]))
            .expect_err("arrays are not documents");

        assert_eq!(error.fields(), vec!["body"]);
        assert!(error.violations[0].message.contains("array"));
    }

    #[test]
    fn undeclared_fields_are_dropped_and_null_counts_as_absent() {
        let document = validate_document(
            &CONTACT_SCHEMA,
            &json!({
                "first_name": "Grace",
                "last_name": "Hopper",
                "phone": null,
                "_id": "forged",
                "favourite_colour": "teal"
            }),
        )
        .expect("valid contact");

        assert_eq!(document.get("status"), Some(&json!("lead")));
        assert!(!document.contains_key("phone"));
        assert!(!document.contains_key("_id"));
        assert!(!document.contains_key("favourite_colour"));
    }

    #[test]
    fn company_name_must_not_be_empty() {
        let error = validate::<Company>(&json!({"name": ""})).expect_err("empty name");
        assert_eq!(error.violations[0].kind, ViolationKind::TooShort);

        let company: Company =
            validate(&json!({"name": "Acme", "domain": "acme.io"})).expect("valid company");
        assert_eq!(company.domain.as_deref(), Some("acme.io"));

        let document = validate_document(&COMPANY_SCHEMA, &json!({"name": "Acme"}))
            .expect("optional fields may be omitted");
        assert_eq!(document.len(), 1);
    }

    #[test]
    fn deal_amount_must_be_non_negative_number() {
        let error = validate::<Deal>(&json!({"name": "Renewal", "amount": -1}))
            .expect_err("negative amount");
        assert_eq!(error.violations[0].kind, ViolationKind::OutOfRange);

        let error = validate::<Deal>(&json!({"name": "Renewal", "amount": "1000"}))
            .expect_err("string amount");
        assert_eq!(error.violations[0].kind, ViolationKind::WrongType);

        let deal: Deal = validate(&json!({
            "name": "Renewal",
            "amount": 1250.5,
            "close_date": "2026-03-31"
        }))
        .expect("valid deal");
        assert_eq!(deal.stage, DealStage::New);
        assert_eq!(deal.close_date, NaiveDate::from_ymd_opt(2026, 3, 31));
    }

    #[test]
    fn malformed_dates_are_rejected() {
        let error = validate::<Deal>(&json!({
            "name": "Renewal",
            "amount": 10,
            "close_date": "2026-02-30"
        }))
        .expect_err("february 30th does not exist");

        assert_eq!(error.fields(), vec!["close_date"]);
        assert_eq!(error.violations[0].kind, ViolationKind::InvalidDate);
    }

    #[test]
    fn activity_type_is_required_and_enumerated() {
        let error = validate::<Activity>(&json!({"subject": "Intro"})).expect_err("no type");
        assert_eq!(error.fields(), vec!["type"]);
        assert_eq!(error.violations[0].kind, ViolationKind::Missing);

        let activity: Activity =
            validate(&json!({"type": "meeting", "subject": "Intro", "due_date": "2026-11-02"}))
                .expect("valid activity");
        assert_eq!(activity.kind, ActivityType::Meeting);
    }

    #[test]
    fn user_age_is_bounded_integer() {
        let base = |age: serde_json::Value| {
            json!({"name": "Lin", "email": "lin@example.com", "address": "1 Main St", "age": age})
        };

        assert_eq!(
            validate::<User>(&base(json!(121))).expect_err("too old").violations[0].kind,
            ViolationKind::OutOfRange
        );
        assert_eq!(
            validate::<User>(&base(json!(30.5))).expect_err("fractional").violations[0].kind,
            ViolationKind::WrongType
        );

        let user: User = validate(&base(json!(30.0))).expect("whole float is an integer");
        assert_eq!(user.age, Some(30));
        assert!(user.is_active);
    }

    #[test]
    fn product_defaults_to_in_stock() {
        let product: Product =
            validate(&json!({"title": "Seat", "price": 0, "category": "licenses"}))
                .expect("valid product");

        assert!(product.in_stock);
        assert_eq!(product.price, 0.0);
    }

    #[test]
    fn email_syntax_check() {
        assert!(is_valid_email("first.last+crm@mail.example.co"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("dot.@example.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@-bad.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@example.c0m"));
    }
}
