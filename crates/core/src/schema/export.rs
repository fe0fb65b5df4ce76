use serde_json::{json, Map, Value};

use super::{registry, EntitySchema, FieldKind, FieldSpec};

/// Render one descriptor as a JSON-Schema style object.
pub fn describe(schema: &EntitySchema) -> Value {
    let properties: Map<String, Value> = schema
        .fields
        .iter()
        .map(|field| (field.name.to_string(), describe_field(field)))
        .collect();
    let required: Vec<&str> = schema.required_fields().collect();

    json!({
        "title": schema.name,
        "description": schema.description,
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

/// Every registered descriptor keyed by lowercase entity name.
pub fn export_all() -> Map<String, Value> {
    registry().into_iter().map(|schema| (schema.collection.to_string(), describe(schema))).collect()
}

fn describe_field(field: &FieldSpec) -> Value {
    let mut property = Map::new();
    property.insert("title".to_string(), Value::String(title_case(field.name)));
    property.insert("description".to_string(), Value::String(field.description.to_string()));

    match field.kind {
        FieldKind::Text { min_length } => {
            property.insert("type".to_string(), json!("string"));
            if let Some(min_length) = min_length {
                property.insert("minLength".to_string(), json!(min_length));
            }
        }
        FieldKind::Email => {
            property.insert("type".to_string(), json!("string"));
            property.insert("format".to_string(), json!("email"));
        }
        FieldKind::Number { minimum, maximum } => {
            property.insert("type".to_string(), json!("number"));
            insert_bound(&mut property, "minimum", minimum);
            insert_bound(&mut property, "maximum", maximum);
        }
        FieldKind::Integer { minimum, maximum } => {
            property.insert("type".to_string(), json!("integer"));
            if let Some(minimum) = minimum {
                property.insert("minimum".to_string(), json!(minimum));
            }
            if let Some(maximum) = maximum {
                property.insert("maximum".to_string(), json!(maximum));
            }
        }
        FieldKind::Boolean => {
            property.insert("type".to_string(), json!("boolean"));
        }
        FieldKind::Date => {
            property.insert("type".to_string(), json!("string"));
            property.insert("format".to_string(), json!("date"));
        }
        FieldKind::Choice(choices) => {
            property.insert("type".to_string(), json!("string"));
            property.insert("enum".to_string(), json!(choices));
        }
    }

    if let Some(default) = field.default {
        property.insert("default".to_string(), default.to_json());
    }

    Value::Object(property)
}

fn insert_bound(property: &mut Map<String, Value>, key: &str, bound: Option<f64>) {
    if let Some(bound) = bound {
        property.insert(key.to_string(), json!(bound));
    }
}

fn title_case(field_name: &str) -> String {
    field_name
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
