use crmsuite_core::schema::{describe, export_all, lookup, registry};
use serde_json::Value;

use crate::commands::CommandResult;

/// Prints every descriptor, or only the one whose collection matches `entity`.
pub fn run(entity: Option<&str>) -> CommandResult {
    let export = match entity {
        None => Value::Object(export_all()),
        Some(name) => match lookup(&name.trim().to_ascii_lowercase()) {
            Some(schema) => describe(schema),
            None => {
                let known: Vec<&str> = registry().iter().map(|schema| schema.collection).collect();
                return CommandResult::failure(
                    "schema",
                    "unknown_entity",
                    format!("unknown entity `{name}`; expected one of {}", known.join(", ")),
                    2,
                );
            }
        },
    };
    render(&export)
}

fn render(export: &Value) -> CommandResult {
    match serde_json::to_string_pretty(export) {
        Ok(output) => CommandResult::rendered(0, output),
        Err(error) => CommandResult::failure(
            "schema",
            "serialization",
            format!("failed to render schema export: {error}"),
            3,
        ),
    }
}
