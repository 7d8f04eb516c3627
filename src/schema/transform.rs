//! Record coercion against a stream's JSON schema
//!
//! Mirrors the singer transformer contract: keep only declared properties,
//! coerce each value to a declared type, and fail hard on a value that
//! cannot be coerced. There is no skip-and-continue for bad records.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};

/// Validate and coerce a raw record against its stream schema
///
/// Returns a new record containing only the schema's declared properties,
/// each coerced to a declared type. Properties absent from the record stay
/// absent.
pub fn transform_record(
    stream_id: &str,
    record: &JsonValue,
    schema: &JsonValue,
) -> Result<JsonValue> {
    let properties = schema
        .get("properties")
        .and_then(JsonValue::as_object)
        .ok_or_else(|| Error::schema(stream_id, "schema has no 'properties' object"))?;

    let fields = record
        .as_object()
        .ok_or_else(|| Error::schema(stream_id, "record is not a JSON object"))?;

    let mut out = JsonObject::new();
    for (name, prop_schema) in properties {
        if let Some(value) = fields.get(name) {
            let coerced = coerce_value(value, prop_schema).ok_or_else(|| {
                Error::schema(
                    stream_id,
                    format!("field '{name}' value {value} does not match schema type"),
                )
            })?;
            out.insert(name.clone(), coerced);
        }
    }

    Ok(JsonValue::Object(out))
}

/// Declared types for a property, normalized to a list
fn declared_types(prop_schema: &JsonValue) -> Vec<&str> {
    match prop_schema.get("type") {
        Some(JsonValue::String(t)) => vec![t.as_str()],
        Some(JsonValue::Array(types)) => types.iter().filter_map(JsonValue::as_str).collect(),
        _ => vec![],
    }
}

/// Coerce a value to the first declared type it can satisfy
fn coerce_value(value: &JsonValue, prop_schema: &JsonValue) -> Option<JsonValue> {
    let types = declared_types(prop_schema);

    if value.is_null() {
        return types.contains(&"null").then(JsonValue::default);
    }

    for ty in &types {
        if let Some(coerced) = coerce_to_type(value, ty) {
            return Some(coerced);
        }
    }
    None
}

fn coerce_to_type(value: &JsonValue, ty: &str) -> Option<JsonValue> {
    match ty {
        "integer" => match value {
            JsonValue::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
            JsonValue::String(s) => s.trim().parse::<i64>().ok().map(JsonValue::from),
            _ => None,
        },
        "number" => match value {
            JsonValue::Number(_) => Some(value.clone()),
            JsonValue::String(s) => s.trim().parse::<f64>().ok().map(JsonValue::from),
            _ => None,
        },
        "boolean" => match value {
            JsonValue::Bool(_) => Some(value.clone()),
            JsonValue::String(s) => match s.as_str() {
                "true" => Some(JsonValue::Bool(true)),
                "false" => Some(JsonValue::Bool(false)),
                _ => None,
            },
            _ => None,
        },
        "string" => match value {
            JsonValue::String(_) => Some(value.clone()),
            JsonValue::Number(n) => Some(JsonValue::String(n.to_string())),
            JsonValue::Bool(b) => Some(JsonValue::String(b.to_string())),
            _ => None,
        },
        "object" => value.is_object().then(|| value.clone()),
        "array" => value.is_array().then(|| value.clone()),
        _ => None,
    }
}
