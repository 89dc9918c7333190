//! # Schema Tightening
//!
//! Produces a stricter copy of a schema in which every object schema that
//! lists `properties` also sets `additionalProperties: false`, unless it
//! already says something about `additionalProperties`.
//!
//! The traversal follows the keywords that carry subschemas in the two
//! supported drafts:
//!
//! | Shape | Keywords |
//! |---|---|
//! | single schema | `additionalProperties`, `additionalItems`, `not`, `if`, `then`, `else`, `contains` |
//! | schema or tuple | `items` |
//! | list of schemas | `prefixItems`, `allOf`, `anyOf`, `oneOf` |
//! | name to schema | `properties`, `patternProperties`, `definitions`, `$defs`, `dependentSchemas` |
//! | name to schema or list | `dependencies` (property lists are left as they are) |
//!
//! Data-valued keywords (`enum`, `const`, `default`, `examples`) are copied
//! untouched.
//!
//! Tightening never fails and is idempotent.

use serde_json::{Map, Value};

/// Return a tightened deep copy of `schema`. The input is not modified.
pub fn tighten(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => Value::Object(tighten_object(map)),
        other => other.clone(),
    }
}

fn tighten_object(map: &Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();

    for (key, value) in map {
        let value = match key.as_str() {
            "properties" | "patternProperties" | "definitions" | "$defs" | "dependentSchemas" => {
                tighten_values(value)
            }
            // Array entries are property lists; `tighten` passes them through.
            "dependencies" => tighten_values(value),
            "additionalProperties" | "additionalItems" | "not" | "if" | "then" | "else"
            | "contains" => tighten(value),
            "items" => match value {
                Value::Array(items) => Value::Array(items.iter().map(tighten).collect()),
                other => tighten(other),
            },
            "prefixItems" | "allOf" | "anyOf" | "oneOf" => match value {
                Value::Array(items) => Value::Array(items.iter().map(tighten).collect()),
                other => other.clone(),
            },
            _ => value.clone(),
        };
        out.insert(key.clone(), value);
    }

    if is_object_type(map)
        && map.get("properties").is_some_and(Value::is_object)
        && !map.contains_key("additionalProperties")
    {
        out.insert("additionalProperties".to_string(), Value::Bool(false));
    }

    out
}

/// Tighten every value of a name → subschema map.
fn tighten_values(value: &Value) -> Value {
    match value {
        Value::Object(entries) => Value::Object(
            entries
                .iter()
                .map(|(name, schema)| (name.clone(), tighten(schema)))
                .collect(),
        ),
        other => other.clone(),
    }
}

/// `type` is `"object"` or a list that includes it.
fn is_object_type(map: &Map<String, Value>) -> bool {
    match map.get("type") {
        Some(Value::String(t)) => t == "object",
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some("object")),
        _ => false,
    }
}
