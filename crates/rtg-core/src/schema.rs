use serde_json::{Map, Value, json};

use crate::transform::is_date_string;

/// JSON-schema style description of a record's top-level fields.
///
/// Every key becomes a property; keys holding a non-null value are listed
/// under `required`. Nested objects are not expanded.
pub fn json_schema(record: &Map<String, Value>) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for (key, value) in record {
        properties.insert(key.clone(), value_schema(value));
        if !value.is_null() {
            required.push(Value::String(key.clone()));
        }
    }
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}

fn value_schema(value: &Value) -> Value {
    match value {
        Value::Null => json!({"type": "null"}),
        Value::String(s) if is_date_string(s) => json!({"type": "string", "format": "date-time"}),
        Value::String(_) => json!({"type": "string"}),
        Value::Number(_) => json!({"type": "number"}),
        Value::Bool(_) => json!({"type": "boolean"}),
        Value::Array(items) => {
            let items = items.first().map_or_else(|| json!({"type": "any"}), value_schema);
            json!({"type": "array", "items": items})
        }
        Value::Object(_) => json!({"type": "object"}),
    }
}
