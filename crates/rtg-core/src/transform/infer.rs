use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::describe::describe;
use crate::ir::{FieldDescriptor, Primitive, TypeExpr};

/// Deepest object level (counted from the inference root) that is still expanded.
pub const MAX_DEPTH: usize = 3;

static DATE_STRING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}(?:[T ]\d{2}:\d{2}(?::\d{2}(?:\.\d+)?)?(?:Z|[+-]\d{2}:?\d{2})?)?$")
        .expect("date pattern is valid")
});

/// Whether a string looks like an ISO-8601 date, `YYYY-MM-DD` or `YYYY-MM-DD HH:MM:SS`.
///
/// Such strings are still typed as `string`.
pub fn is_date_string(s: &str) -> bool {
    DATE_STRING.is_match(s)
}

/// Infer the structural type of a single value.
pub fn infer_type(value: &Value, depth: usize) -> TypeExpr {
    match value {
        Value::Null => TypeExpr::Primitive(Primitive::Null),
        Value::Bool(_) => TypeExpr::Primitive(Primitive::Boolean),
        Value::Number(_) => TypeExpr::Primitive(Primitive::Number),
        Value::String(_) => TypeExpr::Primitive(Primitive::String),
        Value::Array(items) => infer_array(items, depth),
        Value::Object(map) => infer_object(map, depth),
    }
}

fn infer_array(items: &[Value], depth: usize) -> TypeExpr {
    if items.is_empty() {
        return TypeExpr::any_array();
    }
    TypeExpr::array_of(TypeExpr::union_of(
        items.iter().map(|item| infer_type(item, depth)),
    ))
}

fn infer_object(map: &Map<String, Value>, depth: usize) -> TypeExpr {
    if depth > MAX_DEPTH {
        log::debug!("object at depth {depth} collapsed to Record<string, unknown>");
        return TypeExpr::unknown_map();
    }
    if map.is_empty() {
        return TypeExpr::any_map();
    }
    if let Some(kind) = homogeneous_primitive(map) {
        return TypeExpr::map_of(TypeExpr::Primitive(kind));
    }

    let members = map
        .iter()
        .map(|(key, value)| FieldDescriptor {
            name: key.clone(),
            field_type: infer_type(value, depth + 1),
            optional: value.is_null(),
            description: describe(key, Some(value)),
        })
        .collect();
    TypeExpr::Inline(members)
}

/// The shared primitive kind when every value is a string, every value a number, or every value a boolean.
fn homogeneous_primitive(map: &Map<String, Value>) -> Option<Primitive> {
    let mut kinds = map.values().map(|value| match value {
        Value::String(_) => Some(Primitive::String),
        Value::Number(_) => Some(Primitive::Number),
        Value::Bool(_) => Some(Primitive::Boolean),
        _ => None,
    });
    let first = kinds.next()??;
    kinds.all(|kind| kind == Some(first)).then_some(first)
}

/// Infer one field across several records.
///
/// `None` marks a record where the field is missing. The field is optional
/// when any record lacks it or holds `null`; its type is the union of the
/// distinct non-null types, or `unknown` when none was observed. Each value
/// is inferred as its own root, at depth 0.
pub fn infer_across(name: &str, values: &[Option<&Value>]) -> FieldDescriptor {
    let present: Vec<&Value> = values
        .iter()
        .flatten()
        .copied()
        .filter(|value| !value.is_null())
        .collect();
    let optional = present.len() < values.len();

    FieldDescriptor {
        name: name.to_string(),
        field_type: TypeExpr::union_of(present.iter().map(|value| infer_type(value, 0))),
        optional,
        description: describe(name, present.first().copied()),
    }
}
