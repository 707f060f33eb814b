use std::collections::HashSet;

use indexmap::{IndexMap, IndexSet};
use serde_json::{Map, Value};

use super::describe::describe;
use super::infer::{MAX_DEPTH, infer_across, infer_type};
use super::naming::{interface_name_for, is_array_field_name, type_name_from_array_field, unique_name};
use crate::config::{NameCollisionPolicy, NamingConfig};
use crate::ir::{FieldDescriptor, InterfaceDefinition, TypeExpr};

/// Storage bookkeeping keys that never become fields.
pub const SYSTEM_KEYS: &[&str] = &["collectionId", "collectionName"];

/// Envelope key whose object payload is unwrapped into the enclosing interface.
pub const DATA_KEY: &str = "data";

/// Record metadata dropped when system fields are excluded.
pub const RECORD_META_KEYS: &[&str] = &["id", "created", "updated"];

/// Naming knobs for interface synthesis.
#[derive(Debug, Clone, Default)]
pub struct SynthesisOptions {
    pub name_collisions: NameCollisionPolicy,
    pub aliases: IndexMap<String, String>,
}

impl From<&NamingConfig> for SynthesisOptions {
    fn from(naming: &NamingConfig) -> Self {
        Self {
            name_collisions: naming.collisions,
            aliases: naming.aliases.clone(),
        }
    }
}

/// Synthesize an interface tree from one record with default options.
pub fn analyze_record(record: &Map<String, Value>, name: &str) -> InterfaceDefinition {
    analyze_record_with(record, name, &SynthesisOptions::default())
}

/// Synthesize an interface tree from one record.
///
/// Nested objects and arrays of objects are hoisted into named interfaces
/// down to [`MAX_DEPTH`]; everything else is typed by the inferrer. Fields of
/// synthesized interfaces are always required, `null` values included.
pub fn analyze_record_with(
    record: &Map<String, Value>,
    name: &str,
    options: &SynthesisOptions,
) -> InterfaceDefinition {
    let mut synthesizer = Synthesizer {
        options,
        used_names: HashSet::from([name.to_string()]),
    };
    synthesizer.interface(record, name.to_string(), 0)
}

/// Synthesize one flat interface covering several records of the same shape.
///
/// Fields are the union of all records' fields in first-seen order. Nothing
/// is hoisted; nested values are typed by the inferrer.
pub fn analyze_records(records: &[&Map<String, Value>], name: &str) -> InterfaceDefinition {
    let mut field_names: IndexSet<&str> = IndexSet::new();
    for record in records {
        for (key, _) in entries(record) {
            field_names.insert(key);
        }
    }

    let mut def = InterfaceDefinition::new(name);
    for field_name in field_names {
        let values: Vec<Option<&Value>> = records
            .iter()
            .map(|record| lookup(record, field_name))
            .collect();
        def.fields.push(infer_across(field_name, &values));
    }
    def
}

/// Copy of `record` without `id`, `created` and `updated` unless `include_system` is set.
pub fn clean_record(record: &Map<String, Value>, include_system: bool) -> Map<String, Value> {
    record
        .iter()
        .filter(|(key, _)| include_system || !RECORD_META_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Fields of an object in key order, system keys skipped and a `data` object unwrapped in place.
fn entries(object: &Map<String, Value>) -> Vec<(&str, &Value)> {
    let mut out = Vec::with_capacity(object.len());
    for (key, value) in object {
        if SYSTEM_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Object(payload) if key == DATA_KEY => {
                out.extend(payload.iter().map(|(k, v)| (k.as_str(), v)));
            }
            _ => out.push((key.as_str(), value)),
        }
    }
    out
}

/// A field's value in one record, preferring the `data` payload.
fn lookup<'a>(record: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    if let Some(Value::Object(payload)) = record.get(DATA_KEY) {
        if let Some(value) = payload.get(field) {
            return Some(value);
        }
    }
    if SYSTEM_KEYS.contains(&field) {
        return None;
    }
    match record.get(field) {
        Some(Value::Object(_)) if field == DATA_KEY => None,
        other => other,
    }
}

struct Synthesizer<'o> {
    options: &'o SynthesisOptions,
    used_names: HashSet<String>,
}

impl Synthesizer<'_> {
    fn interface(
        &mut self,
        object: &Map<String, Value>,
        name: String,
        depth: usize,
    ) -> InterfaceDefinition {
        let mut def = InterfaceDefinition::new(name);
        for (key, value) in entries(object) {
            let field_type = self.field_type(&mut def, key, value, depth + 1);
            def.fields.push(FieldDescriptor {
                name: key.to_string(),
                field_type,
                optional: false,
                description: describe(key, Some(value)),
            });
        }
        def
    }

    fn field_type(
        &mut self,
        parent: &mut InterfaceDefinition,
        key: &str,
        value: &Value,
        depth: usize,
    ) -> TypeExpr {
        if depth > MAX_DEPTH {
            return infer_type(value, depth);
        }
        match value {
            Value::Array(items) => match items.first() {
                Some(Value::Object(first)) => {
                    if !is_array_field_name(key) {
                        log::debug!("array field `{key}` does not read as a plural");
                    }
                    let name = self.claim(type_name_from_array_field(key));
                    log::debug!("hoisting element of `{key}` as interface {name}");
                    let nested = self.interface(first, name.clone(), depth);
                    parent.nested_interfaces.push(nested);
                    TypeExpr::array_of(TypeExpr::Ref(name))
                }
                _ => infer_type(value, depth),
            },
            Value::Object(object) => {
                let name = self.claim(interface_name_for(key, &self.options.aliases));
                log::debug!("hoisting `{key}` as interface {name}");
                let nested = self.interface(object, name.clone(), depth);
                parent.nested_interfaces.push(nested);
                TypeExpr::Ref(name)
            }
            _ => infer_type(value, depth),
        }
    }

    fn claim(&mut self, base: String) -> String {
        match self.options.name_collisions {
            NameCollisionPolicy::Preserve => {
                if !self.used_names.insert(base.clone()) {
                    log::debug!("interface name {base} is used more than once");
                }
                base
            }
            NameCollisionPolicy::Suffix => unique_name(&base, &mut self.used_names),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::Primitive;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_system_keys_and_data_unwrapped() {
        let record = object(json!({
            "id": "1",
            "collectionId": "c1",
            "collectionName": "posts",
            "data": {"title": "Hello"},
            "updated": "2024-01-01"
        }));
        let def = analyze_record(&record, "Record");
        assert_eq!(def.field_names(), vec!["id", "title", "updated"]);
    }

    #[test]
    fn test_data_array_is_a_plain_field() {
        let record = object(json!({"data": [1, 2]}));
        let def = analyze_record(&record, "Record");
        assert_eq!(def.field_names(), vec!["data"]);
        assert_eq!(
            def.fields[0].field_type,
            TypeExpr::array_of(TypeExpr::Primitive(Primitive::Number))
        );
    }

    #[test]
    fn test_nested_object_hoisted() {
        let record = object(json!({"author": {"name": "A", "age": 3}}));
        let def = analyze_record(&record, "Book");
        assert_eq!(def.fields[0].field_type, TypeExpr::Ref("Author".into()));
        assert_eq!(def.fields[0].description, "Nested object");
        let author = def.find("Author").unwrap();
        assert_eq!(author.field_names(), vec!["name", "age"]);
    }

    #[test]
    fn test_array_of_objects_uses_first_element() {
        let record = object(json!({"books": [{"title": "T"}, {"title": "U", "isbn": "x"}]}));
        let def = analyze_record(&record, "Record");
        assert_eq!(
            def.fields[0].field_type,
            TypeExpr::array_of(TypeExpr::Ref("Book".into()))
        );
        assert_eq!(def.find("Book").unwrap().field_names(), vec!["title"]);
    }

    #[test]
    fn test_null_field_stays_required() {
        let record = object(json!({"note": null, "title": "x", "owner": {"phone": null}}));
        let def = analyze_record(&record, "Record");
        assert!(def.fields.iter().all(|f| !f.optional));
        assert!(def.fields[0].field_type.is_primitive(Primitive::Null));
        let owner = def.find("Owner").unwrap();
        assert!(!owner.fields[0].optional);
    }

    #[test]
    fn test_collisions_preserved_by_default() {
        let record = object(json!({
            "a": {"info": {"x": 1}},
            "b": {"info": {"y": "z"}}
        }));
        let def = analyze_record(&record, "Record");
        assert_eq!(def.names_in_render_order(), vec!["Info", "A", "Info", "B", "Record"]);
    }

    #[test]
    fn test_collisions_suffixed() {
        let record = object(json!({
            "a": {"info": {"x": 1}},
            "b": {"info": {"y": "z"}},
            "record": {"z": true}
        }));
        let options = SynthesisOptions {
            name_collisions: NameCollisionPolicy::Suffix,
            ..Default::default()
        };
        let def = analyze_record_with(&record, "Record", &options);
        assert_eq!(
            def.names_in_render_order(),
            vec!["Info", "A", "Info2", "B", "Record2", "Record"]
        );
        let b = def.find("B").unwrap();
        assert_eq!(b.fields[0].field_type, TypeExpr::Ref("Info2".into()));
    }

    #[test]
    fn test_alias_names_interface() {
        let record = object(json!({"meta": {"v": 1}}));
        let mut options = SynthesisOptions::default();
        options.aliases.insert("meta".into(), "PostMeta".into());
        let def = analyze_record_with(&record, "Post", &options);
        assert_eq!(def.fields[0].field_type, TypeExpr::Ref("PostMeta".into()));
    }

    #[test]
    fn test_analyze_records_merges_fields() {
        let first = object(json!({"id": "1", "data": {"title": "A", "score": 1}}));
        let second = object(json!({"id": "2", "collectionId": "c", "data": {"title": "B", "score": "high", "extra": true}}));
        let def = analyze_records(&[&first, &second], "Post");

        assert_eq!(def.field_names(), vec!["id", "title", "score", "extra"]);
        assert!(def.nested_interfaces.is_empty());
        assert!(!def.field("title").unwrap().optional);
        assert!(def.field("extra").unwrap().optional);
        assert_eq!(
            def.field("score").unwrap().field_type,
            TypeExpr::Union(vec![
                TypeExpr::Primitive(Primitive::Number),
                TypeExpr::Primitive(Primitive::String),
            ])
        );
    }

    #[test]
    fn test_analyze_records_empty() {
        let def = analyze_records(&[], "Post");
        assert_eq!(def.name, "Post");
        assert!(def.fields.is_empty());
    }

    #[test]
    fn test_clean_record() {
        let record = object(json!({"id": "1", "created": "x", "updated": "y", "title": "t"}));
        let cleaned = clean_record(&record, false);
        assert_eq!(cleaned.keys().collect::<Vec<_>>(), vec!["title"]);
        assert_eq!(clean_record(&record, true).len(), 4);
    }
}
