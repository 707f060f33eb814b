use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::transform::synthesize::{DATA_KEY, RECORD_META_KEYS, SYSTEM_KEYS};

/// Column value category, judged from the first non-null sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Datetime,
    String,
    Number,
    Boolean,
    Array,
    Object,
    Unknown,
}

/// A table column derived from a set of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    /// Full column key, `parent.child` for nested columns.
    pub key: String,
    /// Display name: the child key for nested columns.
    pub name: String,
    pub kind: ColumnKind,
    pub nested: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_key: Option<String>,
}

/// Group key used by [`group_columns`] for top-level columns.
pub const ROOT_GROUP: &str = "_root";

/// Collect the column keys of a list of records.
///
/// `id`, `created` and `updated` come first when present; every other column
/// keeps first-seen order.
pub fn extract_columns(records: &[&Map<String, Value>]) -> Vec<String> {
    let mut all: IndexSet<String> = IndexSet::new();
    for record in records {
        record_columns(record, &mut all);
    }

    let mut ordered: Vec<String> = RECORD_META_KEYS
        .iter()
        .filter(|key| all.contains(**key))
        .map(|key| key.to_string())
        .collect();
    ordered.extend(
        all.into_iter()
            .filter(|key| !RECORD_META_KEYS.contains(&key.as_str())),
    );
    ordered
}

fn record_columns(record: &Map<String, Value>, out: &mut IndexSet<String>) {
    for (key, value) in record {
        if SYSTEM_KEYS.contains(&key.as_str()) {
            continue;
        }
        match value {
            Value::Object(payload) if key == DATA_KEY => {
                out.extend(payload.keys().cloned());
            }
            Value::Object(children) => {
                out.insert(key.clone());
                out.extend(children.keys().map(|child| format!("{key}.{child}")));
            }
            _ => {
                out.insert(key.clone());
            }
        }
    }
}

/// Describe every column of a list of records.
pub fn analyze_columns(records: &[&Map<String, Value>]) -> Vec<ColumnInfo> {
    extract_columns(records)
        .into_iter()
        .map(|key| {
            let kind = column_kind(sample_value(records, &key));
            let (name, parent_key) = match key.split_once('.') {
                Some((parent, child)) => (child.to_string(), Some(parent.to_string())),
                None => (key.clone(), None),
            };
            ColumnInfo {
                nested: parent_key.is_some(),
                key,
                name,
                kind,
                parent_key,
            }
        })
        .collect()
}

/// Split column keys into groups by parent; top-level columns go under [`ROOT_GROUP`].
pub fn group_columns(columns: &[String]) -> IndexMap<String, Vec<String>> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();
    for column in columns {
        let group = column
            .split_once('.')
            .map_or(ROOT_GROUP, |(parent, _)| parent);
        groups
            .entry(group.to_string())
            .or_default()
            .push(column.clone());
    }
    groups
}

/// Value at a column key in one record, preferring the `data` payload.
pub fn nested_value<'a>(record: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    if let Some(Value::Object(payload)) = record.get(DATA_KEY) {
        if let Some(value) = payload.get(key) {
            return Some(value);
        }
    }

    let mut parts = key.split('.');
    let mut value = record.get(parts.next()?)?;
    for part in parts {
        value = value.as_object()?.get(part)?;
    }
    Some(value)
}

fn sample_value<'a>(records: &[&'a Map<String, Value>], key: &str) -> Option<&'a Value> {
    records
        .iter()
        .copied()
        .filter_map(|record| nested_value(record, key))
        .find(|value| !value.is_null())
}

fn column_kind(sample: Option<&Value>) -> ColumnKind {
    match sample {
        None | Some(Value::Null) => ColumnKind::Unknown,
        Some(Value::String(s)) if starts_with_date(s) => ColumnKind::Datetime,
        Some(Value::String(_)) => ColumnKind::String,
        Some(Value::Number(_)) => ColumnKind::Number,
        Some(Value::Bool(_)) => ColumnKind::Boolean,
        Some(Value::Array(_)) => ColumnKind::Array,
        Some(Value::Object(_)) => ColumnKind::Object,
    }
}

/// `YYYY-MM-DD` prefix; anything may follow.
static DATE_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date prefix pattern is valid"));

fn starts_with_date(s: &str) -> bool {
    DATE_PREFIX.is_match(s)
}
