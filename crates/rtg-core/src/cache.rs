use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use serde_json::{Map, Value};

use crate::GeneratedTypes;
use crate::transform::synthesize::DATA_KEY;

/// Storage for previously generated output, keyed by record content.
///
/// A miss only means the pure computation runs again.
pub trait TypeCache {
    fn get(&self, key: &str) -> Option<GeneratedTypes>;
    fn put(&mut self, key: String, value: GeneratedTypes);
    /// Drop one entry, or everything when `key` is `None`.
    fn invalidate(&mut self, key: Option<&str>);
}

/// In-process [`TypeCache`] backed by a hash map.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, GeneratedTypes>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cached keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl TypeCache for MemoryCache {
    fn get(&self, key: &str) -> Option<GeneratedTypes> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: String, value: GeneratedTypes) {
        self.entries.insert(key, value);
    }

    fn invalidate(&mut self, key: Option<&str>) {
        match key {
            Some(key) => {
                self.entries.remove(key);
            }
            None => self.entries.clear(),
        }
    }
}

/// Cache key for a record: `<collectionName>:<id>:<content hash>`.
///
/// The hash covers the `data` payload when the record has one, the whole
/// record otherwise. Missing names and ids read as `unknown`.
pub fn record_key(record: &Map<String, Value>) -> String {
    let collection = record
        .get("collectionName")
        .and_then(Value::as_str)
        .unwrap_or("unknown");
    let id = match record.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Null) | None => "unknown".to_string(),
        Some(other) => other.to_string(),
    };

    let content = match record.get(DATA_KEY) {
        Some(data) if !data.is_null() => data.to_string(),
        _ => Value::Object(record.clone()).to_string(),
    };
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);

    format!("{collection}:{id}:{:016x}", hasher.finish())
}
