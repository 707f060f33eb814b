use std::fs;
use std::path::Path;

use rtg_core::cache::{MemoryCache, TypeCache, record_key};
use rtg_core::config::RtgConfig;
use rtg_core::transform::{self, SynthesisOptions};
use rtg_core::{DEFAULT_ROOT_NAME, GeneratedTypes};
use serde_json::{Map, Value};

use crate::generator::{degraded, render};

/// File name used when exporting without an explicit path.
pub const DEFAULT_EXPORT_FILE: &str = "generated-types.ts";

/// Settings applied to every generation run by a [`TypeGenerationService`].
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub default_type_name: String,
    /// Keep `id`, `created` and `updated` in the generated root interface.
    pub include_system_fields: bool,
    pub synthesis: SynthesisOptions,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            default_type_name: DEFAULT_ROOT_NAME.to_string(),
            include_system_fields: false,
            synthesis: SynthesisOptions::default(),
        }
    }
}

impl From<&RtgConfig> for GenerationOptions {
    fn from(config: &RtgConfig) -> Self {
        Self {
            default_type_name: config.root_name.clone(),
            include_system_fields: config.include_system_fields,
            synthesis: SynthesisOptions::from(&config.naming),
        }
    }
}

/// Generates types for stored records, remembering results in a [`TypeCache`].
pub struct TypeGenerationService<C = MemoryCache> {
    cache: C,
    options: GenerationOptions,
    last_generated: Option<GeneratedTypes>,
    last_error: Option<String>,
}

impl TypeGenerationService<MemoryCache> {
    pub fn in_memory(options: GenerationOptions) -> Self {
        Self::new(MemoryCache::new(), options)
    }
}

impl<C: TypeCache> TypeGenerationService<C> {
    pub fn new(cache: C, options: GenerationOptions) -> Self {
        Self {
            cache,
            options,
            last_generated: None,
            last_error: None,
        }
    }

    /// Generate types for one record.
    ///
    /// With `use_cache`, a previous result for the same record content and
    /// type name is returned without regenerating. Failures produce the
    /// degraded comment output and are kept in [`last_error`](Self::last_error).
    pub fn generate_from_record(
        &mut self,
        record: &Map<String, Value>,
        type_name: Option<&str>,
        use_cache: bool,
    ) -> GeneratedTypes {
        self.last_error = None;
        let type_name = type_name.unwrap_or(&self.options.default_type_name).to_string();
        let key = format!("{}:{type_name}", record_key(record));

        if use_cache {
            if let Some(cached) = self.cache.get(&key) {
                log::debug!("type cache hit for {key}");
                self.last_generated = Some(cached.clone());
                return cached;
            }
            log::debug!("type cache miss for {key}");
        }

        let cleaned = transform::clean_record(record, self.options.include_system_fields);
        let root = transform::analyze_record_with(&cleaned, &type_name, &self.options.synthesis);
        let result = match render(&root) {
            Ok(types) => {
                self.cache.put(key, types.clone());
                types
            }
            Err(err) => {
                let message = err.to_string();
                self.last_error = Some(message.clone());
                degraded(&message)
            }
        };
        self.last_generated = Some(result.clone());
        result
    }

    /// Generate one merged interface for several records. Results are not cached.
    pub fn generate_from_records(
        &mut self,
        records: &[&Map<String, Value>],
        type_name: Option<&str>,
    ) -> GeneratedTypes {
        if records.is_empty() {
            return GeneratedTypes::default();
        }
        self.last_error = None;
        let type_name = type_name.unwrap_or(&self.options.default_type_name);
        let cleaned: Vec<Map<String, Value>> = records
            .iter()
            .map(|record| transform::clean_record(record, self.options.include_system_fields))
            .collect();
        let refs: Vec<&Map<String, Value>> = cleaned.iter().collect();
        let root = transform::analyze_records(&refs, type_name);

        let result = render(&root).unwrap_or_else(|err| {
            let message = err.to_string();
            self.last_error = Some(message.clone());
            degraded(&message)
        });
        self.last_generated = Some(result.clone());
        result
    }

    pub fn options(&self) -> &GenerationOptions {
        &self.options
    }

    /// Replace the options. Cached output no longer applies and is dropped.
    pub fn set_options(&mut self, options: GenerationOptions) {
        self.options = options;
        self.cache.invalidate(None);
    }

    pub fn clear_cache(&mut self) {
        self.cache.invalidate(None);
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn last_generated(&self) -> Option<&GeneratedTypes> {
        self.last_generated.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Write source code to `path`, falling back to the last generated output.
    ///
    /// Returns `false` when there is nothing to write or the write fails.
    pub fn export_types(&self, types: Option<&str>, path: &Path) -> bool {
        let text = types
            .or_else(|| self.last_generated.as_ref().map(|t| t.source_code.as_str()))
            .unwrap_or_default();
        if text.is_empty() {
            return false;
        }
        match fs::write(path, text) {
            Ok(()) => true,
            Err(err) => {
                log::error!("failed to export types to {}: {err}", path.display());
                false
            }
        }
    }
}

/// Pretty-print JSON text, or return it unchanged when it does not parse.
pub fn format_json(text: &str) -> String {
    serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or_else(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_json() {
        assert_eq!(format_json(r#"{"b":1,"a":[true]}"#), "{\n  \"b\": 1,\n  \"a\": [\n    true\n  ]\n}");
        assert_eq!(format_json("{not json"), "{not json");
    }

    #[test]
    fn test_options_from_config() {
        let mut config = RtgConfig::default();
        config.root_name = "Post".to_string();
        config.include_system_fields = true;
        let options = GenerationOptions::from(&config);
        assert_eq!(options.default_type_name, "Post");
        assert!(options.include_system_fields);
    }
}
