use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::DEFAULT_ROOT_NAME;
use crate::error::ConfigError;

/// Top-level project configuration loaded from `.rtg.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RtgConfig {
    pub root_name: String,
    /// Keep `id`, `created` and `updated` when generating from a record.
    pub include_system_fields: bool,
    pub naming: NamingConfig,
    pub output: OutputConfig,
}

impl Default for RtgConfig {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            include_system_fields: false,
            naming: NamingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Interface naming behavior.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamingConfig {
    pub collisions: NameCollisionPolicy,
    /// Map from field name to the interface name hoisted for it.
    pub aliases: IndexMap<String, String>,
}

/// What to do when two hoisted interfaces derive the same name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameCollisionPolicy {
    /// Emit both definitions under the same name.
    #[default]
    Preserve,
    /// Append a numeric suffix (`Info2`, `Info3`, ...) to later duplicates.
    Suffix,
}

/// Where generated files go.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
    pub types_file: String,
    /// Also write the highlighted markup next to the types file.
    pub markup: bool,
    pub markup_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "src/generated".to_string(),
            types_file: "types.ts".to_string(),
            markup: false,
            markup_file: "types.html".to_string(),
        }
    }
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".rtg.yaml";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<RtgConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: RtgConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# rtg configuration
root_name: Record
include_system_fields: false   # keep id / created / updated in generated interfaces

naming:
  collisions: preserve   # preserve | suffix (Info, Info2, ...)
  aliases: {}
    # forminfo: FormInfo   # field name → interface name

output:
  dir: src/generated
  types_file: types.ts
  markup: false          # also write highlighted HTML markup
  markup_file: types.html
"#
}
