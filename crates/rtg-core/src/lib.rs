pub mod cache;
pub mod columns;
pub mod config;
pub mod error;
pub mod ir;
pub mod schema;
pub mod transform;

use serde::Serialize;

/// Root interface name used when the caller does not supply one.
pub const DEFAULT_ROOT_NAME: &str = "Record";

/// A generated file with path and content.
#[derive(Debug, Clone)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Rendered interface source plus its highlighted markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GeneratedTypes {
    pub source_code: String,
    pub highlighted_markup: String,
}

/// Trait for code generators that produce files from a synthesized interface tree.
pub trait CodeGenerator {
    type Config;
    type Error: std::error::Error;
    fn generate(
        &self,
        root: &ir::InterfaceDefinition,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error>;
}
