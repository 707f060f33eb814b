use rtg_core::config::OutputConfig;
use rtg_core::error::InputError;
use rtg_core::ir::InterfaceDefinition;
use rtg_core::transform::{self, SynthesisOptions};
use rtg_core::{CodeGenerator, DEFAULT_ROOT_NAME, GeneratedFile, GeneratedTypes};
use serde_json::{Map, Value};

use crate::emitters::emit_interfaces;
use crate::error::GeneratorError;
use crate::highlight::{HighlightToken, TokenKind, highlight, to_markup};

/// Prefix of the single-line comment returned in place of failed output.
pub const ERROR_COMMENT_PREFIX: &str = "// Error generating types: ";

/// Generate interfaces and markup for a record or list of records.
///
/// Never fails: anything that cannot be rendered yields a one-line comment
/// describing the problem.
pub fn generate_types(value: &Value, root_name: Option<&str>) -> GeneratedTypes {
    generate_types_with(value, root_name, &SynthesisOptions::default())
}

/// [`generate_types`] with explicit synthesis options.
pub fn generate_types_with(
    value: &Value,
    root_name: Option<&str>,
    options: &SynthesisOptions,
) -> GeneratedTypes {
    let root_name = root_name.unwrap_or(DEFAULT_ROOT_NAME);
    try_generate(value, root_name, options).unwrap_or_else(|err| degraded(&err.to_string()))
}

/// Fallible form of [`generate_types_with`].
pub fn try_generate(
    value: &Value,
    root_name: &str,
    options: &SynthesisOptions,
) -> Result<GeneratedTypes, GeneratorError> {
    let root = synthesize_root(value, root_name, options)?;
    render(&root)
}

/// Render a synthesized tree to source code and markup.
pub fn render(root: &InterfaceDefinition) -> Result<GeneratedTypes, GeneratorError> {
    let source_code = emit_interfaces(root)?;
    let highlighted_markup = highlight(&source_code);
    Ok(GeneratedTypes {
        source_code,
        highlighted_markup,
    })
}

/// Build the interface tree for a root value.
///
/// An object goes through single-record synthesis, an array of objects
/// through multi-record synthesis.
pub fn synthesize_root(
    value: &Value,
    root_name: &str,
    options: &SynthesisOptions,
) -> Result<InterfaceDefinition, GeneratorError> {
    match value {
        Value::Object(record) => Ok(transform::analyze_record_with(record, root_name, options)),
        Value::Array(items) => {
            let records = records_of(items)?;
            log::debug!("merging {} records into {root_name}", records.len());
            Ok(transform::analyze_records(&records, root_name))
        }
        other => Err(GeneratorError::UnsupportedRoot(value_kind(other))),
    }
}

/// Parse JSON text and generate types for it.
pub fn process_json_input(
    text: &str,
    root_name: Option<&str>,
) -> Result<GeneratedTypes, InputError> {
    let value: Value = serde_json::from_str(text)?;
    Ok(generate_types(&value, root_name))
}

/// Output standing in for a failed generation.
pub fn degraded(message: &str) -> GeneratedTypes {
    let message = message.replace(['\r', '\n'], " ");
    log::error!("type generation failed: {message}");
    let source_code = format!("{ERROR_COMMENT_PREFIX}{message}");
    let highlighted_markup = to_markup(&[HighlightToken {
        kind: TokenKind::Comment,
        text: &source_code,
    }]);
    GeneratedTypes {
        source_code,
        highlighted_markup,
    }
}

fn records_of(items: &[Value]) -> Result<Vec<&Map<String, Value>>, GeneratorError> {
    items
        .iter()
        .map(|item| {
            item.as_object()
                .ok_or(GeneratorError::UnsupportedRoot("array containing non-objects"))
        })
        .collect()
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Writes the rendered interfaces (and optionally their markup) to files.
pub struct TypeScriptGenerator;

impl CodeGenerator for TypeScriptGenerator {
    type Config = OutputConfig;
    type Error = GeneratorError;

    fn generate(
        &self,
        root: &InterfaceDefinition,
        config: &Self::Config,
    ) -> Result<Vec<GeneratedFile>, Self::Error> {
        let types = render(root)?;
        let mut files = vec![GeneratedFile {
            path: config.types_file.clone(),
            content: format!("{}\n", types.source_code),
        }];
        if config.markup {
            files.push(GeneratedFile {
                path: config.markup_file.clone(),
                content: format!("<pre><code>{}</code></pre>\n", types.highlighted_markup),
            });
        }
        Ok(files)
    }
}
