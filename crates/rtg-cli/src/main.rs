use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::Serialize;
use serde_json::{Map, Value};

use rtg_core::columns;
use rtg_core::config::{self, CONFIG_FILE_NAME, RtgConfig};
use rtg_core::error::InputError;
use rtg_core::schema;
use rtg_core::transform::{self, SynthesisOptions};
use rtg_core::{CodeGenerator, GeneratedFile};
use rtg_typescript::generator::synthesize_root;
use rtg_typescript::highlight::highlight;
use rtg_typescript::{TypeScriptGenerator, format_json, generate_types_with};

#[derive(Parser)]
#[command(name = "rtg", about = "Infer TypeScript interfaces from JSON records", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate TypeScript interfaces from a JSON record or list of records
    Generate {
        /// Path to the JSON input file
        #[arg(short, long)]
        input: PathBuf,

        /// Root interface name (overrides the config)
        #[arg(long)]
        root: Option<String>,

        /// Output directory; defaults to `output.dir` from the config file,
        /// or stdout when there is no config file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also produce highlighted HTML markup
        #[arg(long)]
        markup: bool,
    },

    /// Describe a JSON record as a JSON schema
    Schema {
        /// Path to the JSON record
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "json")]
        format: OutputFormat,
    },

    /// List the table columns of a set of records
    Columns {
        /// Path to a JSON array of records
        #[arg(short, long)]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "yaml")]
        format: OutputFormat,
    },

    /// Render TypeScript source as highlighted HTML markup
    Highlight {
        /// Path to the source file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Pretty-print a JSON file
    Format {
        /// Path to the JSON file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new rtg configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            root,
            output,
            markup,
        } => cmd_generate(&input, root, output, markup),

        Commands::Schema { input, format } => cmd_schema(&input, format),

        Commands::Columns { input, format } => cmd_columns(&input, format),

        Commands::Highlight { input } => {
            let source = read_text(&input)?;
            println!("{}", highlight(&source));
            Ok(())
        }

        Commands::Format { input } => {
            let text = read_text(&input)?;
            println!("{}", format_json(&text));
            Ok(())
        }

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "rtg", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<RtgConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    config::load_config(&config_path).map_err(|e| anyhow::anyhow!(e))
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_json(path: &Path) -> Result<Value> {
    let content = read_text(path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(InputError::from)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(value)
}

/// Objects of a record list, or the value itself when it is a single record.
fn as_records(value: &Value) -> Result<Vec<&Map<String, Value>>> {
    match value {
        Value::Object(record) => Ok(vec![record]),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_object()
                    .context("expected every array element to be a JSON object")
            })
            .collect(),
        _ => anyhow::bail!("expected a JSON object or an array of objects"),
    }
}

/// Drop record metadata from the root value unless the config keeps it.
fn clean_root(value: Value, include_system: bool) -> Value {
    match value {
        Value::Object(record) => Value::Object(transform::clean_record(&record, include_system)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .map(|item| match item {
                    Value::Object(record) => {
                        Value::Object(transform::clean_record(&record, include_system))
                    }
                    other => other,
                })
                .collect(),
        ),
        other => other,
    }
}

/// Write generated files to disk under the given base directory.
fn write_files(base: &Path, files: &[GeneratedFile]) -> Result<()> {
    for file in files {
        let path = base.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("  wrote {}", path.display());
    }
    Ok(())
}

fn cmd_generate(
    input: &Path,
    root: Option<String>,
    output: Option<PathBuf>,
    markup: bool,
) -> Result<()> {
    let loaded = try_load_config()?;
    let output = output.or_else(|| loaded.as_ref().map(|c| PathBuf::from(&c.output.dir)));
    let cfg = loaded.unwrap_or_default();
    let value = clean_root(read_json(input)?, cfg.include_system_fields);
    let root_name = root.unwrap_or_else(|| cfg.root_name.clone());
    let options = SynthesisOptions::from(&cfg.naming);

    let Some(output_dir) = output else {
        let types = generate_types_with(&value, Some(&root_name), &options);
        if markup {
            println!("{}", types.highlighted_markup);
        } else {
            println!("{}", types.source_code);
        }
        return Ok(());
    };

    let tree = synthesize_root(&value, &root_name, &options)?;
    log::debug!(
        "synthesized {} interfaces for {root_name}",
        tree.names_in_render_order().len()
    );

    let mut output_config = cfg.output.clone();
    output_config.markup |= markup;
    let files = TypeScriptGenerator.generate(&tree, &output_config)?;

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &files)?;
    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_schema(input: &Path, format: OutputFormat) -> Result<()> {
    let value = read_json(input)?;
    let record = value
        .as_object()
        .context("schema input must be a single JSON object")?;
    print_formatted(&schema::json_schema(record), format)
}

fn cmd_columns(input: &Path, format: OutputFormat) -> Result<()> {
    let value = read_json(input)?;
    let records = as_records(&value)?;
    print_formatted(&columns::analyze_columns(&records), format)
}

fn print_formatted<T: Serialize>(value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Yaml => {
            let yaml = serde_yaml_ng::to_string(value)?;
            print!("{}", yaml);
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)?;
            println!("{}", json);
        }
    }
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
