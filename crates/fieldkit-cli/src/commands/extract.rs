//! Extract command - normalize a field value found in text.

use std::io::Read;

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::{debug, info};

use fieldkit_core::{FieldValue, HandlerRegistry, StorageType};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Field type tag (human_name, date, proper_noun)
    #[arg(short = 't', long = "type")]
    field_type: String,

    /// Skip type-specific preprocessing of the input
    #[arg(long)]
    raw: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Input text (default: read stdin)
    text: Option<String>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Canonical value only
    Text,
}

/// Extraction report printed as JSON.
#[derive(Debug, Serialize)]
struct ExtractReport {
    #[serde(rename = "type")]
    field_type: String,
    storage_type: StorageType,
    value: Option<FieldValue>,
    source: Option<String>,
    position: Option<(usize, usize)>,
    pattern: Option<usize>,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let registry = HandlerRegistry::new(&config);
    let handler = registry.get(&args.field_type)?;

    let text = match args.text {
        Some(text) => text,
        None => read_stdin()?,
    };

    info!("Extracting {} from {} characters of text", handler.kind(), text.len());

    let found = if args.raw {
        handler.extract_raw(&text)
    } else {
        handler.extract(&text)
    };
    debug!("Extraction result: {:?}", found);

    if found.is_none() {
        eprintln!("{} No {} found", style("⚠").yellow(), handler.kind());
    }

    match args.format {
        OutputFormat::Json => {
            let report = ExtractReport {
                field_type: handler.kind().to_string(),
                storage_type: handler.storage_type(),
                value: found.as_ref().map(|m| m.value.clone()),
                source: found.as_ref().map(|m| m.source.clone()),
                position: found.as_ref().and_then(|m| m.position),
                pattern: found.as_ref().map(|m| m.pattern),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if let Some(m) = &found {
                println!("{}", handler.render(&m.value));
            }
        }
    }

    Ok(())
}

fn read_stdin() -> anyhow::Result<String> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}
