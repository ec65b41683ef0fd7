//! Batch command - extract fields from every row of a CSV file.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use fieldkit_core::HandlerRegistry;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input CSV with `type` and `text` columns
    #[arg(short, long)]
    input: PathBuf,

    /// Output CSV (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip type-specific preprocessing of each row
    #[arg(long)]
    raw: bool,
}

#[derive(Debug, Deserialize)]
struct InputRow {
    #[serde(rename = "type")]
    field_type: String,
    text: String,
}

#[derive(Debug, Serialize)]
struct OutputRow {
    #[serde(rename = "type")]
    field_type: String,
    text: String,
    value: Option<String>,
    start: Option<usize>,
    end: Option<usize>,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let registry = HandlerRegistry::new(&config);

    let mut reader = csv::Reader::from_path(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;

    let mut rows = Vec::new();
    let mut missing = 0usize;

    for (index, record) in reader.deserialize::<InputRow>().enumerate() {
        // Header is line 1
        let line = index + 2;
        let row = record.with_context(|| format!("Malformed row at line {}", line))?;
        let handler = registry
            .get(&row.field_type)
            .with_context(|| format!("Row at line {}", line))?;

        let found = if args.raw {
            handler.extract_raw(&row.text)
        } else {
            handler.extract(&row.text)
        };

        if found.is_none() {
            warn!("No {} found at line {}", handler.kind(), line);
            missing += 1;
        }
        debug!("Line {}: {:?}", line, found);

        rows.push(OutputRow {
            value: found.as_ref().map(|m| handler.render(&m.value)),
            start: found.as_ref().and_then(|m| m.position).map(|(start, _)| start),
            end: found.as_ref().and_then(|m| m.position).map(|(_, end)| end),
            field_type: row.field_type,
            text: row.text,
        });
    }

    info!("Processed {} rows, {} without a value", rows.len(), missing);

    match &args.output {
        Some(path) => {
            let mut wtr = csv::Writer::from_path(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
            println!(
                "{} Wrote {} rows to {} ({} without a value)",
                style("✓").green(),
                rows.len(),
                path.display(),
                missing
            );
        }
        None => {
            let mut wtr = csv::Writer::from_writer(io::stdout());
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }

    Ok(())
}
