//! Score and compare commands - fuzzy matching against reference values.

use clap::Args;
use tracing::debug;

use fieldkit_core::{FieldHandler, FieldValue, HandlerRegistry};

/// Arguments for the score command.
#[derive(Args)]
pub struct ScoreArgs {
    /// Field type tag (human_name, date, proper_noun)
    #[arg(short = 't', long = "type")]
    field_type: String,

    /// Reference value to look for
    #[arg(short, long)]
    query: String,

    /// Text to score against
    text: String,
}

/// Arguments for the compare command.
#[derive(Args)]
pub struct CompareArgs {
    /// Field type tag (human_name, date, proper_noun)
    #[arg(short = 't', long = "type")]
    field_type: String,

    /// First value
    first: String,

    /// Second value
    second: String,
}

pub fn run_score(args: ScoreArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let registry = HandlerRegistry::new(&config);
    let handler = registry.get(&args.field_type)?;

    let query = canonical(handler, &args.query);
    let score = handler.match_score(&query, &args.text);
    debug!("Scored {:?} against {:?}: {}", query, args.text, score);

    println!("{:.4}", score);

    Ok(())
}

pub fn run_compare(args: CompareArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = super::config::load(config_path)?;
    let registry = HandlerRegistry::new(&config);
    let handler = registry.get(&args.field_type)?;

    let first = canonical(handler, &args.first);
    let second = canonical(handler, &args.second);
    let score = handler.compare(&first, &second);
    debug!("Compared {:?} with {:?}: {}", first, second, score);

    println!("{:.4}", score);

    Ok(())
}

/// Format a value, keeping the raw text when it does not normalize.
fn canonical(handler: &FieldHandler, raw: &str) -> FieldValue {
    handler
        .format(raw)
        .unwrap_or_else(|| FieldValue::Text(raw.to_string()))
}
