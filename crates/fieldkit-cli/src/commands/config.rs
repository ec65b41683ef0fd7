//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Subcommand};
use console::style;
use tracing::debug;

use fieldkit_core::models::config::FieldkitConfig;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show current configuration
    Show,

    /// Initialize a new configuration file
    Init(InitArgs),

    /// Get a specific configuration value
    Get {
        /// Configuration key (e.g., "date.reference_year")
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// New value
        value: String,
    },

    /// Show configuration file path
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite existing file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let path = config_path
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&path),
        ConfigCommand::Init(init_args) => init_config(init_args, &path),
        ConfigCommand::Get { key } => get_config(&path, &key),
        ConfigCommand::Set { key, value } => set_config(&path, &key, &value),
        ConfigCommand::Path => show_path(&path),
    }
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fieldkit")
        .join("config.json")
}

/// Load configuration for a command.
///
/// An explicit path must exist; otherwise the default location is used if
/// present, and built-in defaults if not.
pub fn load(config_path: Option<&str>) -> anyhow::Result<FieldkitConfig> {
    if let Some(path) = config_path {
        debug!("Loading config from {}", path);
        return Ok(FieldkitConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Loading config from {}", default_path.display());
        Ok(FieldkitConfig::from_file(&default_path)?)
    } else {
        Ok(FieldkitConfig::default())
    }
}

fn load_or_default(path: &Path) -> anyhow::Result<FieldkitConfig> {
    if path.exists() {
        Ok(FieldkitConfig::from_file(path)?)
    } else {
        Ok(FieldkitConfig::default())
    }
}

fn show_config(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        eprintln!(
            "{} No config file found, showing defaults.",
            style("ℹ").blue()
        );
    }
    let config = load_or_default(path)?;

    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}

fn init_config(args: InitArgs, path: &Path) -> anyhow::Result<()> {
    let output_path = args.output.unwrap_or_else(|| path.to_path_buf());

    if output_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            output_path.display()
        );
    }

    // Create parent directory if needed
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    FieldkitConfig::default().save(&output_path)?;

    println!(
        "{} Created configuration file at {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Dotted key ("date.reference_year") as a JSON pointer.
fn key_pointer(key: &str) -> String {
    key.split('.').map(|part| format!("/{}", part)).collect()
}

fn get_config(path: &Path, key: &str) -> anyhow::Result<()> {
    let json = serde_json::to_value(load_or_default(path)?)?;

    let Some(value) = json.pointer(&key_pointer(key)) else {
        anyhow::bail!("Configuration key not found: {}", key);
    };
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

/// Update one leaf of the configuration and write the file back.
///
/// Only existing keys can be set, and the result must still deserialize
/// and validate as a `FieldkitConfig`.
fn set_config(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let mut json = serde_json::to_value(load_or_default(path)?)?;

    // Non-JSON input is taken as a plain string
    let new_value = serde_json::from_str(value)
        .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));

    match json.pointer_mut(&key_pointer(key)) {
        Some(slot) if !slot.is_object() => *slot = new_value.clone(),
        Some(_) => anyhow::bail!("{} is a section, set one of its keys instead", key),
        None => anyhow::bail!("Configuration key not found: {}", key),
    }

    let config: FieldkitConfig = serde_json::from_value(json)
        .with_context(|| format!("Invalid value for {}: {}", key, value))?;
    config.validate()?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(path)?;

    debug!("Saved {} to {}", key, path.display());
    println!("{} Set {} = {}", style("✓").green(), key, new_value);

    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    println!("Configuration file: {}", path.display());

    if path.exists() {
        println!("Status: {}", style("exists").green());
    } else {
        println!("Status: {}", style("not created").yellow());
        println!();
        println!("Run 'fieldkit config init' to create a configuration file.");
    }

    Ok(())
}
