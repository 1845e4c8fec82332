//! Command implementations for codeprompt.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Command output is written to a caller-supplied writer so
//! it can be captured in tests; diagnostics go through `tracing`.

use crate::cli::{Cli, Command, RunArgs, SchemaArgs};
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{NodeError, Result};
use crate::nodes::{Inputs, NodeRegistry};
use serde_json::Value;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Dispatch a command to its implementation, printing to stdout.
pub fn dispatch(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    dispatch_to(cli, &mut out)
}

/// Dispatch a command, writing its output to `out`.
pub fn dispatch_to(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::List => cmd_list(&config, out),
        Command::Schema(args) => cmd_schema(&config, args, out),
        Command::Run(args) => cmd_run(&config, args, out),
        Command::Config => cmd_config(&config, out),
    }
}

/// Load the explicit config file, or the default one when it exists.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(DEFAULT_CONFIG_FILE),
    }
}

fn cmd_list(config: &Config, out: &mut dyn Write) -> Result<()> {
    let registry = NodeRegistry::from_config(config);

    if registry.is_empty() {
        writeln!(out, "No nodes enabled.")?;
        return Ok(());
    }

    let width = registry.ids().map(str::len).max().unwrap_or_default();
    for (id, name) in registry.display_names() {
        writeln!(out, "{:<width$}  {}", id, name, width = width)?;
    }
    Ok(())
}

fn cmd_schema(config: &Config, args: SchemaArgs, out: &mut dyn Write) -> Result<()> {
    let registry = NodeRegistry::from_config(config);
    let node = registry.require(&args.node)?;

    let json = serde_json::to_string_pretty(&node.schema())
        .map_err(|e| NodeError::UserError(format!("failed to serialize schema: {}", e)))?;
    writeln!(out, "{}", json)?;
    Ok(())
}

fn cmd_run(config: &Config, args: RunArgs, out: &mut dyn Write) -> Result<()> {
    let registry = NodeRegistry::from_config(config);
    let node = registry.require(&args.node)?;
    let schema = node.schema();

    let mut inputs = match &args.inputs_file {
        Some(path) => read_inputs_file(path)?,
        None => Inputs::new(),
    };
    schema.merge_strings(&mut inputs, args.inputs)?;

    info!(node = node.id(), inputs = inputs.len(), "running node");
    let result = node.run(&inputs)?;

    write!(out, "{}", result)?;
    if !result.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn cmd_config(config: &Config, out: &mut dyn Write) -> Result<()> {
    write!(out, "{}", config.to_yaml()?)?;
    Ok(())
}

/// Read a JSON object of node inputs.
pub fn read_inputs_file(path: &Path) -> Result<Inputs> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        NodeError::UserError(format!(
            "failed to read inputs file '{}': {}",
            path.display(),
            e
        ))
    })?;

    match serde_json::from_str::<Value>(&content) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(NodeError::UserError(format!(
            "inputs file '{}' must contain a JSON object",
            path.display()
        ))),
        Err(e) => Err(NodeError::UserError(format!(
            "failed to parse inputs file '{}': {}",
            path.display(),
            e
        ))),
    }
}
