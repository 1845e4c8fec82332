//! CLI argument parsing for codeprompt.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use crate::logging::LEVEL_NAMES;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Codeprompt: prompt-building nodes for node-graph hosts.
///
/// Two nodes are provided:
/// - Code2Prompt renders a repository's files into a text prompt
/// - NXMonorepo assembles a monorepo scaffolding prompt and sends it to a
///   prompt service
#[derive(Parser, Debug)]
#[command(name = "codeprompt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: codeprompt.yaml in the current directory, if present).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log level written to stderr (overrides CODEPROMPT_LOG and RUST_LOG).
    #[arg(long, global = true, value_name = "LEVEL", value_parser = LEVEL_NAMES)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for codeprompt.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered nodes.
    ///
    /// Prints each node id with its display name.
    List,

    /// Print a node's input schema as JSON.
    Schema(SchemaArgs),

    /// Run a node and print its result.
    ///
    /// Inputs come from an optional JSON file and from repeated
    /// `--input key=value` flags; flags win over the file.
    Run(RunArgs),

    /// Print the effective configuration as YAML.
    Config,
}

/// Arguments for the `schema` command.
#[derive(Parser, Debug)]
pub struct SchemaArgs {
    /// Node id (e.g., Code2Prompt).
    pub node: String,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Node id (e.g., Code2Prompt).
    pub node: String,

    /// Input value as key=value (repeatable).
    #[arg(short, long = "input", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub inputs: Vec<(String, String)>,

    /// JSON object file holding inputs.
    #[arg(long, value_name = "FILE")]
    pub inputs_file: Option<PathBuf>,
}

/// Split `key=value` at the first `=`.
fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_list() {
        let cli = Cli::try_parse_from(["codeprompt", "list"]).unwrap();
        assert!(matches!(cli.command, Command::List));
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn parse_schema() {
        let cli = Cli::try_parse_from(["codeprompt", "schema", "Code2Prompt"]).unwrap();
        if let Command::Schema(args) = cli.command {
            assert_eq!(args.node, "Code2Prompt");
        } else {
            panic!("Expected Schema command");
        }
    }

    #[test]
    fn parse_run_with_inputs() {
        let cli = Cli::try_parse_from([
            "codeprompt",
            "run",
            "Code2Prompt",
            "--input",
            "repository_url=https://github.com/acme/widgets.git",
            "-i",
            "max_files=20",
            "-i",
            "context_notes=a=b",
            "--inputs-file",
            "inputs.json",
        ])
        .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.node, "Code2Prompt");
            assert_eq!(
                args.inputs,
                vec![
                    (
                        "repository_url".to_string(),
                        "https://github.com/acme/widgets.git".to_string()
                    ),
                    ("max_files".to_string(), "20".to_string()),
                    ("context_notes".to_string(), "a=b".to_string()),
                ]
            );
            assert_eq!(args.inputs_file, Some(PathBuf::from("inputs.json")));
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_run_rejects_malformed_input() {
        let result = Cli::try_parse_from(["codeprompt", "run", "NXMonorepo", "-i", "no_equals"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["codeprompt", "run", "NXMonorepo", "-i", "=value"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_run_allows_empty_value() {
        let cli = Cli::try_parse_from(["codeprompt", "run", "NXMonorepo", "-i", "pr_description="])
            .unwrap();
        if let Command::Run(args) = cli.command {
            assert_eq!(args.inputs, vec![("pr_description".to_string(), String::new())]);
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["codeprompt", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "codeprompt",
            "list",
            "--config",
            "custom.yaml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn parse_rejects_unknown_log_level() {
        let result = Cli::try_parse_from(["codeprompt", "--log-level", "loud", "list"]);
        assert!(result.is_err());
    }
}
