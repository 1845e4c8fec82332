//! Configuration model for codeprompt.
//!
//! This module defines the Config struct that represents `codeprompt.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;


pub use model::{Config, NodeToggles, ServiceConfig};

/// File name looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "codeprompt.yaml";
