//! Repository-to-prompt renderer node.
//!
//! Clones a repository into an ephemeral directory, walks it through the
//! pattern filters and size cap, and renders the surviving files into one of
//! three text reports. Every failure is returned as report text so the host
//! never sees an error from this node.

mod clone;
mod collect;
mod filter;
mod render;

#[cfg(test)]
mod tests;

pub use clone::{EphemeralClone, repo_stem};
pub use collect::{
    Collection, FileRecord, Limits, SkipReason, SkippedFile, analyze_file, collect_files,
};
pub use filter::{
    IGNORE_PATTERNS, PatternSet, SUPPORTED_EXTENSIONS, Verdict, extension_of, parse_pattern_list,
};
pub use render::{OutputFormat, PREVIEW_CHARS, render, with_context_notes};

use super::{InputField, InputSchema, Inputs, Node};
use crate::error::{NodeError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::RangeInclusive;
use std::path::PathBuf;
use tracing::{info, warn};

pub const NODE_ID: &str = "Code2Prompt";
pub const DISPLAY_NAME: &str = "Code to Prompt Converter";

/// Prefix of every error report.
pub const ERROR_PREFIX: &str = "Error processing repository: ";

const MAX_FILES_RANGE: RangeInclusive<i64> = 1..=1000;
const MAX_FILE_SIZE_KB_RANGE: RangeInclusive<i64> = 1..=5000;

/// Inputs of one renderer invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererInput {
    pub repository_url: String,
    pub max_files: i64,
    pub max_file_size_kb: i64,
    pub output_format: OutputFormat,
    pub branch: String,
    /// Newline-separated globs; non-empty overrides extension filtering.
    pub include_patterns: String,
    /// Newline-separated globs; always rejected.
    pub exclude_patterns: String,
    /// Free text prepended to the report.
    pub context_notes: String,
}

impl Default for RendererInput {
    fn default() -> Self {
        Self {
            repository_url: String::new(),
            max_files: 100,
            max_file_size_kb: 500,
            output_format: OutputFormat::default(),
            branch: "main".to_string(),
            include_patterns: String::new(),
            exclude_patterns: String::new(),
            context_notes: String::new(),
        }
    }
}

impl RendererInput {
    /// Renderer input for `url` with every other field defaulted.
    pub fn for_repository(url: impl Into<String>) -> Self {
        Self {
            repository_url: url.into(),
            ..Default::default()
        }
    }

    /// Check ranges and required fields, yielding the walk limits.
    pub fn validate(&self) -> Result<Limits> {
        if self.repository_url.trim().is_empty() {
            return Err(NodeError::UserError(
                "repository_url must not be empty".to_string(),
            ));
        }
        if self.branch.trim().is_empty() {
            return Err(NodeError::UserError("branch must not be empty".to_string()));
        }

        let max_files = check_range("max_files", self.max_files, MAX_FILES_RANGE)?;
        let max_file_size_kb =
            check_range("max_file_size_kb", self.max_file_size_kb, MAX_FILE_SIZE_KB_RANGE)?;

        Ok(Limits {
            max_files: max_files as usize,
            max_file_size_kb: max_file_size_kb as u64,
        })
    }
}

fn check_range(name: &str, value: i64, range: RangeInclusive<i64>) -> Result<i64> {
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(NodeError::UserError(format!(
            "{} must be between {} and {}, got {}",
            name,
            range.start(),
            range.end(),
            value
        )))
    }
}

/// The renderer node.
#[derive(Debug, Clone, Default)]
pub struct CodeToPrompt {
    clone_root: Option<PathBuf>,
}

impl CodeToPrompt {
    /// Renderer cloning under `clone_root` (system temp dir when `None`).
    pub fn new(clone_root: Option<PathBuf>) -> Self {
        Self { clone_root }
    }

    /// Produce the report for `input`, or an error report.
    pub fn execute(&self, input: &RendererInput) -> String {
        info!(
            url = %input.repository_url,
            branch = %input.branch,
            format = %input.output_format,
            "rendering repository"
        );

        match self.try_execute(input) {
            Ok(report) => {
                info!(chars = report.len(), "repository rendered");
                report
            }
            Err(e) => {
                warn!(error = %e, "repository rendering failed");
                error_report(&e)
            }
        }
    }

    /// Same as [`execute`](Self::execute) but surfaces the error.
    pub fn try_execute(&self, input: &RendererInput) -> Result<String> {
        let limits = input.validate()?;
        let patterns = PatternSet::from_lists(&input.include_patterns, &input.exclude_patterns)?;

        let clone = EphemeralClone::create(
            self.clone_root.as_deref(),
            input.repository_url.trim(),
            input.branch.trim(),
        )?;
        let collection = collect_files(clone.path(), &patterns, limits)?;

        let report = with_context_notes(
            &input.context_notes,
            render(input.output_format, &collection.records),
        );

        clone.close()?;
        Ok(report)
    }
}

impl Node for CodeToPrompt {
    fn id(&self) -> &'static str {
        NODE_ID
    }

    fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    fn schema(&self) -> InputSchema {
        let defaults = RendererInput::default();
        let formats = OutputFormat::ALL.iter().map(|f| f.as_str()).collect();

        InputSchema::new(vec![
            InputField::text("repository_url", ""),
            InputField::int(
                "max_files",
                defaults.max_files,
                *MAX_FILES_RANGE.start(),
                *MAX_FILES_RANGE.end(),
            ),
            InputField::int(
                "max_file_size_kb",
                defaults.max_file_size_kb,
                *MAX_FILE_SIZE_KB_RANGE.start(),
                *MAX_FILE_SIZE_KB_RANGE.end(),
            ),
            InputField::choice("output_format", formats, defaults.output_format.as_str()),
            InputField::text("branch", &defaults.branch).optional(),
            InputField::multiline("include_patterns").optional(),
            InputField::multiline("exclude_patterns").optional(),
            InputField::multiline("context_notes").optional(),
        ])
    }

    /// Never fails: malformed inputs come back as an error report.
    fn run(&self, inputs: &Inputs) -> Result<String> {
        let parsed = self
            .schema()
            .check_known(inputs)
            .and_then(|()| parse_inputs(inputs));

        Ok(match parsed {
            Ok(input) => self.execute(&input),
            Err(e) => error_report(&e),
        })
    }
}

fn parse_inputs(inputs: &Inputs) -> Result<RendererInput> {
    serde_json::from_value(Value::Object(inputs.clone()))
        .map_err(|e| NodeError::UserError(format!("invalid renderer inputs: {}", e)))
}

fn error_report(err: &NodeError) -> String {
    format!("{}{}", ERROR_PREFIX, err)
}
