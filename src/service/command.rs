//! Prompt service backed by a subprocess.
//!
//! Executes the configured command once per prompt with output capture and an
//! optional timeout.

use super::PromptService;
use crate::error::{NodeError, Result};
use crate::prompt::{TemplateError, render_template, vars};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Runs a command template for each prompt and returns its stdout.
///
/// The prompt is written to a scratch file that is both exposed to the
/// template as `{prompt_file}` and attached to the command's stdin, so tools
/// that read a path and tools that read a pipe both work.
#[derive(Debug, Clone)]
pub struct CommandService {
    name: String,
    command: String,
    timeout: Option<Duration>,
    environment: BTreeMap<String, String>,
}

impl CommandService {
    /// Create a service for `command`.
    pub fn new(
        command: impl Into<String>,
        timeout_seconds: Option<u64>,
        environment: BTreeMap<String, String>,
    ) -> Self {
        let command = command.into();
        let name = shell_words::split(&command)
            .ok()
            .and_then(|args| args.into_iter().next())
            .unwrap_or_else(|| command.clone());

        Self {
            name,
            command,
            timeout: timeout_seconds.map(Duration::from_secs),
            environment,
        }
    }

    fn build_args(&self, prompt_file: &Path) -> Result<Vec<String>> {
        let quoted = shell_words::quote(&prompt_file.to_string_lossy()).into_owned();
        let variables = vars([("prompt_file", quoted)]);
        let command_str = render_template(&self.command, &variables).map_err(|e| match e {
            TemplateError::UndefinedVariable { name, .. } => NodeError::ConfigError(format!(
                "service command references undefined variable '{}' (only {{prompt_file}} is available)\n\
                 Command: {}",
                name, self.command
            )),
            other => NodeError::ConfigError(format!("service command template: {}", other)),
        })?;

        let args = shell_words::split(&command_str).map_err(|e| {
            NodeError::ConfigError(format!(
                "failed to parse service command '{}': {}\n\
                 Fix: check for unmatched quotes or invalid escape sequences.",
                command_str, e
            ))
        })?;

        if args.is_empty() {
            return Err(NodeError::ConfigError(format!(
                "service command is empty after parsing: '{}'",
                command_str
            )));
        }

        Ok(args)
    }
}

impl PromptService for CommandService {
    fn name(&self) -> &str {
        &self.name
    }

    fn send(&self, prompt: &str) -> Result<String> {
        let scratch = TempDir::new()?;
        let prompt_path = scratch.path().join("prompt.md");
        let stdout_path = scratch.path().join("stdout.log");
        let stderr_path = scratch.path().join("stderr.log");
        std::fs::write(&prompt_path, prompt)?;

        let args = self.build_args(&prompt_path)?;
        let program = &args[0];

        let mut command = Command::new(program);
        command
            .args(&args[1..])
            .stdin(Stdio::from(File::open(&prompt_path)?))
            .stdout(Stdio::from(File::create(&stdout_path)?))
            .stderr(Stdio::from(File::create(&stderr_path)?));
        for (key, value) in &self.environment {
            command.env(key, value);
        }

        info!(service = %self.name, prompt_chars = prompt.len(), "sending prompt");
        let start = Instant::now();
        let mut child = command.spawn().map_err(|e| {
            NodeError::ServiceError(format!(
                "failed to execute service command '{}': {}\n\
                 Fix: ensure the command is installed and in PATH.",
                program, e
            ))
        })?;

        let status = match self.timeout {
            Some(timeout) => wait_with_timeout(&mut child, timeout)?,
            None => Some(child.wait()?),
        };
        debug!(service = %self.name, elapsed_ms = start.elapsed().as_millis() as u64, "service exited");

        let status = status.ok_or_else(|| {
            NodeError::ServiceError(format!(
                "service command '{}' timed out after {}s",
                program,
                self.timeout.map(|t| t.as_secs()).unwrap_or_default()
            ))
        })?;

        if !status.success() {
            let stderr = std::fs::read_to_string(&stderr_path).unwrap_or_default();
            warn!(service = %self.name, code = ?status.code(), "service command failed");
            return Err(NodeError::ServiceError(format!(
                "service command '{}' failed (exit code {}): {}",
                program,
                status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }

        let bytes = std::fs::read(&stdout_path)?;
        String::from_utf8(bytes).map_err(|e| {
            NodeError::ServiceError(format!("service response is not valid UTF-8: {}", e))
        })
    }
}

/// Wait for a child process with timeout.
///
/// Returns `None` when the process was killed for exceeding `timeout`.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<Option<ExitStatus>> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if start.elapsed() >= timeout {
            // SIGKILL on Unix, TerminateProcess on Windows.
            let _ = child.kill();
            let _ = child.wait();
            return Ok(None);
        }
        std::thread::sleep(poll_interval);
    }
}
