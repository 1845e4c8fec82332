//! External prompt service.
//!
//! The scaffold node hands its assembled prompt to a [`PromptService`] and
//! returns whatever the service answers. Two implementations ship:
//!
//! - [`CommandService`]: runs a configured CLI tool once per prompt
//! - [`EchoService`]: returns the prompt unchanged (dry runs, no tool configured)

mod command;

pub use command::CommandService;

use crate::config::ServiceConfig;
use crate::error::Result;

/// A collaborator that consumes a prompt and produces text.
pub trait PromptService {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Send `prompt` and return the response verbatim.
    fn send(&self, prompt: &str) -> Result<String>;
}

/// Returns the prompt it is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoService;

impl PromptService for EchoService {
    fn name(&self) -> &str {
        "echo"
    }

    fn send(&self, prompt: &str) -> Result<String> {
        Ok(prompt.to_string())
    }
}

/// Build the service described by `config`.
pub fn from_config(config: &ServiceConfig) -> Box<dyn PromptService> {
    match &config.command {
        Some(command) => Box::new(CommandService::new(
            command.clone(),
            config.timeout_seconds,
            config.environment.clone(),
        )),
        None => Box::new(EchoService),
    }
}
