//! Scaffold prompt assembler node.
//!
//! Builds an NX monorepo scaffolding prompt from fixed templates and the
//! caller's requirement fields, hands it to the configured
//! [`PromptService`], and returns the service's answer verbatim.

mod templates;

pub use templates::{BASE_TEMPLATE, DEFAULT_PR_DESCRIPTION, GIT_TEMPLATE, HEADING};

use super::{InputField, InputSchema, Inputs, Node};
use crate::error::{NodeError, Result};
use crate::prompt::{render_template, vars};
use crate::service::PromptService;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

pub const NODE_ID: &str = "NXMonorepo";
pub const DISPLAY_NAME: &str = "NX Monorepo Generator";

/// Inputs of one assembler invocation.
///
/// Fields are used as given; nothing is trimmed or checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldInput {
    pub project_name: String,
    pub positive_prompt: String,
    pub negative_prompt: String,
    pub repository_url: String,
    pub base_branch: String,
    pub pr_title: String,
    pub additional_apps: String,
    pub additional_libs: String,
    pub custom_dependencies: String,
    pub pr_description: String,
}

impl Default for ScaffoldInput {
    fn default() -> Self {
        Self {
            project_name: "my-nx-project".to_string(),
            positive_prompt: String::new(),
            negative_prompt: String::new(),
            repository_url: String::new(),
            base_branch: "main".to_string(),
            pr_title: "feat: Initialize NX monorepo structure".to_string(),
            additional_apps: String::new(),
            additional_libs: String::new(),
            custom_dependencies: String::new(),
            pr_description: String::new(),
        }
    }
}

/// Assemble the full prompt for `input`.
///
/// Parts are joined with newlines in this order: heading, workspace layout,
/// custom requirements (only when apps, libs, or dependencies are given),
/// positive and negative requirements, git instructions.
pub fn assemble_prompt(input: &ScaffoldInput) -> Result<String> {
    let mut parts = vec![
        HEADING.to_string(),
        render_template(BASE_TEMPLATE, &vars([("project_name", &input.project_name)]))?,
    ];

    let custom = [
        ("Additional Applications", &input.additional_apps),
        ("Additional Libraries", &input.additional_libs),
        ("Additional Dependencies", &input.custom_dependencies),
    ];
    if custom.iter().any(|(_, text)| !text.is_empty()) {
        parts.push("\nCustom Requirements:".to_string());
        for (label, text) in custom.iter().filter(|(_, text)| !text.is_empty()) {
            parts.push(format!("\n{}:\n{}", label, text));
        }
    }

    if !input.positive_prompt.is_empty() {
        parts.push(format!(
            "\nAdditional Requirements to Include:\n{}",
            input.positive_prompt
        ));
    }
    if !input.negative_prompt.is_empty() {
        parts.push(format!("\nRequirements to Avoid:\n{}", input.negative_prompt));
    }

    let description = if input.pr_description.is_empty() {
        DEFAULT_PR_DESCRIPTION
    } else {
        input.pr_description.as_str()
    };
    parts.push(render_template(
        GIT_TEMPLATE,
        &vars([
            ("repository_url", input.repository_url.as_str()),
            ("base_branch", input.base_branch.as_str()),
            ("pr_title", input.pr_title.as_str()),
            ("pr_description", description),
        ]),
    )?);

    Ok(parts.join("\n"))
}

/// The assembler node.
pub struct Scaffold {
    service: Box<dyn PromptService>,
}

impl Scaffold {
    pub fn new(service: Box<dyn PromptService>) -> Self {
        Self { service }
    }

    /// Assemble the prompt and return the service's response.
    pub fn execute(&self, input: &ScaffoldInput) -> Result<String> {
        let prompt = assemble_prompt(input)?;
        info!(
            project = %input.project_name,
            service = %self.service.name(),
            prompt_chars = prompt.len(),
            "assembled scaffold prompt"
        );
        self.service.send(&prompt)
    }
}

impl Node for Scaffold {
    fn id(&self) -> &'static str {
        NODE_ID
    }

    fn display_name(&self) -> &'static str {
        DISPLAY_NAME
    }

    fn schema(&self) -> InputSchema {
        let defaults = ScaffoldInput::default();

        InputSchema::new(vec![
            InputField::text("project_name", &defaults.project_name),
            InputField::multiline("positive_prompt"),
            InputField::multiline("negative_prompt"),
            InputField::text("repository_url", ""),
            InputField::text("base_branch", &defaults.base_branch),
            InputField::text("pr_title", &defaults.pr_title),
            InputField::multiline("additional_apps").optional(),
            InputField::multiline("additional_libs").optional(),
            InputField::multiline("custom_dependencies").optional(),
            InputField::multiline("pr_description").optional(),
        ])
    }

    fn run(&self, inputs: &Inputs) -> Result<String> {
        self.schema().check_known(inputs)?;
        let input: ScaffoldInput = serde_json::from_value(Value::Object(inputs.clone()))
            .map_err(|e| NodeError::UserError(format!("invalid scaffold inputs: {}", e)))?;
        self.execute(&input)
    }
}
