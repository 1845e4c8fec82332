//! Prompt text utilities shared by the nodes.
//!
//! Templates use `{variable}` placeholders:
//!
//! ```text
//! Project name: {project_name}
//! 1. Clone the repository: {repository_url}
//! ```
//!
//! Use `{{` and `}}` to render literal braces.

mod template;

pub use template::{TemplateError, render_template, vars};
