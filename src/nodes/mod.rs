//! Node implementations and the registry the host reads.
//!
//! A node is a unit of work the host graph invokes with a map of named
//! inputs and which answers with a single string.

pub mod code_to_prompt;
mod registry;
pub mod scaffold;
mod schema;

pub use registry::{NodeKind, NodeRegistry};
pub use schema::{FieldKind, InputField, InputSchema};

use crate::error::Result;

/// Named inputs as the host supplies them.
pub type Inputs = serde_json::Map<String, serde_json::Value>;

/// A unit of work registered with the host.
pub trait Node {
    /// Stable identifier the host uses as the registry key.
    fn id(&self) -> &'static str;

    /// Human-readable name shown by the host.
    fn display_name(&self) -> &'static str;

    /// Description of the inputs this node accepts.
    fn schema(&self) -> InputSchema;

    /// Run the node once.
    fn run(&self, inputs: &Inputs) -> Result<String>;
}
