//! Host-facing input schemas.
//!
//! Each node publishes the ordered list of inputs it accepts, with kind,
//! bounds, and default. The host renders widgets from this; the CLI uses it to
//! turn `key=value` strings into typed inputs.

use super::Inputs;
use crate::error::{NodeError, Result};
use serde::Serialize;
use serde_json::Value;

/// Kind of value an input carries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    String { multiline: bool },
    /// Integer within an inclusive range.
    Int { min: i64, max: i64 },
    /// One of a fixed set of strings.
    Choice { options: Vec<&'static str> },
}

/// A single named input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputField {
    pub name: &'static str,
    #[serde(flatten)]
    pub kind: FieldKind,
    pub required: bool,
    pub default: Value,
}

impl InputField {
    /// Required single-line text input.
    pub fn text(name: &'static str, default: &str) -> Self {
        Self {
            name,
            kind: FieldKind::String { multiline: false },
            required: true,
            default: Value::from(default),
        }
    }

    /// Required multi-line text input.
    pub fn multiline(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String { multiline: true },
            required: true,
            default: Value::from(""),
        }
    }

    /// Required bounded integer input.
    pub fn int(name: &'static str, default: i64, min: i64, max: i64) -> Self {
        Self {
            name,
            kind: FieldKind::Int { min, max },
            required: true,
            default: Value::from(default),
        }
    }

    /// Required choice input.
    pub fn choice(name: &'static str, options: Vec<&'static str>, default: &str) -> Self {
        Self {
            name,
            kind: FieldKind::Choice { options },
            required: true,
            default: Value::from(default),
        }
    }

    /// Mark this input optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// Ordered inputs of one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputSchema {
    pub fields: Vec<InputField>,
}

impl InputSchema {
    pub fn new(fields: Vec<InputField>) -> Self {
        Self { fields }
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&InputField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Merge string-valued `pairs` into `inputs`, typed by this schema.
    ///
    /// Integer fields are parsed; everything else stays a string. Range and
    /// choice checks are left to the node so its own error reporting applies.
    pub fn merge_strings<I>(&self, inputs: &mut Inputs, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, raw) in pairs {
            let field = self.field(&name).ok_or_else(|| {
                NodeError::UserError(format!(
                    "unknown input '{}'. Valid inputs: {}",
                    name,
                    self.names().join(", ")
                ))
            })?;

            let value = match field.kind {
                FieldKind::Int { .. } => {
                    let parsed: i64 = raw.trim().parse().map_err(|_| {
                        NodeError::UserError(format!(
                            "input '{}' expects an integer, got '{}'",
                            name, raw
                        ))
                    })?;
                    Value::from(parsed)
                }
                _ => Value::from(raw),
            };
            inputs.insert(name, value);
        }
        Ok(())
    }

    /// Reject inputs the schema does not declare.
    pub fn check_known(&self, inputs: &Inputs) -> Result<()> {
        match inputs.keys().find(|k| self.field(k).is_none()) {
            Some(unknown) => Err(NodeError::UserError(format!(
                "unknown input '{}'. Valid inputs: {}",
                unknown,
                self.names().join(", ")
            ))),
            None => Ok(()),
        }
    }

    fn names(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }
}
