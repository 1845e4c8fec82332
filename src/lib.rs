//! Codeprompt: prompt-building nodes for node-graph hosts.
//!
//! The crate provides two nodes behind an explicit, immutable registry:
//!
//! - `Code2Prompt` clones a repository and renders its files into a text
//!   prompt (detailed listing, truncated summary, or architecture overview)
//! - `NXMonorepo` assembles an NX monorepo scaffolding prompt and hands it to
//!   a configured prompt service
//!
//! Hosts build a [`nodes::NodeRegistry`] from a [`config::Config`] and call
//! [`nodes::Node::run`] with named inputs. The `codeprompt` binary is one such
//! host.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod logging;
pub mod nodes;
pub mod prompt;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;
