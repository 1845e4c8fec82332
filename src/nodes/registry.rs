//! Immutable node lookup table.
//!
//! The registry is built once, explicitly, from a static list of node kinds
//! filtered by the config toggles. The host reads two mappings from it:
//! node id to implementation, and node id to display name.

use super::code_to_prompt::{self, CodeToPrompt};
use super::scaffold::{self, Scaffold};
use super::Node;
use crate::config::Config;
use crate::error::{NodeError, Result};
use crate::service;
use std::collections::BTreeMap;
use tracing::debug;

/// Every node this crate can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    CodeToPrompt,
    Scaffold,
}

impl NodeKind {
    pub const ALL: [NodeKind; 2] = [NodeKind::CodeToPrompt, NodeKind::Scaffold];

    pub fn id(self) -> &'static str {
        match self {
            NodeKind::CodeToPrompt => code_to_prompt::NODE_ID,
            NodeKind::Scaffold => scaffold::NODE_ID,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::CodeToPrompt => code_to_prompt::DISPLAY_NAME,
            NodeKind::Scaffold => scaffold::DISPLAY_NAME,
        }
    }

    /// Whether `config` asks for this node to be loaded.
    pub fn enabled(self, config: &Config) -> bool {
        match self {
            NodeKind::CodeToPrompt => config.nodes.code_to_prompt,
            NodeKind::Scaffold => config.nodes.scaffold,
        }
    }

    fn build(self, config: &Config) -> Box<dyn Node> {
        match self {
            NodeKind::CodeToPrompt => Box::new(CodeToPrompt::new(config.clone_root.clone())),
            NodeKind::Scaffold => Box::new(Scaffold::new(service::from_config(&config.service))),
        }
    }
}

/// Loaded nodes keyed by id.
pub struct NodeRegistry {
    nodes: BTreeMap<&'static str, Box<dyn Node>>,
    display_names: BTreeMap<&'static str, &'static str>,
}

impl NodeRegistry {
    /// Build the nodes `config` enables.
    pub fn from_config(config: &Config) -> Self {
        let nodes = NodeKind::ALL
            .into_iter()
            .filter(|kind| {
                let enabled = kind.enabled(config);
                if !enabled {
                    debug!(node = kind.id(), "node disabled by config");
                }
                enabled
            })
            .map(|kind| kind.build(config));
        Self::from_nodes(nodes)
    }

    /// Build a registry from already constructed nodes.
    ///
    /// A later node with the same id replaces an earlier one.
    pub fn from_nodes<I>(nodes: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Node>>,
    {
        let mut registry = Self {
            nodes: BTreeMap::new(),
            display_names: BTreeMap::new(),
        };
        for node in nodes {
            registry.display_names.insert(node.id(), node.display_name());
            registry.nodes.insert(node.id(), node);
        }
        registry
    }

    pub fn get(&self, id: &str) -> Option<&dyn Node> {
        self.nodes.get(id).map(|node| node.as_ref())
    }

    /// Like [`get`](Self::get) but an unknown id is a user error.
    pub fn require(&self, id: &str) -> Result<&dyn Node> {
        self.get(id).ok_or_else(|| {
            let known = self.ids().collect::<Vec<_>>();
            NodeError::UserError(if known.is_empty() {
                format!("unknown node '{}'. No nodes are enabled", id)
            } else {
                format!("unknown node '{}'. Available nodes: {}", id, known.join(", "))
            })
        })
    }

    pub fn display_name(&self, id: &str) -> Option<&'static str> {
        self.display_names.get(id).copied()
    }

    /// Registered ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.nodes.keys().copied()
    }

    /// The id to display-name mapping.
    pub fn display_names(&self) -> &BTreeMap<&'static str, &'static str> {
        &self.display_names
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
