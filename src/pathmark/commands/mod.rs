//! # Command Layer
//!
//! Business logic for every user-facing operation. Each command takes a
//! `&HierarchicalStore` or `&mut HierarchicalStore` plus plain Rust arguments
//! and returns a [`CmdResult`]: data to display and [`CmdMessage`]s to print.
//!
//! Commands accept *selectors* rather than raw ids so a front-end can let
//! people type `General/Files` or `General/Files#2`. Resolution lives in
//! [`helpers`].
//!
//! Nothing here prints, prompts or touches the filesystem, with the single
//! exception of [`config`], which reads and writes `config.json`.

use crate::config::PathmarkConfig;
use crate::model::PathKind;
use crate::store::RepairReport;
use serde::Serialize;

pub mod config;
pub mod doctor;
pub mod helpers;
pub mod init;
pub mod item;
pub mod list;
pub mod node;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One line of a tree listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NodeSummary {
    pub id: String,
    pub name: String,
    pub path: String,
    /// 0 for children of the root.
    pub depth: usize,
    pub child_count: usize,
    pub item_count: usize,
}

/// An item as shown to a user, with its owner resolved.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ItemView {
    pub id: String,
    pub name: Option<String>,
    pub path: Option<String>,
    pub comment: Option<String>,
    pub kind: PathKind,
    pub node_id: String,
    pub node_path: String,
    /// 1-based position in the owner's item list.
    pub position: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub created_ids: Vec<String>,
    pub nodes: Vec<NodeSummary>,
    pub items: Vec<ItemView>,
    pub repair: Option<RepairReport>,
    pub config: Option<PathmarkConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_created_ids(mut self, ids: Vec<String>) -> Self {
        self.created_ids = ids;
        self
    }

    pub fn with_nodes(mut self, nodes: Vec<NodeSummary>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_items(mut self, items: Vec<ItemView>) -> Self {
        self.items = items;
        self
    }

    pub fn with_repair(mut self, report: RepairReport) -> Self {
        self.repair = Some(report);
        self
    }

    pub fn with_config(mut self, config: PathmarkConfig) -> Self {
        self.config = Some(config);
        self
    }
}
