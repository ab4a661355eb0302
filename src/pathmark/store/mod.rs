//! # Storage Layer
//!
//! [`HierarchicalStore`] is the single owner of every node and item record. It
//! keeps two flat id-keyed maps and expresses the tree purely through ids:
//!
//! ```text
//! nodes: { "root": Node { parent: null, sub_nodes: [a, b], items: [] },
//!          "a":    Node { parent: root, sub_nodes: [],     items: [i1] }, ... }
//! items: { "i1":   Item { parent: a, path: "/tmp/r.pdf", ... }, ... }
//! ```
//!
//! ## Invariants
//!
//! After every successful operation:
//!
//! 1. The root (`"root"`) exists and has no parent.
//! 2. Every non-root node's parent exists and lists the node exactly once.
//! 3. Every listed child names the listing node as its parent.
//! 4. Every item's owner exists and lists the item exactly once.
//! 5. No node is its own ancestor.
//!
//! Every operation validates before it mutates, so a failed call leaves the
//! store exactly as it was.
//!
//! ## Corruption
//!
//! Documents come from disk and may have been edited by hand or written by an
//! older build. [`HierarchicalStore::load`] only checks the document shape; the
//! cross-references are checked by [`HierarchicalStore::check_integrity`] and
//! fixed by [`HierarchicalStore::repair`] (see [`integrity`]).
//!
//! ## Persistence
//!
//! The store turns itself into bytes and back; where those bytes live is the
//! job of a [`backend::DocumentBackend`]:
//!
//! - [`fs_backend::FsBackend`]: atomic file writes (temp file + rename).
//! - [`mem_backend::MemBackend`]: for tests.
//!
//! The store never logs. Anything worth reporting is returned as data.

use crate::error::{PathmarkError, Result};
use crate::model::{generate_id, Item, Node, ROOT_ID};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

pub mod backend;
pub mod fs_backend;
pub mod integrity;
mod items;
pub mod mem_backend;
mod nodes;
pub(crate) mod ordering;

pub use integrity::{DetachReason, IntegrityViolation, RepairAction, RepairReport};

/// Indent width used by [`HierarchicalStore::save`].
pub const DEFAULT_INDENT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchicalStore {
    pub(crate) nodes: HashMap<String, Node>,
    pub(crate) items: HashMap<String, Item>,
}

impl Default for HierarchicalStore {
    fn default() -> Self {
        Self::new_empty()
    }
}

impl HierarchicalStore {
    /// A store holding only the root node.
    pub fn new_empty() -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(ROOT_ID.to_string(), Node::root());
        Self {
            nodes,
            items: HashMap::new(),
        }
    }

    /// Parses a persisted document.
    ///
    /// Only the shape is checked here (both top-level maps present, required
    /// record fields present). Cross-references are left to
    /// [`check_integrity`](Self::check_integrity).
    pub fn load(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| PathmarkError::MalformedDocument(e.to_string()))
    }

    /// Serializes the whole store with the default indent.
    pub fn save(&self) -> Result<Vec<u8>> {
        self.save_with_indent(DEFAULT_INDENT)
    }

    /// Serializes the whole store. An indent of zero writes compact JSON.
    pub fn save_with_indent(&self, indent: usize) -> Result<Vec<u8>> {
        if indent == 0 {
            return Ok(serde_json::to_vec(self)?);
        }
        let indent = vec![b' '; indent];
        let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(out)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(ROOT_ID)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn item(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn contains_item(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (&str, &Node)> {
        self.nodes.iter().map(|(id, node)| (id.as_str(), node))
    }

    pub fn items(&self) -> impl Iterator<Item = (&str, &Item)> {
        self.items.iter().map(|(id, item)| (id.as_str(), item))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// A node id not currently in use. Does not reserve it.
    pub fn generate_node_id(&self) -> String {
        generate_id(|candidate| self.nodes.contains_key(candidate))
    }

    /// An item id not currently in use. Does not reserve it.
    pub fn generate_item_id(&self) -> String {
        generate_id(|candidate| self.items.contains_key(candidate))
    }

    /// Ids of every node below `id`, parents before children, in display order.
    ///
    /// Follows child lists and stops at ids already visited, so a corrupt
    /// document with a child-list loop still terminates.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(id);
        let mut stack: Vec<&str> = match self.nodes.get(id) {
            Some(node) => node.child_node_ids.iter().rev().map(String::as_str).collect(),
            None => return out,
        };
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push(current.to_string());
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.child_node_ids.iter().rev().map(String::as_str));
            }
        }
        out
    }

    /// True when `candidate` is `ancestor` or sits somewhere below it,
    /// judged by walking `parent_id` links upward from `candidate`.
    pub fn is_same_or_descendant(&self, candidate: &str, ancestor: &str) -> bool {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut current = candidate;
        loop {
            if current == ancestor {
                return true;
            }
            if !seen.insert(current) {
                return false;
            }
            match self.nodes.get(current).and_then(|n| n.parent_id.as_deref()) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    pub(crate) fn require_node(&self, id: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| PathmarkError::NodeNotFound(id.to_string()))
    }

    pub(crate) fn require_item(&self, id: &str) -> Result<&Item> {
        self.items
            .get(id)
            .ok_or_else(|| PathmarkError::ItemNotFound(id.to_string()))
    }

    pub(crate) fn require_parent(&self, id: &str) -> Result<&Node> {
        self.nodes
            .get(id)
            .ok_or_else(|| PathmarkError::ParentNotFound(id.to_string()))
    }
}
