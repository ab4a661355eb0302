//! # Integrity Check and Repair
//!
//! A loaded document may contradict itself: a node listed under a parent it
//! does not name, a parent that no longer exists, an item owned by a node that
//! does not list it. This module finds and fixes such damage.
//!
//! ## Ground Truth
//!
//! A record's own `parent_id` is authoritative. Child lists and item lists are
//! secondary indices and are rewritten to agree with it.
//!
//! ## Repair Steps
//!
//! [`HierarchicalStore::repair`] clones the store once and makes every
//! decision against that snapshot, never against partially repaired state:
//!
//! 0. **Root**: restore a missing root record; clear a parent set on the root.
//!    A root naming itself as parent is the accepted sentinel and stays.
//! 1. **Stray children**: drop ids from a child list when the child is missing,
//!    names another parent, is listed a second time, or is the root.
//! 2. **Detached nodes**: delete every node whose ancestor chain does not reach
//!    the root. That is a missing parent, a non-root node with no parent, a
//!    parent cycle, or any node hanging below one of those.
//! 3. **Unlisted children**: append a surviving node to its parent's child list
//!    when the parent does not list it.
//! 4. **Stray items**: drop ids from an item list when the item is missing,
//!    names another owner, or is listed a second time.
//! 5. **Orphan items**: delete items whose owner is missing or was deleted in step 2.
//! 6. **Unlisted items**: append a surviving item to its owner's item list.
//!
//! Every change is recorded as a [`RepairAction`]; running repair on a
//! repaired store records nothing.

use super::HierarchicalStore;
use crate::model::{Node, ROOT_ID};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// The first problem found by [`HierarchicalStore::find_violation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    MissingRoot,
    RootHasParent { parent: String },
    MissingChild { parent: String, child: String },
    ChildParentMismatch { parent: String, child: String },
    DuplicateChild { parent: String, child: String },
    NoParent { node: String },
    MissingParent { node: String, parent: String },
    UnlistedChild { parent: String, child: String },
    Cycle { node: String },
    MissingItem { node: String, item: String },
    ItemOwnerMismatch { node: String, item: String },
    DuplicateItem { node: String, item: String },
    MissingItemOwner { item: String, parent: String },
    UnlistedItem { node: String, item: String },
}

impl fmt::Display for IntegrityViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRoot => write!(f, "root node is missing"),
            Self::RootHasParent { parent } => write!(f, "root node names parent {parent}"),
            Self::MissingChild { parent, child } => {
                write!(f, "node {parent} lists missing child {child}")
            }
            Self::ChildParentMismatch { parent, child } => {
                write!(f, "node {parent} lists child {child}, which names another parent")
            }
            Self::DuplicateChild { parent, child } => {
                write!(f, "node {parent} lists child {child} more than once")
            }
            Self::NoParent { node } => write!(f, "node {node} has no parent"),
            Self::MissingParent { node, parent } => {
                write!(f, "node {node} names missing parent {parent}")
            }
            Self::UnlistedChild { parent, child } => {
                write!(f, "node {child} is not listed by its parent {parent}")
            }
            Self::Cycle { node } => write!(f, "node {node} is its own ancestor"),
            Self::MissingItem { node, item } => {
                write!(f, "node {node} lists missing item {item}")
            }
            Self::ItemOwnerMismatch { node, item } => {
                write!(f, "node {node} lists item {item}, which names another owner")
            }
            Self::DuplicateItem { node, item } => {
                write!(f, "node {node} lists item {item} more than once")
            }
            Self::MissingItemOwner { item, parent } => {
                write!(f, "item {item} names missing node {parent}")
            }
            Self::UnlistedItem { node, item } => {
                write!(f, "item {item} is not listed by its node {node}")
            }
        }
    }
}

/// Why a node was cut out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetachReason {
    MissingParent(String),
    NoParent,
    Cycle,
    BelowDetached(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairAction {
    RootRestored,
    RootParentCleared { parent: String },
    StrayChildRemoved { parent: String, child: String },
    NodeRemoved { node: String, reason: DetachReason },
    ChildReattached { parent: String, child: String },
    StrayItemRemoved { node: String, item: String },
    ItemRemoved { item: String, parent: String },
    ItemReattached { node: String, item: String },
}

impl fmt::Display for RepairAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootRestored => write!(f, "restored missing root node"),
            Self::RootParentCleared { parent } => {
                write!(f, "cleared parent {parent} from root node")
            }
            Self::StrayChildRemoved { parent, child } => {
                write!(f, "removed stray child {child} from node {parent}")
            }
            Self::NodeRemoved { node, reason } => match reason {
                DetachReason::MissingParent(parent) => {
                    write!(f, "removed node {node}: parent {parent} does not exist")
                }
                DetachReason::NoParent => write!(f, "removed node {node}: it has no parent"),
                DetachReason::Cycle => write!(f, "removed node {node}: it is its own ancestor"),
                DetachReason::BelowDetached(ancestor) => {
                    write!(f, "removed node {node}: it hangs below removed node {ancestor}")
                }
            },
            Self::ChildReattached { parent, child } => {
                write!(f, "reattached node {child} to parent {parent}")
            }
            Self::StrayItemRemoved { node, item } => {
                write!(f, "removed stray item {item} from node {node}")
            }
            Self::ItemRemoved { item, parent } => {
                write!(f, "removed item {item}: node {parent} does not exist")
            }
            Self::ItemReattached { node, item } => {
                write!(f, "reattached item {item} to node {node}")
            }
        }
    }
}

/// The corrective log of one [`HierarchicalStore::repair`] pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub actions: Vec<RepairAction>,
}

impl RepairReport {
    pub fn is_clean(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn nodes_removed(&self) -> usize {
        self.count(|a| matches!(a, RepairAction::NodeRemoved { .. }))
    }

    pub fn items_removed(&self) -> usize {
        self.count(|a| matches!(a, RepairAction::ItemRemoved { .. }))
    }

    /// One human-readable line per action.
    pub fn lines(&self) -> Vec<String> {
        self.actions.iter().map(ToString::to_string).collect()
    }

    fn count(&self, pred: impl Fn(&RepairAction) -> bool) -> usize {
        self.actions.iter().filter(|a| pred(a)).count()
    }

    fn push(&mut self, action: RepairAction) {
        self.actions.push(action);
    }
}

impl fmt::Display for RepairReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl HierarchicalStore {
    /// True when no node or item contradicts another.
    pub fn check_integrity(&self) -> bool {
        self.find_violation().is_none()
    }

    /// The first violation found, scanning nodes and then items in id order.
    pub fn find_violation(&self) -> Option<IntegrityViolation> {
        let Some(root) = self.nodes.get(ROOT_ID) else {
            return Some(IntegrityViolation::MissingRoot);
        };
        if let Some(parent) = root_parent(root) {
            return Some(IntegrityViolation::RootHasParent {
                parent: parent.clone(),
            });
        }

        for (id, node) in sorted(&self.nodes) {
            if let Some(v) = self.node_violation(id, node) {
                return Some(v);
            }
        }
        for (id, _) in sorted(&self.nodes) {
            if id != ROOT_ID && self.detach_reason(id).is_some() {
                return Some(IntegrityViolation::Cycle { node: id.clone() });
            }
        }
        for (id, node) in sorted(&self.nodes) {
            if let Some(v) = self.item_list_violation(id, node) {
                return Some(v);
            }
        }
        for (id, item) in sorted(&self.items) {
            let parent = &item.parent_id;
            match self.nodes.get(parent) {
                None => {
                    return Some(IntegrityViolation::MissingItemOwner {
                        item: id.clone(),
                        parent: parent.clone(),
                    })
                }
                Some(owner) if !owner.item_ids.contains(id) => {
                    return Some(IntegrityViolation::UnlistedItem {
                        node: parent.clone(),
                        item: id.clone(),
                    })
                }
                Some(_) => {}
            }
        }
        None
    }

    fn node_violation(&self, id: &String, node: &Node) -> Option<IntegrityViolation> {
        if id != ROOT_ID {
            let Some(parent_id) = &node.parent_id else {
                return Some(IntegrityViolation::NoParent { node: id.clone() });
            };
            let Some(parent) = self.nodes.get(parent_id) else {
                return Some(IntegrityViolation::MissingParent {
                    node: id.clone(),
                    parent: parent_id.clone(),
                });
            };
            if !parent.child_node_ids.contains(id) {
                return Some(IntegrityViolation::UnlistedChild {
                    parent: parent_id.clone(),
                    child: id.clone(),
                });
            }
        }

        let mut seen = HashSet::new();
        for child in &node.child_node_ids {
            let parent = id.clone();
            let child_id = child.clone();
            match self.nodes.get(child) {
                None => return Some(IntegrityViolation::MissingChild { parent, child: child_id }),
                Some(c) if child == ROOT_ID || c.parent_id.as_ref() != Some(id) => {
                    return Some(IntegrityViolation::ChildParentMismatch { parent, child: child_id })
                }
                Some(_) if !seen.insert(child) => {
                    return Some(IntegrityViolation::DuplicateChild { parent, child: child_id })
                }
                Some(_) => {}
            }
        }
        None
    }

    fn item_list_violation(&self, id: &String, node: &Node) -> Option<IntegrityViolation> {
        let mut seen = HashSet::new();
        for item_id in &node.item_ids {
            let node_id = id.clone();
            let item = item_id.clone();
            match self.items.get(item_id) {
                None => return Some(IntegrityViolation::MissingItem { node: node_id, item }),
                Some(i) if &i.parent_id != id => {
                    return Some(IntegrityViolation::ItemOwnerMismatch { node: node_id, item })
                }
                Some(_) if !seen.insert(item_id) => {
                    return Some(IntegrityViolation::DuplicateItem { node: node_id, item })
                }
                Some(_) => {}
            }
        }
        None
    }

    /// Why `id` cannot reach the root by following parent links, if it cannot.
    ///
    /// A missing root record still counts as the root here, so top-level
    /// nodes survive a lost root and get reattached to a restored one.
    fn detach_reason(&self, id: &str) -> Option<DetachReason> {
        let mut seen = HashSet::new();
        let mut current = id;
        loop {
            if current == ROOT_ID {
                return None;
            }
            if !seen.insert(current) {
                return Some(if current == id {
                    DetachReason::Cycle
                } else {
                    DetachReason::BelowDetached(current.to_string())
                });
            }
            let node = self.nodes.get(current)?;
            let reason = match node.parent_id.as_deref() {
                None => DetachReason::NoParent,
                Some(p) if p != ROOT_ID && !self.nodes.contains_key(p) => {
                    DetachReason::MissingParent(p.to_string())
                }
                Some(p) => {
                    current = p;
                    continue;
                }
            };
            return Some(if current == id {
                reason
            } else {
                DetachReason::BelowDetached(current.to_string())
            });
        }
    }

    /// Best-effort, lossy repair. See the module docs for the steps.
    pub fn repair(&mut self) -> RepairReport {
        let snapshot = self.clone();
        let mut report = RepairReport::default();

        // 0. Root
        match snapshot.nodes.get(ROOT_ID) {
            None => {
                self.nodes.insert(ROOT_ID.to_string(), Node::root());
                report.push(RepairAction::RootRestored);
            }
            Some(root) => {
                if let Some(parent) = root_parent(root) {
                    if let Some(live) = self.nodes.get_mut(ROOT_ID) {
                        live.parent_id = None;
                    }
                    report.push(RepairAction::RootParentCleared {
                        parent: parent.clone(),
                    });
                }
            }
        }

        let node_ids: Vec<&String> = sorted(&snapshot.nodes).map(|(id, _)| id).collect();

        // 1. Stray children
        for &id in &node_ids {
            let listed = &snapshot.nodes[id].child_node_ids;
            let mut seen = HashSet::new();
            let mut kept = Vec::with_capacity(listed.len());
            for child in listed {
                let claims_us = child != ROOT_ID
                    && snapshot
                        .nodes
                        .get(child)
                        .is_some_and(|c| c.parent_id.as_ref() == Some(id));
                if claims_us && seen.insert(child) {
                    kept.push(child.clone());
                } else {
                    report.push(RepairAction::StrayChildRemoved {
                        parent: id.clone(),
                        child: child.clone(),
                    });
                }
            }
            if kept.len() != listed.len() {
                if let Some(live) = self.nodes.get_mut(id) {
                    live.child_node_ids = kept;
                }
            }
        }

        // 2. Detached nodes
        let detached: BTreeMap<&String, DetachReason> = node_ids
            .iter()
            .filter(|id| id.as_str() != ROOT_ID)
            .filter_map(|&id| snapshot.detach_reason(id).map(|reason| (id, reason)))
            .collect();
        for (&id, reason) in &detached {
            self.nodes.remove(id);
            report.push(RepairAction::NodeRemoved {
                node: id.clone(),
                reason: reason.clone(),
            });
        }
        let survives = |id: &str| {
            id == ROOT_ID || (snapshot.nodes.contains_key(id) && !detached.contains_key(&id.to_string()))
        };

        // 3. Unlisted children
        for &id in &node_ids {
            if id == ROOT_ID || detached.contains_key(id) {
                continue;
            }
            let Some(parent_id) = snapshot.nodes[id].parent_id.as_ref() else {
                continue;
            };
            let listed = snapshot
                .nodes
                .get(parent_id)
                .is_some_and(|p| p.child_node_ids.contains(id));
            if !listed {
                if let Some(live) = self.nodes.get_mut(parent_id) {
                    live.child_node_ids.push(id.clone());
                }
                report.push(RepairAction::ChildReattached {
                    parent: parent_id.clone(),
                    child: id.clone(),
                });
            }
        }

        // 4. Stray items
        for &id in &node_ids {
            if !survives(id.as_str()) {
                continue;
            }
            let listed = &snapshot.nodes[id].item_ids;
            let mut seen = HashSet::new();
            let mut kept = Vec::with_capacity(listed.len());
            for item_id in listed {
                let owned_by_us = snapshot
                    .items
                    .get(item_id)
                    .is_some_and(|i| &i.parent_id == id);
                if owned_by_us && seen.insert(item_id) {
                    kept.push(item_id.clone());
                } else {
                    report.push(RepairAction::StrayItemRemoved {
                        node: id.clone(),
                        item: item_id.clone(),
                    });
                }
            }
            if kept.len() != listed.len() {
                if let Some(live) = self.nodes.get_mut(id) {
                    live.item_ids = kept;
                }
            }
        }

        // 5. Orphan items, 6. Unlisted items
        for (item_id, item) in sorted(&snapshot.items) {
            let owner = &item.parent_id;
            if !survives(owner.as_str()) {
                self.items.remove(item_id);
                report.push(RepairAction::ItemRemoved {
                    item: item_id.clone(),
                    parent: owner.clone(),
                });
                continue;
            }
            let listed = snapshot
                .nodes
                .get(owner)
                .is_some_and(|n| n.item_ids.contains(item_id));
            if !listed {
                if let Some(live) = self.nodes.get_mut(owner) {
                    live.item_ids.push(item_id.clone());
                }
                report.push(RepairAction::ItemReattached {
                    node: owner.clone(),
                    item: item_id.clone(),
                });
            }
        }

        report
    }
}

/// The root's parent, unless it is unset or the root's own id.
fn root_parent(root: &Node) -> Option<&String> {
    root.parent_id.as_ref().filter(|p| p.as_str() != ROOT_ID)
}

fn sorted<V>(map: &std::collections::HashMap<String, V>) -> impl Iterator<Item = (&String, &V)> {
    let mut entries: Vec<(&String, &V)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries.into_iter()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Item, ItemRecord};

    fn node(parent: Option<&str>, children: &[&str], items: &[&str]) -> Node {
        Node {
            name: Some("n".to_string()),
            parent_id: parent.map(str::to_string),
            child_node_ids: children.iter().map(|s| s.to_string()).collect(),
            item_ids: items.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn item(parent: &str) -> Item {
        Item {
            name: Some("i".to_string()),
            path: None,
            comment: None,
            parent_id: parent.to_string(),
        }
    }

    fn build(nodes: Vec<(&str, Node)>, items: Vec<(&str, Item)>) -> HierarchicalStore {
        HierarchicalStore {
            nodes: nodes.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
            items: items.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    fn assert_repaired(store: &mut HierarchicalStore) {
        assert!(store.check_integrity(), "violation: {:?}", store.find_violation());
        assert!(store.repair().is_clean());
    }

    #[test]
    fn healthy_store_passes_and_repairs_nothing() {
        let mut store = HierarchicalStore::new_empty();
        let a = store.add_node("A", ROOT_ID).unwrap();
        store.add_node("B", &a).unwrap();
        store.add_item(ItemRecord::new("x"), &a).unwrap();
        assert!(store.check_integrity());
        let before = store.clone();
        assert!(store.repair().is_clean());
        assert_eq!(store, before);
    }

    #[test]
    fn stray_child_is_dropped_from_list() {
        // X lists Y, but Y names Z as its parent.
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &["x", "z"], &[])),
                ("x", node(Some(ROOT_ID), &["y"], &[])),
                ("z", node(Some(ROOT_ID), &["y"], &[])),
                ("y", node(Some("z"), &[], &[])),
            ],
            vec![],
        );
        assert_eq!(
            store.find_violation(),
            Some(IntegrityViolation::ChildParentMismatch {
                parent: "x".into(),
                child: "y".into()
            })
        );

        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![RepairAction::StrayChildRemoved {
                parent: "x".into(),
                child: "y".into()
            }]
        );
        assert!(store.node("x").unwrap().child_node_ids().is_empty());
        assert_eq!(store.node("z").unwrap().child_node_ids(), ["y".to_string()]);
        assert_repaired(&mut store);
    }

    #[test]
    fn missing_parent_excises_whole_subtree() {
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &[], &[])),
                ("a", node(Some("gone"), &["b"], &["ia"])),
                ("b", node(Some("a"), &[], &["ib"])),
            ],
            vec![("ia", item("a")), ("ib", item("b"))],
        );
        assert_eq!(
            store.find_violation(),
            Some(IntegrityViolation::MissingParent {
                node: "a".into(),
                parent: "gone".into()
            })
        );

        let report = store.repair();
        assert_eq!(report.nodes_removed(), 2);
        assert_eq!(report.items_removed(), 2);
        assert!(report.actions.contains(&RepairAction::NodeRemoved {
            node: "b".into(),
            reason: DetachReason::BelowDetached("a".into()),
        }));
        assert_eq!(store.node_count(), 1);
        assert_eq!(store.item_count(), 0);
        assert_repaired(&mut store);
    }

    #[test]
    fn unlisted_child_is_reattached() {
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &["a"], &[])),
                ("a", node(Some(ROOT_ID), &[], &[])),
                ("b", node(Some(ROOT_ID), &[], &[])),
            ],
            vec![],
        );
        assert_eq!(
            store.find_violation(),
            Some(IntegrityViolation::UnlistedChild {
                parent: ROOT_ID.into(),
                child: "b".into()
            })
        );
        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![RepairAction::ChildReattached {
                parent: ROOT_ID.into(),
                child: "b".into()
            }]
        );
        assert_eq!(
            store.root().unwrap().child_node_ids(),
            ["a".to_string(), "b".to_string()]
        );
        assert_repaired(&mut store);
    }

    #[test]
    fn stray_removal_then_reattachment_moves_listing() {
        // Y sits in X's list but names Z, and Z does not list it.
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &["x", "z"], &[])),
                ("x", node(Some(ROOT_ID), &["y"], &[])),
                ("z", node(Some(ROOT_ID), &[], &[])),
                ("y", node(Some("z"), &[], &[])),
            ],
            vec![],
        );
        let report = store.repair();
        assert_eq!(report.len(), 2);
        assert!(store.node("x").unwrap().child_node_ids().is_empty());
        assert_eq!(store.node("z").unwrap().child_node_ids(), ["y".to_string()]);
        assert_repaired(&mut store);
    }

    #[test]
    fn cycles_are_detected_and_removed() {
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &[], &[])),
                ("a", node(Some("b"), &["b"], &[])),
                ("b", node(Some("a"), &["a", "c"], &[])),
                ("c", node(Some("b"), &[], &["ic"])),
            ],
            vec![("ic", item("c"))],
        );
        assert!(matches!(
            store.find_violation(),
            Some(IntegrityViolation::Cycle { .. })
        ));
        let report = store.repair();
        assert_eq!(report.nodes_removed(), 3);
        assert!(report.actions.contains(&RepairAction::NodeRemoved {
            node: "a".into(),
            reason: DetachReason::Cycle,
        }));
        assert!(report.actions.contains(&RepairAction::NodeRemoved {
            node: "c".into(),
            reason: DetachReason::BelowDetached("b".into()),
        }));
        assert_repaired(&mut store);
    }

    #[test]
    fn missing_root_is_restored_and_children_kept() {
        let mut store = build(
            vec![("a", node(Some(ROOT_ID), &[], &[]))],
            vec![("ir", item(ROOT_ID))],
        );
        assert_eq!(store.find_violation(), Some(IntegrityViolation::MissingRoot));
        let report = store.repair();
        assert_eq!(report.actions[0], RepairAction::RootRestored);
        assert!(store.contains_node("a"));
        assert_eq!(store.root().unwrap().child_node_ids(), ["a".to_string()]);
        assert_eq!(store.root().unwrap().item_ids(), ["ir".to_string()]);
        assert_repaired(&mut store);
    }

    #[test]
    fn root_parent_is_cleared() {
        let mut store = build(vec![(ROOT_ID, node(Some("x"), &[], &[]))], vec![]);
        assert!(!store.check_integrity());
        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![RepairAction::RootParentCleared { parent: "x".into() }]
        );
        assert_repaired(&mut store);
    }

    #[test]
    fn root_naming_itself_as_parent_is_accepted() {
        let mut store = build(
            vec![
                (ROOT_ID, node(Some(ROOT_ID), &["a"], &[])),
                ("a", node(Some(ROOT_ID), &[], &[])),
            ],
            vec![],
        );
        assert!(store.check_integrity());
        assert!(store.repair().is_clean());
        assert_eq!(store.root().unwrap().parent_id(), Some(ROOT_ID));
    }

    #[test]
    fn root_listing_itself_is_dropped() {
        let mut store = build(vec![(ROOT_ID, node(Some(ROOT_ID), &[ROOT_ID], &[]))], vec![]);
        assert_eq!(
            store.find_violation(),
            Some(IntegrityViolation::ChildParentMismatch {
                parent: ROOT_ID.into(),
                child: ROOT_ID.into(),
            })
        );
        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![RepairAction::StrayChildRemoved {
                parent: ROOT_ID.into(),
                child: ROOT_ID.into(),
            }]
        );
        assert!(store.root().unwrap().child_node_ids().is_empty());
        assert_repaired(&mut store);
    }

    #[test]
    fn root_listed_under_its_own_child_is_fixed_in_one_pass() {
        let mut store = build(
            vec![
                (ROOT_ID, node(Some("a"), &["a"], &[])),
                ("a", node(Some(ROOT_ID), &[ROOT_ID], &[])),
            ],
            vec![],
        );
        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![
                RepairAction::RootParentCleared { parent: "a".into() },
                RepairAction::StrayChildRemoved {
                    parent: "a".into(),
                    child: ROOT_ID.into(),
                },
            ]
        );
        assert_eq!(store.root().unwrap().child_node_ids(), ["a".to_string()]);
        assert!(store.node("a").unwrap().child_node_ids().is_empty());
        assert_repaired(&mut store);
    }

    #[test]
    fn duplicate_listings_keep_first() {
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &["a", "a"], &["i", "i"])),
                ("a", node(Some(ROOT_ID), &[], &[])),
            ],
            vec![("i", item(ROOT_ID))],
        );
        assert!(matches!(
            store.find_violation(),
            Some(IntegrityViolation::DuplicateChild { .. })
        ));
        let report = store.repair();
        assert_eq!(report.len(), 2);
        assert_eq!(store.root().unwrap().child_node_ids(), ["a".to_string()]);
        assert_eq!(store.root().unwrap().item_ids(), ["i".to_string()]);
        assert_repaired(&mut store);
    }

    #[test]
    fn item_damage_is_repaired() {
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &["a"], &["ghost", "ia"])),
                ("a", node(Some(ROOT_ID), &[], &[])),
            ],
            vec![
                ("ia", item("a")),
                ("io", item("nowhere")),
            ],
        );
        assert_eq!(
            store.find_violation(),
            Some(IntegrityViolation::MissingItem {
                node: ROOT_ID.into(),
                item: "ghost".into()
            })
        );
        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![
                RepairAction::StrayItemRemoved {
                    node: ROOT_ID.into(),
                    item: "ghost".into()
                },
                RepairAction::StrayItemRemoved {
                    node: ROOT_ID.into(),
                    item: "ia".into()
                },
                RepairAction::ItemReattached {
                    node: "a".into(),
                    item: "ia".into()
                },
                RepairAction::ItemRemoved {
                    item: "io".into(),
                    parent: "nowhere".into()
                },
            ]
        );
        assert_eq!(store.node("a").unwrap().item_ids(), ["ia".to_string()]);
        assert!(!store.contains_item("io"));
        assert_repaired(&mut store);
    }

    #[test]
    fn orphan_node_without_parent_is_removed() {
        let mut store = build(
            vec![
                (ROOT_ID, node(None, &[], &[])),
                ("a", node(None, &[], &[])),
            ],
            vec![],
        );
        assert_eq!(
            store.find_violation(),
            Some(IntegrityViolation::NoParent { node: "a".into() })
        );
        let report = store.repair();
        assert_eq!(
            report.actions,
            vec![RepairAction::NodeRemoved {
                node: "a".into(),
                reason: DetachReason::NoParent
            }]
        );
        assert_repaired(&mut store);
    }

    #[test]
    fn report_renders_one_line_per_action() {
        let report = RepairReport {
            actions: vec![
                RepairAction::RootRestored,
                RepairAction::StrayChildRemoved {
                    parent: "x".into(),
                    child: "y".into(),
                },
            ],
        };
        assert_eq!(
            report.lines(),
            vec![
                "restored missing root node".to_string(),
                "removed stray child y from node x".to_string()
            ]
        );
        assert_eq!(report.to_string().lines().count(), 2);
    }
}
