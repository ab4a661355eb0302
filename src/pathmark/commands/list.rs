use crate::commands::helpers::{display_name, item_view, node_path, resolve_node};
use crate::commands::{CmdMessage, CmdResult, NodeSummary};
use crate::error::Result;
use crate::model::ROOT_ID;
use crate::store::HierarchicalStore;
use std::collections::HashSet;

/// Every node below the root in display order, with its depth.
pub fn tree(store: &HierarchicalStore) -> Result<CmdResult> {
    let mut summaries = Vec::new();
    let mut seen = HashSet::new();
    seen.insert(ROOT_ID.to_string());

    let mut stack: Vec<(String, usize)> = store
        .require_node(ROOT_ID)?
        .child_node_ids()
        .iter()
        .rev()
        .map(|id| (id.clone(), 0))
        .collect();

    while let Some((id, depth)) = stack.pop() {
        if !seen.insert(id.clone()) {
            continue;
        }
        let Some(node) = store.node(&id) else {
            continue;
        };
        summaries.push(NodeSummary {
            id: id.clone(),
            name: display_name(node).to_string(),
            path: node_path(store, &id),
            depth,
            child_count: node.child_node_ids().len(),
            item_count: node.item_ids().len(),
        });
        for child in node.child_node_ids().iter().rev() {
            stack.push((child.clone(), depth + 1));
        }
    }

    let mut result = CmdResult::default();
    if summaries.is_empty() {
        result.add_message(CmdMessage::info(
            "No nodes yet. Create one with: pathmark node add <name>",
        ));
    }
    Ok(result.with_nodes(summaries))
}

/// The items of one node, in order.
pub fn items(store: &HierarchicalStore, node: &str) -> Result<CmdResult> {
    let node_id = resolve_node(store, node)?;
    let views: Vec<_> = store
        .require_node(&node_id)?
        .item_ids()
        .iter()
        .filter_map(|id| item_view(store, id))
        .collect();

    let mut result = CmdResult::default();
    if views.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No items in '{}'",
            node_path(store, &node_id)
        )));
    }
    Ok(result.with_items(views))
}
