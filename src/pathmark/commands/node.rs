use crate::commands::helpers::{index_or_end, node_path, resolve_node};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PathmarkError, Result};
use crate::store::HierarchicalStore;

fn checked_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PathmarkError::Api("Node name cannot be empty".to_string()));
    }
    Ok(name)
}

pub fn add(store: &mut HierarchicalStore, name: &str, parent: &str) -> Result<CmdResult> {
    let name = checked_name(name)?;
    let parent_id = resolve_node(store, parent)?;
    let id = store.add_node(name, &parent_id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Created node '{}'",
        node_path(store, &id)
    )));
    Ok(result.with_created_ids(vec![id]))
}

pub fn rename(store: &mut HierarchicalStore, selector: &str, new_name: &str) -> Result<CmdResult> {
    let new_name = checked_name(new_name)?;
    let id = resolve_node(store, selector)?;
    let old_path = node_path(store, &id);
    store.rename_node(&id, new_name)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Renamed '{}' to '{}'",
        old_path,
        node_path(store, &id)
    )));
    Ok(result)
}

pub fn remove(store: &mut HierarchicalStore, selector: &str) -> Result<CmdResult> {
    let id = resolve_node(store, selector)?;
    let path = node_path(store, &id);

    let mut subtree = vec![id.clone()];
    subtree.extend(store.descendants(&id));
    let item_count: usize = subtree
        .iter()
        .filter_map(|n| store.node(n))
        .map(|n| n.item_ids().len())
        .sum();

    store.remove_node(&id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Removed node '{}' ({} sub-node(s), {} item(s))",
        path,
        subtree.len() - 1,
        item_count
    )));
    Ok(result)
}

pub fn reorder(store: &mut HierarchicalStore, selector: &str, index: isize) -> Result<CmdResult> {
    let id = resolve_node(store, selector)?;
    store.move_node_same_parent(&id, index)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved '{}' to position {}",
        node_path(store, &id),
        index
    )));
    Ok(result)
}

/// Reparents a node. Without an index it goes to the end of the new parent.
pub fn move_to(
    store: &mut HierarchicalStore,
    selector: &str,
    new_parent: &str,
    index: Option<isize>,
) -> Result<CmdResult> {
    let id = resolve_node(store, selector)?;
    let parent_id = resolve_node(store, new_parent)?;
    store.move_node_new_parent(&id, &parent_id, index_or_end(index))?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved node to '{}'",
        node_path(store, &id)
    )));
    Ok(result)
}
