use crate::commands::helpers::{item_view, node_path, parse_assignments, resolve_item, resolve_node};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ItemRecord;
use crate::store::HierarchicalStore;
use std::path::Path;

fn label(store: &HierarchicalStore, id: &str) -> String {
    store
        .item(id)
        .and_then(|i| i.name().or(i.path()))
        .unwrap_or(id)
        .to_string()
}

pub fn add(store: &mut HierarchicalStore, node: &str, record: ItemRecord) -> Result<CmdResult> {
    let node_id = resolve_node(store, node)?;
    let id = store.add_item(record, &node_id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added '{}' to '{}'",
        label(store, &id),
        node_path(store, &node_id)
    )));
    let view = item_view(store, &id).into_iter().collect();
    Ok(result.with_created_ids(vec![id]).with_items(view))
}

/// Name shown for a dropped path: its last component, or the whole text.
pub fn name_for_path(path: &str) -> String {
    let trimmed = path.trim_end_matches(['/', '\\']);
    let last = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    if last.is_empty() {
        return path.to_string();
    }
    Path::new(last)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| last.to_string())
}

/// Adds one item per path, named after the path's last component.
pub fn add_paths<S: AsRef<str>>(
    store: &mut HierarchicalStore,
    node: &str,
    paths: &[S],
) -> Result<CmdResult> {
    let node_id = resolve_node(store, node)?;

    let mut created = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let record = ItemRecord::new(name_for_path(path)).with_path(path);
        created.push(store.add_item(record, &node_id)?);
    }

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Added {} item(s) to '{}'",
        created.len(),
        node_path(store, &node_id)
    )));
    let views = created.iter().filter_map(|id| item_view(store, id)).collect();
    Ok(result.with_created_ids(created).with_items(views))
}

/// Applies `key=value` assignments; an empty value clears the field.
pub fn update<S: AsRef<str>>(
    store: &mut HierarchicalStore,
    selector: &str,
    assignments: &[S],
) -> Result<CmdResult> {
    let fields = parse_assignments(assignments)?;
    let id = resolve_item(store, selector)?;
    store.update_item_fields(&id, fields)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Updated '{}'", label(store, &id))));
    let view = item_view(store, &id).into_iter().collect();
    Ok(result.with_items(view))
}

pub fn remove(store: &mut HierarchicalStore, selector: &str) -> Result<CmdResult> {
    let id = resolve_item(store, selector)?;
    let name = label(store, &id);
    store.remove_item(&id)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Removed '{}'", name)));
    Ok(result)
}

pub fn reorder(store: &mut HierarchicalStore, selector: &str, index: isize) -> Result<CmdResult> {
    let id = resolve_item(store, selector)?;
    store.move_item_within_node(&id, index)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved '{}' to position {}",
        label(store, &id),
        index
    )));
    Ok(result)
}

pub fn move_to(
    store: &mut HierarchicalStore,
    selector: &str,
    node: &str,
    index: Option<isize>,
) -> Result<CmdResult> {
    let id = resolve_item(store, selector)?;
    let node_id = resolve_node(store, node)?;
    store.move_item_to_node(&id, &node_id, index)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Moved '{}' to '{}'",
        label(store, &id),
        node_path(store, &node_id)
    )));
    Ok(result)
}

pub fn show(store: &HierarchicalStore, selector: &str) -> Result<CmdResult> {
    let id = resolve_item(store, selector)?;
    store.require_item(&id)?;
    Ok(CmdResult::default().with_items(item_view(store, &id).into_iter().collect()))
}
