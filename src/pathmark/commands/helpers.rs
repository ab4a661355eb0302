use super::ItemView;
use crate::error::{PathmarkError, Result};
use crate::model::{Node, ROOT_ID};
use crate::store::HierarchicalStore;
use std::collections::HashSet;

const UNNAMED: &str = "(unnamed)";

pub fn display_name(node: &Node) -> &str {
    node.name().unwrap_or(UNNAMED)
}

/// Renders a node as the `/`-joined names from the root down, `/` for the root.
pub fn node_path(store: &HierarchicalStore, id: &str) -> String {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    let mut current = id;
    while current != ROOT_ID && seen.insert(current) {
        let Some(node) = store.node(current) else {
            break;
        };
        names.push(display_name(node));
        match node.parent_id() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    if names.is_empty() {
        return "/".to_string();
    }
    names.reverse();
    names.join("/")
}

/// Resolves a node selector to a node id.
///
/// Accepted forms:
/// - `""` or `"/"`: the root
/// - an exact node id
/// - `Name/Sub/Leaf`: names from the root down, first match at each level
pub fn resolve_node(store: &HierarchicalStore, selector: &str) -> Result<String> {
    let selector = selector.trim();
    if selector.is_empty() || selector == "/" {
        return Ok(ROOT_ID.to_string());
    }
    if store.contains_node(selector) {
        return Ok(selector.to_string());
    }

    let mut current = ROOT_ID.to_string();
    for segment in selector.trim_matches('/').split('/') {
        if segment.is_empty() {
            continue;
        }
        let node = store.require_node(&current)?;
        let next = node
            .child_node_ids()
            .iter()
            .find(|child| store.node(child).and_then(Node::name) == Some(segment))
            .ok_or_else(|| PathmarkError::NodeNotFound(selector.to_string()))?;
        current = next.clone();
    }
    Ok(current)
}

/// Resolves an item selector to an item id.
///
/// Accepted forms:
/// - an exact item id
/// - `<node selector>#<n>`: the n-th item (1-based) of that node
pub fn resolve_item(store: &HierarchicalStore, selector: &str) -> Result<String> {
    let selector = selector.trim();
    if store.contains_item(selector) {
        return Ok(selector.to_string());
    }

    let Some((node_sel, position)) = selector.rsplit_once('#') else {
        return Err(PathmarkError::ItemNotFound(selector.to_string()));
    };
    let position: usize = position
        .parse()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| PathmarkError::Api(format!("Invalid item position in '{}'", selector)))?;

    let node_id = resolve_node(store, node_sel)?;
    store
        .require_node(&node_id)?
        .item_ids()
        .get(position - 1)
        .cloned()
        .ok_or_else(|| PathmarkError::ItemNotFound(selector.to_string()))
}

/// Builds the display form of an item, or None if the id does not resolve.
pub fn item_view(store: &HierarchicalStore, id: &str) -> Option<ItemView> {
    let item = store.item(id)?;
    let node_id = item.parent_id().to_string();
    let position = store
        .node(&node_id)
        .and_then(|n| n.item_ids().iter().position(|i| i == id))
        .map(|p| p + 1)
        .unwrap_or(0);
    Some(ItemView {
        id: id.to_string(),
        name: item.name().map(str::to_string),
        path: item.path().map(str::to_string),
        comment: item.comment().map(str::to_string),
        kind: item.kind(),
        node_path: node_path(store, &node_id),
        node_id,
        position,
    })
}

/// Parses `key=value` pairs. An empty value clears the field.
pub fn parse_assignments<S: AsRef<str>>(raw: &[S]) -> Result<Vec<(String, Option<String>)>> {
    raw.iter()
        .map(|pair| {
            let pair = pair.as_ref();
            let (key, value) = pair.split_once('=').ok_or_else(|| {
                PathmarkError::Api(format!("Expected key=value, got '{}'", pair))
            })?;
            let value = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
            Ok((key.trim().to_string(), value))
        })
        .collect()
}

/// Append position used when a caller gives no index.
pub(crate) fn index_or_end(index: Option<isize>) -> isize {
    index.unwrap_or(isize::MAX)
}
