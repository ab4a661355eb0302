use crate::commands::helpers::item_view;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PathmarkError, Result};
use crate::model::{Item, ROOT_ID};
use crate::store::HierarchicalStore;

fn matches(item: &Item, term: &str) -> bool {
    [item.name(), item.path(), item.comment()]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(term))
}

/// Case-insensitive substring search over item names, paths and comments.
///
/// Results follow tree order: the root's items, then each node's in pre-order.
pub fn run(store: &HierarchicalStore, term: &str) -> Result<CmdResult> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return Err(PathmarkError::Api("Search term cannot be empty".to_string()));
    }

    let mut order = vec![ROOT_ID.to_string()];
    order.extend(store.descendants(ROOT_ID));

    let found: Vec<_> = order
        .iter()
        .filter_map(|id| store.node(id))
        .flat_map(|node| node.item_ids().iter())
        .filter(|id| store.item(id).is_some_and(|item| matches(item, &term)))
        .filter_map(|id| item_view(store, id))
        .collect();

    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!("No items match '{}'", term)));
    }
    Ok(result.with_items(found))
}
