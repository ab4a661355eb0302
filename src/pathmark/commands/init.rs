use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ROOT_ID;
use crate::store::HierarchicalStore;

pub const DEFAULT_GROUP: &str = "General";
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Files", "Folders", "Programs", "Links"];

/// A fresh store holding the starter categories.
pub fn default_store() -> Result<HierarchicalStore> {
    let mut store = HierarchicalStore::new_empty();
    seed(&mut store)?;
    Ok(store)
}

fn seed(store: &mut HierarchicalStore) -> Result<Vec<String>> {
    let group = store.add_node(DEFAULT_GROUP, ROOT_ID)?;
    let mut created = vec![group.clone()];
    for name in DEFAULT_CATEGORIES {
        created.push(store.add_node(name, &group)?);
    }
    Ok(created)
}

/// Seeds the starter categories unless the root already has children.
pub fn run(store: &mut HierarchicalStore) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if !store.root().map_or(true, |r| r.child_node_ids().is_empty()) {
        result.add_message(CmdMessage::info(
            "Store already has nodes; nothing to initialize.",
        ));
        return Ok(result);
    }

    let created = seed(store)?;
    result.add_message(CmdMessage::success(format!(
        "Created '{}' with {}",
        DEFAULT_GROUP,
        DEFAULT_CATEGORIES.join(", ")
    )));
    Ok(result.with_created_ids(created))
}
