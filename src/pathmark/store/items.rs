use super::ordering::{insert_at, remove_id, reposition};
use super::HierarchicalStore;
use crate::error::{PathmarkError, Result};
use crate::model::{Item, ItemRecord, ItemUpdate};

impl HierarchicalStore {
    /// Creates an item at the end of `parent_id`'s item list and returns its id.
    pub fn add_item(&mut self, record: ItemRecord, parent_id: &str) -> Result<String> {
        self.require_parent(parent_id)?;

        let id = self.generate_item_id();
        self.items.insert(
            id.clone(),
            Item {
                name: Some(record.name),
                path: record.path,
                comment: record.comment,
                parent_id: parent_id.to_string(),
            },
        );
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.item_ids.push(id.clone());
        }
        Ok(id)
    }

    pub fn remove_item(&mut self, item_id: &str) -> Result<()> {
        let owner = self.item_owner(item_id)?;
        self.items.remove(item_id);
        if let Some(node) = self.nodes.get_mut(&owner) {
            remove_id(&mut node.item_ids, item_id);
        }
        Ok(())
    }

    /// Applies every field present in `update` at once.
    pub fn update_item(&mut self, item_id: &str, update: ItemUpdate) -> Result<()> {
        let item = self
            .items
            .get_mut(item_id)
            .ok_or_else(|| PathmarkError::ItemNotFound(item_id.to_string()))?;
        update.apply_to(item);
        Ok(())
    }

    /// String-keyed form of [`update_item`](Self::update_item).
    ///
    /// Keys are checked before anything is touched: one unknown key fails
    /// the call with [`PathmarkError::UnknownField`] and nothing is applied.
    pub fn update_item_fields<I, K>(&mut self, item_id: &str, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: AsRef<str>,
    {
        let update = ItemUpdate::from_fields(fields)?;
        self.update_item(item_id, update)
    }

    /// Moves an item to `new_index` within its current node.
    pub fn move_item_within_node(&mut self, item_id: &str, new_index: isize) -> Result<()> {
        let owner = self.item_owner(item_id)?;
        if let Some(node) = self.nodes.get_mut(&owner) {
            reposition(&mut node.item_ids, item_id, new_index);
        }
        Ok(())
    }

    /// Hands an item to another node, at `new_index` or appended when `None`.
    pub fn move_item_to_node(
        &mut self,
        item_id: &str,
        new_node_id: &str,
        new_index: Option<isize>,
    ) -> Result<()> {
        let owner = self.item_owner(item_id)?;
        self.require_node(new_node_id)?;

        if let Some(old) = self.nodes.get_mut(&owner) {
            remove_id(&mut old.item_ids, item_id);
        }
        if let Some(item) = self.items.get_mut(item_id) {
            item.parent_id = new_node_id.to_string();
        }
        if let Some(new_owner) = self.nodes.get_mut(new_node_id) {
            match new_index {
                Some(index) => insert_at(&mut new_owner.item_ids, item_id.to_string(), index),
                None => new_owner.item_ids.push(item_id.to_string()),
            }
        }
        Ok(())
    }

    fn item_owner(&self, item_id: &str) -> Result<String> {
        let parent = self.require_item(item_id)?.parent_id.clone();
        if !self.nodes.contains_key(&parent) {
            return Err(PathmarkError::ItemParentNotFound {
                item: item_id.to_string(),
                parent,
            });
        }
        Ok(parent)
    }
}
