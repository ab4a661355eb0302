use super::ordering::{insert_at, remove_id, reposition};
use super::HierarchicalStore;
use crate::error::{PathmarkError, Result};
use crate::model::{Node, ROOT_ID};

impl HierarchicalStore {
    /// Creates a node at the end of `parent_id`'s child list and returns its id.
    pub fn add_node(&mut self, name: impl Into<String>, parent_id: &str) -> Result<String> {
        self.require_parent(parent_id)?;

        let id = self.generate_node_id();
        self.nodes.insert(
            id.clone(),
            Node::new(Some(name.into()), Some(parent_id.to_string())),
        );
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            parent.child_node_ids.push(id.clone());
        }
        Ok(id)
    }

    /// Removes a node, every node below it and every item any of them owns.
    pub fn remove_node(&mut self, node_id: &str) -> Result<()> {
        if node_id == ROOT_ID {
            return Err(PathmarkError::CannotRemoveRoot);
        }
        let parent_id = self.require_node(node_id)?.parent_id.clone();

        let mut doomed = vec![node_id.to_string()];
        doomed.extend(self.descendants(node_id));

        // Deepest first, so children go before their parents.
        for id in doomed.iter().rev() {
            if let Some(node) = self.nodes.remove(id) {
                for item_id in &node.item_ids {
                    self.items.remove(item_id);
                }
            }
        }

        if let Some(parent_id) = parent_id {
            if let Some(parent) = self.nodes.get_mut(&parent_id) {
                remove_id(&mut parent.child_node_ids, node_id);
            }
        }
        Ok(())
    }

    pub fn rename_node(&mut self, node_id: &str, new_name: impl Into<String>) -> Result<()> {
        let node = self
            .nodes
            .get_mut(node_id)
            .ok_or_else(|| PathmarkError::NodeNotFound(node_id.to_string()))?;
        node.name = Some(new_name.into());
        Ok(())
    }

    /// Moves a node to `new_index` among its current siblings.
    ///
    /// See [`ordering`](super::ordering) for how the index is interpreted.
    pub fn move_node_same_parent(&mut self, node_id: &str, new_index: isize) -> Result<()> {
        let parent_id = self.movable_parent(node_id)?;
        self.require_parent(&parent_id)?;

        if let Some(parent) = self.nodes.get_mut(&parent_id) {
            reposition(&mut parent.child_node_ids, node_id, new_index);
        }
        Ok(())
    }

    /// Detaches a node from its parent and inserts it under `new_parent_id` at `new_index`.
    ///
    /// Fails with [`PathmarkError::CyclicMove`] when the target is the node
    /// itself or lies below it.
    pub fn move_node_new_parent(
        &mut self,
        node_id: &str,
        new_parent_id: &str,
        new_index: isize,
    ) -> Result<()> {
        let old_parent_id = self.movable_parent(node_id)?;
        self.require_parent(new_parent_id)?;
        if self.is_same_or_descendant(new_parent_id, node_id) {
            return Err(PathmarkError::CyclicMove {
                node: node_id.to_string(),
                target: new_parent_id.to_string(),
            });
        }

        if let Some(old_parent) = self.nodes.get_mut(&old_parent_id) {
            remove_id(&mut old_parent.child_node_ids, node_id);
        }
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.parent_id = Some(new_parent_id.to_string());
        }
        if let Some(new_parent) = self.nodes.get_mut(new_parent_id) {
            insert_at(&mut new_parent.child_node_ids, node_id.to_string(), new_index);
        }
        Ok(())
    }

    /// The parent of a node that is allowed to move.
    fn movable_parent(&self, node_id: &str) -> Result<String> {
        if node_id == ROOT_ID {
            return Err(PathmarkError::CannotMoveRoot);
        }
        self.require_node(node_id)?
            .parent_id
            .clone()
            .ok_or(PathmarkError::CannotMoveRoot)
    }
}
