//! Tree operations: create, append, replace, remove, walk.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{SecondaryMap, SlotMap};

use crate::error::DomError;
use super::node::{NodeData, NodeId, NodeKind};

/// Empty slice constant for returning when a node has no children.
const EMPTY_CHILDREN: &[NodeId] = &[];

/// An in-memory document, backed by a slotmap arena.
///
/// All nodes live in a single `SlotMap`. Newly created nodes are detached;
/// parent/child relationships are stored in secondary maps so that lookup is
/// O(1) and removal is O(subtree size).
pub struct Dom {
    pub(crate) nodes: SlotMap<NodeId, NodeData>,
    children: SecondaryMap<NodeId, Vec<NodeId>>,
    parent: SecondaryMap<NodeId, NodeId>,
}

impl Dom {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            children: SecondaryMap::new(),
            parent: SecondaryMap::new(),
        }
    }

    /// Create an empty document behind the shared handle builders expect.
    pub fn shared() -> Rc<RefCell<Dom>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Insert a detached node.
    pub fn create(&mut self, data: NodeData) -> NodeId {
        let id = self.nodes.insert(data);
        self.children.insert(id, Vec::new());
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved. Fails if either node is
    /// missing, if `parent` is a text node, or if `child` is `parent` or one of
    /// its ancestors.
    pub fn append(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insert(parent, child)?;
        self.detach(child);
        self.parent.insert(child, parent);
        self.children
            .get_mut(parent)
            .ok_or(DomError::MissingNode(parent))?
            .push(child);
        Ok(())
    }

    /// Put `new` in the position `old` holds under `parent`. `old` is left
    /// detached.
    pub fn replace(&mut self, parent: NodeId, new: NodeId, old: NodeId) -> Result<(), DomError> {
        if !self.nodes.contains_key(old) {
            return Err(DomError::MissingNode(old));
        }
        if self.parent(old) != Some(parent) {
            return Err(DomError::NotAChild { parent, child: old });
        }
        if new == old {
            return Ok(());
        }
        self.check_insert(parent, new)?;
        self.detach(new);
        let siblings = self
            .children
            .get_mut(parent)
            .ok_or(DomError::MissingNode(parent))?;
        let pos = siblings
            .iter()
            .position(|&c| c == old)
            .ok_or(DomError::NotAChild { parent, child: old })?;
        siblings[pos] = new;
        self.parent.remove(old);
        self.parent.insert(new, parent);
        Ok(())
    }

    fn check_insert(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        let data = self.nodes.get(parent).ok_or(DomError::MissingNode(parent))?;
        if !self.nodes.contains_key(child) {
            return Err(DomError::MissingNode(child));
        }
        if !data.is_element() {
            return Err(DomError::NotAnElement(parent));
        }
        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(DomError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Detach a node from its parent, keeping its subtree intact.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent_id) = self.parent.remove(id) {
            if let Some(siblings) = self.children.get_mut(parent_id) {
                siblings.retain(|&child| child != id);
            }
        }
    }

    /// Remove a node and all its descendants.
    ///
    /// Returns the `NodeData` for the removed node, or `None` if it didn't exist.
    pub fn remove(&mut self, id: NodeId) -> Option<NodeData> {
        if !self.nodes.contains_key(id) {
            return None;
        }
        self.detach(id);

        let mut removed_root_data = None;
        for current in self.walk_depth_first(id) {
            self.children.remove(current);
            self.parent.remove(current);
            let data = self.nodes.remove(current);
            if current == id {
                removed_root_data = data;
            }
        }
        removed_root_data
    }

    /// Replace the content of a node with `text`.
    ///
    /// Text nodes have their text swapped; elements lose all children and get
    /// a single text child (none when `text` is empty).
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<(), DomError> {
        let data = self.nodes.get_mut(id).ok_or(DomError::MissingNode(id))?;
        if let NodeKind::Text(content) = &mut data.kind {
            *content = text.to_owned();
            return Ok(());
        }
        let kids: Vec<NodeId> = self.children(id).to_vec();
        for child in kids {
            self.remove(child);
        }
        if !text.is_empty() {
            let child = self.create(NodeData::text(text));
            self.append(id, child)?;
        }
        Ok(())
    }

    /// Concatenated text of all text nodes under `id`, in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        self.walk_depth_first(id)
            .into_iter()
            .filter_map(|n| match &self.nodes.get(n)?.kind {
                NodeKind::Text(t) => Some(t.as_str()),
                NodeKind::Element { .. } => None,
            })
            .collect()
    }

    /// Get the parent of a node, if it has one.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.parent.get(id).copied()
    }

    /// Get the children of a node. Returns an empty slice if the node has no
    /// children or does not exist.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.children
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Walk from `id` up to its topmost ancestor, collecting ancestor ids.
    ///
    /// The returned vec does **not** include `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(p) = self.parent.get(current).copied() {
            result.push(p);
            current = p;
        }
        result
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut NodeData> {
        self.nodes.get_mut(id)
    }

    /// Mutable access to an element, failing on missing ids and text nodes.
    pub(crate) fn element_mut(&mut self, id: NodeId) -> Result<&mut NodeData, DomError> {
        let data = self.nodes.get_mut(id).ok_or(DomError::MissingNode(id))?;
        if data.is_element() {
            Ok(data)
        } else {
            Err(DomError::NotAnElement(id))
        }
    }

    pub(crate) fn element(&self, id: NodeId) -> Result<&NodeData, DomError> {
        let data = self.nodes.get(id).ok_or(DomError::MissingNode(id))?;
        if data.is_element() {
            Ok(data)
        } else {
            Err(DomError::NotAnElement(id))
        }
    }

    /// Number of nodes in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.nodes.contains_key(current) {
                continue;
            }
            result.push(current);
            // Push children in reverse so the first child is visited first.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        result
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}
