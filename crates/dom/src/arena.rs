//! Arena-based DOM tree storage
//!
//! Nodes live in a single `Vec` and reference each other by index. The
//! document root occupies slot 0 from construction on; every other node
//! is attached to its parent when created and stays there. Elements with
//! an `id` attribute are tracked in a side index for direct lookup.

use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId, NodeType};
use ahash::{AHashMap, AHashSet};

/// Arena allocator for DOM nodes
#[derive(Debug)]
pub struct DomArena {
    /// All nodes stored sequentially (cache-friendly)
    nodes: Vec<DomNode>,

    /// Maps lower-cased id attributes to the first element registered with each
    id_index: AHashMap<String, NodeId>,

    /// Ids registered by more than one element; lookups for these walk
    /// the tree instead of trusting the index
    ambiguous_ids: AHashSet<String>,
}

impl DomArena {
    /// Create a new arena holding only the document root
    pub fn new() -> Self {
        Self::with_capacity(1024) // Pre-allocate for typical documents
    }

    /// Create arena with specific capacity
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(DomNode::new(0, NodeType::Document, "#document".to_string()));
        Self {
            nodes,
            id_index: AHashMap::new(),
            ambiguous_ids: AHashSet::new(),
        }
    }

    /// Id of the document root (always slot 0)
    pub fn root_id(&self) -> NodeId {
        0
    }

    /// Create an element node under `parent_id`, returns its id
    ///
    /// The element's `id` attribute, if present and non-empty, is
    /// registered in the id index. An id registered by more than one
    /// element is remembered as ambiguous; `by_id` then walks for it.
    pub fn create_element(
        &mut self,
        parent_id: NodeId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> Result<NodeId> {
        self.check_parent(parent_id)?;

        let node_id = self.nodes.len() as NodeId;
        let mut node = DomNode::new(node_id, NodeType::Element, tag.to_string());
        node.parent_id = Some(parent_id);
        node.attributes = attributes
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        if let Some(id_attr) = node.id() {
            if !id_attr.is_empty() {
                let key = id_attr.to_lowercase();
                if self.id_index.contains_key(&key) {
                    self.ambiguous_ids.insert(key);
                } else {
                    self.id_index.insert(key, node_id);
                }
            }
        }

        self.nodes.push(node);
        self.get_mut(parent_id)?.children_ids.push(node_id);
        Ok(node_id)
    }

    /// Create a text node under `parent_id`, returns its id
    pub fn create_text(&mut self, parent_id: NodeId, text: &str) -> Result<NodeId> {
        self.check_parent(parent_id)?;

        let node_id = self.nodes.len() as NodeId;
        let mut node = DomNode::new(node_id, NodeType::Text, "#text".to_string());
        node.parent_id = Some(parent_id);
        node.node_value = text.to_string();

        self.nodes.push(node);
        self.get_mut(parent_id)?.children_ids.push(node_id);
        Ok(node_id)
    }

    /// Only documents and elements may carry children
    fn check_parent(&self, parent_id: NodeId) -> Result<()> {
        let parent = self.get(parent_id)?;
        match parent.node_type {
            NodeType::Document | NodeType::Element => Ok(()),
            other => Err(DomError::InvalidNodeType {
                expected: "document or element",
                actual: other.name().to_string(),
            }),
        }
    }

    /// Get node by ID (immutable)
    pub fn get(&self, node_id: NodeId) -> Result<&DomNode> {
        self.nodes
            .get(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get node by ID (mutable)
    pub fn get_mut(&mut self, node_id: NodeId) -> Result<&mut DomNode> {
        self.nodes
            .get_mut(node_id as usize)
            .ok_or(DomError::NodeNotFound(node_id))
    }

    /// Get a node, requiring it to be an element
    pub fn expect_element(&self, node_id: NodeId) -> Result<&DomNode> {
        let node = self.get(node_id)?;
        if node.is_element() {
            Ok(node)
        } else {
            Err(DomError::InvalidNodeType {
                expected: "element",
                actual: node.node_type.name().to_string(),
            })
        }
    }

    /// Total number of nodes, document root included
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena holds nothing besides the document root
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterator over all nodes
    pub fn iter(&self) -> impl Iterator<Item = &DomNode> {
        self.nodes.iter()
    }

    /// Iterator over all node IDs
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(|i| i as NodeId)
    }

    /// Get children of a node
    pub fn children(&self, node_id: NodeId) -> Result<Vec<&DomNode>> {
        let node = self.get(node_id)?;
        node.children_ids
            .iter()
            .map(|&child_id| self.get(child_id))
            .collect()
    }

    /// Get parent of a node
    pub fn parent(&self, node_id: NodeId) -> Result<Option<&DomNode>> {
        let node = self.get(node_id)?;
        match node.parent_id {
            Some(parent_id) => Ok(Some(self.get(parent_id)?)),
            None => Ok(None),
        }
    }

    /// Get the next sibling of a node, if any
    pub fn next_sibling(&self, node_id: NodeId) -> Result<Option<NodeId>> {
        let node = self.get(node_id)?;
        let parent_id = match node.parent_id {
            Some(parent_id) => parent_id,
            None => return Ok(None),
        };
        let siblings = &self.get(parent_id)?.children_ids;
        let pos = siblings.iter().position(|&child_id| child_id == node_id);
        Ok(pos.and_then(|i| siblings.get(i + 1)).copied())
    }

    /// Look up an element by its id attribute, case-insensitively
    ///
    /// A leading `#` is tolerated. An id held by a single element
    /// answers straight from the index; an id registered more than once
    /// falls back to a depth-first walk, so the result is the first
    /// match in document order and agrees with selector queries.
    pub fn by_id(&self, id: &str) -> Option<NodeId> {
        let id = id.strip_prefix('#').unwrap_or(id);
        if id.is_empty() {
            return None;
        }
        let key = id.to_lowercase();
        if self.ambiguous_ids.contains(&key) {
            return self.find_by_id_walk(&key);
        }
        self.id_index.get(&key).copied()
    }

    /// First element in document order whose id attribute matches `key`
    /// (already lower-cased)
    fn find_by_id_walk(&self, key: &str) -> Option<NodeId> {
        let mut stack = vec![self.root_id()];

        while let Some(node_id) = stack.pop() {
            let node = self.nodes.get(node_id as usize)?;
            if node.is_element() {
                if let Some(id_attr) = node.id() {
                    if crate::utils::eq_ignore_case(id_attr, key) {
                        return Some(node_id);
                    }
                }
            }
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        None
    }

    /// Traverse a subtree depth-first (iterative, no recursion)
    pub fn traverse_df<F>(&self, start_id: NodeId, mut visit: F) -> Result<()>
    where
        F: FnMut(&DomNode) -> Result<()>,
    {
        let mut stack = vec![start_id];

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            visit(node)?;

            // Push children in reverse order (so they're visited left-to-right)
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(())
    }

    /// Concatenated text of every text node under `node_id`, trimmed
    pub fn text_content(&self, node_id: NodeId) -> Result<String> {
        let mut text = String::new();

        self.traverse_df(node_id, |node| {
            if node.node_type == NodeType::Text {
                text.push_str(&node.node_value);
            }
            Ok(())
        })?;

        Ok(text.trim().to_string())
    }

    /// Add a class token to an element (no-op if already present)
    ///
    /// Presence is checked case-insensitively; the added token keeps its
    /// given casing.
    pub fn add_class(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        if self.expect_element(node_id)?.has_class(name) {
            return Ok(());
        }

        let node = self.get_mut(node_id)?;
        let list = node.attributes.entry("class".to_string()).or_default();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(name);
        Ok(())
    }

    /// Remove every case-insensitive occurrence of a class token
    pub fn remove_class(&mut self, node_id: NodeId, name: &str) -> Result<()> {
        self.expect_element(node_id)?;

        let node = self.get_mut(node_id)?;
        if let Some(list) = node.attributes.get_mut("class") {
            let kept = list
                .split_ascii_whitespace()
                .filter(|token| !crate::utils::eq_ignore_case(token, name))
                .collect::<Vec<_>>()
                .join(" ");
            *list = kept;
        }
        Ok(())
    }

    /// Reset to an empty document, keeping allocations
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.id_index.clear();
        self.ambiguous_ids.clear();
        if let Some(root) = self.nodes.get_mut(0) {
            root.children_ids.clear();
        }
    }
}

impl Default for DomArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_basic() {
        let mut arena = DomArena::new();
        assert!(arena.is_empty());
        assert_eq!(arena.len(), 1);

        let root_id = arena.root_id();
        let div = arena
            .create_element(root_id, "div", &[("id", "target1")])
            .unwrap();

        let retrieved = arena.get(div).unwrap();
        assert_eq!(retrieved.node_name, "div");
        assert_eq!(retrieved.parent_id, Some(root_id));
        assert_eq!(arena.get(root_id).unwrap().children_ids.as_slice(), &[div]);
        assert!(!arena.is_empty());
    }

    #[test]
    fn test_missing_node() {
        let arena = DomArena::new();
        assert!(matches!(arena.get(99), Err(DomError::NodeNotFound(99))));
    }

    #[test]
    fn test_text_nodes_cannot_carry_children() {
        let mut arena = DomArena::new();
        let text = arena.create_text(arena.root_id(), "hi").unwrap();

        let result = arena.create_element(text, "div", &[]);
        assert!(matches!(result, Err(DomError::InvalidNodeType { .. })));
    }

    #[test]
    fn test_traverse_df() {
        let mut arena = DomArena::new();

        let div = arena.create_element(arena.root_id(), "div", &[]).unwrap();
        arena.create_element(div, "span", &[]).unwrap();
        arena.create_element(div, "span", &[]).unwrap();

        let mut visited = Vec::new();
        arena
            .traverse_df(div, |node| {
                visited.push(node.node_name.clone());
                Ok(())
            })
            .unwrap();

        assert_eq!(visited, vec!["div", "span", "span"]);
    }

    #[test]
    fn test_by_id_lookup() {
        let mut arena = DomArena::new();
        let div = arena
            .create_element(arena.root_id(), "div", &[("id", "Main")])
            .unwrap();

        assert_eq!(arena.by_id("main"), Some(div));
        assert_eq!(arena.by_id("MAIN"), Some(div));
        assert_eq!(arena.by_id("#Main"), Some(div));
        assert_eq!(arena.by_id("other"), None);
        assert_eq!(arena.by_id(""), None);
        assert_eq!(arena.by_id("#"), None);
    }

    #[test]
    fn test_by_id_duplicates_resolve_in_document_order() {
        let mut arena = DomArena::new();
        let first_div = arena.create_element(arena.root_id(), "div", &[]).unwrap();
        let second_div = arena.create_element(arena.root_id(), "div", &[]).unwrap();

        // The copy under the later sibling is registered first
        let registered_first = arena
            .create_element(second_div, "span", &[("id", "dup")])
            .unwrap();
        let document_first = arena
            .create_element(first_div, "span", &[("id", "DUP")])
            .unwrap();

        assert_eq!(arena.by_id("dup"), Some(document_first));
        assert_ne!(arena.by_id("dup"), Some(registered_first));
    }

    #[test]
    fn test_next_sibling() {
        let mut arena = DomArena::new();
        let a = arena.create_element(arena.root_id(), "a", &[]).unwrap();
        let b = arena.create_element(arena.root_id(), "b", &[]).unwrap();

        assert_eq!(arena.next_sibling(a).unwrap(), Some(b));
        assert_eq!(arena.next_sibling(b).unwrap(), None);
        assert_eq!(arena.next_sibling(arena.root_id()).unwrap(), None);
    }

    #[test]
    fn test_text_content() {
        let mut arena = DomArena::new();
        let div = arena.create_element(arena.root_id(), "div", &[]).unwrap();
        arena.create_text(div, "Hello ").unwrap();
        let span = arena.create_element(div, "span", &[]).unwrap();
        arena.create_text(span, "World").unwrap();

        assert_eq!(arena.text_content(div).unwrap(), "Hello World");
        assert_eq!(arena.text_content(span).unwrap(), "World");
    }

    #[test]
    fn test_class_edits() {
        let mut arena = DomArena::new();
        let div = arena
            .create_element(arena.root_id(), "div", &[("class", "menu")])
            .unwrap();

        arena.add_class(div, "Active").unwrap();
        assert_eq!(arena.get(div).unwrap().class_attr(), Some("menu Active"));

        // case-insensitive presence check makes this a no-op
        arena.add_class(div, "ACTIVE").unwrap();
        assert_eq!(arena.get(div).unwrap().class_attr(), Some("menu Active"));

        arena.remove_class(div, "active").unwrap();
        assert_eq!(arena.get(div).unwrap().class_attr(), Some("menu"));

        let text = arena.create_text(div, "x").unwrap();
        assert!(matches!(
            arena.add_class(text, "a"),
            Err(DomError::InvalidNodeType { .. })
        ));
    }

    #[test]
    fn test_clear_keeps_root() {
        let mut arena = DomArena::new();
        arena
            .create_element(arena.root_id(), "div", &[("id", "x")])
            .unwrap();
        arena
            .create_element(arena.root_id(), "span", &[("id", "x")])
            .unwrap();

        arena.clear();
        assert!(arena.is_empty());
        assert_eq!(arena.by_id("x"), None);
        assert!(arena.get(arena.root_id()).unwrap().children_ids.is_empty());

        // A fresh registration owns the id again
        let fresh = arena
            .create_element(arena.root_id(), "div", &[("id", "x")])
            .unwrap();
        assert_eq!(arena.by_id("x"), Some(fresh));
    }
}
