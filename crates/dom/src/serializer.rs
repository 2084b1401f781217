//! Render DOM subtrees as indented text outlines
//!
//! One line per node: `<tag attr="value">` for elements, quoted text for
//! text nodes. Useful for fixtures, debugging and test failure output.

use crate::arena::DomArena;
use crate::error::Result;
use crate::types::{NodeId, NodeType};
use crate::utils::{cap_text_length, eq_ignore_case};

/// Serializer configuration
#[derive(Debug, Clone)]
pub struct SerializerConfig {
    /// Longest text run printed before an ellipsis; 0 disables capping
    pub max_text_length: usize,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            max_text_length: 200,
        }
    }
}

/// DOM tree outline renderer
pub struct DomSerializer {
    config: SerializerConfig,
}

impl DomSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    /// Render the subtree rooted at `node_id`
    pub fn serialize(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut output = String::with_capacity(4096);
        self.serialize_node(arena, node_id, 0, &mut output)?;
        Ok(output)
    }

    /// Render a single node and recurse into its children
    fn serialize_node(
        &self,
        arena: &DomArena,
        node_id: NodeId,
        depth: usize,
        output: &mut String,
    ) -> Result<()> {
        let node = arena.get(node_id)?;
        let indent = "  ".repeat(depth);

        match node.node_type {
            NodeType::Element => {
                output.push_str(&indent);
                output.push('<');
                output.push_str(&node.node_name);

                // Sorted for stable output; attribute maps have no order
                let mut names: Vec<&String> = node.attributes.keys().collect();
                names.sort();
                for name in names {
                    if let Some(value) = node.attr(name) {
                        output.push_str(&format!(" {}=\"{}\"", name, value));
                    }
                }
                output.push_str(">\n");

                for &child_id in &node.children_ids {
                    self.serialize_node(arena, child_id, depth + 1, output)?;
                }
            }
            NodeType::Text => {
                let text = node.node_value.trim();
                if !text.is_empty() {
                    output.push_str(&indent);
                    output.push('"');
                    output.push_str(&cap_text_length(text, self.config.max_text_length));
                    output.push_str("\"\n");
                }
            }
            NodeType::Document => {
                for &child_id in &node.children_ids {
                    self.serialize_node(arena, child_id, depth, output)?;
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Absolute path of a node, like `/html[1]/body[1]/div[2]`
    ///
    /// Positions are 1-based among same-tag element siblings. The
    /// document root renders as `/`.
    pub fn node_path(&self, arena: &DomArena, node_id: NodeId) -> Result<String> {
        let mut parts = Vec::new();
        let mut current_id = Some(node_id);

        while let Some(id) = current_id {
            let node = arena.get(id)?;

            if node.node_type == NodeType::Element {
                let position = match node.parent_id {
                    Some(parent_id) => {
                        let parent = arena.get(parent_id)?;
                        parent
                            .children_ids
                            .iter()
                            .filter_map(|&child_id| arena.get(child_id).ok())
                            .filter(|child| {
                                child.node_type == NodeType::Element
                                    && eq_ignore_case(&child.node_name, &node.node_name)
                            })
                            .position(|child| child.node_id == node.node_id)
                            .map(|p| p + 1)
                            .unwrap_or(1)
                    }
                    None => 1,
                };
                parts.push(format!("{}[{}]", node.node_name.to_lowercase(), position));
            }

            current_id = node.parent_id;
        }

        parts.reverse();
        Ok(format!("/{}", parts.join("/")))
    }
}

impl Default for DomSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_arena() -> (DomArena, NodeId) {
        let mut arena = DomArena::new();
        let html = arena.create_element(arena.root_id(), "html", &[]).unwrap();
        let div = arena
            .create_element(html, "div", &[("id", "x"), ("class", "a")])
            .unwrap();
        arena.create_text(div, "Hello").unwrap();
        (arena, div)
    }

    #[test]
    fn test_serialize_outline() {
        let (arena, _) = sample_arena();
        let output = DomSerializer::new()
            .serialize(&arena, arena.root_id())
            .unwrap();

        assert_eq!(output, "<html>\n  <div class=\"a\" id=\"x\">\n    \"Hello\"\n");
    }

    #[test]
    fn test_serialize_caps_text() {
        let mut arena = DomArena::new();
        let div = arena.create_element(arena.root_id(), "div", &[]).unwrap();
        arena.create_text(div, "abcdefghij").unwrap();

        let serializer = DomSerializer::with_config(SerializerConfig { max_text_length: 4 });
        let output = serializer.serialize(&arena, arena.root_id()).unwrap();
        assert!(output.contains("\"abcd...\""));
    }

    #[test]
    fn test_node_path() {
        let mut arena = DomArena::new();
        let html = arena.create_element(arena.root_id(), "html", &[]).unwrap();
        let body = arena.create_element(html, "body", &[]).unwrap();
        arena.create_element(body, "div", &[]).unwrap();
        let second = arena.create_element(body, "div", &[]).unwrap();

        let serializer = DomSerializer::new();
        let path = serializer.node_path(&arena, second).unwrap();
        assert_eq!(path, "/html[1]/body[1]/div[2]");

        assert_eq!(serializer.node_path(&arena, arena.root_id()).unwrap(), "/");
    }

    #[test]
    fn test_node_path_ignores_text_siblings() {
        let (arena, div) = sample_arena();
        let path = DomSerializer::new().node_path(&arena, div).unwrap();
        assert_eq!(path, "/html[1]/div[1]");
    }
}
