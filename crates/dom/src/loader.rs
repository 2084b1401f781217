//! Build DOM trees from plain-data document descriptions
//!
//! A document arrives as a `serde_json::Value`: element objects carry
//! `tag` plus optional `attrs` and `children`, text nodes carry `text`.
//! The loader validates the shape and grows an arena from it.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::NodeId;
use serde_json::Value;

/// Configuration for document loading
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Maximum element nesting depth accepted
    pub max_depth: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { max_depth: 64 }
    }
}

/// Builds arenas from document descriptions
pub struct DomLoader {
    config: LoaderConfig,
}

impl DomLoader {
    /// Create a loader with the default config
    pub fn new() -> Self {
        Self::with_config(LoaderConfig::default())
    }

    /// Create a loader with a custom config
    pub fn with_config(config: LoaderConfig) -> Self {
        Self { config }
    }

    /// Build an arena from a document description
    ///
    /// The top level may be a single node object or an array of nodes;
    /// either way the nodes attach under the document root.
    pub fn load(&self, document: &Value) -> Result<DomArena> {
        let mut arena = DomArena::new();
        let root_id = arena.root_id();

        match document {
            Value::Array(nodes) => {
                for node in nodes {
                    self.load_node(&mut arena, node, root_id, 0)?;
                }
            }
            Value::Object(_) => {
                self.load_node(&mut arena, document, root_id, 0)?;
            }
            other => {
                return Err(DomError::InvalidDocument(format!(
                    "expected object or array at top level, got {}",
                    json_type_name(other)
                )));
            }
        }

        Ok(arena)
    }

    /// Load one node description, recursing into its children
    fn load_node(
        &self,
        arena: &mut DomArena,
        value: &Value,
        parent_id: NodeId,
        depth: usize,
    ) -> Result<NodeId> {
        if depth > self.config.max_depth {
            return Err(DomError::MaxDepthExceeded {
                depth,
                max: self.config.max_depth,
            });
        }

        if let Some(text) = value.get("text") {
            let text = text
                .as_str()
                .ok_or_else(|| DomError::InvalidDocument("'text' must be a string".to_string()))?;
            return arena.create_text(parent_id, text);
        }

        let tag = value
            .get("tag")
            .ok_or_else(|| {
                DomError::InvalidDocument("node needs a 'tag' or 'text' field".to_string())
            })?
            .as_str()
            .ok_or_else(|| DomError::InvalidDocument("'tag' must be a string".to_string()))?;

        let mut attributes: Vec<(&str, &str)> = Vec::new();
        if let Some(attrs) = value.get("attrs") {
            let map = attrs
                .as_object()
                .ok_or_else(|| DomError::InvalidDocument("'attrs' must be an object".to_string()))?;
            for (name, attr_value) in map {
                let attr_value = attr_value.as_str().ok_or_else(|| {
                    DomError::InvalidDocument(format!("attribute {:?} must be a string", name))
                })?;
                attributes.push((name.as_str(), attr_value));
            }
        }

        let node_id = arena.create_element(parent_id, tag, &attributes)?;

        if let Some(children) = value.get("children") {
            let children = children.as_array().ok_or_else(|| {
                DomError::InvalidDocument("'children' must be an array".to_string())
            })?;
            for child in children {
                self.load_node(arena, child, node_id, depth + 1)?;
            }
        }

        Ok(node_id)
    }
}

impl Default for DomLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
