//! Core DOM node types
//!
//! Nodes are plain data: a numeric id, a type, a name/value pair and an
//! attribute map. Navigation goes through arena indices, never pointers.

use crate::utils::eq_ignore_case;
use smallvec::SmallVec;
use std::collections::HashMap;

/// Node identifier (index into arena)
pub type NodeId = u32;

/// Node type matching the DOM numeric values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeType {
    Element = 1,
    Attribute = 2,
    Text = 3,
    CdataSection = 4,
    EntityReference = 5,
    Entity = 6,
    ProcessingInstruction = 7,
    Comment = 8,
    Document = 9,
    DocumentType = 10,
    DocumentFragment = 11,
    Notation = 12,
}

impl NodeType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(NodeType::Element),
            2 => Some(NodeType::Attribute),
            3 => Some(NodeType::Text),
            4 => Some(NodeType::CdataSection),
            5 => Some(NodeType::EntityReference),
            6 => Some(NodeType::Entity),
            7 => Some(NodeType::ProcessingInstruction),
            8 => Some(NodeType::Comment),
            9 => Some(NodeType::Document),
            10 => Some(NodeType::DocumentType),
            11 => Some(NodeType::DocumentFragment),
            12 => Some(NodeType::Notation),
            _ => None,
        }
    }

    /// Lower-case name of the node type
    pub fn name(&self) -> &'static str {
        match self {
            NodeType::Element => "element",
            NodeType::Attribute => "attribute",
            NodeType::Text => "text",
            NodeType::CdataSection => "cdata_section",
            NodeType::EntityReference => "entity_reference",
            NodeType::Entity => "entity",
            NodeType::ProcessingInstruction => "processing_instruction",
            NodeType::Comment => "comment",
            NodeType::Document => "document",
            NodeType::DocumentType => "document_type",
            NodeType::DocumentFragment => "document_fragment",
            NodeType::Notation => "notation",
        }
    }
}

/// A single DOM tree node
///
/// `node_name` holds the tag for elements and the `#text` / `#document`
/// markers otherwise; `node_value` holds text content and is empty for
/// everything else.
#[derive(Debug, Clone)]
pub struct DomNode {
    pub node_id: NodeId,
    pub node_type: NodeType,

    pub parent_id: Option<NodeId>,
    pub children_ids: SmallVec<[NodeId; 4]>, // Most nodes have <4 children

    pub node_name: String,
    pub node_value: String,
    pub attributes: HashMap<String, String>,
}

impl DomNode {
    /// Create a detached node with the required fields
    pub fn new(node_id: NodeId, node_type: NodeType, node_name: String) -> Self {
        Self {
            node_id,
            node_type,
            parent_id: None,
            children_ids: SmallVec::new(),
            node_name,
            node_value: String::new(),
            attributes: HashMap::new(),
        }
    }

    /// Get tag name for element nodes, lower-cased
    pub fn tag_name(&self) -> Option<String> {
        if self.node_type == NodeType::Element {
            Some(self.node_name.to_lowercase())
        } else {
            None
        }
    }

    /// Check if node is an element
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if node is text
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Get the element's id attribute
    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }

    /// Get the element's raw class attribute
    pub fn class_attr(&self) -> Option<&str> {
        self.attr("class")
    }

    /// Check if the class attribute contains the given token
    ///
    /// The attribute is treated as a whitespace-delimited token list and
    /// the comparison is case-insensitive.
    pub fn has_class(&self, name: &str) -> bool {
        match self.class_attr() {
            Some(list) => list
                .split_ascii_whitespace()
                .any(|token| eq_ignore_case(token, name)),
            None => false,
        }
    }
}
