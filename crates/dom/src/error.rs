//! Error types for DOM operations
//!
//! Simple, flat error hierarchy.

use crate::types::NodeId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DomError>;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    #[error("Invalid node type: expected {expected}, got {actual}")]
    InvalidNodeType {
        expected: &'static str,
        actual: String,
    },

    #[error("Unsupported selector {selector:?}: {reason}")]
    UnsupportedSelector {
        selector: String,
        reason: &'static str,
    },

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Maximum document depth exceeded: {depth} > {max}")]
    MaxDepthExceeded { depth: usize, max: usize },
}
