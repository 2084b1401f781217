//! Compact selector parsing and subtree queries
//!
//! A selector names at most one tag, one `#id` and one `.class`;
//! matching is case-insensitive and combinators do not exist. Wrapping
//! the whole selector in square brackets asks for every match instead of
//! the first one.

use crate::arena::DomArena;
use crate::error::{DomError, Result};
use crate::types::{DomNode, NodeId};
use crate::utils::eq_ignore_case;

/// Parsed form of a compact selector string
///
/// Absent fields place no constraint, so the default selector matches
/// every element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    /// Element name to match, lower-cased
    pub tag: Option<String>,
    /// Id attribute to match, lower-cased
    pub id: Option<String>,
    /// Class token the element must carry, lower-cased
    pub class: Option<String>,
}

enum Bucket {
    Tag,
    Id,
    Class,
}

impl Selector {
    /// Parse a compact selector string
    ///
    /// The leading run is the tag fragment, `#` starts the id fragment
    /// and `.` starts the class fragment; fragments may appear in any
    /// order. Each fragment is trimmed and lower-cased, and an empty
    /// fragment places no constraint. A second fragment of a kind
    /// already seen is rejected, as are bracket characters and
    /// combinator-like interior whitespace.
    pub fn parse(input: &str) -> Result<Selector> {
        let mut tag = String::new();
        let mut id = String::new();
        let mut class = String::new();
        let mut seen_id = false;
        let mut seen_class = false;
        let mut bucket = Bucket::Tag;

        for ch in input.trim().chars() {
            match ch {
                '#' => {
                    if seen_id {
                        return Err(unsupported(input, "more than one id fragment"));
                    }
                    seen_id = true;
                    bucket = Bucket::Id;
                }
                '.' => {
                    if seen_class {
                        return Err(unsupported(input, "more than one class fragment"));
                    }
                    seen_class = true;
                    bucket = Bucket::Class;
                }
                '[' | ']' => {
                    return Err(unsupported(input, "brackets inside a fragment"));
                }
                _ => match bucket {
                    Bucket::Tag => tag.push(ch),
                    Bucket::Id => id.push(ch),
                    Bucket::Class => class.push(ch),
                },
            }
        }

        Ok(Selector {
            tag: finish_fragment(input, &tag)?,
            id: finish_fragment(input, &id)?,
            class: finish_fragment(input, &class)?,
        })
    }

    /// Check whether an element node satisfies every present constraint
    ///
    /// Non-element nodes never match.
    pub fn matches(&self, node: &DomNode) -> bool {
        if !node.is_element() {
            return false;
        }
        if let Some(tag) = &self.tag {
            if !eq_ignore_case(&node.node_name, tag) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            let node_id = match node.id() {
                Some(value) => value,
                None => return false,
            };
            if !eq_ignore_case(node_id, id) {
                return false;
            }
        }
        if let Some(class) = &self.class {
            if !node.has_class(class) {
                return false;
            }
        }
        true
    }

    /// True when the selector places no constraints at all
    pub fn is_wildcard(&self) -> bool {
        self.tag.is_none() && self.id.is_none() && self.class.is_none()
    }

    /// True when the selector is a pure id test
    fn is_id_only(&self) -> bool {
        self.id.is_some() && self.tag.is_none() && self.class.is_none()
    }
}

fn unsupported(selector: &str, reason: &'static str) -> DomError {
    DomError::UnsupportedSelector {
        selector: selector.to_string(),
        reason,
    }
}

/// Trim and lower-case a fragment; empty means unconstrained
fn finish_fragment(selector: &str, fragment: &str) -> Result<Option<String>> {
    let fragment = fragment.trim();
    if fragment.is_empty() {
        return Ok(None);
    }
    if fragment.chars().any(char::is_whitespace) {
        return Err(unsupported(selector, "combinators are not supported"));
    }
    Ok(Some(fragment.to_lowercase()))
}

/// Strip one `[` and `]` wrapper pair, if present
fn strip_brackets(selector: &str) -> Option<&str> {
    selector
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
}

/// Result of a string-form query: one node or every match
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First match in document order, if any
    First(Option<NodeId>),
    /// Every match in document order
    All(Vec<NodeId>),
}

impl Selection {
    /// First node of the selection, if any
    pub fn first(&self) -> Option<NodeId> {
        match self {
            Selection::First(found) => *found,
            Selection::All(found) => found.first().copied(),
        }
    }

    /// Number of selected nodes
    pub fn len(&self) -> usize {
        match self {
            Selection::First(Some(_)) => 1,
            Selection::First(None) => 0,
            Selection::All(found) => found.len(),
        }
    }

    /// Check if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DomArena {
    /// First descendant of `root` matching the selector
    ///
    /// The walk is pre-order depth-first over an explicit stack and
    /// stops at the first hit. `root` itself is never considered; a root
    /// without children yields `None`. Not finding a match is not an
    /// error.
    pub fn select_first(&self, root: NodeId, selector: &Selector) -> Result<Option<NodeId>> {
        let root = self.get(root)?;
        let mut stack: Vec<NodeId> = root.children_ids.iter().rev().copied().collect();

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            if selector.matches(node) {
                return Ok(Some(node_id));
            }
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(None)
    }

    /// Every descendant of `root` matching the selector, in document order
    pub fn select_all(&self, root: NodeId, selector: &Selector) -> Result<Vec<NodeId>> {
        let root = self.get(root)?;
        let mut found = Vec::new();
        let mut stack: Vec<NodeId> = root.children_ids.iter().rev().copied().collect();

        while let Some(node_id) = stack.pop() {
            let node = self.get(node_id)?;
            if selector.matches(node) {
                found.push(node_id);
            }
            for &child_id in node.children_ids.iter().rev() {
                stack.push(child_id);
            }
        }

        Ok(found)
    }

    /// Query with a selector string from an explicit root
    ///
    /// The `[selector]` form selects every match; the bare form selects
    /// the first one.
    pub fn select_in(&self, root: NodeId, selector: &str) -> Result<Selection> {
        let trimmed = selector.trim();
        if let Some(inner) = strip_brackets(trimmed) {
            let parsed = Selector::parse(inner)?;
            return Ok(Selection::All(self.select_all(root, &parsed)?));
        }

        let parsed = Selector::parse(trimmed)?;
        // Pure-id queries from the document root go through the id
        // lookup, which resolves duplicates in document order itself
        if root == self.root_id() && parsed.is_id_only() {
            let found = parsed.id.as_deref().and_then(|id| self.by_id(id));
            return Ok(Selection::First(found));
        }
        Ok(Selection::First(self.select_first(root, &parsed)?))
    }

    /// Query with a selector string from the document root
    pub fn select(&self, selector: &str) -> Result<Selection> {
        self.select_in(self.root_id(), selector)
    }
}
