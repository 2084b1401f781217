//! In-memory DOM trees with compact selector queries
//!
//! Nodes live in an arena and reference each other by index, so trees of
//! any depth are handled without recursion. Selectors name at most one
//! tag, one `#id` and one `.class`; queries walk a subtree iteratively
//! and hand back node ids, never references into the tree.
//!
//! ```
//! use dom::DomArena;
//!
//! let mut arena = DomArena::new();
//! let root = arena.root_id();
//! arena.create_element(root, "div", &[("id", "x"), ("class", "a b")]).unwrap();
//! arena.create_element(root, "span", &[("class", "b")]).unwrap();
//!
//! let hits = arena.select("[.b]").unwrap();
//! assert_eq!(hits.len(), 2);
//! ```

pub mod arena;
pub mod error;
pub mod loader;
pub mod selector;
pub mod serializer;
pub mod types;
pub mod utils;

pub use arena::DomArena;
pub use error::{DomError, Result};
pub use loader::{DomLoader, LoaderConfig};
pub use selector::{Selection, Selector};
pub use serializer::{DomSerializer, SerializerConfig};
pub use types::{DomNode, NodeId, NodeType};
