//! JSON reading and writing
//!
//! A recursive-descent reader paired with a writer that emits standard
//! JSON. The strict [`parse`] entry point reports precise, positioned
//! errors; [`parse_or_empty`] never fails and degrades to an empty
//! object instead.
//!
//! ```
//! use json::{parse, JsonValue};
//!
//! # fn main() -> Result<(), json::ParseError> {
//! let doc = parse(r#"{"name": "demo", "tags": ["a", "b"]}"#)?;
//! assert_eq!(doc.get("name").and_then(JsonValue::as_str), Some("demo"));
//! assert_eq!(doc.get("tags").map(JsonValue::len), Some(2));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod parser;
pub mod value;

pub use error::{ParseError, Result};
pub use parser::{parse, parse_or_empty};
pub use value::JsonValue;
