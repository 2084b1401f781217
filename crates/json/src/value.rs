//! JSON value model and writer
//!
//! One tagged enum covers every document shape. Object entries keep
//! their insertion order and all numbers are `f64`, which mirrors what
//! the reader produces. The writer emits strictly standard JSON, so
//! every value reads back to itself; non-finite numbers, which have no
//! JSON spelling, write as `null`.

use std::fmt;

/// A parsed JSON document
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<JsonValue>),
    Object(Vec<(String, JsonValue)>),
}

impl JsonValue {
    /// Empty object, what the lenient wrapper hands out on failure
    pub fn empty_object() -> JsonValue {
        JsonValue::Object(Vec::new())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    /// Get the boolean if this is a `Bool`
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the number if this is a `Number`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Get the text if this is a `String`
    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Get the elements if this is an `Array`
    pub fn as_array(&self) -> Option<&[JsonValue]> {
        match self {
            JsonValue::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Get the entries if this is an `Object`
    pub fn as_object(&self) -> Option<&[(String, JsonValue)]> {
        match self {
            JsonValue::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up an object entry by key
    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.as_object()?
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Index into an array
    pub fn get_index(&self, index: usize) -> Option<&JsonValue> {
        self.as_array()?.get(index)
    }

    /// Number of entries or elements; scalars count 0
    pub fn len(&self) -> usize {
        match self {
            JsonValue::Array(items) => items.len(),
            JsonValue::Object(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Check if a container holds nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Multi-line rendering with two-space indentation
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        write_value(self, true, 0, &mut out);
        out
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_value(self, false, 0, &mut out);
        f.write_str(&out)
    }
}

impl From<bool> for JsonValue {
    fn from(value: bool) -> Self {
        JsonValue::Bool(value)
    }
}

impl From<f64> for JsonValue {
    /// Non-finite values have no JSON spelling and convert to `Null`,
    /// the same resolution serde_json's `Number::from_f64` applies
    fn from(value: f64) -> Self {
        if value.is_finite() {
            JsonValue::Number(value)
        } else {
            JsonValue::Null
        }
    }
}

impl From<i64> for JsonValue {
    fn from(value: i64) -> Self {
        JsonValue::Number(value as f64)
    }
}

impl From<&str> for JsonValue {
    fn from(value: &str) -> Self {
        JsonValue::String(value.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(value: String) -> Self {
        JsonValue::String(value)
    }
}

impl From<Vec<JsonValue>> for JsonValue {
    fn from(value: Vec<JsonValue>) -> Self {
        JsonValue::Array(value)
    }
}

fn write_value(value: &JsonValue, pretty: bool, depth: usize, out: &mut String) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Number(n) => write_number(*n, out),
        JsonValue::String(s) => write_string(s, out),
        JsonValue::Array(items) => {
            if items.is_empty() {
                out.push_str("[]");
                return;
            }
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if pretty {
                    out.push('\n');
                    push_indent(depth + 1, out);
                }
                write_value(item, pretty, depth + 1, out);
            }
            if pretty {
                out.push('\n');
                push_indent(depth, out);
            }
            out.push(']');
        }
        JsonValue::Object(entries) => {
            if entries.is_empty() {
                out.push_str("{}");
                return;
            }
            out.push('{');
            for (i, (key, item)) in entries.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                if pretty {
                    out.push('\n');
                    push_indent(depth + 1, out);
                }
                write_string(key, out);
                out.push(':');
                if pretty {
                    out.push(' ');
                }
                write_value(item, pretty, depth + 1, out);
            }
            if pretty {
                out.push('\n');
                push_indent(depth, out);
            }
            out.push('}');
        }
    }
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Integral values print without a fractional part; everything else uses
/// the shortest form that reads back to the same `f64`. Non-finite
/// input, which only direct `Number` construction can produce, writes
/// as `null`
fn write_number(n: f64, out: &mut String) {
    if !n.is_finite() {
        out.push_str("null");
    } else if n == n.trunc() && n.abs() < 1e15 && !(n == 0.0 && n.is_sign_negative()) {
        out.push_str(&format!("{}", n as i64));
    } else {
        out.push_str(&format!("{}", n));
    }
}

/// Write a string with standard JSON escapes
fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if (ch as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_object() -> JsonValue {
        JsonValue::Object(vec![
            ("name".to_string(), JsonValue::from("demo")),
            ("count".to_string(), JsonValue::from(3i64)),
            (
                "tags".to_string(),
                JsonValue::Array(vec![JsonValue::from("a"), JsonValue::Bool(false)]),
            ),
        ])
    }

    #[test]
    fn test_accessors() {
        let value = sample_object();
        assert_eq!(value.get("name").and_then(JsonValue::as_str), Some("demo"));
        assert_eq!(value.get("count").and_then(JsonValue::as_f64), Some(3.0));
        assert_eq!(value.get("missing"), None);
        assert_eq!(value.len(), 3);

        let tags = value.get("tags").unwrap();
        assert_eq!(tags.get_index(1).and_then(JsonValue::as_bool), Some(false));
        assert_eq!(tags.get_index(9), None);

        assert!(JsonValue::Null.is_null());
        assert!(JsonValue::empty_object().is_empty());
        assert_eq!(JsonValue::Bool(true).as_str(), None);
    }

    #[test]
    fn test_display_compact() {
        let value = sample_object();
        assert_eq!(
            value.to_string(),
            r#"{"name":"demo","count":3,"tags":["a",false]}"#
        );
        assert_eq!(JsonValue::empty_object().to_string(), "{}");
        assert_eq!(JsonValue::Array(vec![]).to_string(), "[]");
        assert_eq!(JsonValue::Null.to_string(), "null");
    }

    #[test]
    fn test_pretty_layout() {
        let value = JsonValue::Object(vec![(
            "items".to_string(),
            JsonValue::Array(vec![JsonValue::from(1i64), JsonValue::Null]),
        )]);

        let expected = "{\n  \"items\": [\n    1,\n    null\n  ]\n}";
        assert_eq!(value.pretty(), expected);
    }

    #[test]
    fn test_string_escapes() {
        let value = JsonValue::from("a\"b\\c\nd\u{0001}");
        assert_eq!(value.to_string(), r#""a\"b\\c\nd\u0001""#);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(JsonValue::Number(1.0).to_string(), "1");
        assert_eq!(JsonValue::Number(-42.0).to_string(), "-42");
        assert_eq!(JsonValue::Number(1.5).to_string(), "1.5");
        assert_eq!(JsonValue::Number(12350.0).to_string(), "12350");
        assert_eq!(JsonValue::Number(-0.0).to_string(), "-0");
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        assert_eq!(JsonValue::from(f64::NAN), JsonValue::Null);
        assert_eq!(JsonValue::from(f64::INFINITY), JsonValue::Null);
        assert_eq!(JsonValue::from(f64::NEG_INFINITY), JsonValue::Null);
        assert_eq!(JsonValue::from(2.5), JsonValue::Number(2.5));

        // Directly constructed non-finite numbers still write as null
        assert_eq!(JsonValue::Number(f64::NAN).to_string(), "null");
        assert_eq!(JsonValue::Number(f64::INFINITY).to_string(), "null");
        assert_eq!(
            JsonValue::Array(vec![JsonValue::Number(f64::NEG_INFINITY)]).to_string(),
            "[null]"
        );
    }
}
