//! Recursive-descent JSON reader
//!
//! A byte cursor walks the input once with single-token lookahead.
//! Each grammar rule owns one function and every failure carries the
//! byte offset it happened at. The strict entry point is [`parse`];
//! [`parse_or_empty`] wraps it for callers that treat malformed input
//! as an empty document.

use tracing::warn;

use crate::error::{ParseError, Result};
use crate::value::JsonValue;

/// Deepest container nesting accepted before bailing out
const MAX_DEPTH: usize = 128;

/// Parse a complete JSON document
///
/// The whole input must be one value; anything left after it is an
/// error. Objects reject duplicate keys.
pub fn parse(input: &str) -> Result<JsonValue> {
    let mut parser = Parser::new(input);
    let value = parser.parse_value(0)?;
    parser.skip_whitespace();
    if parser.pos < parser.bytes.len() {
        return Err(ParseError::TrailingCharacters(parser.pos));
    }
    Ok(value)
}

/// Parse without failing: malformed input logs a warning and yields `{}`
pub fn parse_or_empty(input: &str) -> JsonValue {
    if input.is_empty() {
        warn!("Empty document, yielding empty object");
        return JsonValue::empty_object();
    }
    match parse(input) {
        Ok(value) => value,
        Err(error) => {
            warn!("Discarding malformed document: {}", error);
            JsonValue::empty_object()
        }
    }
}

struct Parser<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            input,
            bytes: input.as_bytes(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Decode the character under the cursor, for error reporting
    fn peek_char(&self) -> char {
        self.input
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .unwrap_or('\u{FFFD}')
    }

    /// Skip everything at or below the space character, which also
    /// tolerates stray control bytes between tokens
    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if byte > b' ' {
                break;
            }
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: u8) -> Result<()> {
        match self.peek() {
            Some(byte) if byte == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(_) => Err(self.expected_here(expected)),
            None => Err(ParseError::UnexpectedEof(self.pos)),
        }
    }

    fn expected_here(&self, expected: u8) -> ParseError {
        ParseError::Expected {
            expected: expected as char,
            found: self.peek_char(),
            at: self.pos,
        }
    }

    fn unexpected_here(&self) -> ParseError {
        ParseError::UnexpectedChar {
            found: self.peek_char(),
            at: self.pos,
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= MAX_DEPTH {
            return Err(ParseError::MaxDepthExceeded {
                at: self.pos,
                max: MAX_DEPTH,
            });
        }
        Ok(())
    }

    /// Dispatch on the first significant character
    fn parse_value(&mut self, depth: usize) -> Result<JsonValue> {
        self.skip_whitespace();
        match self.peek() {
            None => Err(ParseError::UnexpectedEof(self.pos)),
            Some(b'"') => Ok(JsonValue::String(self.parse_string()?)),
            Some(b'{') => {
                self.check_depth(depth)?;
                self.parse_object(depth)
            }
            Some(b'[') => {
                self.check_depth(depth)?;
                self.parse_array(depth)
            }
            Some(b't') | Some(b'f') | Some(b'n') => self.parse_word(),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(_) => Err(self.unexpected_here()),
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<JsonValue> {
        self.expect(b'{')?;
        let mut entries: Vec<(String, JsonValue)> = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            return Ok(JsonValue::Object(entries));
        }
        loop {
            self.skip_whitespace();
            let key_at = self.pos;
            if self.peek() != Some(b'"') {
                return Err(self.expected_here(b'"'));
            }
            let key = self.parse_string()?;
            if entries.iter().any(|(existing, _)| *existing == key) {
                return Err(ParseError::DuplicateKey { key, at: key_at });
            }
            self.skip_whitespace();
            self.expect(b':')?;
            let value = self.parse_value(depth + 1)?;
            entries.push((key, value));
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    return Ok(JsonValue::Object(entries));
                }
                Some(_) => return Err(self.unexpected_here()),
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<JsonValue> {
        self.expect(b'[')?;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.pos += 1;
            return Ok(JsonValue::Array(items));
        }
        loop {
            items.push(self.parse_value(depth + 1)?);
            self.skip_whitespace();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    return Ok(JsonValue::Array(items));
                }
                Some(_) => return Err(self.unexpected_here()),
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let start = self.pos;
        self.expect(b'"')?;
        let mut out = String::new();
        loop {
            let Some(byte) = self.peek() else {
                return Err(ParseError::UnterminatedString(start));
            };
            match byte {
                b'"' => {
                    self.pos += 1;
                    return Ok(out);
                }
                b'\\' => {
                    self.pos += 1;
                    self.parse_escape(start, &mut out)?;
                }
                _ if byte < 0x80 => {
                    out.push(byte as char);
                    self.pos += 1;
                }
                _ => {
                    let ch = self.peek_char();
                    out.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        }
    }

    /// Cursor sits just past the backslash
    fn parse_escape(&mut self, string_start: usize, out: &mut String) -> Result<()> {
        let escape_at = self.pos - 1;
        let Some(byte) = self.peek() else {
            return Err(ParseError::UnterminatedString(string_start));
        };
        self.pos += 1;
        match byte {
            b'"' => out.push('"'),
            b'\\' => out.push('\\'),
            b'/' => out.push('/'),
            b'b' => out.push('\u{0008}'),
            b'f' => out.push('\u{000C}'),
            b'n' => out.push('\n'),
            b'r' => out.push('\r'),
            b't' => out.push('\t'),
            b'u' => {
                let unit = self.parse_hex4(string_start)?;
                let scalar = if (0xD800..0xDC00).contains(&unit) {
                    let low = self.parse_low_surrogate(string_start, escape_at)?;
                    0x10000 + ((unit as u32 - 0xD800) << 10) + (low as u32 - 0xDC00)
                } else {
                    unit as u32
                };
                match char::from_u32(scalar) {
                    Some(ch) => out.push(ch),
                    None => return Err(ParseError::InvalidEscape(escape_at)),
                }
            }
            _ => return Err(ParseError::InvalidEscape(escape_at)),
        }
        Ok(())
    }

    /// Four hex digits after `\u`
    fn parse_hex4(&mut self, string_start: usize) -> Result<u16> {
        let at = self.pos;
        if at + 4 > self.bytes.len() {
            return Err(ParseError::UnterminatedString(string_start));
        }
        let mut unit: u16 = 0;
        for offset in 0..4 {
            let digit = match self.bytes[at + offset] {
                byte @ b'0'..=b'9' => byte - b'0',
                byte @ b'a'..=b'f' => byte - b'a' + 10,
                byte @ b'A'..=b'F' => byte - b'A' + 10,
                _ => return Err(ParseError::InvalidEscape(at)),
            };
            unit = unit * 16 + digit as u16;
        }
        self.pos += 4;
        Ok(unit)
    }

    /// A high surrogate must be followed by `\uDC00`..`\uDFFF`
    fn parse_low_surrogate(&mut self, string_start: usize, escape_at: usize) -> Result<u16> {
        if self.bytes.get(self.pos) != Some(&b'\\') || self.bytes.get(self.pos + 1) != Some(&b'u')
        {
            return Err(ParseError::InvalidEscape(escape_at));
        }
        self.pos += 2;
        let low = self.parse_hex4(string_start)?;
        if !(0xDC00..0xE000).contains(&low) {
            return Err(ParseError::InvalidEscape(escape_at));
        }
        Ok(low)
    }

    /// Scan the longest run of number-shaped bytes, then let the float
    /// parser judge it. Overflowing literals read as infinite and are
    /// rejected the same way as malformed ones.
    fn parse_number(&mut self) -> Result<JsonValue> {
        let start = self.pos;
        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' | b'+' | b'-' | b'.' | b'e' | b'E' => self.pos += 1,
                _ => break,
            }
        }
        let literal = &self.input[start..self.pos];
        let number: f64 = literal
            .parse()
            .map_err(|_| ParseError::InvalidNumber(start))?;
        if !number.is_finite() {
            return Err(ParseError::InvalidNumber(start));
        }
        Ok(JsonValue::Number(number))
    }

    /// `true`, `false` and `null`, matched character by character
    fn parse_word(&mut self) -> Result<JsonValue> {
        let (word, value) = match self.peek() {
            Some(b't') => ("true", JsonValue::Bool(true)),
            Some(b'f') => ("false", JsonValue::Bool(false)),
            _ => ("null", JsonValue::Null),
        };
        for expected in word.chars() {
            match self.peek() {
                Some(byte) if byte == expected as u8 => self.pos += 1,
                Some(_) => {
                    return Err(ParseError::Expected {
                        expected,
                        found: self.peek_char(),
                        at: self.pos,
                    });
                }
                None => return Err(ParseError::UnexpectedEof(self.pos)),
            }
        }
        Ok(value)
    }
}
