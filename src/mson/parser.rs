use std::str::FromStr;

use log::trace;

use crate::error::{Error, Result};
use crate::value::is_bare_byte;
use crate::{Compound, List, NamedTag, Tag, Value, DEFAULT_MAX_DEPTH};

use super::literal;

/// Recursive descent parser for a single Mojangson document:
/// an optional `name:` prefix followed by one value.
///
/// ```
/// use mcnbt::{mson::Parser, Value};
///
/// let nbt = Parser::new("{a: [1, 2, 3]}").with_max_depth(8).parse().unwrap();
/// assert_eq!(nbt.name(), "");
/// assert!(matches!(nbt.value(), Value::Compound(_)));
/// ```
pub struct Parser<'a> {
    input: &'a str,
    index: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            index: 0,
            depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deep compounds and lists may be nested.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse the whole input. Anything but whitespace after the value is an
    /// error.
    pub fn parse(mut self) -> Result<NamedTag> {
        let name = self.parse_document_name();
        let value = self.parse_value()?;

        self.skip_whitespace();
        if self.index != self.input.len() {
            return Err(self.error("unexpected trailing data"));
        }

        Ok(NamedTag::new(name, value))
    }

    /// A leading `key:` names the document. Without one the name is empty
    /// and nothing is consumed.
    fn parse_document_name(&mut self) -> String {
        let start = self.index;
        if let Ok(key) = self.parse_key() {
            self.skip_whitespace();
            if self.peek() == Some(b':') {
                self.index += 1;
                return key;
            }
        }
        self.index = start;
        String::new()
    }

    fn parse_value(&mut self) -> Result<Value> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'{') => self.parse_compound(),
            Some(b'[') => self.parse_list_or_array(),
            Some(b'"') | Some(b'\'') => Ok(Value::String(self.parse_quoted()?)),
            Some(b) if is_bare_byte(b) => Ok(literal::classify(self.parse_bare())),
            Some(_) => Err(self.error("expected value")),
            None => Err(self.error("expected value but reached end of input")),
        }
    }

    fn parse_compound(&mut self) -> Result<Value> {
        self.expect(b'{', "expected '{'")?;
        self.enter()?;

        let mut compound = Compound::new();
        self.skip_whitespace();
        if self.peek() == Some(b'}') {
            self.index += 1;
        } else {
            loop {
                let key = self.parse_key()?;
                self.skip_whitespace();
                self.expect(b':', "expected ':'")?;
                let value = self.parse_value()?;

                // Later duplicates overwrite in place.
                compound.insert(key, value)?;

                if self.end_of_entry(b'}', "expected ',' or '}'")? {
                    break;
                }
            }
        }

        self.leave();
        Ok(Value::Compound(compound))
    }

    fn parse_list_or_array(&mut self) -> Result<Value> {
        self.expect(b'[', "expected '['")?;
        self.skip_whitespace();

        if let Some(kind @ (b'B' | b'I' | b'L')) = self.peek() {
            let after = self.input.as_bytes()[self.index + 1..]
                .iter()
                .position(|b| !b.is_ascii_whitespace())
                .map(|offset| self.index + 1 + offset);

            if let Some(semicolon) = after.filter(|&i| self.input.as_bytes()[i] == b';') {
                self.index = semicolon + 1;
                return match kind {
                    b'B' => self.parse_array_items(b"bB", "byte").map(Value::ByteArray),
                    b'I' => self.parse_array_items(b"", "int").map(Value::IntArray),
                    _ => self.parse_array_items(b"lL", "long").map(Value::LongArray),
                };
            }
        }

        self.parse_list()
    }

    fn parse_list(&mut self) -> Result<Value> {
        self.enter()?;

        let mut element = Tag::End;
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.index += 1;
        } else {
            loop {
                let value = self.parse_value()?;
                if items.is_empty() {
                    element = value.tag();
                } else if value.tag() != element {
                    return Err(Error::list_type_mismatch(
                        &format!(
                            "can't insert {} into list of {}",
                            value.tag(),
                            element
                        ),
                        self.input,
                        self.index,
                    ));
                }
                items.push(value);

                if self.end_of_entry(b']', "expected ',' or ']'")? {
                    break;
                }
            }
        }

        self.leave();
        Ok(Value::List(List::new(element, items)?))
    }

    fn parse_array_items<T: FromStr>(&mut self, suffixes: &[u8], what: &str) -> Result<Vec<T>> {
        let mut items = Vec::new();
        self.skip_whitespace();
        if self.peek() == Some(b']') {
            self.index += 1;
            return Ok(items);
        }

        loop {
            self.skip_whitespace();
            if !matches!(self.peek(), Some(b) if is_bare_byte(b)) {
                return Err(self.error("expected number"));
            }
            let token = self.parse_bare();
            let item = literal::array_element(token, suffixes).ok_or_else(|| {
                self.error(&format!("invalid {} array element '{}'", what, token))
            })?;
            items.push(item);

            if self.end_of_entry(b']', "expected ',' or ']'")? {
                return Ok(items);
            }
        }
    }

    /// After an entry: consume a `,` and return false, or consume `close`
    /// and return true.
    fn end_of_entry(&mut self, close: u8, msg: &str) -> Result<bool> {
        self.skip_whitespace();
        match self.peek() {
            Some(b',') => {
                self.index += 1;
                Ok(false)
            }
            Some(b) if b == close => {
                self.index += 1;
                Ok(true)
            }
            _ => Err(self.error(msg)),
        }
    }

    fn parse_key(&mut self) -> Result<String> {
        self.skip_whitespace();
        match self.peek() {
            Some(b'"') | Some(b'\'') => self.parse_quoted(),
            Some(b) if is_bare_byte(b) => Ok(self.parse_bare().to_owned()),
            _ => Err(self.error("expected key")),
        }
    }

    fn parse_bare(&mut self) -> &'a str {
        let input = self.input;
        let start = self.index;
        while matches!(self.peek(), Some(b) if is_bare_byte(b)) {
            self.index += 1;
        }
        &input[start..self.index]
    }

    /// A string in either quote style. Inside, only the enclosing quote and
    /// the backslash may be escaped.
    fn parse_quoted(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ (b'"' | b'\'')) => q,
            _ => return Err(self.error("expected quoted string")),
        };
        self.index += 1;

        // Quotes and backslashes are ASCII, so every slice taken here is on
        // a char boundary.
        let mut owned = String::new();
        let mut start = self.index;
        loop {
            match self.peek() {
                None => return Err(self.error("unterminated string")),
                Some(b) if b == quote => {
                    owned.push_str(&self.input[start..self.index]);
                    self.index += 1;
                    return Ok(owned);
                }
                Some(b'\\') => {
                    owned.push_str(&self.input[start..self.index]);
                    self.index += 1;
                    match self.peek() {
                        Some(b) if b == quote || b == b'\\' => {
                            owned.push(b as char);
                            self.index += 1;
                            start = self.index;
                        }
                        _ => return Err(self.error("invalid escape sequence")),
                    }
                }
                Some(_) => self.index += 1,
            }
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.max_depth {
            return Err(Error::depth_exceeded(self.max_depth));
        }
        trace!("entering depth {}", self.depth);
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expect(&mut self, b: u8, msg: &str) -> Result<()> {
        if self.peek() != Some(b) {
            return Err(self.error(msg));
        }
        self.index += 1;
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.index).copied()
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.index += 1;
        }
    }

    fn error(&self, msg: &str) -> Error {
        Error::syntax(msg, self.input, self.index)
    }
}
