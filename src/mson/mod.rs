//! Mojangson, the text notation for NBT.
//!
//! ```text
//! Root: {name: "Steve", level: 10b, scores: [I;1,2,3], pos: [1.5d, 64.0d, -3.0d]}
//! ```
//!
//! Numbers are typed by suffix: `b` byte, `s` short, `L` long, `f` float,
//! `d` double. Unsuffixed integers are ints and unsuffixed numbers with a
//! `.` are doubles. Any other unquoted word is a string. Lists must hold a
//! single type: `[1, 2.0]` is an error rather than being widened.
//!
//! Printing is compact (`{a:1,b:[I;1,2]}`) or pretty, where containers of
//! only non-containers stay on one line and anything else is broken over
//! indented lines:
//!
//! ```
//! use mcnbt::mson;
//!
//! let nbt = mson::from_str("{list: [{a: 1}, {b: 2s}], n: 5L}").unwrap();
//! assert_eq!(
//!     mson::to_string_pretty(&nbt).unwrap(),
//!     "{\n    list: [\n        {a: 1},\n        {b: 2s}\n    ],\n    n: 5L\n}"
//! );
//! ```

use std::io::{Read, Write};

use log::debug;

use crate::error::Result;
use crate::NamedTag;

mod literal;
mod parser;
mod writer;

pub use parser::Parser;

use writer::Printer;

/// Parse a Mojangson document. The document may be named, eg `Root: {}`,
/// otherwise its name is empty.
pub fn from_str(input: &str) -> Result<NamedTag> {
    Parser::new(input).parse()
}

/// Read all of a reader and parse it as a Mojangson document. The text is
/// taken as is, so line breaks inside quoted strings are kept.
pub fn from_reader<R: Read>(mut reader: R) -> Result<NamedTag> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    let nbt = from_str(&input)?;
    debug!("parsed {} named {:?}", nbt.value().tag(), nbt.name());
    Ok(nbt)
}

/// Render on a single line with no whitespace.
pub fn to_string(nbt: &NamedTag) -> Result<String> {
    render(nbt, false)
}

/// Render across indented lines.
pub fn to_string_pretty(nbt: &NamedTag) -> Result<String> {
    render(nbt, true)
}

/// Write a complete text document: the rendered value followed by a line
/// terminator. Nothing is written if rendering fails.
pub fn to_writer<W: Write>(mut writer: W, nbt: &NamedTag, pretty: bool) -> Result<()> {
    let mut printer = Printer::new(String::new(), pretty);
    printer.write_named(nbt)?;
    printer.end_line()?;
    writer.write_all(printer.into_inner().as_bytes())?;
    Ok(())
}

fn render(nbt: &NamedTag, pretty: bool) -> Result<String> {
    let mut printer = Printer::new(String::new(), pretty);
    printer.write_named(nbt)?;
    Ok(printer.into_inner())
}
