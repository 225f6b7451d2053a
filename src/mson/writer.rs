use std::fmt::{self, Write};

use crate::error::{Error, Result};
use crate::value::write_key;
use crate::{Compound, List, NamedTag, Value};

const INDENT: &str = "    ";

/// Prints values as Mojangson, either compact or pretty.
///
/// Pretty printing puts a container on one line when it is empty or all of
/// its children are non-containers, eg `{a: 1, b: [I;1,2]}`. Any other
/// container gets one child per line, indented four spaces per level. The
/// choice is made separately for every container.
pub(crate) struct Printer<W> {
    out: W,
    pretty: bool,
    indent: usize,
}

impl<W: Write> Printer<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        Self {
            out,
            pretty,
            indent: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn write_named(&mut self, nbt: &NamedTag) -> Result<()> {
        if let Value::End = nbt.value() {
            return Err(Error::structure("TAG_End has no mojangson form"));
        }

        if !nbt.name().is_empty() {
            write_key(&mut self.out, nbt.name())?;
            self.out.write_char(':')?;
            if self.pretty {
                self.out.write_char(' ')?;
            }
        }

        self.write_value(nbt.value())?;
        Ok(())
    }

    pub fn end_line(&mut self) -> Result<()> {
        self.out.write_char('\n')?;
        Ok(())
    }

    fn write_value(&mut self, value: &Value) -> fmt::Result {
        match value {
            Value::Compound(compound) if self.pretty => self.write_compound(compound),
            Value::List(list) if self.pretty => self.write_list(list),
            other => write!(self.out, "{}", other),
        }
    }

    fn write_compound(&mut self, compound: &Compound) -> fmt::Result {
        let simple = compound.values().all(|v| !v.is_container());

        self.out.write_char('{')?;
        self.write_entries(simple, compound, |p, (key, value)| {
            write_key(&mut p.out, key)?;
            p.out.write_str(": ")?;
            p.write_value(value)
        })?;
        self.out.write_char('}')
    }

    fn write_list(&mut self, list: &List) -> fmt::Result {
        let simple = list.iter().all(|v| !v.is_container());

        self.out.write_char('[')?;
        self.write_entries(simple, list, |p, value| p.write_value(value))?;
        self.out.write_char(']')
    }

    fn write_entries<I, F>(&mut self, simple: bool, entries: I, mut write_entry: F) -> fmt::Result
    where
        I: IntoIterator,
        F: FnMut(&mut Self, I::Item) -> fmt::Result,
    {
        let mut entries = entries.into_iter().peekable();
        if entries.peek().is_none() {
            return Ok(());
        }

        if simple {
            let mut first = true;
            for entry in entries {
                if !first {
                    self.out.write_str(", ")?;
                }
                first = false;
                write_entry(self, entry)?;
            }
            return Ok(());
        }

        self.indent += 1;
        self.new_line()?;
        let mut first = true;
        for entry in entries {
            if !first {
                self.out.write_char(',')?;
                self.new_line()?;
            }
            first = false;
            write_entry(self, entry)?;
        }
        self.indent -= 1;
        self.new_line()
    }

    fn new_line(&mut self) -> fmt::Result {
        self.out.write_char('\n')?;
        for _ in 0..self.indent {
            self.out.write_str(INDENT)?;
        }
        Ok(())
    }
}
