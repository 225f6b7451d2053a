use std::fmt::{self, Write};

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::Tag;

/// Value is a complete NBT value. It owns its data. Compounds and Lists own
/// their children outright, so a tree never shares nodes or contains cycles.
///
/// `Display` renders the canonical single line Mojangson literal of the value,
/// eg `10b`, `[I;1,2,3]` or `{a:1,"b c":"text"}`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Only meaningful as the terminator of a compound in the binary format.
    /// Never stored inside a [`List`] or [`Compound`].
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// The type code of this value.
    pub fn tag(&self) -> Tag {
        match self {
            Value::End => Tag::End,
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    pub fn is_container(&self) -> bool {
        self.tag().is_container()
    }

    /// Any numeric value as an i64. Floats are truncated toward zero.
    pub fn as_i64(&self) -> Option<i64> {
        Some(match *self {
            Value::Byte(v) => v.into(),
            Value::Short(v) => v.into(),
            Value::Int(v) => v.into(),
            Value::Long(v) => v,
            Value::Float(v) => v as i64,
            Value::Double(v) => v as i64,
            _ => return None,
        })
    }

    /// Any numeric value as an f64. Longs beyond 2^53 lose precision.
    pub fn as_f64(&self) -> Option<f64> {
        Some(match *self {
            Value::Byte(v) => v.into(),
            Value::Short(v) => v.into(),
            Value::Int(v) => v.into(),
            Value::Long(v) => v as f64,
            Value::Float(v) => v.into(),
            Value::Double(v) => v,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(v) => Some(v),
            _ => None,
        }
    }
}

/// An NBT list. Every element has the list's element type; an empty list may
/// declare any element type, including End.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element: Tag,
    items: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::empty()
    }
}

impl List {
    /// An empty list of element type End.
    pub fn empty() -> Self {
        Self {
            element: Tag::End,
            items: Vec::new(),
        }
    }

    /// A list of the given element type. Fails if any item is of a different
    /// type, or if End typed list is given items.
    pub fn new(element: Tag, items: Vec<Value>) -> Result<Self> {
        if element == Tag::End && !items.is_empty() {
            return Err(Error::structure("list of TAG_End is not empty"));
        }
        if let Some(item) = items.iter().find(|item| item.tag() != element) {
            return Err(mismatch(element, item.tag()));
        }
        Ok(Self { element, items })
    }

    /// A list typed by its first item.
    pub fn from_values(items: Vec<Value>) -> Result<Self> {
        let element = items.first().map_or(Tag::End, Value::tag);
        Self::new(element, items)
    }

    pub fn element_tag(&self) -> Tag {
        self.element
    }

    /// Append an item. The first item pushed to an End typed list decides
    /// the element type.
    pub fn push(&mut self, item: Value) -> Result<()> {
        let tag = item.tag();
        if tag == Tag::End {
            return Err(Error::structure("TAG_End cannot be a list element"));
        }
        if self.element == Tag::End && self.items.is_empty() {
            self.element = tag;
        } else if tag != self.element {
            return Err(mismatch(self.element, tag));
        }
        self.items.push(item);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

fn mismatch(expected: Tag, found: Tag) -> Error {
    Error::structure(format!(
        "list of {} cannot hold {} element",
        expected, found
    ))
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An NBT compound. Keys keep the order they were first inserted in, which
/// is the order they are written and printed in.
#[derive(Debug, Clone, Default)]
pub struct Compound(IndexMap<String, Value>);

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value of the key. Replacing a
    /// value keeps the key where it was. End values are refused.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Result<Option<Value>> {
        if value.tag() == Tag::End {
            return Err(Error::structure("compound cannot hold TAG_End value"));
        }
        Ok(self.0.insert(key.into(), value))
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Remove a key, keeping the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }
}

// Key order is part of a compound's identity.
impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl<'a> IntoIterator for &'a Compound {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A value together with its name. This is the unit of a whole document; the
/// root name is usually empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedTag {
    name: String,
    value: Value,
}

impl NamedTag {
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn into_value(self) -> Value {
        self.value
    }

    pub fn into_parts(self) -> (String, Value) {
        (self.name, self.value)
    }
}

// ------------- Mojangson literals -------------

/// Whether a key or literal can be written without quotes.
pub(crate) fn is_bare(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_bare_byte)
}

pub(crate) fn is_bare_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'+' | b'-')
}

pub(crate) fn write_quoted<W: Write>(mut w: W, v: &str) -> fmt::Result {
    w.write_char('"')?;
    let mut start = 0;
    for (i, c) in v.char_indices() {
        if c != '"' && c != '\\' {
            continue;
        }
        w.write_str(&v[start..i])?;
        w.write_char('\\')?;
        w.write_char(c)?;
        start = i + 1;
    }
    w.write_str(&v[start..])?;
    w.write_char('"')
}

pub(crate) fn write_key<W: Write>(mut w: W, key: &str) -> fmt::Result {
    if is_bare(key) {
        w.write_str(key)
    } else {
        write_quoted(w, key)
    }
}

fn write_int<W: Write, I: itoa::Integer>(mut w: W, v: I, suffix: &str) -> fmt::Result {
    let mut buffer = itoa::Buffer::new();
    w.write_str(buffer.format(v))?;
    w.write_str(suffix)
}

fn write_float<W: Write, F: ryu::Float>(mut w: W, v: F, suffix: &str) -> fmt::Result {
    let mut buffer = ryu::Buffer::new();
    w.write_str(buffer.format(v))?;
    w.write_str(suffix)
}

fn write_array<W: Write, I: itoa::Integer + Copy>(
    mut w: W,
    prefix: &str,
    data: &[I],
    suffix: &str,
) -> fmt::Result {
    w.write_str(prefix)?;
    for (i, v) in data.iter().enumerate() {
        if i != 0 {
            w.write_char(',')?;
        }
        write_int(&mut w, *v, suffix)?;
    }
    w.write_char(']')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // End has no literal of its own.
            Value::End => Ok(()),
            Value::Byte(v) => write_int(f, *v, "b"),
            Value::Short(v) => write_int(f, *v, "s"),
            Value::Int(v) => write_int(f, *v, ""),
            Value::Long(v) => write_int(f, *v, "L"),
            Value::Float(v) => write_float(f, *v, "f"),
            Value::Double(v) => write_float(f, *v, "d"),
            Value::String(v) => write_quoted(f, v),
            Value::ByteArray(v) => write_array(f, "[B;", v, "B"),
            Value::IntArray(v) => write_array(f, "[I;", v, ""),
            Value::LongArray(v) => write_array(f, "[L;", v, "L"),
            Value::List(list) => {
                f.write_char('[')?;
                for (i, v) in list.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    fmt::Display::fmt(v, f)?;
                }
                f.write_char(']')
            }
            Value::Compound(compound) => {
                f.write_char('{')?;
                for (i, (k, v)) in compound.iter().enumerate() {
                    if i != 0 {
                        f.write_char(',')?;
                    }
                    write_key(&mut *f, k)?;
                    f.write_char(':')?;
                    fmt::Display::fmt(v, f)?;
                }
                f.write_char('}')
            }
        }
    }
}

// ------------- conversions -------------

macro_rules! value_from {
    ($($type:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    String => String,
    Vec<i8> => ByteArray,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
    List => List,
    Compound => Compound,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

/// Booleans are stored as bytes, 1 for true.
impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Byte(v as i8)
    }
}

#[cfg(feature = "arbitrary1")]
mod fuzzing {
    use arbitrary::{Arbitrary, Error, Result, Unstructured};

    use super::{Compound, List, Value};
    use crate::Tag;

    // Keeps generated trees small enough to be useful.
    const MAX_ENTRIES: usize = 8;

    fn value_of<'a>(tag: Tag, u: &mut Unstructured<'a>) -> Result<Value> {
        Ok(match tag {
            Tag::End => return Err(Error::IncorrectFormat),
            Tag::Byte => Value::Byte(u.arbitrary()?),
            Tag::Short => Value::Short(u.arbitrary()?),
            Tag::Int => Value::Int(u.arbitrary()?),
            Tag::Long => Value::Long(u.arbitrary()?),
            Tag::Float => Value::Float(u.arbitrary()?),
            Tag::Double => Value::Double(u.arbitrary()?),
            Tag::ByteArray => Value::ByteArray(u.arbitrary()?),
            Tag::String => Value::String(u.arbitrary()?),
            Tag::List => Value::List(u.arbitrary()?),
            Tag::Compound => Value::Compound(u.arbitrary()?),
            Tag::IntArray => Value::IntArray(u.arbitrary()?),
            Tag::LongArray => Value::LongArray(u.arbitrary()?),
        })
    }

    impl<'a> Arbitrary<'a> for Value {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            let tag = u.arbitrary()?;
            value_of(tag, u)
        }
    }

    impl<'a> Arbitrary<'a> for List {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            let element: Tag = u.arbitrary()?;
            let mut items = Vec::new();
            if element != Tag::End {
                for _ in 0..u.int_in_range(0..=MAX_ENTRIES)? {
                    items.push(value_of(element, u)?);
                }
            }
            List::new(element, items).map_err(|_| Error::IncorrectFormat)
        }
    }

    impl<'a> Arbitrary<'a> for Compound {
        fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
            let mut compound = Compound::new();
            for _ in 0..u.int_in_range(0..=MAX_ENTRIES)? {
                let key: String = u.arbitrary()?;
                let value: Value = u.arbitrary()?;
                compound
                    .insert(key, value)
                    .map_err(|_| Error::IncorrectFormat)?;
            }
            Ok(compound)
        }
    }
}
