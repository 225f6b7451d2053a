//! Reading and writing the binary NBT format.
//!
//! A document is a single named tag: a type code byte, a big-endian `u16`
//! length prefixed UTF-8 name, then the payload of that type. Compounds are a
//! run of named tags closed by an End type code. Lists hold a type code, an
//! `i32` length and that many unnamed payloads.
//!
//! ```
//! use mcnbt::{Compound, Config, NamedTag, Value};
//!
//! # fn main() -> mcnbt::error::Result<()> {
//! let mut compound = Compound::new();
//! compound.insert("DataVersion", Value::Int(3465))?;
//! let nbt = NamedTag::new("", compound);
//!
//! let config = Config::default().with_compression(true);
//! let bytes = mcnbt::to_bytes(&nbt, &config)?;
//! assert_eq!(mcnbt::from_bytes(&bytes, &config)?, nbt);
//! # Ok(())
//! # }
//! ```
//!
//! For streams holding several top-level tags one after another use a
//! [`Decoder`] directly. It reports the clean end of the input as `None`.

use std::io::{Read, Write};

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use log::{debug, trace};

use crate::error::{Error, Result};
use crate::{Compound, Config, List, NamedTag, Tag, Value, DEFAULT_MAX_DEPTH};

// Upper bound on what a length prefix alone can make us allocate up front.
const MAX_PREALLOC: usize = 4096;

pub(crate) trait ReadNbt: Read {
    /// Read a type code. `None` if the input ended cleanly before it.
    fn read_tag_or_eof(&mut self) -> Result<Option<Tag>> {
        let tag = match self.read_u8() {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        u8_to_tag(tag).map(Some)
    }

    fn read_tag(&mut self) -> Result<Tag> {
        u8_to_tag(self.read_u8()?)
    }

    fn read_size_prefixed_string(&mut self) -> Result<String> {
        let len = self.read_u16::<BigEndian>()? as usize;

        let mut buf = vec![0; len];
        self.read_exact(&mut buf[..])?;

        String::from_utf8(buf).map_err(|e| Error::nonunicode(e.into_bytes()))
    }

    fn read_len(&mut self) -> Result<usize> {
        let len = self.read_i32::<BigEndian>()?;
        usize::try_from(len).map_err(|_| Error::structure(format!("negative length: {}", len)))
    }
}

impl<T> ReadNbt for T where T: Read {}

pub(crate) trait WriteNbt: Write {
    fn write_tag(&mut self, tag: Tag) -> Result<()> {
        self.write_u8(tag.into())?;
        Ok(())
    }

    fn write_size_prefixed_str(&mut self, s: &str) -> Result<()> {
        let len = u16::try_from(s.len())
            .map_err(|_| Error::structure(format!("string too long: {} bytes", s.len())))?;
        self.write_u16::<BigEndian>(len)?;
        self.write_all(s.as_bytes())?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len = i32::try_from(len)
            .map_err(|_| Error::structure(format!("len too large: {}", len)))?;
        self.write_i32::<BigEndian>(len)?;
        Ok(())
    }
}

impl<T> WriteNbt for T where T: Write {}

fn u8_to_tag(tag: u8) -> Result<Tag> {
    Tag::try_from(tag).map_err(|_| Error::invalid_tag(tag))
}

/// Decoder reads whole named tags from any reader. Does not do decompression.
///
/// ```
/// use mcnbt::io::Decoder;
///
/// // A Byte named "a" holding 7, followed by a Short named "b" holding 2.
/// let data = [1u8, 0, 1, b'a', 7, 2, 0, 1, b'b', 0, 2];
/// let mut decoder = Decoder::new(&data[..]);
///
/// let mut names = vec![];
/// while let Some(tag) = decoder.next_named().unwrap() {
///     names.push(tag.name().to_owned());
/// }
/// assert_eq!(names, ["a", "b"]);
/// ```
pub struct Decoder<R: Read> {
    reader: R,
    max_depth: usize,
}

impl<R: Read> Decoder<R> {
    /// Create new decoder for the given reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit how deep compounds and lists may be nested.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Read the next top-level named tag. Returns `None` if the input is
    /// exhausted before its type code, which is the only place the end of
    /// input is not an error.
    pub fn next_named(&mut self) -> Result<Option<NamedTag>> {
        self.read_named(0)
    }

    /// Gets a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consumes this decoder, returning the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn read_named(&mut self, depth: usize) -> Result<Option<NamedTag>> {
        let tag = match self.reader.read_tag_or_eof()? {
            Some(tag) => tag,
            None => return Ok(None),
        };

        // End tags have no name or value.
        let name = if tag == Tag::End {
            String::new()
        } else {
            self.reader.read_size_prefixed_string()?
        };

        let value = self.read_payload(tag, depth)?;
        Ok(Some(NamedTag::new(name, value)))
    }

    fn read_payload(&mut self, tag: Tag, depth: usize) -> Result<Value> {
        Ok(match tag {
            Tag::End => {
                if depth == 0 {
                    return Err(Error::structure(
                        "TAG_End found without a TAG_Compound preceding it",
                    ));
                }
                Value::End
            }
            Tag::Byte => Value::Byte(self.reader.read_i8()?),
            Tag::Short => Value::Short(self.reader.read_i16::<BigEndian>()?),
            Tag::Int => Value::Int(self.reader.read_i32::<BigEndian>()?),
            Tag::Long => Value::Long(self.reader.read_i64::<BigEndian>()?),
            Tag::Float => Value::Float(self.reader.read_f32::<BigEndian>()?),
            Tag::Double => Value::Double(self.reader.read_f64::<BigEndian>()?),
            Tag::String => Value::String(self.reader.read_size_prefixed_string()?),
            Tag::ByteArray => {
                let len = self.reader.read_len()?;
                let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
                (&mut self.reader).take(len as u64).read_to_end(&mut buf)?;
                if buf.len() != len {
                    return Err(Error::unexpected_eof());
                }
                Value::ByteArray(buf.into_iter().map(|b| b as i8).collect())
            }
            Tag::IntArray => {
                let len = self.reader.read_len()?;
                let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
                for _ in 0..len {
                    buf.push(self.reader.read_i32::<BigEndian>()?);
                }
                Value::IntArray(buf)
            }
            Tag::LongArray => {
                let len = self.reader.read_len()?;
                let mut buf = Vec::with_capacity(len.min(MAX_PREALLOC));
                for _ in 0..len {
                    buf.push(self.reader.read_i64::<BigEndian>()?);
                }
                Value::LongArray(buf)
            }
            Tag::List => {
                let depth = self.enter(depth)?;
                let element = self.reader.read_tag()?;
                let len = self.reader.read_len()?;
                if element == Tag::End && len > 0 {
                    return Err(Error::structure("list is of type TAG_End but not empty"));
                }

                let mut items = Vec::with_capacity(len.min(MAX_PREALLOC));
                for _ in 0..len {
                    items.push(self.read_payload(element, depth)?);
                }
                Value::List(List::new(element, items)?)
            }
            Tag::Compound => {
                let depth = self.enter(depth)?;
                let mut compound = Compound::new();
                loop {
                    let named = self
                        .read_named(depth)?
                        .ok_or_else(|| Error::unexpected_eof_in("compound"))?;
                    let (name, value) = named.into_parts();
                    if value == Value::End {
                        break;
                    }
                    compound.insert(name, value)?;
                }
                Value::Compound(compound)
            }
        })
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(Error::depth_exceeded(self.max_depth));
        }
        trace!("entering depth {}", depth);
        Ok(depth)
    }
}

/// Encoder writes named tags to any writer. Does not do compression.
pub struct Encoder<W: Write> {
    writer: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a whole named tag. End can never be named, so writing an End
    /// value fails without writing anything.
    pub fn write_named(&mut self, nbt: &NamedTag) -> Result<()> {
        self.write_named_value(nbt.name(), nbt.value())
    }

    /// Gets a reference to the underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Consumes this encoder, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_named_value(&mut self, name: &str, value: &Value) -> Result<()> {
        let tag = value.tag();
        if tag == Tag::End {
            return Err(Error::structure("named TAG_End not permitted"));
        }

        self.writer.write_tag(tag)?;
        self.writer.write_size_prefixed_str(name)?;
        self.write_payload(value)
    }

    fn write_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::End => {}
            Value::Byte(v) => self.writer.write_i8(*v)?,
            Value::Short(v) => self.writer.write_i16::<BigEndian>(*v)?,
            Value::Int(v) => self.writer.write_i32::<BigEndian>(*v)?,
            Value::Long(v) => self.writer.write_i64::<BigEndian>(*v)?,
            Value::Float(v) => self.writer.write_f32::<BigEndian>(*v)?,
            Value::Double(v) => self.writer.write_f64::<BigEndian>(*v)?,
            Value::String(v) => self.writer.write_size_prefixed_str(v)?,
            Value::ByteArray(v) => {
                self.writer.write_len(v.len())?;
                let bytes: Vec<u8> = v.iter().map(|b| *b as u8).collect();
                self.writer.write_all(&bytes)?;
            }
            Value::IntArray(v) => {
                self.writer.write_len(v.len())?;
                for n in v {
                    self.writer.write_i32::<BigEndian>(*n)?;
                }
            }
            Value::LongArray(v) => {
                self.writer.write_len(v.len())?;
                for n in v {
                    self.writer.write_i64::<BigEndian>(*n)?;
                }
            }
            Value::List(list) => {
                let element = list.element_tag();
                self.writer.write_tag(element)?;
                self.writer.write_len(list.len())?;
                for item in list {
                    if item.tag() != element {
                        return Err(Error::structure(format!(
                            "list of {} holds {} element",
                            element,
                            item.tag()
                        )));
                    }
                    self.write_payload(item)?;
                }
            }
            Value::Compound(compound) => {
                for (name, value) in compound {
                    self.write_named_value(name, value)?;
                }
                self.writer.write_tag(Tag::End)?;
            }
        }
        Ok(())
    }
}

/// Read one whole document from a reader, decompressing it first if the
/// config says so. Uncompressed input is read only up to the end of the
/// document, so several documents can be read from one `&mut` reader.
/// Compressed input is read through its gzip trailer, which is checked.
pub fn from_reader<R: Read>(reader: R, config: &Config) -> Result<NamedTag> {
    if config.compressed {
        decode_document(gunzip(reader)?.as_slice(), config)
    } else {
        decode_document(reader, config)
    }
}

/// Read one whole document from a byte slice.
pub fn from_bytes(bytes: &[u8], config: &Config) -> Result<NamedTag> {
    if config.compressed {
        decode_document(gunzip(bytes)?.as_slice(), config)
    } else {
        decode_document(bytes, config)
    }
}

// Inflates the whole member, so the trailer is checked and a truncated
// stream is an error here instead of an early end of input.
fn gunzip<R: Read>(reader: R) -> Result<Vec<u8>> {
    let mut raw = Vec::new();
    GzDecoder::new(reader).read_to_end(&mut raw)?;
    trace!("inflated {} bytes", raw.len());
    Ok(raw)
}

fn decode_document<R: Read>(reader: R, config: &Config) -> Result<NamedTag> {
    let mut decoder = Decoder::new(reader).with_max_depth(config.max_depth);
    let nbt = decoder
        .next_named()?
        .ok_or_else(|| Error::structure("no nbt data in input"))?;

    debug!(
        "decoded {} named {:?} (compressed: {})",
        nbt.value().tag(),
        nbt.name(),
        config.compressed
    );
    Ok(nbt)
}

/// Write one whole document, compressing it if the config says so. The
/// document is encoded in full before anything reaches the writer, so a
/// failed encode writes nothing.
pub fn to_writer<W: Write>(mut writer: W, nbt: &NamedTag, config: &Config) -> Result<()> {
    let mut encoder = Encoder::new(Vec::new());
    encoder.write_named(nbt)?;
    let raw = encoder.into_inner();

    debug!(
        "encoded {} named {:?}: {} bytes (compressed: {})",
        nbt.value().tag(),
        nbt.name(),
        raw.len(),
        config.compressed
    );

    if config.compressed {
        let mut gz = GzEncoder::new(writer, Compression::default());
        gz.write_all(&raw)?;
        gz.finish()?;
    } else {
        writer.write_all(&raw)?;
    }
    Ok(())
}

/// Write one whole document to a new byte vector.
pub fn to_bytes(nbt: &NamedTag, config: &Config) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    to_writer(&mut out, nbt, config)?;
    Ok(out)
}
