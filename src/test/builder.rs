use byteorder::{BigEndian, WriteBytesExt};

use crate::Tag;

/// Hand assembles binary NBT for tests. Nothing is checked, so truncated and
/// malformed documents are as easy to make as good ones.
#[derive(Default)]
pub struct Builder {
    bytes: Vec<u8>,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }

    /// Append bytes as is, for corners no other method reaches.
    pub fn raw_bytes(mut self, bs: &[u8]) -> Self {
        self.bytes.extend_from_slice(bs);
        self
    }

    pub fn tag(mut self, tag: Tag) -> Self {
        self.bytes.push(tag.into());
        self
    }

    /// A u16 length prefixed UTF-8 string. Names and string payloads share
    /// this layout.
    pub fn name(mut self, name: &str) -> Self {
        self.bytes.write_u16::<BigEndian>(name.len() as u16).unwrap();
        self.raw_bytes(name.as_bytes())
    }

    fn named(self, tag: Tag, name: &str) -> Self {
        self.tag(tag).name(name)
    }

    // Containers. Compounds are closed by hand with `end_compound`; lists
    // just need the promised number of payloads to follow.

    pub fn start_compound(self, name: &str) -> Self {
        self.named(Tag::Compound, name)
    }

    pub fn end_compound(self) -> Self {
        self.tag(Tag::End)
    }

    pub fn start_list(self, name: &str, element: Tag, len: i32) -> Self {
        self.named(Tag::List, name).start_anon_list(element, len)
    }

    /// A list header without tag or name, as found inside another list.
    pub fn start_anon_list(self, element: Tag, len: i32) -> Self {
        self.tag(element).int_payload(len)
    }

    // Payloads.

    pub fn byte_payload(mut self, v: i8) -> Self {
        self.bytes.write_i8(v).unwrap();
        self
    }

    pub fn short_payload(mut self, v: i16) -> Self {
        self.bytes.write_i16::<BigEndian>(v).unwrap();
        self
    }

    pub fn int_payload(mut self, v: i32) -> Self {
        self.bytes.write_i32::<BigEndian>(v).unwrap();
        self
    }

    pub fn long_payload(mut self, v: i64) -> Self {
        self.bytes.write_i64::<BigEndian>(v).unwrap();
        self
    }

    pub fn float_payload(mut self, v: f32) -> Self {
        self.bytes.write_f32::<BigEndian>(v).unwrap();
        self
    }

    pub fn double_payload(mut self, v: f64) -> Self {
        self.bytes.write_f64::<BigEndian>(v).unwrap();
        self
    }

    pub fn string_payload(self, s: &str) -> Self {
        self.name(s)
    }

    fn array_payload<T: Copy>(self, items: &[T], write: fn(Self, T) -> Self) -> Self {
        items
            .iter()
            .fold(self.int_payload(items.len() as i32), |b, &item| write(b, item))
    }

    // Whole named tags.

    pub fn byte(self, name: &str, v: i8) -> Self {
        self.named(Tag::Byte, name).byte_payload(v)
    }

    pub fn short(self, name: &str, v: i16) -> Self {
        self.named(Tag::Short, name).short_payload(v)
    }

    pub fn int(self, name: &str, v: i32) -> Self {
        self.named(Tag::Int, name).int_payload(v)
    }

    pub fn long(self, name: &str, v: i64) -> Self {
        self.named(Tag::Long, name).long_payload(v)
    }

    pub fn float(self, name: &str, v: f32) -> Self {
        self.named(Tag::Float, name).float_payload(v)
    }

    pub fn double(self, name: &str, v: f64) -> Self {
        self.named(Tag::Double, name).double_payload(v)
    }

    pub fn string(self, name: &str, s: &str) -> Self {
        self.named(Tag::String, name).string_payload(s)
    }

    pub fn byte_array(self, name: &str, v: &[i8]) -> Self {
        self.named(Tag::ByteArray, name)
            .array_payload(v, Self::byte_payload)
    }

    pub fn int_array(self, name: &str, v: &[i32]) -> Self {
        self.named(Tag::IntArray, name)
            .array_payload(v, Self::int_payload)
    }

    pub fn long_array(self, name: &str, v: &[i64]) -> Self {
        self.named(Tag::LongArray, name)
            .array_payload(v, Self::long_payload)
    }
}
