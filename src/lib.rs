//! mcnbt reads and writes NBT, the hierarchical binary tag format used by
//! *Minecraft: Java Edition*, and its text notation Mojangson (also known as
//! stringified NBT).
//!
//! * For the in-memory tree see [`Value`], [`List`], [`Compound`] and
//!   [`NamedTag`].
//! * For the binary format see [`io`], or the shortcuts [`from_bytes`],
//!   [`from_reader`], [`to_bytes`] and [`to_writer`].
//! * For Mojangson see [`mson`].
//!
//! # Quick example
//!
//! Read a gzip compressed player file and print it as pretty Mojangson.
//!
//! ```no_run
//! use mcnbt::{Config, error::Result};
//!
//! fn main() -> Result<()> {
//!     let file = std::fs::File::open("player.dat")?;
//!     let config = Config::default().with_compression(true);
//!
//!     let nbt = mcnbt::from_reader(file, &config)?;
//!     println!("{}", mcnbt::mson::to_string_pretty(&nbt)?);
//!     Ok(())
//! }
//! ```
//!
//! # Mojangson
//!
//! ```
//! use mcnbt::{mson, Value};
//!
//! let nbt = mson::from_str(r#"Root: {name: "Steve", level: 10b, pos: [1.5d, 64.0d, -3.0d]}"#).unwrap();
//! assert_eq!(nbt.name(), "Root");
//!
//! let compound = nbt.value().as_compound().unwrap();
//! assert_eq!(compound.get("level"), Some(&Value::Byte(10)));
//!
//! assert_eq!(
//!     mson::to_string(&nbt).unwrap(),
//!     r#"Root:{name:"Steve",level:10b,pos:[1.5d,64.0d,-3.0d]}"#
//! );
//! ```

use num_enum::{IntoPrimitive, TryFromPrimitive};

pub mod error;
pub mod io;
pub mod mson;

mod config;
mod value;

pub use config::*;
pub use io::{from_bytes, from_reader, to_bytes, to_writer};
pub use value::*;

#[cfg(test)]
mod test;

/// An NBT tag type code. This does not carry the value or the name of the
/// data. The numbering is part of the binary format.
#[derive(
    Debug, PartialEq, Eq, Hash, Clone, Copy, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "arbitrary1", derive(arbitrary::Arbitrary))]
#[repr(u8)]
pub enum Tag {
    /// Closes a compound. Also the element type of lists that never held
    /// anything.
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    /// Length prefixed run of i8.
    ByteArray = 7,
    /// u16 length prefixed UTF-8.
    String = 8,
    /// Unnamed payloads that all share one element type.
    List = 9,
    /// Named tags up to an End.
    Compound = 10,
    IntArray = 11,
    LongArray = 12,
}

impl Tag {
    /// Lists and compounds. Everything else is rendered inline by the pretty
    /// printer.
    pub fn is_container(self) -> bool {
        matches!(self, Tag::List | Tag::Compound)
    }

    /// The conventional name of the tag, eg `TAG_Byte_Array`.
    pub fn name(self) -> &'static str {
        match self {
            Tag::End => "TAG_End",
            Tag::Byte => "TAG_Byte",
            Tag::Short => "TAG_Short",
            Tag::Int => "TAG_Int",
            Tag::Long => "TAG_Long",
            Tag::Float => "TAG_Float",
            Tag::Double => "TAG_Double",
            Tag::ByteArray => "TAG_Byte_Array",
            Tag::String => "TAG_String",
            Tag::List => "TAG_List",
            Tag::Compound => "TAG_Compound",
            Tag::IntArray => "TAG_Int_Array",
            Tag::LongArray => "TAG_Long_Array",
        }
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
