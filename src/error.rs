//! Contains the Error and Result type used by the binary codec and the
//! Mojangson parser and printer.

/// An error from reading or writing NBT or Mojangson. Every operation is all
/// or nothing: on error no partial tree is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The underlying reader or writer failed.
    Io,

    /// EOF that occurred part way through a name or payload.
    UnexpectedEof,

    /// A type code outside of 0 to 12.
    InvalidTag(u8),

    /// Expected unicode data but was not valid. Contained bytes are the
    /// invalid data.
    Nonunicode(Vec<u8>),

    /// Data that is well formed byte-wise but not a valid NBT tree, eg a
    /// top-level End tag, or nesting past the configured depth.
    Structure,

    /// Mojangson that does not follow the grammar.
    Syntax,

    /// A Mojangson list literal whose elements are not all of the same type.
    ListTypeMismatch,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Whether this came from malformed Mojangson text.
    pub fn is_syntax(&self) -> bool {
        matches!(self.kind, ErrorKind::Syntax | ErrorKind::ListTypeMismatch)
    }

    pub(crate) fn invalid_tag(tag: u8) -> Self {
        Self {
            msg: format!("invalid nbt tag value: {}", tag),
            kind: ErrorKind::InvalidTag(tag),
        }
    }

    pub(crate) fn nonunicode(data: Vec<u8>) -> Self {
        Self {
            msg: format!(
                "invalid nbt string: nonunicode: {}",
                String::from_utf8_lossy(&data)
            ),
            kind: ErrorKind::Nonunicode(data),
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self {
            msg: "eof: unexpectedly ran out of input".to_owned(),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn unexpected_eof_in(what: &str) -> Self {
        Self {
            msg: format!("eof: nbt ends inside a {}", what),
            kind: ErrorKind::UnexpectedEof,
        }
    }

    pub(crate) fn structure(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind: ErrorKind::Structure,
        }
    }

    pub(crate) fn depth_exceeded(max: usize) -> Self {
        Self::structure(format!("nbt nested deeper than the limit of {}", max))
    }

    /// A Mojangson error at byte offset `index` of `content`.
    pub(crate) fn syntax(msg: &str, content: &str, index: usize) -> Self {
        Self {
            msg: format!("{} at: {}", msg, error_location(content, index)),
            kind: ErrorKind::Syntax,
        }
    }

    pub(crate) fn list_type_mismatch(msg: &str, content: &str, index: usize) -> Self {
        Self {
            kind: ErrorKind::ListTypeMismatch,
            ..Self::syntax(msg, content, index)
        }
    }
}

/// Up to 35 characters before `index`, then a marker.
fn error_location(content: &str, index: usize) -> String {
    const CONTEXT: usize = 35;

    let mut end = index.min(content.len());
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let before = &content[..end];

    let mut loc = String::new();
    let count = before.chars().count();
    if count > CONTEXT {
        loc.push_str("...");
        loc.extend(before.chars().skip(count - CONTEXT));
    } else {
        loc.push_str(before);
    }
    loc.push_str("<--[HERE]");
    loc
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(_: std::fmt::Error) -> Self {
        Self {
            msg: "failed to format mojangson".to_owned(),
            kind: ErrorKind::Io,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::unexpected_eof(),
            _ => Self {
                msg: format!("io error: {}", e),
                kind: ErrorKind::Io,
            },
        }
    }
}
