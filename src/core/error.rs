//! Error types.
//!
//! Only precondition violations and document failures are errors.
//! Speculative move checks ("can this card go here?") return `bool` or
//! `Option` instead, since a UI calls them on every candidate drag.

use std::fmt;

/// Errors surfaced by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A caller-supplied argument violates an operation's precondition,
    /// e.g. dealing from a deck of the wrong size.
    InvalidArgument(String),
    /// A snapshot import was requested without a snapshot.
    NullState,
    /// The document is empty or not syntactically valid.
    Parse(String),
    /// The document is well-formed but yields no usable object.
    Deserialization(String),
}

impl Error {
    /// Short machine-readable code for hosts that forward errors.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidArgument(_) => "invalid_argument",
            Error::NullState => "null_state",
            Error::Parse(_) => "parse_error",
            Error::Deserialization(_) => "deserialization_error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::NullState => write!(f, "game state is null"),
            Error::Parse(msg) => write!(f, "parse error: {msg}"),
            Error::Deserialization(msg) => write!(f, "deserialization error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Map a serde_json failure onto the parse/deserialization split.
///
/// Syntax and EOF errors mean the text is malformed. Data errors mean it
/// parsed but does not describe the requested type.
pub(crate) fn from_json_error(err: serde_json::Error) -> Error {
    use serde_json::error::Category;

    match err.classify() {
        Category::Syntax | Category::Eof | Category::Io => Error::Parse(err.to_string()),
        Category::Data => Error::Deserialization(err.to_string()),
    }
}

/// Report a failed validation of a parsed document as unusable data.
pub(crate) fn into_deserialization(err: Error) -> Error {
    match err {
        Error::InvalidArgument(msg) => Error::Deserialization(msg),
        other => other,
    }
}

/// Reject empty or whitespace-only documents before handing them to serde.
pub(crate) fn ensure_not_blank(text: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(Error::Parse("document is empty".to_string()));
    }
    Ok(())
}
