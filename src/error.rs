// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

/// Lexical or syntax error raised while turning text into an attribute tree.
///
/// `position` is a zero-based char offset into the parsed text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("[attribs] Syntax Error at {position}: {message}")]
pub struct ParseError {
    pub position: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(position: usize, message: impl Into<String>) -> Self {
        ParseError {
            position,
            message: message.into(),
        }
    }
}

/// Raised while deriving a schema from a type description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("[attribs] Not a struct: {type_name}")]
    NotStruct { type_name: &'static str },

    #[error("[attribs] Unsupported type {type_name}: {reason}")]
    UnsupportedType {
        type_name: &'static str,
        reason: String,
    },

    #[error("[attribs] Invalid tag on field `{field}`: {message}")]
    InvalidTag { field: String, message: String },

    /// Two properties of one struct resolved to the same alias.
    #[error("[attribs] Duplicate field `{alias}` in {type_name}")]
    DuplicateField {
        type_name: &'static str,
        alias: String,
    },

    #[error("[attribs] Map key is not a string: {type_name}")]
    MapKeyNotString { type_name: &'static str },

    /// A schema node was read before its type finished building.
    #[error("[attribs] Schema for {type_name} is not complete")]
    Incomplete { type_name: &'static str },
}

/// Raised while projecting an attribute tree onto a schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("[attribs] Unknown attribute `{name}` at {position}")]
    UnknownAttribute { position: usize, name: String },

    #[error("[attribs] Invalid value for `{name}` at {position}: {reason}")]
    InvalidValue {
        position: usize,
        name: String,
        reason: String,
    },

    /// The destination storage cannot take the write the schema asked for.
    #[error("[attribs] Cannot store `{name}` at {position}: destination does not accept {expected}")]
    SlotMismatch {
        position: usize,
        name: String,
        expected: &'static str,
    },
}

impl BindError {
    pub fn position(&self) -> usize {
        match self {
            BindError::UnknownAttribute { position, .. }
            | BindError::InvalidValue { position, .. }
            | BindError::SlotMismatch { position, .. } => *position,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            BindError::UnknownAttribute { name, .. }
            | BindError::InvalidValue { name, .. }
            | BindError::SlotMismatch { name, .. } => name,
        }
    }
}

/// The main error type, covering every stage from text to typed value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Bind(#[from] BindError),
}

impl Error {
    /// Char offset of the offending input, when the error came from parsing or binding.
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Parse(e) => Some(e.position),
            Error::Bind(e) => Some(e.position()),
            Error::Schema(_) => None,
        }
    }
}
