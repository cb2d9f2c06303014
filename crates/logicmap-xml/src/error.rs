//! Error types for document reading and writing.

use std::io;

use thiserror::Error;

/// Errors produced while reading or writing the document format.
///
/// Optional fields never error: a missing width, file, or title falls back
/// to its default. These variants cover structurally broken documents and
/// values that cannot be interpreted at all.
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed document: {0}")]
    Parse(#[from] quick_xml::Error),

    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("element `{element}` is missing required attribute `{attribute}`")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("invalid value for `{attribute}` on `{element}`: {message}")]
    InvalidValue {
        element: &'static str,
        attribute: &'static str,
        message: String,
    },

    #[error("document has no `LogicMap` root element")]
    MissingRoot,

    #[error("document ended before `{element}` was closed")]
    UnexpectedEof { element: &'static str },
}
