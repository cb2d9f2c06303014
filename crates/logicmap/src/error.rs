//! Error types for logicmap operations.
//!
//! This module provides the main error type [`LogicMapError`] which wraps
//! the error conditions that can occur while editing, persisting, or
//! exporting a map.

use std::io;

use thiserror::Error;

use logicmap_core::identifier::Id;
use logicmap_xml::XmlError;

/// The main error type for logicmap operations.
#[derive(Debug, Error)]
pub enum LogicMapError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("document error: {0}")]
    Xml(#[from] XmlError),

    #[error("no node with id `{0}`")]
    UnknownNode(Id),

    #[error("node `{0}` cannot be connected to itself")]
    SelfConnection(Id),

    #[error("`{parent}` is already connected to `{child}`")]
    DuplicateConnection { parent: Id, child: Id },

    #[error("node `{node}` has no reference with id `{reference}`")]
    UnknownReference { node: Id, reference: Id },

    #[error("a reference must have a non-empty link")]
    EmptyReferenceLink,

    #[error("attachment `{path}` does not exist")]
    MissingAttachment { path: String },

    #[error("export error: {0}")]
    Export(String),
}
