//! Error adapter for converting LogicMapError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. Map
//! errors carry no source spans, so the adapter supplies codes and help
//! text only.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use logicmap::LogicMapError;

/// Adapter wrapping a [`LogicMapError`] for rendering by miette.
pub struct ErrorAdapter<'a>(pub &'a LogicMapError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            LogicMapError::Io(_) => "logicmap::io",
            LogicMapError::Xml(_) => "logicmap::document",
            LogicMapError::UnknownNode(_) | LogicMapError::UnknownReference { .. } => {
                "logicmap::lookup"
            }
            LogicMapError::SelfConnection(_) | LogicMapError::DuplicateConnection { .. } => {
                "logicmap::connection"
            }
            LogicMapError::EmptyReferenceLink => "logicmap::reference",
            LogicMapError::MissingAttachment { .. } => "logicmap::attachment",
            LogicMapError::Export(_) => "logicmap::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help: &str = match &self.0 {
            LogicMapError::Xml(_) => {
                "the input file is not a valid map document; was it written by another tool?"
            }
            LogicMapError::MissingAttachment { .. } => {
                "attachments live under the attachments/ directory next to the map file"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}
