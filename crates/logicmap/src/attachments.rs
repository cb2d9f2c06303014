//! File attachments for bibliographic references.
//!
//! A reference may carry a local file (a PDF of the cited paper, say).
//! Attached files are copied into an `attachments/` directory beside the
//! document, one subdirectory per node, and the reference stores the
//! document-relative path. Copying keeps the document portable: moving
//! the document directory moves the attachments with it.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use logicmap_core::identifier::Id;

use crate::error::LogicMapError;

const ATTACHMENTS_DIR: &str = "attachments";

/// Manages attachment files under a document's root directory.
#[derive(Debug, Clone)]
pub struct AttachmentStore {
    root: PathBuf,
}

impl AttachmentStore {
    /// Creates a store rooted at the document's directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the document root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Copies a file into the attachment directory for a node and
    /// returns the document-relative path to store on the reference.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::MissingAttachment`] if the source file
    /// does not exist, and [`LogicMapError::Io`] if the copy fails.
    pub fn attach(&self, node: Id, source: impl AsRef<Path>) -> Result<String, LogicMapError> {
        let source = source.as_ref();
        if !source.is_file() {
            return Err(LogicMapError::MissingAttachment {
                path: source.display().to_string(),
            });
        }

        let file_name = source
            .file_name()
            .ok_or_else(|| LogicMapError::MissingAttachment {
                path: source.display().to_string(),
            })?;

        let node_dir = self.root.join(ATTACHMENTS_DIR).join(node.to_string());
        fs::create_dir_all(&node_dir)?;

        let destination = node_dir.join(file_name);
        fs::copy(source, &destination)?;
        info!(
            source:% = source.display(),
            destination:% = destination.display();
            "File attached"
        );

        let stored = PathBuf::from(ATTACHMENTS_DIR)
            .join(node.to_string())
            .join(file_name);
        Ok(stored.to_string_lossy().into_owned())
    }

    /// Resolves a stored attachment path to an absolute path.
    ///
    /// Documents written by older versions stored attachments in a flat
    /// `attachments/` directory with no node subdirectory; those resolve
    /// through a fallback lookup on the file name.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::MissingAttachment`] if the file exists in
    /// neither location.
    pub fn resolve(&self, stored: &str) -> Result<PathBuf, LogicMapError> {
        let direct = self.root.join(stored);
        if direct.is_file() {
            return Ok(direct);
        }

        if let Some(file_name) = Path::new(stored).file_name() {
            let flat = self.root.join(ATTACHMENTS_DIR).join(file_name);
            if flat.is_file() {
                debug!(path:% = flat.display(); "Attachment resolved via flat layout");
                return Ok(flat);
            }
        }

        Err(LogicMapError::MissingAttachment {
            path: stored.to_string(),
        })
    }

    /// Deletes an attachment file. Missing files are not an error: the
    /// goal state is the same either way.
    ///
    /// # Errors
    ///
    /// Returns [`LogicMapError::Io`] if the file exists but cannot be
    /// removed.
    pub fn detach(&self, stored: &str) -> Result<(), LogicMapError> {
        let path = self.root.join(stored);
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path:% = path.display(); "Attachment removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
